use crate::graph::{Edge, Family, ShiftedGraph};
use serde::{Deserialize, Serialize};

/// Outcome of a matching attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    Feasible,
    Infeasible,
}

impl Verdict {
    pub fn is_feasible(self) -> bool {
        self == Verdict::Feasible
    }
}

/// Used-vertex markers for one matching attempt plus the witness it found.
///
/// Bipartite `y` coordinates get their own slots after the `x` side. In the
/// general family both coordinates index the same vertex range.
#[derive(Debug, Clone)]
pub struct MatchingState {
    used: Vec<bool>,
    y_offset: usize,
    witness: Vec<Edge>,
}

impl MatchingState {
    pub fn new(family: Family, s: usize) -> Self {
        let side = family.max_x(s) + 1;
        let (slots, y_offset) = match family {
            Family::Bipartite => (2 * side, side),
            Family::General => (side, 0),
        };
        Self {
            used: vec![false; slots],
            y_offset,
            witness: Vec::new(),
        }
    }

    pub fn reset(&mut self) {
        self.used.fill(false);
        self.witness.clear();
    }

    /// Decides whether one edge per graph can be picked with no `x` or `y`
    /// coordinate picked twice.
    ///
    /// Search is exhaustive and deterministic. After [`Verdict::Feasible`],
    /// [`MatchingState::witness`] holds the chosen edges in input order.
    pub fn solve(&mut self, graphs: &[&ShiftedGraph]) -> Verdict {
        self.reset();
        if self.extend(graphs) {
            self.witness.reverse();
            Verdict::Feasible
        } else {
            Verdict::Infeasible
        }
    }

    pub fn witness(&self) -> &[Edge] {
        &self.witness
    }

    fn extend(&mut self, graphs: &[&ShiftedGraph]) -> bool {
        let Some((graph, rest)) = graphs.split_first() else {
            return true;
        };
        for (x, height) in graph.columns() {
            if self.used[x] {
                continue;
            }
            for y in 1..=height {
                let y_slot = y + self.y_offset;
                if self.used[y_slot] {
                    continue;
                }
                self.used[x] = true;
                self.used[y_slot] = true;
                let found = self.extend(rest);
                self.used[x] = false;
                self.used[y_slot] = false;
                if found {
                    self.witness.push((x, y));
                    return true;
                }
            }
        }
        false
    }
}

/// Convenience wrapper returning the witness directly. An empty list is
/// matched by the empty witness.
pub fn find_matching(graphs: &[&ShiftedGraph]) -> Option<Vec<Edge>> {
    let Some(first) = graphs.first() else {
        return Some(Vec::new());
    };
    let mut state = MatchingState::new(first.family, first.s);
    state
        .solve(graphs)
        .is_feasible()
        .then(|| state.witness().to_vec())
}

/// Independent check of a witness: one edge per graph, every edge taken from
/// its own graph, no coordinate reused.
pub fn verify_matching(graphs: &[&ShiftedGraph], witness: &[Edge]) -> bool {
    if graphs.len() != witness.len() {
        return false;
    }
    let mut xs = Vec::with_capacity(witness.len());
    let mut ys = Vec::with_capacity(witness.len());
    for (graph, &edge) in graphs.iter().zip(witness) {
        if !graph.contains_edge(edge) {
            return false;
        }
        xs.push(edge.0);
        ys.push(edge.1);
    }
    let shared = graphs.first().is_some_and(|g| g.family == Family::General);
    if shared {
        xs.append(&mut ys);
    }
    distinct(&mut xs) && distinct(&mut ys)
}

fn distinct(values: &mut [usize]) -> bool {
    values.sort_unstable();
    values.windows(2).all(|w| w[0] != w[1])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate::GraphCatalog;
    use crate::sequence::{GraphSequences, SizeSequence, SizeSequences};

    fn bip(antipath: Vec<(usize, usize)>) -> ShiftedGraph {
        ShiftedGraph::new(Family::Bipartite, 2, antipath)
    }

    #[test]
    fn empty_list_is_trivially_matched() {
        let mut state = MatchingState::new(Family::Bipartite, 2);
        assert_eq!(state.solve(&[]), Verdict::Feasible);
        assert!(state.witness().is_empty());
        assert_eq!(find_matching(&[]), Some(vec![]));
        assert!(verify_matching(&[], &[]));
    }

    #[test]
    fn single_corner_graphs_collide() {
        let corner = bip(vec![(1, 1)]);
        let mut state = MatchingState::new(Family::Bipartite, 2);
        assert_eq!(state.solve(&[&corner]), Verdict::Feasible);
        assert_eq!(state.witness(), &[(1, 1)]);
        assert_eq!(state.solve(&[&corner, &corner]), Verdict::Infeasible);
        assert!(state.witness().is_empty());
    }

    #[test]
    fn backtracks_past_the_first_edge() {
        let column = bip(vec![(2, 1)]);
        let hook = bip(vec![(1, 2), (2, 1)]);
        let graphs = [&column, &hook];
        let witness = find_matching(&graphs).unwrap();
        // (1, 1) blocks the hook, so the column must take (2, 1)
        assert_eq!(witness, vec![(2, 1), (1, 2)]);
        assert!(verify_matching(&graphs, &witness));
    }

    #[test]
    fn witness_is_stable_across_calls() {
        let catalog = GraphCatalog::build(Family::Bipartite, 3);
        let sizes = SizeSequence::new(vec![4, 5, 6]);
        let mut state = MatchingState::new(Family::Bipartite, 3);
        for combo in GraphSequences::new(&sizes, &catalog) {
            if state.solve(&combo).is_feasible() {
                let first = state.witness().to_vec();
                state.solve(&combo);
                assert_eq!(state.witness(), first.as_slice());
            }
        }
    }

    #[test]
    fn general_family_shares_one_vertex_range() {
        // every edge of `b` touches vertex 1 or 2, both taken by `a`
        let a = ShiftedGraph::new(Family::General, 2, vec![(2, 1)]);
        let b = ShiftedGraph::new(Family::General, 2, vec![(3, 2)]);
        let complete = ShiftedGraph::new(Family::General, 2, vec![(4, 3)]);
        assert_eq!(find_matching(&[&a, &b]), None);

        let graphs = [&a, &complete];
        let witness = find_matching(&graphs).unwrap();
        assert_eq!(witness, vec![(2, 1), (4, 3)]);
        assert!(verify_matching(&graphs, &witness));
        assert!(!verify_matching(&[&a, &b], &[(2, 1), (3, 2)]));
        assert!(!verify_matching(&[&a, &b], &[(2, 1), (3, 1)]));
    }

    #[test]
    fn every_witness_is_valid() {
        for family in [Family::Bipartite, Family::General] {
            let catalog = GraphCatalog::build(family, 2);
            let mut state = MatchingState::new(family, 2);
            for sizes in SizeSequences::new(2, 1, catalog.max_size()) {
                let mut combos = GraphSequences::new(&sizes, &catalog);
                while combos.advance() {
                    if state.solve(combos.current()).is_feasible() {
                        assert!(verify_matching(combos.current(), state.witness()), "{family} {sizes}");
                    }
                }
            }
        }
    }

    #[test]
    fn verify_rejects_foreign_and_reused_edges() {
        let hook = bip(vec![(1, 2), (2, 1)]);
        let full = bip(vec![(2, 2)]);
        assert!(verify_matching(&[&hook, &full], &[(1, 2), (2, 1)]));
        assert!(!verify_matching(&[&hook, &full], &[(2, 2), (1, 1)]));
        assert!(!verify_matching(&[&hook, &full], &[(1, 1), (1, 2)]));
        assert!(!verify_matching(&[&hook, &full], &[(1, 1)]));
    }
}
