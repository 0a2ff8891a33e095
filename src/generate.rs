use crate::graph::{Family, ShiftedGraph};
use rayon::prelude::*;

// =============== staircase enumeration ===============

/// One pending level of the breakpoint recursion.
#[derive(Debug, Clone)]
struct Frame {
    current_x: usize,
    max_y: usize,
    budget: Option<usize>,
    x: usize,
    y: usize,
}

enum Step {
    Leaf,
    Dead,
    Inner,
}

/// Lazy, non-restartable enumeration of the shifted graphs of a family.
///
/// The bipartite family is enumerated without an edge budget and every
/// breakpoint chain runs until it reaches column `s` or row 1. The general
/// family is enumerated for an exact edge count, pruning a breakpoint as soon
/// as [`Family::new_edges`] exceeds what is left of the budget.
pub struct ShiftedGraphs {
    family: Family,
    s: usize,
    path: Vec<(usize, usize)>,
    stack: Vec<Frame>,
    pending: Option<ShiftedGraph>,
}

impl ShiftedGraphs {
    /// Every bipartite shifted graph on `s × s`.
    pub fn bipartite(s: usize) -> Self {
        Self::start(Family::Bipartite, s, s, None)
    }

    /// Every general shifted graph on `1..=2s` with exactly `edges` edges.
    pub fn with_edges(s: usize, edges: usize) -> Self {
        Self::start(Family::General, s, 2 * s, Some(edges))
    }

    fn start(family: Family, s: usize, max_y: usize, budget: Option<usize>) -> Self {
        let mut this = Self {
            family,
            s,
            path: Vec::new(),
            stack: Vec::new(),
            pending: None,
        };
        match this.classify(1, max_y, budget) {
            Step::Leaf => this.pending = Some(this.realize()),
            Step::Dead => {}
            Step::Inner => this.stack.push(Frame::new(1, max_y, budget)),
        }
        this
    }

    fn classify(&self, current_x: usize, max_y: usize, budget: Option<usize>) -> Step {
        match budget {
            None if current_x > self.s || max_y == 0 => Step::Leaf,
            None => Step::Inner,
            Some(0) => Step::Leaf,
            Some(_) if current_x <= self.family.max_x(self.s) => Step::Inner,
            Some(_) => Step::Dead,
        }
    }

    fn realize(&self) -> ShiftedGraph {
        ShiftedGraph::new(self.family, self.s, self.path.clone())
    }

    /// Next admissible breakpoint of `frame`, with the budget left after it.
    fn candidate(family: Family, s: usize, frame: &mut Frame) -> Option<(usize, usize, Option<usize>)> {
        let last_x = match frame.budget {
            None => family.max_x(s),
            Some(budget) => family.max_x(s).min(frame.current_x + budget),
        };
        while frame.x <= last_x {
            let (x, y) = (frame.x, frame.y);
            let y_limit = match family {
                Family::Bipartite => frame.max_y,
                Family::General => frame.max_y.min(x - 1),
            };
            if y <= y_limit {
                match frame.budget {
                    None => {
                        frame.y += 1;
                        return Some((x, y, None));
                    }
                    Some(budget) => {
                        let added = family.new_edges(frame.current_x, x, y);
                        // larger y only adds more edges
                        if added <= budget {
                            frame.y += 1;
                            return Some((x, y, Some(budget - added)));
                        }
                    }
                }
            }
            frame.x += 1;
            frame.y = 1;
        }
        None
    }
}

impl Frame {
    fn new(current_x: usize, max_y: usize, budget: Option<usize>) -> Self {
        Self {
            current_x,
            max_y,
            budget,
            x: current_x,
            y: 1,
        }
    }
}

impl Iterator for ShiftedGraphs {
    type Item = ShiftedGraph;

    fn next(&mut self) -> Option<ShiftedGraph> {
        if let Some(graph) = self.pending.take() {
            return Some(graph);
        }
        loop {
            let (family, s) = (self.family, self.s);
            let frame = self.stack.last_mut()?;
            match Self::candidate(family, s, frame) {
                Some((x, y, budget)) => {
                    self.path.push((x, y));
                    match self.classify(x + 1, y - 1, budget) {
                        Step::Leaf => {
                            let graph = self.realize();
                            self.path.pop();
                            return Some(graph);
                        }
                        Step::Dead => {
                            self.path.pop();
                        }
                        Step::Inner => self.stack.push(Frame::new(x + 1, y - 1, budget)),
                    }
                }
                None => {
                    self.stack.pop();
                    // the root frame has no breakpoint of its own
                    if !self.stack.is_empty() {
                        self.path.pop();
                    }
                }
            }
        }
    }
}

// =============== catalog by edge count ===============

/// Every graph of a family, grouped by exact edge count.
#[derive(Debug, Clone)]
pub struct GraphCatalog {
    family: Family,
    s: usize,
    by_size: Vec<Vec<ShiftedGraph>>,
}

impl GraphCatalog {
    pub fn build(family: Family, s: usize) -> Self {
        let max_size = family.max_size(s);
        let by_size = match family {
            Family::Bipartite => {
                let mut by_size = vec![Vec::new(); max_size + 1];
                for graph in ShiftedGraphs::bipartite(s) {
                    by_size[graph.edge_count].push(graph);
                }
                by_size
            }
            Family::General => (0..=max_size)
                .into_par_iter()
                .map(|k| {
                    if k == 0 {
                        Vec::new()
                    } else {
                        ShiftedGraphs::with_edges(s, k).collect()
                    }
                })
                .collect(),
        };
        Self { family, s, by_size }
    }

    pub fn family(&self) -> Family {
        self.family
    }

    pub fn s(&self) -> usize {
        self.s
    }

    pub fn max_size(&self) -> usize {
        self.by_size.len().saturating_sub(1)
    }

    /// Graphs with exactly `size` edges; empty past the largest size.
    pub fn graphs(&self, size: usize) -> &[ShiftedGraph] {
        self.by_size.get(size).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.by_size.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
