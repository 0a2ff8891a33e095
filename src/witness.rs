//! Graph combinations that make a failing sequence fail.

use crate::frontier::DominanceFrontier;
use crate::generate::GraphCatalog;
use crate::graph::{Edge, ShiftedGraph};
use crate::matching::MatchingState;
use crate::sequence::{GraphSequences, SizeSequence, is_chain};
use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};

/// A graph combination with no matching whose every proper sub-list of one
/// graph fewer has one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CriticalCombination {
    pub sizes: SizeSequence,
    pub graphs: Vec<ShiftedGraph>,
    /// Matching of every graph except the last.
    pub near_matching: Vec<Edge>,
    /// Each graph lies inside the next one.
    pub nested: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Explanation {
    pub sequence: SizeSequence,
    pub critical: Vec<CriticalCombination>,
}

/// Collects the critical combinations of `sizes`.
pub fn critical_combinations(
    catalog: &GraphCatalog,
    sizes: &SizeSequence,
    nested_only: bool,
) -> Result<Vec<CriticalCombination>> {
    if sizes.len() != catalog.s() {
        bail!(
            "sequence {} has length {}, expected {}",
            sizes,
            sizes.len(),
            catalog.s()
        );
    }
    if let Some(&size) = sizes.iter().find(|&&k| k == 0 || k > catalog.max_size()) {
        bail!(
            "size {} in sequence {} is outside 1..={}",
            size,
            sizes,
            catalog.max_size()
        );
    }

    let mut state = MatchingState::new(catalog.family(), catalog.s());
    let mut combos = GraphSequences::new(sizes, catalog);
    if nested_only {
        combos = combos.nested();
    }

    let mut found = Vec::new();
    let mut rest: Vec<&ShiftedGraph> = Vec::with_capacity(sizes.len());
    while combos.advance() {
        let graphs = combos.current();
        let mut near_matching = Vec::new();
        let mut critical = true;
        for skip in 0..graphs.len() {
            rest.clear();
            rest.extend(
                graphs
                    .iter()
                    .enumerate()
                    .filter(|&(i, _)| i != skip)
                    .map(|(_, &g)| g),
            );
            if !state.solve(&rest).is_feasible() {
                critical = false;
                break;
            }
            if skip + 1 == graphs.len() {
                near_matching = state.witness().to_vec();
            }
        }
        if !critical || state.solve(graphs).is_feasible() {
            continue;
        }
        found.push(CriticalCombination {
            sizes: sizes.clone(),
            graphs: graphs.iter().map(|&g| g.clone()).collect(),
            near_matching,
            nested: is_chain(graphs),
        });
    }
    Ok(found)
}

/// [`critical_combinations`] for several sequences.
pub fn explain_all(
    catalog: &GraphCatalog,
    sequences: &[SizeSequence],
    nested_only: bool,
) -> Result<Vec<Explanation>> {
    sequences
        .iter()
        .map(|sequence| {
            Ok(Explanation {
                sequence: sequence.clone(),
                critical: critical_combinations(catalog, sequence, nested_only)?,
            })
        })
        .collect()
}

/// Reduces `sequences` to their frontier first, so only maximal failures
/// are explained, in ascending order.
pub fn explain_frontier(
    catalog: &GraphCatalog,
    sequences: Vec<SizeSequence>,
    nested_only: bool,
) -> Result<Vec<Explanation>> {
    let frontier: DominanceFrontier = sequences.into_iter().collect();
    let maximal: Vec<SizeSequence> = frontier.into_iter().collect();
    explain_all(catalog, &maximal, nested_only)
}
