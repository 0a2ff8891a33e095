//! Parallel frontier search over size sequences.

use crate::frontier::DominanceFrontier;
use crate::generate::GraphCatalog;
use crate::graph::Family;
use crate::matching::{MatchingState, Verdict};
use crate::sequence::{GraphSequences, SizeSequence, SizeSequences};
use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info, trace};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Search parameters.
///
/// `Default` fills in `s = 3` only as a placeholder; the CLI overwrites it
/// with the parameter read from stdin.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Vertex budget and sequence length.
    pub s: usize,
    pub family: Family,
    /// Requested worker count, clamped to the number of sequences.
    pub workers: usize,
    pub show_progress: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        let workers = std::thread::available_parallelism()
            .map(std::num::NonZero::get)
            .unwrap_or(1);
        Self {
            s: 3,
            family: Family::Bipartite,
            workers,
            show_progress: true,
        }
    }
}

/// Counters gathered by the workers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStats {
    pub workers: usize,
    pub sequences_total: usize,
    pub sequences_tested: usize,
    pub sequences_skipped: usize,
    pub combinations_tested: usize,
    pub counterexamples: usize,
}

impl SearchStats {
    fn absorb(&mut self, other: &SearchStats) {
        self.sequences_tested += other.sequences_tested;
        self.sequences_skipped += other.sequences_skipped;
        self.combinations_tested += other.combinations_tested;
        self.counterexamples += other.counterexamples;
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchReport {
    pub frontier: DominanceFrontier,
    pub stats: SearchStats,
}

/// Tests every graph combination of `sizes`.
///
/// The sequence fails as soon as one combination admits no matching.
/// Returns the verdict and the number of combinations tested.
pub fn classify_sequence(
    catalog: &GraphCatalog,
    sizes: &SizeSequence,
    state: &mut MatchingState,
) -> (Verdict, usize) {
    let mut combos = GraphSequences::new(sizes, catalog);
    let mut tested = 0;
    while combos.advance() {
        tested += 1;
        if !state.solve(combos.current()).is_feasible() {
            return (Verdict::Infeasible, tested);
        }
    }
    (Verdict::Feasible, tested)
}

/// Builds the catalog and runs the search.
pub fn run_search(config: &SearchConfig) -> Result<SearchReport> {
    let started = Instant::now();
    let catalog = GraphCatalog::build(config.family, config.s);
    info!(
        "Catalog for {} family, s = {}: {} graphs, sizes 1..={} ({:.2?})",
        config.family,
        config.s,
        catalog.len(),
        catalog.max_size(),
        started.elapsed()
    );
    search_catalog(&catalog, config)
}

/// Runs the search over an already built catalog.
///
/// `config.s` and `config.family` must describe `catalog`.
pub fn search_catalog(catalog: &GraphCatalog, config: &SearchConfig) -> Result<SearchReport> {
    anyhow::ensure!(
        config.s == catalog.s() && config.family == catalog.family(),
        "search config ({} family, s = {}) does not match the catalog ({} family, s = {})",
        config.family,
        config.s,
        catalog.family(),
        catalog.s()
    );
    let started = Instant::now();
    let sequences: Vec<SizeSequence> =
        SizeSequences::new(catalog.s(), 1, catalog.max_size()).collect();
    let workers = config.workers.clamp(1, sequences.len().max(1));
    info!(
        "Searching {} size sequences with {} workers",
        sequences.len(),
        workers
    );

    let pb = if config.show_progress {
        let pb = ProgressBar::new(sequences.len() as u64);
        pb.set_style(
            ProgressStyle::with_template(
                "[search] [{elapsed_precise}] {wide_bar:.cyan/blue} {pos}/{len} {msg}",
            )
            .context("build progress bar template")?,
        );
        pb
    } else {
        ProgressBar::hidden()
    };

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .build()
        .context("build search thread pool")?;
    let outcomes: Vec<(DominanceFrontier, SearchStats)> = pool.install(|| {
        (0..workers)
            .into_par_iter()
            .map(|worker_id| run_worker(worker_id, workers, &sequences, catalog, &pb))
            .collect()
    });
    pb.finish_with_message("done");

    let mut frontier = DominanceFrontier::new();
    let mut stats = SearchStats {
        workers,
        sequences_total: sequences.len(),
        ..SearchStats::default()
    };
    for (local, local_stats) in outcomes {
        stats.absorb(&local_stats);
        frontier.merge(local);
    }
    info!(
        "Search finished in {:.2?}: {} tested, {} skipped, {} combinations, frontier size {}",
        started.elapsed(),
        stats.sequences_tested,
        stats.sequences_skipped,
        stats.combinations_tested,
        frontier.len()
    );
    Ok(SearchReport { frontier, stats })
}

/// Worker `worker_id` takes every `workers`-th sequence, largest first.
fn run_worker(
    worker_id: usize,
    workers: usize,
    sequences: &[SizeSequence],
    catalog: &GraphCatalog,
    pb: &ProgressBar,
) -> (DominanceFrontier, SearchStats) {
    let mut frontier = DominanceFrontier::new();
    let mut stats = SearchStats::default();
    let mut state = MatchingState::new(catalog.family(), catalog.s());

    for sizes in sequences.iter().rev().skip(worker_id).step_by(workers) {
        pb.inc(1);
        if frontier.is_subsumed(sizes) {
            stats.sequences_skipped += 1;
            continue;
        }
        stats.sequences_tested += 1;
        let (verdict, tested) = classify_sequence(catalog, sizes, &mut state);
        stats.combinations_tested += tested;
        if frontier.consider(sizes.clone(), verdict) {
            stats.counterexamples += 1;
            trace!("[worker {worker_id}] no matching for {sizes}");
        }
    }

    debug!(
        "[worker {}] tested {}, skipped {}, local frontier {}",
        worker_id,
        stats.sequences_tested,
        stats.sequences_skipped,
        frontier.len()
    );
    (frontier, stats)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(family: Family, s: usize, workers: usize) -> SearchConfig {
        SearchConfig {
            s,
            family,
            workers,
            show_progress: false,
        }
    }

    fn seq(values: &[usize]) -> SizeSequence {
        SizeSequence::new(values.to_vec())
    }

    #[test]
    fn s_one_has_no_counterexample() {
        for family in [Family::Bipartite, Family::General] {
            let report = run_search(&config(family, 1, 4)).unwrap();
            assert!(report.frontier.is_empty(), "{family}");
            assert_eq!(report.stats.workers, 1);
            assert_eq!(report.stats.sequences_total, 1);
        }
    }

    #[test]
    fn bipartite_two_frontier() {
        let report = run_search(&config(Family::Bipartite, 2, 1)).unwrap();
        assert_eq!(
            report.frontier.into_iter().collect::<Vec<_>>(),
            vec![seq(&[1, 3]), seq(&[2, 2])]
        );
        assert_eq!(report.stats.sequences_total, 10);
        assert_eq!(
            report.stats.sequences_tested + report.stats.sequences_skipped,
            10
        );
    }

    #[test]
    fn general_two_frontier() {
        let report = run_search(&config(Family::General, 2, 2)).unwrap();
        assert_eq!(
            report.frontier.into_iter().collect::<Vec<_>>(),
            vec![seq(&[1, 5]), seq(&[2, 4]), seq(&[3, 3])]
        );
    }

    #[test]
    fn frontier_does_not_depend_on_worker_count() {
        let catalog = GraphCatalog::build(Family::Bipartite, 3);
        let single = search_catalog(&catalog, &config(Family::Bipartite, 3, 1)).unwrap();
        for workers in [2, 3, 8] {
            let split = search_catalog(&catalog, &config(Family::Bipartite, 3, workers)).unwrap();
            assert_eq!(split.frontier, single.frontier, "workers = {workers}");
            assert!(split.frontier.is_antichain());
        }
    }

    #[test]
    fn mismatched_config_is_rejected() {
        let catalog = GraphCatalog::build(Family::Bipartite, 2);
        assert!(search_catalog(&catalog, &config(Family::Bipartite, 3, 1)).is_err());
        assert!(search_catalog(&catalog, &config(Family::General, 2, 1)).is_err());
        assert!(search_catalog(&catalog, &config(Family::Bipartite, 2, 1)).is_ok());
    }

    #[test]
    fn default_config_uses_every_core() {
        let config = SearchConfig::default();
        assert_eq!(config.s, 3);
        assert_eq!(config.family, Family::Bipartite);
        assert!(config.workers >= 1);
        assert!(config.show_progress);
    }

    #[test]
    fn classify_short_circuits_on_first_failure() {
        let catalog = GraphCatalog::build(Family::Bipartite, 2);
        let mut state = MatchingState::new(Family::Bipartite, 2);
        assert_eq!(
            classify_sequence(&catalog, &seq(&[1, 1]), &mut state),
            (Verdict::Infeasible, 1)
        );
        assert_eq!(
            classify_sequence(&catalog, &seq(&[3, 3]), &mut state),
            (Verdict::Feasible, 1)
        );
    }
}
