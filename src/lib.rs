//! Frontier search for size sequences of shifted graphs without a matching.
//!
//! For a parameter `s`, every non-decreasing sequence of `s` edge counts is
//! checked: the sequence fails when some choice of one shifted graph per
//! declared size admits no system of distinct representatives. The maximal
//! failing sequences under componentwise domination form the frontier.
//!
//! ```
//! use shifted_matching::{Family, SearchConfig, run_search};
//!
//! let config = SearchConfig { s: 2, family: Family::Bipartite, workers: 2, show_progress: false };
//! let report = run_search(&config).unwrap();
//! let frontier: Vec<String> = report.frontier.iter().map(|s| s.to_string()).collect();
//! assert_eq!(frontier, ["1 3", "2 2"]);
//! ```

pub mod frontier;
pub mod generate;
pub mod graph;
pub mod io;
pub mod matching;
pub mod search;
pub mod sequence;
pub mod witness;

pub use frontier::DominanceFrontier;
pub use generate::{GraphCatalog, ShiftedGraphs};
pub use graph::{Edge, Family, ShiftedGraph};
pub use matching::{MatchingState, Verdict, find_matching, verify_matching};
pub use search::{SearchConfig, SearchReport, SearchStats, classify_sequence, run_search, search_catalog};
pub use sequence::{GraphSequences, SizeSequence, SizeSequences};
pub use witness::{CriticalCombination, Explanation, critical_combinations, explain_all, explain_frontier};
