use std::io::Cursor;

use anyhow::Result;
use shifted_matching::io::{read_parameter, read_sequences, write_frontier};
use shifted_matching::{
    DominanceFrontier, Family, GraphCatalog, MatchingState, SearchConfig, ShiftedGraph,
    SizeSequence, SizeSequences, Verdict, classify_sequence, critical_combinations, find_matching,
    run_search, search_catalog, verify_matching,
};

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

fn verdicts(catalog: &GraphCatalog) -> Vec<(SizeSequence, Verdict)> {
    let mut state = MatchingState::new(catalog.family(), catalog.s());
    SizeSequences::new(catalog.s(), 1, catalog.max_size())
        .map(|sizes| {
            let (verdict, _) = classify_sequence(catalog, &sizes, &mut state);
            (sizes, verdict)
        })
        .collect()
}

#[test]
fn feasibility_is_monotone_under_domination() -> Result<()> {
    for (family, s) in [(Family::Bipartite, 2), (Family::Bipartite, 3), (Family::General, 2)] {
        let catalog = GraphCatalog::build(family, s);
        let all = verdicts(&catalog);
        for (low, low_verdict) in &all {
            if !low_verdict.is_feasible() {
                continue;
            }
            for (high, high_verdict) in &all {
                if high.dominates(low) {
                    assert!(
                        high_verdict.is_feasible(),
                        "{family} s={s}: {low} feasible but {high} is not"
                    );
                }
            }
        }
    }
    Ok(())
}

#[test]
fn frontier_is_exactly_the_maximal_failures() -> Result<()> {
    let catalog = GraphCatalog::build(Family::Bipartite, 3);
    let failures: DominanceFrontier = verdicts(&catalog)
        .into_iter()
        .filter(|(_, verdict)| !verdict.is_feasible())
        .map(|(sizes, _)| sizes)
        .collect();
    let report = search_catalog(&catalog, &config(Family::Bipartite, 3, 3))?;
    assert_eq!(report.frontier, failures);
    assert!(report.frontier.is_antichain());
    assert_eq!(
        report.frontier.iter().map(ToString::to_string).collect::<Vec<_>>(),
        [
            "1 5 9", "1 6 8", "2 5 8", "2 7 7", "3 3 9", "3 5 7", "4 4 7", "6 6 6"
        ]
    );
    Ok(())
}

#[test]
fn repeated_runs_agree() -> Result<()> {
    let first = run_search(&config(Family::General, 2, 4))?;
    let second = run_search(&config(Family::General, 2, 1))?;
    assert_eq!(first.frontier, second.frontier);
    assert_eq!(first.stats.sequences_total, second.stats.sequences_total);
    Ok(())
}

#[test]
fn critical_combinations_of_the_frontier_are_minimal() -> Result<()> {
    let catalog = GraphCatalog::build(Family::Bipartite, 3);
    let report = search_catalog(&catalog, &config(Family::Bipartite, 3, 2))?;
    let mut explained = Vec::new();
    for sizes in report.frontier.iter() {
        let critical = critical_combinations(&catalog, sizes, false)?;
        for combo in &critical {
            let graphs: Vec<&ShiftedGraph> = combo.graphs.iter().collect();
            assert_eq!(find_matching(&graphs), None, "{sizes}");
            for skip in 0..graphs.len() {
                let mut rest = graphs.clone();
                rest.remove(skip);
                assert!(find_matching(&rest).is_some(), "{sizes} without {skip}");
            }
            let head = &graphs[..graphs.len() - 1];
            assert!(verify_matching(head, &combo.near_matching), "{sizes}");
        }
        if !critical.is_empty() {
            explained.push(sizes.to_string());
        }
    }
    // `1 5 9` and `3 3 9` only fail through a failing sub-list
    assert_eq!(
        explained,
        ["1 6 8", "2 5 8", "2 7 7", "3 5 7", "4 4 7", "6 6 6"]
    );
    Ok(())
}

#[test]
fn text_round_trip_through_minimize() -> Result<()> {
    let mut input = Cursor::new("2\n1 1\n1 2\n1 3\n2 2\n");
    let s = read_parameter(&mut input)?;
    assert_eq!(s, 2);
    let frontier: DominanceFrontier = read_sequences(input)?.into_iter().collect();
    assert!(frontier.contains(&seq(&[1, 3])));
    let mut out = Vec::new();
    write_frontier(&mut out, &frontier)?;
    assert_eq!(String::from_utf8(out)?, "1 3\n2 2\n");
    Ok(())
}
