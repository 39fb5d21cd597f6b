//! Engine-level tests for the ELECTRE pipeline.

use std::sync::Arc;

use outrank_core::{DecisionProblem, Direction, OutrankError, PairMatrix};
use outrank_test::{arb_problem, fixtures};
use proptest::prelude::*;

use super::*;
use crate::event::{RecordingStageListener, StageEvent};

fn run(problem: DecisionProblem) -> OutrankingEngine {
    let mut engine = OutrankingEngine::configured(problem).unwrap();
    engine.run().unwrap();
    engine
}

#[test]
fn test_single_criterion_min_kernel() {
    let engine = run(fixtures::single_criterion_min());

    assert_eq!(engine.kernel().unwrap(), &[true, false, false]);
    assert_eq!(engine.kernel_members().unwrap(), vec![0]);
    let dominance = engine.dominance().unwrap();
    assert!(dominance.has_edge(0, 1));
    assert!(dominance.has_edge(0, 2));
    assert!(dominance.has_edge(2, 1));
    assert!(engine.outcome().unwrap().cycles.is_empty());
}

#[test]
fn test_mutual_pair_keeps_first_edge() {
    let engine = run(fixtures::mutual_pair());
    let outcome = engine.outcome().unwrap();

    assert_eq!(outcome.raw_dominance.edge_count(), 2);
    assert_eq!(outcome.cycles, vec![Cycle::from_slice(&[0, 1])]);
    assert_eq!(outcome.breaks[0].kept, (0, 1));
    assert_eq!(outcome.dominance.matrix().true_pairs(), vec![(0, 1)]);
    assert_eq!(outcome.kernel, vec![true, false]);
}

#[test]
fn test_three_cycle_keeps_strongest_edge() {
    let engine = run(fixtures::three_cycle());
    let outcome = engine.outcome().unwrap();

    assert_eq!(outcome.cycles, vec![Cycle::from_slice(&[0, 2, 1])]);
    assert_eq!(outcome.breaks[0].kept, (1, 0));
    assert_eq!(outcome.breaks[0].removed, vec![(0, 2), (2, 1)]);
    assert_eq!(outcome.removed_edge_count(), 2);
    assert_eq!(outcome.kernel, vec![false, true, true]);
}

#[test]
fn test_recycling_breaks_overlapping_cycles() {
    let engine = run(fixtures::recycling());
    let outcome = engine.outcome().unwrap();

    assert_eq!(
        outcome.cycles,
        vec![Cycle::from_slice(&[2, 3, 4]), Cycle::from_slice(&[3, 4])]
    );
    assert_eq!(outcome.breaks[0].kept, (4, 2));
    // kept edge of the second cycle was already removed by the first break
    assert_eq!(outcome.breaks[1].kept, (3, 4));
    assert!(!outcome.dominance.has_edge(3, 4));
    assert!(!outcome.dominance.has_edge(4, 3));
    assert_eq!(engine.kernel_members().unwrap(), vec![3, 4]);
}

#[test]
fn test_redetection_finds_no_broken_cycle() {
    for problem in [
        fixtures::mutual_pair(),
        fixtures::three_cycle(),
        fixtures::recycling(),
    ] {
        let engine = run(problem);
        let outcome = engine.outcome().unwrap();
        let again = outcome.dominance.detect_cycles(DEFAULT_MAX_CYCLES).unwrap();
        for cycle in &again {
            assert!(outcome
                .cycles
                .iter()
                .all(|broken| broken.member_key() != cycle.member_key()));
        }
    }
}

#[test]
fn test_accessors_fail_before_run() {
    let engine = OutrankingEngine::configured(fixtures::single_criterion_min()).unwrap();

    assert!(matches!(engine.kernel(), Err(OutrankError::NotRun)));
    assert!(matches!(engine.concordance(), Err(OutrankError::NotRun)));
    assert!(matches!(engine.non_discordance(), Err(OutrankError::NotRun)));
    assert!(matches!(engine.dominance(), Err(OutrankError::NotRun)));
    assert!(engine.summary().is_none());
}

#[test]
fn test_invalid_configure_leaves_engine_unchanged() {
    let mut engine = run(fixtures::single_criterion_min());

    let bad = fixtures::single_criterion_min().with_vetos(vec![1.0, 2.0]);
    let err = engine.configure(bad).unwrap_err();

    assert!(matches!(err, OutrankError::Configuration(_)));
    assert_eq!(engine.problem(), &fixtures::single_criterion_min());
    assert!(engine.kernel().is_ok());
}

#[test]
fn test_threshold_above_total_weight_is_rejected() {
    let problem = fixtures::single_criterion_min().with_concordance_threshold(1.5);
    assert!(matches!(
        OutrankingEngine::configured(problem),
        Err(OutrankError::Configuration(_))
    ));
}

#[test]
fn test_cycle_cap_fails_run_without_kernel() {
    let recorder = Arc::new(RecordingStageListener::new());
    let mut engine = OutrankingEngine::configured(fixtures::mutual_pair())
        .unwrap()
        .with_options(EngineOptions::default().with_max_cycles(0));
    engine.add_listener(recorder.clone());

    let err = engine.run().unwrap_err();

    assert!(matches!(err, OutrankError::TooManyCycles { limit: 0 }));
    assert!(matches!(engine.kernel(), Err(OutrankError::NotRun)));
    assert!(!recorder.stages_started().contains(&Stage::Kernel));
    assert_eq!(
        recorder.events().last(),
        Some(&StageEvent::RunEnded {
            algorithm: "ELECTRE".to_string(),
            succeeded: false,
        })
    );
}

#[test]
fn test_stage_sequence_is_reported() {
    let recorder = Arc::new(RecordingStageListener::new());
    let mut engine = OutrankingEngine::configured(fixtures::three_cycle()).unwrap();
    engine.add_listener(recorder.clone());
    engine.run().unwrap();

    assert_eq!(recorder.stages_started(), Stage::ELECTRE.to_vec());
    assert_eq!(recorder.stages_ended(), Stage::ELECTRE.to_vec());
    assert_eq!(
        recorder.events().first(),
        Some(&StageEvent::RunStarted {
            algorithm: "ELECTRE".to_string(),
            alternatives: 3,
            criteria: 3,
        })
    );
}

#[test]
fn test_save_writes_kernel_csv() {
    let tmp = tempfile::tempdir().unwrap();
    let engine = run(fixtures::single_criterion_min());

    let path = engine.save(tmp.path()).unwrap();

    assert_eq!(path, tmp.path().join("Electre").join("kernel.csv"));
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "1,0,0\n");
}

#[test]
fn test_save_before_run_fails() {
    let tmp = tempfile::tempdir().unwrap();
    let engine = OutrankingEngine::configured(fixtures::mutual_pair()).unwrap();
    assert!(matches!(engine.save(tmp.path()), Err(OutrankError::NotRun)));
    assert!(!tmp.path().join("Electre").exists());
}

#[test]
fn test_failed_save_keeps_result() {
    let tmp = tempfile::tempdir().unwrap();
    let blocker = tmp.path().join("taken");
    std::fs::write(&blocker, "").unwrap();
    let engine = run(fixtures::single_criterion_min());

    assert!(matches!(engine.save(&blocker), Err(OutrankError::Export { .. })));
    assert_eq!(engine.kernel().unwrap(), &[true, false, false]);
}

#[test]
fn test_decision_algorithm_setters() {
    let mut engine: Box<dyn DecisionAlgorithm> = Box::new(OutrankingEngine::new());
    engine.set_data(vec![vec![3.0, 1.0], vec![1.0, 3.0], vec![0.0, 0.0]]);
    engine.set_weights(vec![0.5, 0.5]);
    engine.run().unwrap();

    // vetos default to disabled and the threshold to zero
    assert!(engine.summary().unwrap().starts_with("kernel ["));
    assert_eq!(engine.save(tempfile::tempdir().unwrap().path()).unwrap().len(), 1);
}

#[test]
fn test_setters_clear_previous_result() {
    let mut engine = run(fixtures::single_criterion_min());
    DecisionAlgorithm::set_data(&mut engine, vec![vec![1.0], vec![2.0], vec![3.0]]);
    assert!(matches!(engine.kernel(), Err(OutrankError::NotRun)));
}

#[test]
fn test_partial_credit_changes_dominance() {
    // 0 is slightly better; with a wide threshold 1 still collects most credit
    let problem = DecisionProblem::new(vec![vec![10.0], vec![11.0]], vec![1.0])
        .with_directions(vec![Direction::Minimize])
        .with_preference_thresholds(vec![4.0])
        .with_concordance_threshold(0.7);
    let engine = run(problem);

    assert_eq!(engine.concordance().unwrap()[(1, 0)], 0.75);
    let outcome = engine.outcome().unwrap();
    assert!(outcome.raw_dominance.has_edge(1, 0));
    assert!(outcome.raw_dominance.has_edge(0, 1));
    // the stronger edge 0 -> 1 survives cycle breaking
    assert_eq!(outcome.dominance.matrix().true_pairs(), vec![(0, 1)]);
    assert_eq!(engine.kernel().unwrap(), &[true, false]);
}

/// Plain path search without pruning, for comparison.
fn naive_cycles(graph: &DominanceGraph) -> Vec<Cycle> {
    fn walk(graph: &DominanceGraph, vertex: usize, path: &[usize], out: &mut Vec<Cycle>) {
        if let Some(i) = path.iter().position(|&v| v == vertex) {
            out.push(Cycle::from_slice(&path[i..]));
            return;
        }
        let mut next_path = path.to_vec();
        next_path.push(vertex);
        for next in graph.successors(vertex) {
            walk(graph, next, &next_path, out);
        }
    }

    let mut found: Vec<Cycle> = Vec::new();
    for start in 0..graph.size() {
        let mut reports = Vec::new();
        walk(graph, start, &[], &mut reports);
        for cycle in reports {
            if !found.iter().any(|f| f.member_key() == cycle.member_key()) {
                found.push(cycle);
            }
        }
    }
    found
}

fn arb_graph() -> impl Strategy<Value = DominanceGraph> {
    (1usize..=6).prop_flat_map(|n| {
        prop::collection::vec(prop::bool::weighted(0.4), n * n).prop_map(move |cells| {
            let rows = cells
                .chunks(n)
                .enumerate()
                .map(|(a, row)| {
                    row.iter()
                        .enumerate()
                        .map(|(b, &edge)| edge && a != b)
                        .collect()
                })
                .collect();
            DominanceGraph::from_matrix(PairMatrix::from_rows(rows).unwrap())
        })
    })
}

proptest! {
    #[test]
    fn prop_cycle_search_matches_plain_search(graph in arb_graph()) {
        prop_assert_eq!(graph.detect_cycles(usize::MAX).unwrap(), naive_cycles(&graph));
    }

    #[test]
    fn prop_concordance_diagonal_is_never_read(problem in arb_problem(6, 4), junk in 0.0f64..10.0) {
        let engine = run(problem.clone());
        let outcome = engine.outcome().unwrap();
        let mut concordance = outcome.concordance.clone();
        for a in 0..concordance.size() {
            concordance[(a, a)] = junk;
        }

        let mut graph = compute_dominance(
            &concordance,
            &outcome.non_discordance,
            problem.concordance_threshold,
        );
        prop_assert_eq!(&graph, &outcome.raw_dominance);

        let breaks = graph.break_cycles(&outcome.cycles, &concordance);
        prop_assert_eq!(&breaks, &outcome.breaks);
        prop_assert_eq!(&graph, &outcome.dominance);
    }

    #[test]
    fn prop_dominance_is_subset_of_inputs(problem in arb_problem(6, 4)) {
        let engine = run(problem.clone());
        let outcome = engine.outcome().unwrap();
        for (a, b) in outcome.raw_dominance.matrix().true_pairs() {
            prop_assert!(outcome.non_discordance[(a, b)]);
            prop_assert!(outcome.concordance[(a, b)] >= problem.concordance_threshold);
        }
        for (a, b) in outcome.dominance.matrix().true_pairs() {
            prop_assert!(outcome.raw_dominance.has_edge(a, b));
        }
    }

    #[test]
    fn prop_identical_rows_have_full_concordance(problem in arb_problem(4, 4)) {
        let mut problem = problem;
        let first = problem.matrix[0].clone();
        problem.matrix.push(first);
        let engine = run(problem);
        let model = CriteriaModel::from_problem(engine.problem()).unwrap();
        let n = model.alternative_count();
        let concordance = engine.concordance().unwrap();

        prop_assert_eq!(concordance[(0, n - 1)], model.total_weight());
        prop_assert_eq!(concordance[(n - 1, 0)], model.total_weight());
    }

    #[test]
    fn prop_concordance_follows_alternative_order(problem in arb_problem(6, 4)) {
        let mut reversed = problem.clone();
        reversed.matrix.reverse();
        let n = problem.matrix.len();

        let forward = run(problem);
        let backward = run(reversed);
        let c = forward.concordance().unwrap();
        let r = backward.concordance().unwrap();
        let nd = forward.non_discordance().unwrap();
        let rnd = backward.non_discordance().unwrap();
        for (a, b) in c.off_diagonal() {
            prop_assert_eq!(c[(a, b)], r[(n - 1 - a, n - 1 - b)]);
            prop_assert_eq!(nd[(a, b)], rnd[(n - 1 - a, n - 1 - b)]);
        }
    }

    #[test]
    fn prop_vetos_only_clear(problem in arb_problem(6, 4)) {
        // dropping the last criterion can only restore pairs
        prop_assume!(problem.criteria_count() > 1);
        let mut fewer = problem.clone();
        for row in &mut fewer.matrix {
            row.pop();
        }
        fewer.weights.pop();
        fewer.vetos.pop();
        fewer.directions.pop();
        if let Some(t) = fewer.preference_thresholds.as_mut() {
            t.pop();
        }
        fewer.concordance_threshold = 0.0;

        let all = compute_non_discordance(&CriteriaModel::from_problem(&problem).unwrap());
        let some = compute_non_discordance(&CriteriaModel::from_problem(&fewer).unwrap());
        for (a, b) in all.off_diagonal() {
            prop_assert!(!all[(a, b)] || some[(a, b)]);
        }
        for a in 0..all.size() {
            prop_assert!(!all[(a, a)]);
        }
    }

    #[test]
    fn prop_breaks_keep_one_strongest_edge(problem in arb_problem(6, 3)) {
        let engine = run(problem);
        let outcome = engine.outcome().unwrap();
        prop_assert_eq!(outcome.breaks.len(), outcome.cycles.len());
        for brk in &outcome.breaks {
            prop_assert_eq!(brk.removed.len(), brk.cycle.len() - 1);
            prop_assert!(!outcome.dominance.has_edge(brk.removed[0].0, brk.removed[0].1));
            let best = outcome.concordance[brk.kept];
            for edge in brk.cycle.edges() {
                prop_assert!(outcome.concordance[edge] <= best);
            }
        }
    }

    #[test]
    fn prop_kernel_marking_is_order_independent(problem in arb_problem(6, 3)) {
        let engine = run(problem);
        let dominance = engine.dominance().unwrap();
        let mut kernel = vec![true; dominance.size()];
        for (_, b) in dominance.matrix().true_pairs().into_iter().rev() {
            kernel[b] = false;
        }
        prop_assert_eq!(engine.kernel().unwrap(), kernel.as_slice());
    }

    #[test]
    fn prop_runs_are_deterministic(problem in arb_problem(6, 4)) {
        let first = run(problem.clone());
        let second = run(problem);
        prop_assert_eq!(first.outcome().unwrap(), second.outcome().unwrap());
    }
}
