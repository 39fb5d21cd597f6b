//! `proptest` strategies for random, always-valid decision problems.

use outrank_core::{DecisionProblem, Direction};
use proptest::prelude::*;

/// Direction chosen uniformly.
pub fn arb_direction() -> impl Strategy<Value = Direction> {
    prop_oneof![Just(Direction::Minimize), Just(Direction::Maximize)]
}

/// Veto: either disabled or a small integer gap.
pub fn arb_veto() -> impl Strategy<Value = f64> {
    prop_oneof![Just(f64::INFINITY), (1u8..8).prop_map(f64::from)]
}

/// A shape-consistent problem with up to `max_alternatives` rows and
/// `max_criteria` columns.
///
/// Scores are small integers so ties and cycles are common. Weights are
/// normalized and the concordance threshold lies in `[0, 1]`.
pub fn arb_problem(
    max_alternatives: usize,
    max_criteria: usize,
) -> impl Strategy<Value = DecisionProblem> {
    (1..=max_alternatives, 1..=max_criteria).prop_flat_map(|(n, m)| {
        (
            prop::collection::vec(prop::collection::vec(0u8..6, m), n),
            prop::collection::vec(1u8..10, m),
            prop::collection::vec(arb_direction(), m),
            prop::collection::vec(arb_veto(), m),
            prop::collection::vec(0u8..4, m),
            0u8..=10,
        )
            .prop_map(|(rows, weights, directions, vetos, thresholds, cut)| {
                let matrix = rows
                    .into_iter()
                    .map(|row| row.into_iter().map(f64::from).collect())
                    .collect();
                let weights = weights.into_iter().map(f64::from).collect();
                let mut problem = DecisionProblem::new(matrix, weights)
                    .with_directions(directions)
                    .with_vetos(vetos)
                    .with_preference_thresholds(thresholds.into_iter().map(f64::from).collect())
                    .with_concordance_threshold(f64::from(cut) / 10.0);
                problem.normalize_weights();
                problem
            })
    })
}
