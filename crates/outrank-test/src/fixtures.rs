//! Decision problems with hand-checked outcomes.

use outrank_core::{DecisionProblem, Direction};

/// Three alternatives on one minimized criterion.
///
/// Values `[10, 20, 15]`, veto 100, threshold 0.5: alternative 0 dominates
/// both others and the kernel is `[true, false, false]`.
pub fn single_criterion_min() -> DecisionProblem {
    DecisionProblem::new(vec![vec![10.0], vec![20.0], vec![15.0]], vec![1.0])
        .with_directions(vec![Direction::Minimize])
        .with_vetos(vec![100.0])
        .with_preference_thresholds(vec![0.0])
        .with_concordance_threshold(0.5)
}

/// Two alternatives that each win one equally weighted criterion.
///
/// Concordance is 0.5 both ways, so they dominate each other.
pub fn mutual_pair() -> DecisionProblem {
    DecisionProblem::new(vec![vec![1.0, 0.0], vec![0.0, 1.0]], vec![0.5, 0.5])
        .with_concordance_threshold(0.5)
}

/// A Condorcet triple: `1 -> 0`, `0 -> 2`, `2 -> 1`.
///
/// Concordances along the cycle are 0.75, 0.6 and 0.65, every reverse edge
/// stays below the 0.55 threshold.
pub fn three_cycle() -> DecisionProblem {
    DecisionProblem::new(
        vec![
            vec![1.0, 2.0, 3.0],
            vec![2.0, 3.0, 1.0],
            vec![3.0, 1.0, 2.0],
        ],
        vec![0.4, 0.35, 0.25],
    )
    .with_concordance_threshold(0.55)
}

/// Six recycling sites scored on six criteria, all maximized.
///
/// At threshold 0.5 the dominance graph holds the cycles `2 -> 3 -> 4` and
/// `3 -> 4`. Breaking the first keeps `4 -> 2`, breaking the second keeps
/// `3 -> 4`, which the first break already removed. The kernel is `{3, 4}`.
pub fn recycling() -> DecisionProblem {
    DecisionProblem::new(
        vec![
            vec![-80.0, 90.0, -600.0, -5.4, -8.0, 5.0],
            vec![-65.0, 58.0, -200.0, -9.7, -1.0, 1.0],
            vec![-83.0, 60.0, -400.0, -7.2, -4.0, 7.0],
            vec![-40.0, 80.0, -1000.0, -7.5, -7.0, 10.0],
            vec![-52.0, 72.0, -600.0, -2.0, -3.0, 8.0],
            vec![-94.0, 96.0, -700.0, -3.6, -5.0, 6.0],
        ],
        vec![0.1, 0.2, 0.2, 0.1, 0.2, 0.2],
    )
    .with_vetos(vec![45.0, 29.0, 550.0, 6.0, 4.5, 4.5])
    .with_concordance_threshold(0.5)
}
