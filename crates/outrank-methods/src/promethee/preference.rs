//! Weighted pairwise preference.

use outrank_core::{CriteriaModel, PairMatrix};

/// Weighted preference of `a` over `b`.
pub type PreferenceMatrix = PairMatrix<f64>;

/// Sums, for every ordered pair, the weights of the criteria on which `a`
/// is strictly better than `b`. The diagonal is zero.
pub fn compute_preference(model: &CriteriaModel) -> PreferenceMatrix {
    let n = model.alternative_count();
    let matrix = model.matrix();
    let mut preference = PreferenceMatrix::filled(n, 0.0);

    for (a, b) in preference.off_diagonal().collect::<Vec<_>>() {
        preference[(a, b)] = model
            .criteria()
            .iter()
            .enumerate()
            .filter(|(c, criterion)| {
                criterion
                    .direction
                    .prefers(matrix.value(a, *c), matrix.value(b, *c))
            })
            .fold(0.0, |total, (_, criterion)| total + criterion.weight);
    }
    preference
}

#[cfg(test)]
mod tests {
    use super::*;
    use outrank_core::{DecisionProblem, Direction};

    #[test]
    fn test_strict_wins_only() {
        let problem = DecisionProblem::new(
            vec![vec![5.0, 1.0, 2.0], vec![3.0, 1.0, 4.0]],
            vec![0.5, 0.3, 0.2],
        );
        let model = CriteriaModel::from_problem(&problem).unwrap();
        let p = compute_preference(&model);

        assert_eq!(p[(0, 1)], 0.5);
        assert_eq!(p[(1, 0)], 0.2);
        assert_eq!(p[(0, 0)], 0.0);
    }

    #[test]
    fn test_minimize_inverts_comparison() {
        let problem = DecisionProblem::new(vec![vec![5.0], vec![3.0]], vec![1.0])
            .with_directions(vec![Direction::Minimize]);
        let model = CriteriaModel::from_problem(&problem).unwrap();
        let p = compute_preference(&model);

        assert_eq!(p[(1, 0)], 1.0);
        assert_eq!(p[(0, 1)], 0.0);
    }
}
