//! Veto filter.

use outrank_core::{CriteriaModel, NonDiscordanceMatrix};

/// Computes the non-discordance matrix.
///
/// Starts all `true` with a `false` diagonal, then walks the criteria one at
/// a time. On each criterion both values are mapped to a cost scale and a
/// pair `(a, b)` is cleared when `cost(a) - cost(b)` exceeds the veto. A
/// cleared cell is never set back.
pub fn compute_non_discordance(model: &CriteriaModel) -> NonDiscordanceMatrix {
    let n = model.alternative_count();
    let matrix = model.matrix();
    let mut non_discordance = NonDiscordanceMatrix::filled(n, true);
    for a in 0..n {
        non_discordance[(a, a)] = false;
    }

    for (c, criterion) in model.criteria().iter().enumerate() {
        for (a, b) in non_discordance.off_diagonal().collect::<Vec<_>>() {
            if !non_discordance[(a, b)] {
                continue;
            }
            let diff = criterion.direction.as_cost(matrix.value(a, c))
                - criterion.direction.as_cost(matrix.value(b, c));
            if diff > criterion.veto {
                non_discordance[(a, b)] = false;
            }
        }
    }

    non_discordance
}

#[cfg(test)]
mod tests {
    use super::*;
    use outrank_core::{DecisionProblem, Direction};

    #[test]
    fn test_veto_clears_far_worse_alternative() {
        let problem = DecisionProblem::new(vec![vec![10.0], vec![50.0]], vec![1.0])
            .with_directions(vec![Direction::Minimize])
            .with_vetos(vec![20.0]);
        let m = CriteriaModel::from_problem(&problem).unwrap();
        let nd = compute_non_discordance(&m);

        // 1 costs 40 more than 0: vetoed from outranking 0
        assert!(!nd[(1, 0)]);
        assert!(nd[(0, 1)]);
        assert!(!nd[(0, 0)]);
        assert!(!nd[(1, 1)]);
    }

    #[test]
    fn test_maximize_values_are_negated() {
        let problem = DecisionProblem::new(vec![vec![10.0], vec![50.0]], vec![1.0])
            .with_directions(vec![Direction::Maximize])
            .with_vetos(vec![20.0]);
        let m = CriteriaModel::from_problem(&problem).unwrap();
        let nd = compute_non_discordance(&m);

        assert!(!nd[(0, 1)]);
        assert!(nd[(1, 0)]);
    }

    #[test]
    fn test_diff_equal_to_veto_is_tolerated() {
        let problem = DecisionProblem::new(vec![vec![0.0], vec![5.0]], vec![1.0])
            .with_directions(vec![Direction::Minimize])
            .with_vetos(vec![5.0]);
        let m = CriteriaModel::from_problem(&problem).unwrap();
        assert!(compute_non_discordance(&m)[(1, 0)]);
    }

    #[test]
    fn test_later_criterion_cannot_restore() {
        // criterion 0 vetoes (1, 0); criterion 1 favors 1 heavily
        let problem = DecisionProblem::new(
            vec![vec![0.0, 0.0], vec![100.0, 100.0]],
            vec![0.5, 0.5],
        )
        .with_directions(vec![Direction::Minimize, Direction::Maximize])
        .with_vetos(vec![10.0, 1000.0]);
        let m = CriteriaModel::from_problem(&problem).unwrap();
        let nd = compute_non_discordance(&m);

        assert!(!nd[(1, 0)]);
        assert!(nd[(0, 1)]);
    }
}
