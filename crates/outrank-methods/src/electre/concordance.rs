//! Pairwise concordance.

use outrank_core::{ConcordanceMatrix, CriteriaModel};

/// Credit the less preferred side of a pair receives on one criterion.
///
/// Linear in the gap: a gap of zero earns full credit, a gap at or beyond
/// `threshold` earns none. Without a threshold there is no partial credit.
///
/// # Examples
///
/// ```
/// use outrank_methods::electre::partial_credit;
///
/// assert_eq!(partial_credit(10.0, 12.0, 4.0), 0.5);
/// assert_eq!(partial_credit(10.0, 20.0, 4.0), 0.0);
/// assert_eq!(partial_credit(10.0, 12.0, 0.0), 0.0);
/// ```
#[inline]
pub fn partial_credit(v1: f64, v2: f64, threshold: f64) -> f64 {
    if threshold > 0.0 {
        1.0 - ((v1 - v2).abs() / threshold).min(1.0)
    } else {
        0.0
    }
}

/// Computes the concordance matrix.
///
/// Each unordered pair is visited once and both cells are filled from the
/// same per-criterion comparison. Ties give full weight to both sides. The
/// diagonal stays at zero.
pub fn compute_concordance(model: &CriteriaModel) -> ConcordanceMatrix {
    let n = model.alternative_count();
    let matrix = model.matrix();
    let mut concordance = ConcordanceMatrix::filled(n, 0.0);

    for a in 0..n {
        for b in (a + 1)..n {
            let (ab, ba) = model.criteria().iter().enumerate().fold(
                (0.0, 0.0),
                |(ab, ba), (c, criterion)| {
                    let v1 = matrix.value(a, c);
                    let v2 = matrix.value(b, c);
                    let w = criterion.weight;
                    if v1 == v2 {
                        return (ab + w, ba + w);
                    }
                    let partial = partial_credit(v1, v2, criterion.preference_threshold) * w;
                    if criterion.direction.prefers(v1, v2) {
                        (ab + w, ba + partial)
                    } else {
                        (ab + partial, ba + w)
                    }
                },
            );
            concordance[(a, b)] = ab;
            concordance[(b, a)] = ba;
        }
    }

    concordance
}

#[cfg(test)]
mod tests {
    use super::*;
    use outrank_core::{DecisionProblem, Direction};

    fn model(rows: Vec<Vec<f64>>, weights: Vec<f64>, dirs: Vec<Direction>) -> CriteriaModel {
        let problem = DecisionProblem::new(rows, weights).with_directions(dirs);
        CriteriaModel::from_problem(&problem).unwrap()
    }

    #[test]
    fn test_strict_preference_without_threshold() {
        let m = model(
            vec![vec![10.0, 5.0], vec![20.0, 5.0]],
            vec![0.7, 0.3],
            vec![Direction::Minimize, Direction::Maximize],
        );
        let c = compute_concordance(&m);

        // 0 wins criterion 0, both tie on criterion 1
        assert!((c[(0, 1)] - 1.0).abs() < 1e-12);
        assert!((c[(1, 0)] - 0.3).abs() < 1e-12);
        assert_eq!(c[(0, 0)], 0.0);
    }

    #[test]
    fn test_partial_credit_interpolates() {
        let problem = DecisionProblem::new(vec![vec![10.0], vec![12.0]], vec![1.0])
            .with_preference_thresholds(vec![4.0]);
        let m = CriteriaModel::from_problem(&problem).unwrap();
        let c = compute_concordance(&m);

        assert_eq!(c[(1, 0)], 1.0);
        assert_eq!(c[(0, 1)], 0.5);
    }

    #[test]
    fn test_identical_rows_get_total_weight() {
        let m = model(
            vec![vec![3.0, 4.0, 5.0], vec![3.0, 4.0, 5.0]],
            vec![0.2, 0.3, 0.5],
            vec![Direction::Maximize; 3],
        );
        let c = compute_concordance(&m);
        assert_eq!(c[(0, 1)], m.total_weight());
        assert_eq!(c[(1, 0)], m.total_weight());
    }
}
