//! Raw decision problem as delivered by an input parser.

use crate::direction::Direction;

/// Unvalidated input snapshot for a decision algorithm.
///
/// This is the contract between the parser and the engines: six typed values,
/// no file I/O. Shape checks happen when an engine turns it into a
/// [`CriteriaModel`](super::CriteriaModel).
///
/// # Examples
///
/// ```
/// use outrank_core::{DecisionProblem, Direction};
///
/// let problem = DecisionProblem::new(vec![vec![10.0], vec![20.0]], vec![1.0])
///     .with_directions(vec![Direction::Minimize])
///     .with_vetos(vec![100.0])
///     .with_concordance_threshold(0.5);
///
/// assert_eq!(problem.alternative_count(), 2);
/// assert_eq!(problem.criteria_count(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DecisionProblem {
    /// `matrix[alternative][criterion]`.
    pub matrix: Vec<Vec<f64>>,

    /// One weight per criterion.
    pub weights: Vec<f64>,

    /// One veto threshold per criterion.
    pub vetos: Vec<f64>,

    /// One optimization direction per criterion.
    pub directions: Vec<Direction>,

    /// One preference threshold per criterion; `None` means all zero.
    pub preference_thresholds: Option<Vec<f64>>,

    /// Minimum concordance for a dominance edge.
    pub concordance_threshold: f64,
}

impl DecisionProblem {
    /// Creates a problem with every criterion maximized and vetos disabled.
    pub fn new(matrix: Vec<Vec<f64>>, weights: Vec<f64>) -> Self {
        let m = weights.len();
        Self {
            matrix,
            weights,
            vetos: vec![f64::INFINITY; m],
            directions: vec![Direction::Maximize; m],
            preference_thresholds: None,
            concordance_threshold: 0.0,
        }
    }

    pub fn with_vetos(mut self, vetos: Vec<f64>) -> Self {
        self.vetos = vetos;
        self
    }

    pub fn with_directions(mut self, directions: Vec<Direction>) -> Self {
        self.directions = directions;
        self
    }

    pub fn with_preference_thresholds(mut self, thresholds: Vec<f64>) -> Self {
        self.preference_thresholds = Some(thresholds);
        self
    }

    pub fn with_concordance_threshold(mut self, threshold: f64) -> Self {
        self.concordance_threshold = threshold;
        self
    }

    /// Number of rows in the matrix.
    pub fn alternative_count(&self) -> usize {
        self.matrix.len()
    }

    /// Number of criteria, taken from the weight vector.
    pub fn criteria_count(&self) -> usize {
        self.weights.len()
    }

    /// Sum of all weights.
    pub fn total_weight(&self) -> f64 {
        self.weights.iter().sum()
    }

    /// Returns the weights scaled to sum to 1.
    ///
    /// Weights summing to zero are returned unchanged.
    pub fn normalized_weights(&self) -> Vec<f64> {
        let total = self.total_weight();
        if total == 0.0 || !total.is_finite() {
            return self.weights.clone();
        }
        self.weights.iter().map(|w| w / total).collect()
    }

    /// Replaces the weights with [`normalized_weights`](Self::normalized_weights).
    pub fn normalize_weights(&mut self) {
        self.weights = self.normalized_weights();
    }
}
