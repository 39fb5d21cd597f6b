//! Decision model: alternatives, criteria and their validated container.
//!
//! - `DecisionMatrix`: `n x m` grid of alternative scores
//! - `Criterion`: weight, direction, veto and preference threshold of one column
//! - `CriteriaModel`: matrix + criteria + concordance threshold, shape-checked
//! - `DecisionProblem`: the raw, unchecked form handed over by parsers

mod problem;


pub use problem::DecisionProblem;

use crate::direction::Direction;
use crate::error::{OutrankError, Result};

/// Slack allowed when comparing the concordance threshold to the total weight.
///
/// Weight files such as `0.1, 0.2, 0.2, 0.1, 0.2, 0.2` do not sum to exactly
/// `1.0` in floating point.
pub const WEIGHT_EPSILON: f64 = 1e-9;

/// Scores of every alternative on every criterion.
///
/// Alternatives are identified by row index, criteria by column index.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DecisionMatrix {
    rows: Vec<Vec<f64>>,
    criteria_count: usize,
}

impl DecisionMatrix {
    /// Creates a matrix, checking that it is non-empty, rectangular and finite.
    pub fn new(rows: Vec<Vec<f64>>) -> Result<Self> {
        let criteria_count = match rows.first() {
            Some(first) => first.len(),
            None => return Err(OutrankError::configuration("decision matrix has no alternatives")),
        };
        if criteria_count == 0 {
            return Err(OutrankError::configuration("decision matrix has no criteria"));
        }
        for (alt, row) in rows.iter().enumerate() {
            if row.len() != criteria_count {
                return Err(OutrankError::configuration(format!(
                    "alternative {alt} has {} values, expected {criteria_count}",
                    row.len()
                )));
            }
            if let Some(c) = row.iter().position(|v| !v.is_finite()) {
                return Err(OutrankError::configuration(format!(
                    "value of alternative {alt} on criterion {c} is not finite"
                )));
            }
        }
        Ok(Self {
            rows,
            criteria_count,
        })
    }

    #[inline]
    pub fn alternative_count(&self) -> usize {
        self.rows.len()
    }

    #[inline]
    pub fn criteria_count(&self) -> usize {
        self.criteria_count
    }

    #[inline]
    pub fn value(&self, alternative: usize, criterion: usize) -> f64 {
        self.rows[alternative][criterion]
    }

    pub fn row(&self, alternative: usize) -> &[f64] {
        &self.rows[alternative]
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }
}

/// Parameters of one evaluation column.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Criterion {
    /// Relative importance, conventionally normalized so all weights sum to 1.
    pub weight: f64,

    /// Which way is better.
    pub direction: Direction,

    /// Largest tolerated disadvantage before the criterion vetoes an outranking.
    pub veto: f64,

    /// Width of the partial-credit zone; 0 disables partial credit.
    pub preference_threshold: f64,
}

impl Criterion {
    pub fn new(weight: f64, direction: Direction) -> Self {
        Self {
            weight,
            direction,
            veto: f64::INFINITY,
            preference_threshold: 0.0,
        }
    }

    pub fn with_veto(mut self, veto: f64) -> Self {
        self.veto = veto;
        self
    }

    pub fn with_preference_threshold(mut self, threshold: f64) -> Self {
        self.preference_threshold = threshold;
        self
    }

    fn validate(&self, index: usize) -> Result<()> {
        if !self.weight.is_finite() || self.weight < 0.0 {
            return Err(OutrankError::configuration(format!(
                "weight of criterion {index} must be a non-negative number, got {}",
                self.weight
            )));
        }
        // +inf is a legal veto and means "never veto"
        if self.veto.is_nan() || self.veto < 0.0 {
            return Err(OutrankError::configuration(format!(
                "veto of criterion {index} must be non-negative, got {}",
                self.veto
            )));
        }
        if !self.preference_threshold.is_finite() || self.preference_threshold < 0.0 {
            return Err(OutrankError::configuration(format!(
                "preference threshold of criterion {index} must be non-negative, got {}",
                self.preference_threshold
            )));
        }
        Ok(())
    }
}

/// Validated, immutable input of the outranking engine.
///
/// Construction is the only place shapes are checked: once a `CriteriaModel`
/// exists, `len(criteria) == m` and every matrix row has `m` values.
#[derive(Debug, Clone, PartialEq)]
pub struct CriteriaModel {
    matrix: DecisionMatrix,
    criteria: Vec<Criterion>,
    concordance_threshold: f64,
    total_weight: f64,
}

impl CriteriaModel {
    /// Builds a model from an already-checked matrix.
    ///
    /// # Errors
    ///
    /// Returns [`OutrankError::Configuration`] if the criterion count differs
    /// from the matrix width, a criterion parameter is out of range, or the
    /// concordance threshold lies outside `[0, total weight]`.
    pub fn new(
        matrix: DecisionMatrix,
        criteria: Vec<Criterion>,
        concordance_threshold: f64,
    ) -> Result<Self> {
        if criteria.len() != matrix.criteria_count() {
            return Err(OutrankError::configuration(format!(
                "{} criteria supplied for a matrix with {} columns",
                criteria.len(),
                matrix.criteria_count()
            )));
        }
        for (index, criterion) in criteria.iter().enumerate() {
            criterion.validate(index)?;
        }

        let total_weight: f64 = criteria.iter().map(|c| c.weight).sum();
        if concordance_threshold.is_nan()
            || concordance_threshold < 0.0
            || concordance_threshold > total_weight + WEIGHT_EPSILON
        {
            return Err(OutrankError::configuration(format!(
                "concordance threshold {concordance_threshold} outside [0, {total_weight}]"
            )));
        }

        Ok(Self {
            matrix,
            criteria,
            concordance_threshold,
            total_weight,
        })
    }

    /// Validates a raw [`DecisionProblem`].
    ///
    /// Weights fix the criterion count `m`; the matrix width, vetos,
    /// directions and preference thresholds must all agree with it. An empty
    /// preference-threshold vector is treated like an absent one.
    pub fn from_problem(problem: &DecisionProblem) -> Result<Self> {
        let m = problem.weights.len();
        check_len("vetos", problem.vetos.len(), m)?;
        check_len("directions", problem.directions.len(), m)?;

        let thresholds = match &problem.preference_thresholds {
            Some(t) if !t.is_empty() => {
                check_len("preference thresholds", t.len(), m)?;
                t.clone()
            }
            _ => vec![0.0; m],
        };

        let matrix = DecisionMatrix::new(problem.matrix.clone())?;
        if matrix.criteria_count() != m {
            return Err(OutrankError::configuration(format!(
                "decision matrix has {} columns but {m} weights were given",
                matrix.criteria_count()
            )));
        }

        let criteria = (0..m)
            .map(|c| Criterion {
                weight: problem.weights[c],
                direction: problem.directions[c],
                veto: problem.vetos[c],
                preference_threshold: thresholds[c],
            })
            .collect();

        Self::new(matrix, criteria, problem.concordance_threshold)
    }

    pub fn matrix(&self) -> &DecisionMatrix {
        &self.matrix
    }

    pub fn criteria(&self) -> &[Criterion] {
        &self.criteria
    }

    pub fn criterion(&self, index: usize) -> &Criterion {
        &self.criteria[index]
    }

    #[inline]
    pub fn alternative_count(&self) -> usize {
        self.matrix.alternative_count()
    }

    #[inline]
    pub fn criteria_count(&self) -> usize {
        self.criteria.len()
    }

    pub fn concordance_threshold(&self) -> f64 {
        self.concordance_threshold
    }

    pub fn total_weight(&self) -> f64 {
        self.total_weight
    }
}

fn check_len(what: &str, actual: usize, expected: usize) -> Result<()> {
    if actual != expected {
        return Err(OutrankError::configuration(format!(
            "{actual} {what} given for {expected} criteria"
        )));
    }
    Ok(())
}
