//! Outranking flows and rank positions.

use outrank_core::Direction;

use super::preference::PreferenceMatrix;

/// Positive, negative and net flow of every alternative.
#[derive(Debug, Clone, PartialEq)]
pub struct Flows {
    /// How much each alternative is preferred over the others.
    pub positive: Vec<f64>,
    /// How much the others are preferred over it.
    pub negative: Vec<f64>,
    /// `positive - negative`.
    pub net: Vec<f64>,
}

/// Row sums, column sums and their difference.
pub fn compute_flows(preference: &PreferenceMatrix) -> Flows {
    let n = preference.size();
    let mut positive = vec![0.0; n];
    let mut negative = vec![0.0; n];
    for (a, b) in preference.off_diagonal() {
        positive[a] += preference[(a, b)];
        negative[b] += preference[(a, b)];
    }
    let net = positive.iter().zip(&negative).map(|(p, q)| p - q).collect();
    Flows {
        positive,
        negative,
        net,
    }
}

/// Rank positions for each flow; 1 is best.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rankings {
    pub positive: Vec<usize>,
    pub negative: Vec<usize>,
    pub net: Vec<usize>,
}

impl Rankings {
    /// Larger positive and net flows are better, smaller negative flows are.
    pub fn from_flows(flows: &Flows) -> Self {
        Self {
            positive: rank_positions(&flows.positive, Direction::Maximize),
            negative: rank_positions(&flows.negative, Direction::Minimize),
            net: rank_positions(&flows.net, Direction::Maximize),
        }
    }
}

/// Position of each value: one plus the number of strictly better values.
///
/// Ties share a position.
///
/// ```
/// use outrank_core::Direction;
/// use outrank_methods::promethee::rank_positions;
///
/// assert_eq!(rank_positions(&[0.2, 0.9, 0.2], Direction::Maximize), vec![2, 1, 2]);
/// assert_eq!(rank_positions(&[0.2, 0.9, 0.2], Direction::Minimize), vec![1, 3, 1]);
/// ```
pub fn rank_positions(values: &[f64], direction: Direction) -> Vec<usize> {
    values
        .iter()
        .map(|&value| {
            1 + values
                .iter()
                .filter(|&&other| direction.prefers(other, value))
                .count()
        })
        .collect()
}
