//! Optimization direction of a criterion.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Whether smaller or larger values are preferred on a criterion.
///
/// # Examples
///
/// ```
/// use outrank_core::Direction;
///
/// let dir: Direction = "MIN".parse().unwrap();
/// assert_eq!(dir, Direction::Minimize);
/// assert!(dir.prefers(10.0, 20.0));
/// assert!(!Direction::Maximize.prefers(10.0, 20.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Direction {
    /// Smaller values are better (costs, delays).
    Minimize,

    /// Larger values are better (gains, quality).
    #[default]
    Maximize,
}

impl Direction {
    /// Returns true if `a` is strictly preferred to `b` on this criterion.
    #[inline]
    pub fn prefers(self, a: f64, b: f64) -> bool {
        match self {
            Direction::Minimize => a < b,
            Direction::Maximize => a > b,
        }
    }

    /// Maps a value onto a cost scale where smaller is always better.
    ///
    /// Maximized values are negated; minimized values pass through.
    #[inline]
    pub fn as_cost(self, value: f64) -> f64 {
        match self {
            Direction::Minimize => value,
            Direction::Maximize => -value,
        }
    }

    /// Short token used in direction files.
    pub fn token(self) -> &'static str {
        match self {
            Direction::Minimize => "MIN",
            Direction::Maximize => "MAX",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Error returned when a direction token is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown optimization direction '{0}' (expected MIN or MAX)")]
pub struct DirectionParseError(pub String);

impl FromStr for Direction {
    type Err = DirectionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "min" | "minimize" => Ok(Direction::Minimize),
            "max" | "maximize" => Ok(Direction::Maximize),
            _ => Err(DirectionParseError(s.trim().to_string())),
        }
    }
}
