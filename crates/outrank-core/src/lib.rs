//! Outrank Core - Core types for multi-criteria decision analysis
//!
//! This crate provides the fundamental abstractions shared by every Outrank
//! method:
//! - `DecisionProblem`: the raw input snapshot handed over by a parser
//! - `CriteriaModel`: the validated decision matrix plus per-criterion parameters
//! - `PairMatrix`: square alternative-by-alternative grids for pairwise relations
//! - `OutrankError`: the error type for configuration, run and export failures

pub mod direction;
pub mod error;
pub mod matrix;
pub mod model;

pub use direction::{Direction, DirectionParseError};
pub use error::{OutrankError, Result};
pub use matrix::{ConcordanceMatrix, NonDiscordanceMatrix, PairMatrix};
pub use model::{CriteriaModel, Criterion, DecisionMatrix, DecisionProblem};
