//! Outrank - Outranking Decision Analysis in Rust
//!
//! One call from a run configuration to ranked alternatives: the input
//! files are parsed, every selected method runs, and results are saved when
//! an output directory is configured.
//!
//! # Example
//!
//! ```rust
//! use outrank::prelude::*;
//!
//! let problem = DecisionProblem::new(vec![vec![10.0], vec![20.0], vec![15.0]], vec![1.0])
//!     .with_directions(vec![Direction::Minimize])
//!     .with_concordance_threshold(0.5);
//!
//! let mut engine = OutrankingEngine::configured(problem).unwrap();
//! engine.run().unwrap();
//! assert_eq!(engine.kernel_members().unwrap(), vec![0]);
//! ```

mod analysis;
mod error;

pub use analysis::{analyze, Analysis, Analyzer, MethodReport};
pub use error::AnalysisError;

// Core types
pub use outrank_core::{
    ConcordanceMatrix, CriteriaModel, Criterion, DecisionMatrix, DecisionProblem, Direction,
    NonDiscordanceMatrix, OutrankError, PairMatrix,
};

// Methods
pub use outrank_methods::{electre, event, export, promethee};
pub use outrank_methods::{
    parse_selection, AlgorithmKind, DecisionAlgorithm, EngineOptions, OutrankingEngine,
    PrometheeEngine, Selection, Stage, StageListener,
};

// Input and configuration
pub use outrank_config::{ConfigError, ElectreConfig, InputConfig, RunConfig};
pub use outrank_io::{load_problem, DelimitedReader, ParseError};

/// Colored console output, available with the `console` feature.
#[cfg(feature = "console")]
pub mod console {
    pub use outrank_console::{init, OutrankConsoleLayer};
}

pub mod prelude {
    pub use super::{analyze, Analysis, AnalysisError, Analyzer};
    pub use super::{AlgorithmKind, DecisionAlgorithm, OutrankingEngine, PrometheeEngine};
    pub use super::{DecisionProblem, Direction, OutrankError};
    pub use super::{InputConfig, RunConfig};
}
