//! Outrank Methods
//!
//! This crate provides the multi-criteria decision methods:
//! - ELECTRE outranking kernel (concordance, veto, dominance, cycle removal, kernel)
//! - PROMETHEE preference flows and rankings
//! - `DecisionAlgorithm` capability and selection by short code
//! - Stage event system for monitoring
//! - Plain-text result export
//!
//! # Example
//!
//! ```
//! use outrank_methods::{parse_selection, AlgorithmKind};
//!
//! let selection = parse_selection("ep").unwrap();
//! assert_eq!(selection.kinds, vec![AlgorithmKind::Electre, AlgorithmKind::Promethee]);
//! ```

pub mod algorithm;
pub mod electre;
pub mod event;
pub mod export;
pub mod promethee;

pub use algorithm::{parse_selection, AlgorithmKind, DecisionAlgorithm, Selection, ALL_CODE};
pub use electre::{
    Cycle, CycleBreak, DominanceGraph, EngineOptions, OutrankingEngine, OutrankingOutcome,
    DEFAULT_MAX_CYCLES,
};
pub use event::{
    CountingStageListener, LoggingStageListener, RecordingStageListener, Stage, StageEvent,
    StageEventSupport, StageListener,
};
pub use promethee::{Flows, PrometheeEngine, PrometheeOutcome, Rankings};
