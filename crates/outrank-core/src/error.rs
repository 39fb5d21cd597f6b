//! Error types for Outrank

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for Outrank operations
#[derive(Debug, Error)]
pub enum OutrankError {
    /// Input shapes or parameters are invalid; raised before any computation.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A result accessor was used before the algorithm ran.
    #[error("Algorithm has not been run")]
    NotRun,

    /// Cycle enumeration exceeded the configured cap.
    #[error("Too many dominance cycles: more than {limit} reported")]
    TooManyCycles { limit: usize },

    /// Writing results to disk failed.
    #[error("Export to {path} failed: {source}")]
    Export {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl OutrankError {
    /// Shorthand for a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        OutrankError::Configuration(message.into())
    }

    /// Wraps an I/O failure on `path`.
    pub fn export(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        OutrankError::Export {
            path: path.into(),
            source,
        }
    }
}

/// Result type alias for Outrank operations
pub type Result<T> = std::result::Result<T, OutrankError>;
