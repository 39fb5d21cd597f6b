//! Error types for input parsing

use std::path::PathBuf;

use thiserror::Error;

/// Failure while reading an input file.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// `line` is 1-based.
    #[error("{path}:{line}: '{token}' is not a number")]
    InvalidNumber {
        path: PathBuf,
        line: usize,
        token: String,
    },

    #[error("{path}: '{token}' is not a direction (expected MIN or MAX)")]
    InvalidDirection { path: PathBuf, token: String },

    #[error("{path} holds no values")]
    Empty { path: PathBuf },
}

/// Result type alias for input parsing
pub type Result<T> = std::result::Result<T, ParseError>;
