//! Error type of a whole analysis.

use outrank_config::ConfigError;
use outrank_core::OutrankError;
use outrank_io::ParseError;
use thiserror::Error;

/// Any failure between reading the configuration and saving results.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Method(#[from] OutrankError),
}
