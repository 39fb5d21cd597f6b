//! Outrank IO - delimited-text input for decision problems
//!
//! This crate turns the plain files a decision maker keeps around into a
//! [`DecisionProblem`]:
//! - [`DelimitedReader`]: matrix, vector, direction and scalar files
//! - [`load_problem`]: reads every file named by an [`InputConfig`]
//!
//! # Example
//!
//! ```
//! use outrank_io::DelimitedReader;
//!
//! let reader = DelimitedReader::new(';');
//! let rows = reader.parse_matrix("1;2\n\n3;4;\n", "inline").unwrap();
//! assert_eq!(rows, vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
//! ```

mod error;
mod reader;

pub use error::{ParseError, Result};
pub use reader::DelimitedReader;

use outrank_config::InputConfig;
use outrank_core::{DecisionProblem, Direction};
use tracing::debug;

/// Reads every file named by `input` into a [`DecisionProblem`].
///
/// Missing optional files fall back to disabled vetos, maximized criteria
/// and no preference thresholds. The concordance threshold is taken from
/// `threshold_override`, then from the threshold file, and is zero when
/// neither is given. Shapes are not checked here; the engines do that.
///
/// # Errors
///
/// Returns the first [`ParseError`] met while reading.
pub fn load_problem(
    input: &InputConfig,
    threshold_override: Option<f64>,
) -> Result<DecisionProblem> {
    let reader = DelimitedReader::new(input.delimiter);

    let matrix = reader.read_matrix(&input.data)?;
    let weights = reader.read_vector(&input.weights)?;
    let criteria = weights.len();

    let vetos = match &input.vetos {
        Some(path) => reader.read_vector(path)?,
        None => vec![f64::INFINITY; criteria],
    };
    let directions = match &input.directions {
        Some(path) => reader.read_directions(path)?,
        None => vec![Direction::Maximize; criteria],
    };
    let preference_thresholds = input
        .preference_thresholds
        .as_ref()
        .map(|path| reader.read_vector(path))
        .transpose()?;
    let concordance_threshold = match (threshold_override, &input.concordance_threshold) {
        (Some(value), _) => value,
        (None, Some(path)) => reader.read_scalar(path)?,
        (None, None) => 0.0,
    };

    debug!(
        alternatives = matrix.len(),
        criteria,
        concordance_threshold,
        "Loaded decision problem"
    );

    Ok(DecisionProblem {
        matrix,
        weights,
        vetos,
        directions,
        preference_thresholds,
        concordance_threshold,
    })
}
