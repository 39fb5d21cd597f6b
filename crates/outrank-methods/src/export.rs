//! Plain-text result export.
//!
//! Every method writes into its own subdirectory of the target directory.
//! Failures are returned as [`OutrankError::Export`] and never retried.

use std::fs;
use std::path::{Path, PathBuf};

use outrank_core::{OutrankError, Result};

/// Creates `root/<method>` and returns its path.
pub fn method_dir(root: &Path, method: &str) -> Result<PathBuf> {
    let dir = root.join(method);
    fs::create_dir_all(&dir).map_err(|e| OutrankError::export(&dir, e))?;
    Ok(dir)
}

/// Writes `lines` to `path`, one per line, replacing any existing file.
pub fn write_lines<I, S>(path: &Path, lines: I) -> Result<()>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut contents = String::new();
    for line in lines {
        contents.push_str(line.as_ref());
        contents.push('\n');
    }
    fs::write(path, contents).map_err(|e| OutrankError::export(path, e))
}

/// Joins booleans as `1`/`0` digits.
///
/// ```
/// use outrank_methods::export::bool_row;
///
/// assert_eq!(bool_row(&[true, false, false], ","), "1,0,0");
/// ```
pub fn bool_row(values: &[bool], separator: &str) -> String {
    values
        .iter()
        .map(|&v| if v { "1" } else { "0" })
        .collect::<Vec<_>>()
        .join(separator)
}

/// Joins numbers with `separator` using their shortest round-trip form.
pub fn number_row(values: &[f64], separator: &str) -> String {
    values
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(separator)
}
