//! Delimited text reader.

use std::fs;
use std::path::Path;

use outrank_core::Direction;

use crate::error::{ParseError, Result};

/// Splits lines on a single delimiter character.
///
/// Blank lines are skipped, tokens are trimmed and one trailing delimiter
/// per line is tolerated. Any other empty token is an invalid number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelimitedReader {
    delimiter: char,
}

impl Default for DelimitedReader {
    fn default() -> Self {
        Self { delimiter: ',' }
    }
}

impl DelimitedReader {
    pub fn new(delimiter: char) -> Self {
        Self { delimiter }
    }

    pub fn delimiter(&self) -> char {
        self.delimiter
    }

    /// Reads one row per non-blank line.
    pub fn read_matrix(&self, path: impl AsRef<Path>) -> Result<Vec<Vec<f64>>> {
        let path = path.as_ref();
        self.parse_matrix(&read(path)?, path)
    }

    /// Reads the first non-blank line.
    pub fn read_vector(&self, path: impl AsRef<Path>) -> Result<Vec<f64>> {
        let path = path.as_ref();
        self.parse_vector(&read(path)?, path)
    }

    /// Reads `MIN`/`MAX` tokens from the first non-blank line.
    pub fn read_directions(&self, path: impl AsRef<Path>) -> Result<Vec<Direction>> {
        let path = path.as_ref();
        self.parse_directions(&read(path)?, path)
    }

    /// Reads the first value of the first non-blank line.
    pub fn read_scalar(&self, path: impl AsRef<Path>) -> Result<f64> {
        let path = path.as_ref();
        self.parse_scalar(&read(path)?, path)
    }

    /// Parses `text` as a matrix; `path` only labels errors.
    pub fn parse_matrix(&self, text: &str, path: impl AsRef<Path>) -> Result<Vec<Vec<f64>>> {
        let path = path.as_ref();
        let rows = self
            .lines(text)
            .map(|(line, content)| self.numbers(content, line, path))
            .collect::<Result<Vec<_>>>()?;
        if rows.is_empty() {
            return Err(empty(path));
        }
        Ok(rows)
    }

    pub fn parse_vector(&self, text: &str, path: impl AsRef<Path>) -> Result<Vec<f64>> {
        let path = path.as_ref();
        let (line, content) = self.lines(text).next().ok_or_else(|| empty(path))?;
        self.numbers(content, line, path)
    }

    pub fn parse_directions(&self, text: &str, path: impl AsRef<Path>) -> Result<Vec<Direction>> {
        let path = path.as_ref();
        let (_, content) = self.lines(text).next().ok_or_else(|| empty(path))?;
        self.tokens(content)
            .map(|token| {
                token.parse().map_err(|_| ParseError::InvalidDirection {
                    path: path.to_path_buf(),
                    token: token.to_string(),
                })
            })
            .collect()
    }

    pub fn parse_scalar(&self, text: &str, path: impl AsRef<Path>) -> Result<f64> {
        let path = path.as_ref();
        self.parse_vector(text, path)?
            .first()
            .copied()
            .ok_or_else(|| empty(path))
    }

    /// Non-blank lines with their 1-based numbers.
    fn lines<'a>(&self, text: &'a str) -> impl Iterator<Item = (usize, &'a str)> {
        text.lines()
            .enumerate()
            .map(|(i, content)| (i + 1, content))
            .filter(|(_, content)| !content.trim().is_empty())
    }

    fn tokens<'a>(&self, line: &'a str) -> impl Iterator<Item = &'a str> {
        let line = line.trim_end();
        let line = line.strip_suffix(self.delimiter).unwrap_or(line);
        line.split(self.delimiter).map(str::trim)
    }

    fn numbers(&self, content: &str, line: usize, path: &Path) -> Result<Vec<f64>> {
        self.tokens(content)
            .map(|token| {
                token.parse().map_err(|_| ParseError::InvalidNumber {
                    path: path.to_path_buf(),
                    line,
                    token: token.to_string(),
                })
            })
            .collect()
    }
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| ParseError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn empty(path: &Path) -> ParseError {
    ParseError::Empty {
        path: path.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matrix_skips_blank_lines() {
        let reader = DelimitedReader::default();
        let rows = reader
            .parse_matrix("1,2,3\n\n  \n4, 5 ,6\r\n", "m.csv")
            .unwrap();
        assert_eq!(rows, vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]);
    }

    #[test]
    fn test_trailing_delimiter_tolerated() {
        let reader = DelimitedReader::new(';');
        assert_eq!(
            reader.parse_vector("0.5;0.25;0.25;\n", "w.csv").unwrap(),
            vec![0.5, 0.25, 0.25]
        );
    }

    #[test]
    fn test_invalid_number_reports_line() {
        let reader = DelimitedReader::default();
        let err = reader.parse_matrix("1,2\n\n3,x\n", "m.csv").unwrap_err();
        match err {
            ParseError::InvalidNumber { line, token, .. } => {
                assert_eq!(line, 3);
                assert_eq!(token, "x");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_inner_empty_token_is_invalid() {
        let reader = DelimitedReader::default();
        assert!(matches!(
            reader.parse_vector("1,,2", "w.csv"),
            Err(ParseError::InvalidNumber { .. })
        ));
    }

    #[test]
    fn test_vector_uses_first_line_only() {
        let reader = DelimitedReader::default();
        assert_eq!(
            reader.parse_vector("\n1,2\n3,4\n", "w.csv").unwrap(),
            vec![1.0, 2.0]
        );
    }

    #[test]
    fn test_directions() {
        let reader = DelimitedReader::default();
        assert_eq!(
            reader.parse_directions("MIN, max,Maximize\n", "d.csv").unwrap(),
            vec![Direction::Minimize, Direction::Maximize, Direction::Maximize]
        );
        assert!(matches!(
            reader.parse_directions("MIN,up", "d.csv"),
            Err(ParseError::InvalidDirection { token, .. }) if token == "up"
        ));
    }

    #[test]
    fn test_scalar() {
        let reader = DelimitedReader::default();
        assert_eq!(reader.parse_scalar("0.65\n", "c.csv").unwrap(), 0.65);
        assert_eq!(reader.parse_scalar("0.7,0.9", "c.csv").unwrap(), 0.7);
    }

    #[test]
    fn test_empty_input() {
        let reader = DelimitedReader::default();
        assert!(matches!(
            reader.parse_matrix("\n\n", "m.csv"),
            Err(ParseError::Empty { .. })
        ));
        assert!(matches!(
            reader.parse_vector("", "w.csv"),
            Err(ParseError::Empty { .. })
        ));
        assert!(matches!(
            reader.parse_directions(" \n", "d.csv"),
            Err(ParseError::Empty { .. })
        ));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = DelimitedReader::default()
            .read_matrix(dir.path().join("absent.csv"))
            .unwrap_err();
        assert!(matches!(err, ParseError::Io { .. }));
    }
}
