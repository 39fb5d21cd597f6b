//! Configuration system for Outrank.
//!
//! Load a run configuration from TOML or YAML to choose the methods, the
//! input files and the ELECTRE tuning without code changes.
//!
//! # Examples
//!
//! Load configuration from TOML string:
//!
//! ```
//! use outrank_config::RunConfig;
//!
//! let config = RunConfig::from_toml_str(r#"
//!     algorithms = "e"
//!     output_dir = "results"
//!
//!     [input]
//!     data = "data.csv"
//!     weights = "weights.csv"
//!     vetos = "vetos.csv"
//!
//!     [electre]
//!     concordance_threshold = 0.6
//! "#).unwrap();
//!
//! assert_eq!(config.algorithms, "e");
//! assert_eq!(config.electre.concordance_threshold, Some(0.6));
//! assert_eq!(config.electre.max_cycles, 100_000);
//! ```
//!
//! Use default config when file is missing:
//!
//! ```
//! use outrank_config::RunConfig;
//!
//! let config = RunConfig::load("outrank.toml").unwrap_or_default();
//! assert_eq!(config.algorithms, "a");
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default cap on ELECTRE cycle reports.
pub const DEFAULT_MAX_CYCLES: usize = 100_000;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main run configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct RunConfig {
    /// Method short codes, `"a"` for all.
    #[serde(default = "default_algorithms")]
    pub algorithms: String,

    /// Directory receiving the results of every method run.
    #[serde(default)]
    pub output_dir: Option<PathBuf>,

    /// Input files.
    #[serde(default)]
    pub input: InputConfig,

    /// ELECTRE tuning.
    #[serde(default)]
    pub electre: ElectreConfig,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            algorithms: default_algorithms(),
            output_dir: None,
            input: InputConfig::default(),
            electre: ElectreConfig::default(),
        }
    }
}

fn default_algorithms() -> String {
    "a".to_string()
}

impl RunConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a file, picking the format by extension.
    ///
    /// `.yaml` and `.yml` files are read as YAML, anything else as TOML.
    ///
    /// # Errors
    ///
    /// Returns error if the file doesn't exist or cannot be parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml" | "yml") => Self::from_yaml_file(path),
            _ => Self::from_toml_file(path),
        }
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(s)?)
    }

    /// Sets the method short codes.
    pub fn with_algorithms(mut self, codes: impl Into<String>) -> Self {
        self.algorithms = codes.into();
        self
    }

    /// Sets the result directory.
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    /// Sets the ELECTRE cycle cap.
    pub fn with_max_cycles(mut self, max_cycles: usize) -> Self {
        self.electre.max_cycles = max_cycles;
        self
    }

    /// Replaces the input section.
    pub fn with_input(mut self, input: InputConfig) -> Self {
        self.input = input;
        self
    }

    /// Checks the settings that can be judged without touching the files.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] for a blank method selection, a
    /// negative threshold or a delimiter that can appear inside a number.
    /// A cycle cap of 0 is valid and tolerates no cycle at all.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.algorithms.trim().is_empty() {
            return Err(ConfigError::Invalid("no algorithm selected".to_string()));
        }
        let delimiter = self.input.delimiter;
        if delimiter.is_ascii_alphanumeric() || matches!(delimiter, '.' | '-' | '+') {
            return Err(ConfigError::Invalid(format!(
                "delimiter {:?} clashes with number syntax",
                delimiter
            )));
        }
        if let Some(threshold) = self.electre.concordance_threshold {
            if !threshold.is_finite() || threshold < 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "concordance threshold {threshold} must be a non-negative number"
                )));
            }
        }
        Ok(())
    }
}

/// Paths of the delimited input files.
///
/// Only `data` and `weights` are required; the others fall back to
/// disabled vetos, maximized criteria, zero preference thresholds and a
/// zero concordance threshold.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct InputConfig {
    /// Decision matrix, one alternative per line.
    #[serde(default)]
    pub data: PathBuf,

    /// Criterion weights on the first line.
    #[serde(default)]
    pub weights: PathBuf,

    #[serde(default)]
    pub vetos: Option<PathBuf>,

    /// `MIN`/`MAX` tokens.
    #[serde(default)]
    pub directions: Option<PathBuf>,

    #[serde(default)]
    pub preference_thresholds: Option<PathBuf>,

    /// File holding the single concordance threshold.
    #[serde(default)]
    pub concordance_threshold: Option<PathBuf>,

    /// Field separator.
    #[serde(default = "default_delimiter")]
    pub delimiter: char,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            data: PathBuf::new(),
            weights: PathBuf::new(),
            vetos: None,
            directions: None,
            preference_thresholds: None,
            concordance_threshold: None,
            delimiter: default_delimiter(),
        }
    }
}

fn default_delimiter() -> char {
    ','
}

impl InputConfig {
    pub fn new(data: impl Into<PathBuf>, weights: impl Into<PathBuf>) -> Self {
        Self {
            data: data.into(),
            weights: weights.into(),
            ..Self::default()
        }
    }

    pub fn with_vetos(mut self, path: impl Into<PathBuf>) -> Self {
        self.vetos = Some(path.into());
        self
    }

    pub fn with_directions(mut self, path: impl Into<PathBuf>) -> Self {
        self.directions = Some(path.into());
        self
    }

    pub fn with_preference_thresholds(mut self, path: impl Into<PathBuf>) -> Self {
        self.preference_thresholds = Some(path.into());
        self
    }

    pub fn with_concordance_threshold(mut self, path: impl Into<PathBuf>) -> Self {
        self.concordance_threshold = Some(path.into());
        self
    }

    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }
}

/// ELECTRE tuning.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ElectreConfig {
    /// Overrides the threshold file when set.
    #[serde(default)]
    pub concordance_threshold: Option<f64>,

    /// Cycle reports allowed before the run fails.
    #[serde(default = "default_max_cycles")]
    pub max_cycles: usize,

    /// Scale the weights to sum to 1 before running.
    #[serde(default)]
    pub normalize_weights: bool,
}

impl Default for ElectreConfig {
    fn default() -> Self {
        Self {
            concordance_threshold: None,
            max_cycles: DEFAULT_MAX_CYCLES,
            normalize_weights: false,
        }
    }
}

fn default_max_cycles() -> usize {
    DEFAULT_MAX_CYCLES
}
