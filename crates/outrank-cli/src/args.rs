//! Command line arguments and their merge into a run configuration.

use std::path::PathBuf;

use clap::Parser;
use outrank::{AlgorithmKind, ConfigError, RunConfig};

/// Outranking decision analysis: ELECTRE kernels and PROMETHEE rankings.
#[derive(Parser, Debug, Default)]
#[command(name = "outrank", version)]
pub struct Cli {
    /// Decision matrix file, one alternative per line
    #[arg(short, long, value_name = "FILE")]
    pub data: Option<PathBuf>,

    /// Criterion weights file
    #[arg(short, long, value_name = "FILE", alias = "weight")]
    pub weights: Option<PathBuf>,

    /// Veto thresholds file
    #[arg(long, value_name = "FILE")]
    pub vetos: Option<PathBuf>,

    /// Directions file with MIN/MAX per criterion
    #[arg(long, value_name = "FILE")]
    pub directions: Option<PathBuf>,

    /// Preference thresholds file
    #[arg(long, value_name = "FILE")]
    pub thresholds: Option<PathBuf>,

    /// File holding the concordance threshold
    #[arg(long, value_name = "FILE")]
    pub concordance: Option<PathBuf>,

    /// Concordance threshold, overrides --concordance
    #[arg(long, value_name = "VALUE")]
    pub concordance_threshold: Option<f64>,

    /// Algorithm codes to run, `a` for all
    #[arg(short, long = "algo", value_name = "CODES")]
    pub algorithms: Option<String>,

    /// Directory receiving the results
    #[arg(short, long, value_name = "DIR")]
    pub save: Option<PathBuf>,

    /// TOML or YAML run configuration; flags override its values
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Field separator of the input files
    #[arg(long)]
    pub delimiter: Option<char>,

    /// Cycle reports allowed before ELECTRE gives up
    #[arg(long, value_name = "N")]
    pub max_cycles: Option<usize>,

    /// Scale weights to sum to 1
    #[arg(long)]
    pub normalize_weights: bool,

    /// Disable the colored console output
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Loads `--config` if given, then applies every flag on top.
    ///
    /// # Errors
    ///
    /// Fails when the configuration file cannot be read, or when no data or
    /// weights file is known after merging.
    pub fn into_config(self) -> Result<RunConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => RunConfig::load(path)?,
            None => RunConfig::default(),
        };

        let input = &mut config.input;
        if let Some(path) = self.data {
            input.data = path;
        }
        if let Some(path) = self.weights {
            input.weights = path;
        }
        if self.vetos.is_some() {
            input.vetos = self.vetos;
        }
        if self.directions.is_some() {
            input.directions = self.directions;
        }
        if self.thresholds.is_some() {
            input.preference_thresholds = self.thresholds;
        }
        if self.concordance.is_some() {
            input.concordance_threshold = self.concordance;
        }
        if let Some(delimiter) = self.delimiter {
            input.delimiter = delimiter;
        }

        if let Some(codes) = self.algorithms {
            config.algorithms = codes;
        }
        if self.save.is_some() {
            config.output_dir = self.save;
        }
        if self.concordance_threshold.is_some() {
            config.electre.concordance_threshold = self.concordance_threshold;
        }
        if let Some(max_cycles) = self.max_cycles {
            config.electre.max_cycles = max_cycles;
        }
        if self.normalize_weights {
            config.electre.normalize_weights = true;
        }

        if config.input.data.as_os_str().is_empty() {
            return Err(ConfigError::Invalid(
                "no data file given (use -d or a config file)".to_string(),
            ));
        }
        if config.input.weights.as_os_str().is_empty() {
            return Err(ConfigError::Invalid(
                "no weights file given (use -w or a config file)".to_string(),
            ));
        }
        Ok(config)
    }
}

/// The algorithm table shown after `--help`.
pub fn algorithm_help() -> String {
    let mut help = String::from("Algorithms:\n");
    for kind in AlgorithmKind::all() {
        help.push_str(&format!(
            "  {}  {:<10} {} ({})\n",
            kind.code(),
            kind.name(),
            kind.description(),
            kind.alt_info()
        ));
    }
    help.push_str("  a  all\n\nExample:\n  outrank -a e -d data/recycle/data.csv -w data/recycle/weights.csv");
    help
}
