//! Analysis entry point that hides all internal wiring.

use std::path::PathBuf;
use std::sync::Arc;

use outrank_config::RunConfig;
use outrank_core::{DecisionProblem, OutrankError};
use outrank_io::load_problem;
use outrank_methods::{
    parse_selection, AlgorithmKind, DecisionAlgorithm, EngineOptions, OutrankingEngine,
    StageListener,
};
use tracing::{info, warn};

use crate::AnalysisError;

/// Results of one analysis.
#[derive(Debug)]
pub struct Analysis {
    /// The problem as loaded, after optional weight normalization.
    pub problem: DecisionProblem,
    /// Selection codes that matched no method.
    pub rejected: Vec<char>,
    /// One report per selected method, in selection order.
    pub reports: Vec<MethodReport>,
}

impl Analysis {
    pub fn report(&self, kind: AlgorithmKind) -> Option<&MethodReport> {
        self.reports.iter().find(|report| report.kind == kind)
    }

    /// Reports whose results could not be written.
    pub fn failed_exports(&self) -> impl Iterator<Item = &MethodReport> {
        self.reports.iter().filter(|report| report.export_error.is_some())
    }
}

/// What one method produced.
#[derive(Debug)]
pub struct MethodReport {
    pub kind: AlgorithmKind,
    pub summary: Option<String>,
    /// Files written; empty without an output directory or when the export failed.
    pub files: Vec<PathBuf>,
    /// Why the export failed. The in-memory results stay valid.
    pub export_error: Option<OutrankError>,
    /// The engine after its run, for access to the full outcome.
    pub algorithm: Box<dyn DecisionAlgorithm>,
}

/// Runs the methods selected by a [`RunConfig`].
///
/// # Examples
///
/// ```no_run
/// use outrank::prelude::*;
///
/// let config = RunConfig::load("outrank.toml").unwrap();
/// let analysis = Analyzer::new(config).run().unwrap();
/// for report in &analysis.reports {
///     println!("{}: {:?}", report.kind.name(), report.summary);
/// }
/// ```
#[derive(Debug)]
pub struct Analyzer {
    config: RunConfig,
    listeners: Vec<Arc<dyn StageListener>>,
}

impl Analyzer {
    pub fn new(config: RunConfig) -> Self {
        Self {
            config,
            listeners: Vec::new(),
        }
    }

    /// Registers a listener on every engine this analyzer creates.
    pub fn with_listener(mut self, listener: Arc<dyn StageListener>) -> Self {
        self.listeners.push(listener);
        self
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Validates the configuration, loads the input and runs each method.
    ///
    /// Methods run in selection order and the first failed run stops the
    /// analysis. A failed export is kept on its report and the remaining
    /// methods still run.
    pub fn run(&self) -> Result<Analysis, AnalysisError> {
        self.config.validate()?;
        let selection = parse_selection(&self.config.algorithms)?;
        for code in &selection.rejected {
            warn!("'{code}' is not a valid algorithm");
        }

        let mut problem = load_problem(
            &self.config.input,
            self.config.electre.concordance_threshold,
        )?;
        if self.config.electre.normalize_weights {
            problem.normalize_weights();
        }

        let mut reports = Vec::with_capacity(selection.kinds.len());
        for kind in selection.kinds {
            reports.push(self.run_method(kind, &problem)?);
        }

        info!(
            methods = reports.len() as u64,
            alternatives = problem.alternative_count() as u64,
            "Analysis complete"
        );
        Ok(Analysis {
            problem,
            rejected: selection.rejected,
            reports,
        })
    }

    fn run_method(
        &self,
        kind: AlgorithmKind,
        problem: &DecisionProblem,
    ) -> Result<MethodReport, AnalysisError> {
        let mut algorithm = self.engine_for(kind);
        for listener in &self.listeners {
            algorithm.add_listener(Arc::clone(listener));
        }

        algorithm.load(problem)?;
        algorithm.run()?;

        let (files, export_error) = match &self.config.output_dir {
            Some(dir) => match algorithm.save(dir) {
                Ok(files) => (files, None),
                Err(e) => {
                    warn!(method = kind.name(), error = %e, "Export failed");
                    (Vec::new(), Some(e))
                }
            },
            None => (Vec::new(), None),
        };

        Ok(MethodReport {
            kind,
            summary: algorithm.summary(),
            files,
            export_error,
            algorithm,
        })
    }

    fn engine_for(&self, kind: AlgorithmKind) -> Box<dyn DecisionAlgorithm> {
        match kind {
            AlgorithmKind::Electre => {
                let options =
                    EngineOptions::default().with_max_cycles(self.config.electre.max_cycles);
                Box::new(OutrankingEngine::new().with_options(options))
            }
            AlgorithmKind::Promethee => kind.instantiate(),
        }
    }
}

/// Runs the methods selected by `config`.
///
/// Shorthand for `Analyzer::new(config.clone()).run()`.
pub fn analyze(config: &RunConfig) -> Result<Analysis, AnalysisError> {
    Analyzer::new(config.clone()).run()
}

#[cfg(test)]
#[path = "analysis_tests.rs"]
mod tests;
