//! ELECTRE outranking kernel.
//!
//! The engine runs five stages over a validated [`CriteriaModel`]:
//!
//! 1. [`compute_concordance`]: weighted agreement of `a` over `b`
//! 2. [`compute_non_discordance`]: veto filter
//! 3. [`compute_dominance`]: concordance at threshold and not vetoed
//! 4. [`DominanceGraph::detect_cycles`] then [`DominanceGraph::break_cycles`]
//! 5. [`extract_kernel`]: alternatives nothing dominates
//!
//! Each stage consumes only the previous stage's output plus the model.

mod concordance;
mod discordance;
mod dominance;
mod kernel;

#[cfg(test)]
mod tests;

pub use concordance::{compute_concordance, partial_credit};
pub use discordance::compute_non_discordance;
pub use dominance::{compute_dominance, Cycle, CycleBreak, DominanceGraph};
pub use kernel::{extract_kernel, kernel_members};

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use outrank_core::{
    ConcordanceMatrix, CriteriaModel, DecisionProblem, Direction, NonDiscordanceMatrix, OutrankError,
    Result,
};
use tracing::{info, trace, warn};

use crate::algorithm::{AlgorithmKind, DecisionAlgorithm};
use crate::event::{Stage, StageEventSupport, StageListener};
use crate::export;

/// Input accepted by [`OutrankingEngine::configure`].
pub type ElectreInput = DecisionProblem;

/// Default cap on cycle reports during cycle detection.
pub const DEFAULT_MAX_CYCLES: usize = 100_000;

const NAME: &str = "ELECTRE";
const EXPORT_DIR: &str = "Electre";
const KERNEL_FILE: &str = "kernel.csv";

/// Tuning knobs of the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineOptions {
    /// Cycle reports allowed before the run fails with
    /// [`OutrankError::TooManyCycles`].
    pub max_cycles: usize,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            max_cycles: DEFAULT_MAX_CYCLES,
        }
    }
}

impl EngineOptions {
    pub fn with_max_cycles(mut self, max_cycles: usize) -> Self {
        self.max_cycles = max_cycles;
        self
    }
}

/// Everything one run produced.
#[derive(Debug, Clone, PartialEq)]
pub struct OutrankingOutcome {
    pub concordance: ConcordanceMatrix,
    pub non_discordance: NonDiscordanceMatrix,
    /// Dominance before cycle breaking.
    pub raw_dominance: DominanceGraph,
    /// Dominance after cycle breaking.
    pub dominance: DominanceGraph,
    pub cycles: Vec<Cycle>,
    pub breaks: Vec<CycleBreak>,
    pub kernel: Vec<bool>,
}

impl OutrankingOutcome {
    pub fn kernel_members(&self) -> Vec<usize> {
        kernel_members(&self.kernel)
    }

    /// Edges cycle breaking actually cleared.
    pub fn removed_edge_count(&self) -> usize {
        self.raw_dominance.edge_count() - self.dominance.edge_count()
    }
}

/// ELECTRE orchestrator.
///
/// # Examples
///
/// ```
/// use outrank_core::{DecisionProblem, Direction};
/// use outrank_methods::electre::OutrankingEngine;
///
/// let problem = DecisionProblem::new(vec![vec![10.0], vec![20.0], vec![15.0]], vec![1.0])
///     .with_directions(vec![Direction::Minimize])
///     .with_vetos(vec![100.0])
///     .with_concordance_threshold(0.5);
///
/// let mut engine = OutrankingEngine::configured(problem).unwrap();
/// engine.run().unwrap();
/// assert_eq!(engine.kernel().unwrap(), &[true, false, false]);
/// ```
#[derive(Debug, Default)]
pub struct OutrankingEngine {
    problem: DecisionProblem,
    options: EngineOptions,
    events: StageEventSupport,
    outcome: Option<OutrankingOutcome>,
}

impl OutrankingEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(mut self, options: EngineOptions) -> Self {
        self.options = options;
        self
    }

    /// Creates an engine and [`configure`](Self::configure)s it.
    pub fn configured(input: ElectreInput) -> Result<Self> {
        let mut engine = Self::new();
        engine.configure(input)?;
        Ok(engine)
    }

    /// Replaces the whole input after validating it.
    ///
    /// # Errors
    ///
    /// Returns [`OutrankError::Configuration`] on any shape mismatch or an
    /// out-of-range threshold; the engine is left unchanged.
    pub fn configure(&mut self, input: ElectreInput) -> Result<()> {
        CriteriaModel::from_problem(&input)?;
        self.problem = input;
        self.outcome = None;
        Ok(())
    }

    pub fn problem(&self) -> &DecisionProblem {
        &self.problem
    }

    pub fn options(&self) -> EngineOptions {
        self.options
    }

    pub fn set_options(&mut self, options: EngineOptions) {
        self.options = options;
    }

    pub fn add_listener(&mut self, listener: Arc<dyn StageListener>) {
        self.events.add_listener(listener);
    }

    /// Runs all stages.
    ///
    /// Nothing is published unless every stage succeeds; a previous result
    /// is discarded first.
    pub fn run(&mut self) -> Result<()> {
        self.outcome = None;
        let model = CriteriaModel::from_problem(&self.problem)?;
        let started = Instant::now();
        self.events
            .run_started(NAME, model.alternative_count(), model.criteria_count());

        match self.execute(&model) {
            Ok(outcome) => {
                info!(
                    event = "run_end",
                    algorithm = NAME,
                    duration_ms = started.elapsed().as_millis() as u64,
                    survivors = outcome.kernel.iter().filter(|&&k| k).count() as u64,
                );
                self.events.run_ended(NAME, true);
                self.outcome = Some(outcome);
                Ok(())
            }
            Err(e) => {
                warn!(event = "run_failed", algorithm = NAME, error = %e);
                self.events.run_ended(NAME, false);
                Err(e)
            }
        }
    }

    fn execute(&self, model: &CriteriaModel) -> Result<OutrankingOutcome> {
        let steps = Stage::ELECTRE.len();

        let concordance = self
            .events
            .stage(Stage::Concordance, 1, steps, || compute_concordance(model));
        trace!(matrix = %concordance, "Concordance");

        let non_discordance = self
            .events
            .stage(Stage::NonDiscordance, 2, steps, || compute_non_discordance(model));
        trace!(matrix = %non_discordance, "Non-discordance");

        let raw_dominance = self.events.stage(Stage::Dominance, 3, steps, || {
            compute_dominance(&concordance, &non_discordance, model.concordance_threshold())
        });
        trace!(matrix = %raw_dominance.matrix(), "Dominance");

        let (dominance, cycles, breaks) =
            self.events.stage(Stage::CycleRemoval, 4, steps, || {
                let cycles = raw_dominance.detect_cycles(self.options.max_cycles)?;
                let mut dominance = raw_dominance.clone();
                let breaks = dominance.break_cycles(&cycles, &concordance);
                Ok::<_, OutrankError>((dominance, cycles, breaks))
            })?;
        info!(
            event = "cycles",
            detected = cycles.len() as u64,
            removed_edges = (raw_dominance.edge_count() - dominance.edge_count()) as u64,
        );

        let kernel = self
            .events
            .stage(Stage::Kernel, 5, steps, || extract_kernel(&dominance));

        Ok(OutrankingOutcome {
            concordance,
            non_discordance,
            raw_dominance,
            dominance,
            cycles,
            breaks,
            kernel,
        })
    }

    pub fn outcome(&self) -> Result<&OutrankingOutcome> {
        self.outcome.as_ref().ok_or(OutrankError::NotRun)
    }

    pub fn kernel(&self) -> Result<&[bool]> {
        Ok(self.outcome()?.kernel.as_slice())
    }

    pub fn kernel_members(&self) -> Result<Vec<usize>> {
        Ok(self.outcome()?.kernel_members())
    }

    pub fn concordance(&self) -> Result<&ConcordanceMatrix> {
        Ok(&self.outcome()?.concordance)
    }

    pub fn non_discordance(&self) -> Result<&NonDiscordanceMatrix> {
        Ok(&self.outcome()?.non_discordance)
    }

    /// Dominance after cycle breaking.
    pub fn dominance(&self) -> Result<&DominanceGraph> {
        Ok(&self.outcome()?.dominance)
    }

    /// Writes `dir/Electre/kernel.csv`.
    pub fn save(&self, dir: &Path) -> Result<PathBuf> {
        let outcome = self.outcome()?;
        let path = export::method_dir(dir, EXPORT_DIR)?.join(KERNEL_FILE);
        export::write_lines(&path, [export::bool_row(&outcome.kernel, ",")])?;
        info!(event = "export", algorithm = NAME, path = %path.display());
        Ok(path)
    }
}

impl DecisionAlgorithm for OutrankingEngine {
    fn kind(&self) -> AlgorithmKind {
        AlgorithmKind::Electre
    }

    fn set_data(&mut self, matrix: Vec<Vec<f64>>) {
        self.problem.matrix = matrix;
        self.outcome = None;
    }

    /// Also resets vetos and directions to their defaults when their length
    /// no longer matches.
    fn set_weights(&mut self, weights: Vec<f64>) {
        let m = weights.len();
        if self.problem.vetos.len() != m {
            self.problem.vetos = vec![f64::INFINITY; m];
        }
        if self.problem.directions.len() != m {
            self.problem.directions = vec![Direction::Maximize; m];
        }
        self.problem.weights = weights;
        self.outcome = None;
    }

    fn load(&mut self, problem: &DecisionProblem) -> Result<()> {
        self.configure(problem.clone())
    }

    fn add_listener(&mut self, listener: Arc<dyn StageListener>) {
        OutrankingEngine::add_listener(self, listener);
    }

    fn run(&mut self) -> Result<()> {
        OutrankingEngine::run(self)
    }

    fn save(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        OutrankingEngine::save(self, dir).map(|path| vec![path])
    }

    fn summary(&self) -> Option<String> {
        let outcome = self.outcome.as_ref()?;
        let members = outcome.kernel_members();
        let listed = members
            .iter()
            .map(|m| m.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        Some(format!(
            "kernel [{listed}] ({} of {} alternatives, {} cycles broken)",
            members.len(),
            outcome.kernel.len(),
            outcome.breaks.len()
        ))
    }
}
