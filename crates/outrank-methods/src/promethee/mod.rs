//! PROMETHEE flow ranking.
//!
//! Three stages over the decision matrix and weights:
//!
//! 1. [`compute_preference`]: weight of the criteria on which `a` beats `b`
//! 2. [`compute_flows`]: positive, negative and net flows
//! 3. [`Rankings::from_flows`]: rank positions per flow
//!
//! Criteria are maximized unless a direction says otherwise; vetos and
//! thresholds are ignored.

mod flows;
mod preference;


pub use flows::{compute_flows, rank_positions, Flows, Rankings};
pub use preference::{compute_preference, PreferenceMatrix};

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use outrank_core::{
    CriteriaModel, Criterion, DecisionMatrix, DecisionProblem, Direction, OutrankError, Result,
};
use tracing::{info, trace};

use crate::algorithm::{AlgorithmKind, DecisionAlgorithm};
use crate::event::{Stage, StageEventSupport, StageListener};
use crate::export;

const NAME: &str = "PROMETHEE";
const EXPORT_DIR: &str = "Promethee";
const PREFERENCE_FILE: &str = "multicriteriaPreferenceMatrix.csv";
const FLOWS_FILE: &str = "flowsData.csv";
const FLOWS_HEADER: &str = "Flow,Positive Flow,Negative Flow";

/// Result of one PROMETHEE run.
#[derive(Debug, Clone, PartialEq)]
pub struct PrometheeOutcome {
    pub preference: PreferenceMatrix,
    pub flows: Flows,
    pub rankings: Rankings,
}

impl PrometheeOutcome {
    /// Alternatives ordered by net flow, best first; ties keep index order.
    pub fn order(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.rankings.net.len()).collect();
        order.sort_by_key(|&alt| self.rankings.net[alt]);
        order
    }

    /// Renders the flow table as a LaTeX `table` environment.
    pub fn to_latex(&self) -> String {
        let mut out = String::new();
        out.push_str("\\begin{table}[h]\n");
        out.push_str("\\centering\n");
        out.push_str("\\begin{tabular}{|c|c|c|c|}\n");
        out.push_str("\\hline\n");
        out.push_str(
            "\\textbf{Alternative} & \\textbf{Positive Flow ($\\varphi^+$)} & \
             \\textbf{Negative Flow ($\\varphi^-$)} & \\textbf{Flow ($\\varphi$)} \\\\\n",
        );
        out.push_str("\\hline\n");
        for alt in 0..self.flows.net.len() {
            out.push_str(&format!(
                "Alternative {} & {} & {} & {} \\\\\n",
                alt + 1,
                self.flows.positive[alt],
                self.flows.negative[alt],
                self.flows.net[alt]
            ));
        }
        out.push_str("\\hline\n");
        out.push_str("\\end{tabular}\n");
        out.push_str("\\caption{Promethee Flow Data}\n");
        out.push_str("\\label{tab:promethee_flows}\n");
        out.push_str("\\end{table}\n");
        out
    }
}

/// PROMETHEE orchestrator.
///
/// # Examples
///
/// ```
/// use outrank_core::DecisionProblem;
/// use outrank_methods::promethee::PrometheeEngine;
///
/// let problem = DecisionProblem::new(vec![vec![3.0, 1.0], vec![1.0, 2.0]], vec![0.7, 0.3]);
/// let mut engine = PrometheeEngine::configured(problem).unwrap();
/// engine.run().unwrap();
///
/// let outcome = engine.outcome().unwrap();
/// assert_eq!(outcome.rankings.net, vec![1, 2]);
/// ```
#[derive(Debug, Default)]
pub struct PrometheeEngine {
    matrix: Vec<Vec<f64>>,
    weights: Vec<f64>,
    directions: Vec<Direction>,
    events: StageEventSupport,
    outcome: Option<PrometheeOutcome>,
}

impl PrometheeEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn configured(problem: DecisionProblem) -> Result<Self> {
        let mut engine = Self::new();
        engine.configure(problem)?;
        Ok(engine)
    }

    /// Takes the matrix, weights and directions of `problem`.
    ///
    /// # Errors
    ///
    /// Returns [`OutrankError::Configuration`] on a shape mismatch; the engine
    /// is left unchanged.
    pub fn configure(&mut self, problem: DecisionProblem) -> Result<()> {
        Self::model_of(&problem.matrix, &problem.weights, &problem.directions)?;
        self.matrix = problem.matrix;
        self.weights = problem.weights;
        self.directions = problem.directions;
        self.outcome = None;
        Ok(())
    }

    /// Per-criterion directions; an empty vector maximizes every criterion.
    pub fn set_directions(&mut self, directions: Vec<Direction>) {
        self.directions = directions;
        self.outcome = None;
    }

    pub fn add_listener(&mut self, listener: Arc<dyn StageListener>) {
        self.events.add_listener(listener);
    }

    fn model_of(
        matrix: &[Vec<f64>],
        weights: &[f64],
        directions: &[Direction],
    ) -> Result<CriteriaModel> {
        let matrix = DecisionMatrix::new(matrix.to_vec())?;
        if !directions.is_empty() && directions.len() != weights.len() {
            return Err(OutrankError::configuration(format!(
                "{} directions given for {} criteria",
                directions.len(),
                weights.len()
            )));
        }
        let criteria = weights
            .iter()
            .enumerate()
            .map(|(c, &w)| Criterion::new(w, directions.get(c).copied().unwrap_or_default()))
            .collect();
        CriteriaModel::new(matrix, criteria, 0.0)
    }

    pub fn run(&mut self) -> Result<()> {
        self.outcome = None;
        let model = Self::model_of(&self.matrix, &self.weights, &self.directions)?;
        let started = Instant::now();
        self.events
            .run_started(NAME, model.alternative_count(), model.criteria_count());

        let outcome = self.execute(&model);
        info!(
            event = "run_end",
            algorithm = NAME,
            duration_ms = started.elapsed().as_millis() as u64,
            survivors = outcome.rankings.net.iter().filter(|&&r| r == 1).count() as u64,
        );
        self.events.run_ended(NAME, true);
        self.outcome = Some(outcome);
        Ok(())
    }

    fn execute(&self, model: &CriteriaModel) -> PrometheeOutcome {
        let steps = Stage::PROMETHEE.len();

        let preference = self
            .events
            .stage(Stage::PreferenceMatrix, 1, steps, || compute_preference(model));
        trace!(matrix = %preference, "Preference matrix");

        let flows = self
            .events
            .stage(Stage::Flows, 2, steps, || compute_flows(&preference));
        trace!(positive = ?flows.positive, negative = ?flows.negative, net = ?flows.net, "Flows");

        let rankings = self
            .events
            .stage(Stage::Ranking, 3, steps, || Rankings::from_flows(&flows));

        PrometheeOutcome {
            preference,
            flows,
            rankings,
        }
    }

    pub fn outcome(&self) -> Result<&PrometheeOutcome> {
        self.outcome.as_ref().ok_or(OutrankError::NotRun)
    }

    pub fn preference(&self) -> Result<&PreferenceMatrix> {
        Ok(&self.outcome()?.preference)
    }

    pub fn flows(&self) -> Result<&Flows> {
        Ok(&self.outcome()?.flows)
    }

    pub fn rankings(&self) -> Result<&Rankings> {
        Ok(&self.outcome()?.rankings)
    }

    /// Writes the preference matrix and the flow table below `dir/Promethee`.
    pub fn save(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        let outcome = self.outcome()?;
        let folder = export::method_dir(dir, EXPORT_DIR)?;

        let matrix_path = folder.join(PREFERENCE_FILE);
        export::write_lines(
            &matrix_path,
            outcome.preference.rows().map(|row| export::number_row(row, ";")),
        )?;

        let flows_path = folder.join(FLOWS_FILE);
        let flows = &outcome.flows;
        let rows = (0..flows.net.len()).map(|alt| {
            export::number_row(
                &[flows.net[alt], flows.positive[alt], flows.negative[alt]],
                ",",
            )
        });
        export::write_lines(&flows_path, std::iter::once(FLOWS_HEADER.to_string()).chain(rows))?;

        for path in [&matrix_path, &flows_path] {
            info!(event = "export", algorithm = NAME, path = %path.display());
        }
        Ok(vec![matrix_path, flows_path])
    }
}

impl DecisionAlgorithm for PrometheeEngine {
    fn kind(&self) -> AlgorithmKind {
        AlgorithmKind::Promethee
    }

    fn set_data(&mut self, matrix: Vec<Vec<f64>>) {
        self.matrix = matrix;
        self.outcome = None;
    }

    fn set_weights(&mut self, weights: Vec<f64>) {
        self.weights = weights;
        self.outcome = None;
    }

    fn load(&mut self, problem: &DecisionProblem) -> Result<()> {
        self.configure(problem.clone())
    }

    fn add_listener(&mut self, listener: Arc<dyn StageListener>) {
        PrometheeEngine::add_listener(self, listener);
    }

    fn run(&mut self) -> Result<()> {
        PrometheeEngine::run(self)
    }

    fn save(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        PrometheeEngine::save(self, dir)
    }

    fn summary(&self) -> Option<String> {
        let outcome = self.outcome.as_ref()?;
        let order = outcome
            .order()
            .iter()
            .map(|alt| alt.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        Some(format!("net flow order [{order}]"))
    }
}
