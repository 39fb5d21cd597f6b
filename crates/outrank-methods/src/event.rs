//! Stage events for run monitoring.
//!
//! Every method runs as a fixed sequence of [`Stage`]s. Listeners registered
//! on a [`StageEventSupport`] are told when a run starts, when each stage
//! starts and ends, and when the run ends, so callers can observe stage
//! sequencing without capturing console output.
//!
//! The same boundaries are emitted as `tracing` events (`run_start`,
//! `stage_start`, `stage_end`) for the console layer.
//!
//! # Usage
//!
//! ```
//! use std::sync::Arc;
//! use outrank_methods::event::{RecordingStageListener, Stage, StageEvent, StageEventSupport};
//!
//! let recorder = Arc::new(RecordingStageListener::new());
//! let mut support = StageEventSupport::new();
//! support.add_listener(recorder.clone());
//!
//! let value = support.stage(Stage::Concordance, 1, 5, || 42);
//! assert_eq!(value, 42);
//! assert_eq!(
//!     recorder.stages_started(),
//!     vec![Stage::Concordance],
//! );
//! ```

use std::fmt::{self, Debug};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use tracing::info;

/// A step of a decision method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// ELECTRE: pairwise concordance matrix.
    Concordance,
    /// ELECTRE: pairwise veto (non-discordance) matrix.
    NonDiscordance,
    /// ELECTRE: dominance relation from concordance and non-discordance.
    Dominance,
    /// ELECTRE: cycle detection and cycle breaking.
    CycleRemoval,
    /// ELECTRE: kernel extraction.
    Kernel,
    /// PROMETHEE: weighted pairwise preference matrix.
    PreferenceMatrix,
    /// PROMETHEE: positive, negative and net flows.
    Flows,
    /// PROMETHEE: rank positions.
    Ranking,
}

impl Stage {
    /// ELECTRE stages in execution order.
    pub const ELECTRE: [Stage; 5] = [
        Stage::Concordance,
        Stage::NonDiscordance,
        Stage::Dominance,
        Stage::CycleRemoval,
        Stage::Kernel,
    ];

    /// PROMETHEE stages in execution order.
    pub const PROMETHEE: [Stage; 3] = [Stage::PreferenceMatrix, Stage::Flows, Stage::Ranking];

    pub fn name(self) -> &'static str {
        match self {
            Stage::Concordance => "concordance",
            Stage::NonDiscordance => "non_discordance",
            Stage::Dominance => "dominance",
            Stage::CycleRemoval => "cycle_removal",
            Stage::Kernel => "kernel",
            Stage::PreferenceMatrix => "preference_matrix",
            Stage::Flows => "flows",
            Stage::Ranking => "ranking",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Listener for run and stage lifecycle events.
pub trait StageListener: Send + Sync + Debug {
    /// Called once input validation has passed and computation begins.
    fn on_run_started(&self, _algorithm: &str, _alternatives: usize, _criteria: usize) {}

    /// Called before a stage executes.
    fn on_stage_started(&self, stage: Stage);

    /// Called after a stage completed.
    fn on_stage_ended(&self, stage: Stage, elapsed: Duration);

    /// Called when the run finished, successfully or not.
    fn on_run_ended(&self, _algorithm: &str, _succeeded: bool) {}
}

/// Central broadcaster for stage events.
///
/// Listeners are called synchronously in registration order.
#[derive(Default)]
pub struct StageEventSupport {
    listeners: Vec<Arc<dyn StageListener>>,
}

impl StageEventSupport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_listener(&mut self, listener: Arc<dyn StageListener>) {
        self.listeners.push(listener);
    }

    pub fn clear_listeners(&mut self) {
        self.listeners.clear();
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn has_listeners(&self) -> bool {
        !self.listeners.is_empty()
    }

    /// Announces the start of a run.
    pub fn run_started(&self, algorithm: &str, alternatives: usize, criteria: usize) {
        info!(
            event = "run_start",
            algorithm = algorithm,
            alternatives = alternatives as u64,
            criteria = criteria as u64,
        );
        for listener in &self.listeners {
            listener.on_run_started(algorithm, alternatives, criteria);
        }
    }

    /// Announces the end of a run.
    pub fn run_ended(&self, algorithm: &str, succeeded: bool) {
        for listener in &self.listeners {
            listener.on_run_ended(algorithm, succeeded);
        }
    }

    /// Runs `work` as stage `step` of `steps`, firing start/end around it.
    ///
    /// The end event fires only if `work` returns; a stage whose result is
    /// an error still counts as ended, the caller decides what the error
    /// means for the run.
    pub fn stage<T>(&self, stage: Stage, step: usize, steps: usize, work: impl FnOnce() -> T) -> T {
        info!(
            event = "stage_start",
            stage = stage.name(),
            step = step as u64,
            steps = steps as u64,
        );
        for listener in &self.listeners {
            listener.on_stage_started(stage);
        }

        let started = Instant::now();
        let value = work();
        let elapsed = started.elapsed();

        info!(
            event = "stage_end",
            stage = stage.name(),
            step = step as u64,
            steps = steps as u64,
            duration_us = elapsed.as_micros() as u64,
        );
        for listener in &self.listeners {
            listener.on_stage_ended(stage, elapsed);
        }
        value
    }
}

impl Debug for StageEventSupport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StageEventSupport")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

/// A logging listener that prints events to stdout.
///
/// Useful for debugging without a tracing subscriber.
#[derive(Debug, Clone, Default)]
pub struct LoggingStageListener {
    prefix: String,
}

impl LoggingStageListener {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }
}

impl StageListener for LoggingStageListener {
    fn on_run_started(&self, algorithm: &str, alternatives: usize, criteria: usize) {
        println!(
            "{}[Event] {} started ({} alternatives, {} criteria)",
            self.prefix, algorithm, alternatives, criteria
        );
    }

    fn on_stage_started(&self, stage: Stage) {
        println!("{}[Event] Stage {} started", self.prefix, stage);
    }

    fn on_stage_ended(&self, stage: Stage, elapsed: Duration) {
        println!(
            "{}[Event] Stage {} ended after {:?}",
            self.prefix, stage, elapsed
        );
    }

    fn on_run_ended(&self, algorithm: &str, succeeded: bool) {
        if succeeded {
            println!("{}[Event] {} completed", self.prefix, algorithm);
        } else {
            println!("{}[Event] {} failed", self.prefix, algorithm);
        }
    }
}

/// A counting listener that tracks event occurrences.
#[derive(Debug, Default)]
pub struct CountingStageListener {
    runs_started: AtomicUsize,
    runs_ended: AtomicUsize,
    runs_failed: AtomicUsize,
    stages_started: AtomicUsize,
    stages_ended: AtomicUsize,
}

impl CountingStageListener {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn runs_started(&self) -> usize {
        self.runs_started.load(Ordering::SeqCst)
    }

    pub fn runs_ended(&self) -> usize {
        self.runs_ended.load(Ordering::SeqCst)
    }

    /// Runs that ended without a result.
    pub fn runs_failed(&self) -> usize {
        self.runs_failed.load(Ordering::SeqCst)
    }

    pub fn stages_started(&self) -> usize {
        self.stages_started.load(Ordering::SeqCst)
    }

    pub fn stages_ended(&self) -> usize {
        self.stages_ended.load(Ordering::SeqCst)
    }

    pub fn reset(&self) {
        self.runs_started.store(0, Ordering::SeqCst);
        self.runs_ended.store(0, Ordering::SeqCst);
        self.runs_failed.store(0, Ordering::SeqCst);
        self.stages_started.store(0, Ordering::SeqCst);
        self.stages_ended.store(0, Ordering::SeqCst);
    }
}

impl StageListener for CountingStageListener {
    fn on_run_started(&self, _algorithm: &str, _alternatives: usize, _criteria: usize) {
        self.runs_started.fetch_add(1, Ordering::SeqCst);
    }

    fn on_stage_started(&self, _stage: Stage) {
        self.stages_started.fetch_add(1, Ordering::SeqCst);
    }

    fn on_stage_ended(&self, _stage: Stage, _elapsed: Duration) {
        self.stages_ended.fetch_add(1, Ordering::SeqCst);
    }

    fn on_run_ended(&self, _algorithm: &str, succeeded: bool) {
        self.runs_ended.fetch_add(1, Ordering::SeqCst);
        if !succeeded {
            self.runs_failed.fetch_add(1, Ordering::SeqCst);
        }
    }
}

/// One observed lifecycle event, without timings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StageEvent {
    RunStarted {
        algorithm: String,
        alternatives: usize,
        criteria: usize,
    },
    StageStarted(Stage),
    StageEnded(Stage),
    RunEnded {
        algorithm: String,
        succeeded: bool,
    },
}

/// A listener that records the ordered event sequence.
#[derive(Debug, Default)]
pub struct RecordingStageListener {
    events: Mutex<Vec<StageEvent>>,
}

impl RecordingStageListener {
    pub fn new() -> Self {
        Self::default()
    }

    /// All events observed so far, oldest first.
    pub fn events(&self) -> Vec<StageEvent> {
        self.lock().clone()
    }

    /// Stages in the order they started.
    pub fn stages_started(&self) -> Vec<Stage> {
        self.lock()
            .iter()
            .filter_map(|event| match event {
                StageEvent::StageStarted(stage) => Some(*stage),
                _ => None,
            })
            .collect()
    }

    /// Stages in the order they completed.
    pub fn stages_ended(&self) -> Vec<Stage> {
        self.lock()
            .iter()
            .filter_map(|event| match event {
                StageEvent::StageEnded(stage) => Some(*stage),
                _ => None,
            })
            .collect()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    fn record(&self, event: StageEvent) {
        self.lock().push(event);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<StageEvent>> {
        // a panicking listener elsewhere must not hide what was recorded
        self.events.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl StageListener for RecordingStageListener {
    fn on_run_started(&self, algorithm: &str, alternatives: usize, criteria: usize) {
        self.record(StageEvent::RunStarted {
            algorithm: algorithm.to_string(),
            alternatives,
            criteria,
        });
    }

    fn on_stage_started(&self, stage: Stage) {
        self.record(StageEvent::StageStarted(stage));
    }

    fn on_stage_ended(&self, stage: Stage, _elapsed: Duration) {
        self.record(StageEvent::StageEnded(stage));
    }

    fn on_run_ended(&self, algorithm: &str, succeeded: bool) {
        self.record(StageEvent::RunEnded {
            algorithm: algorithm.to_string(),
            succeeded,
        });
    }
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;
