//! Colorful console output for decision runs.
//!
//! Provides a custom `tracing` layer that formats method events with colors.
//!
//! ## Log Levels
//!
//! - **INFO**: Lifecycle events (run start/end, stage start/end, cycles, export)
//! - **DEBUG**: Cycle break details
//! - **TRACE**: Matrix dumps

use num_format::{Locale, ToFormattedString};
use owo_colors::OwoColorize;
use std::io::{self, Write};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::OnceLock;
use std::time::Instant;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::Context;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

static INIT: OnceLock<()> = OnceLock::new();
static EPOCH: OnceLock<Instant> = OnceLock::new();
static RUN_START_NANOS: AtomicU64 = AtomicU64::new(0);

/// Package version for banner display.
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Targets whose events the console layer renders.
const TARGETS: [&str; 3] = ["outrank_methods", "outrank_io", "outrank::"];

/// Initializes the console output.
///
/// Safe to call multiple times - only the first call has effect.
/// Prints the Outrank banner and sets up tracing. `RUST_LOG` overrides the
/// default `outrank_methods=info` filter.
pub fn init() {
    INIT.get_or_init(|| {
        print_banner();

        let mut filter = EnvFilter::builder().from_env_lossy();
        if std::env::var_os(EnvFilter::DEFAULT_ENV).is_none() {
            for directive in ["outrank_methods=info", "outrank=info"] {
                if let Ok(directive) = directive.parse() {
                    filter = filter.add_directive(directive);
                }
            }
        }

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(OutrankConsoleLayer)
            .try_init();
    });
}

// Marks the start of a run for elapsed time tracking.
fn mark_run_start() {
    let epoch = EPOCH.get_or_init(Instant::now);
    let nanos = epoch.elapsed().as_nanos() as u64;
    RUN_START_NANOS.store(nanos, Ordering::Relaxed);
}

// Returns elapsed time since run start.
fn elapsed_secs() -> f64 {
    let Some(epoch) = EPOCH.get() else {
        return 0.0;
    };
    let start_nanos = RUN_START_NANOS.load(Ordering::Relaxed);
    let now_nanos = epoch.elapsed().as_nanos() as u64;
    now_nanos.saturating_sub(start_nanos) as f64 / 1_000_000_000.0
}

fn print_banner() {
    let banner = r#"
  ___        _                    _
 / _ \ _   _| |_ _ __ __ _ _ __ | | __
| | | | | | | __| '__/ _` | '_ \| |/ /
| |_| | |_| | |_| | | (_| | | | |   <
 \___/ \__,_|\__|_|  \__,_|_| |_|_|\_\
"#;

    let version_line = format!("       v{} - Outranking Decision Analysis\n", VERSION);

    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{}", banner.bright_cyan());
    let _ = writeln!(stdout, "{}", version_line.bright_white().bold());
    let _ = stdout.flush();
}

/// A tracing layer that formats method events with colors.
pub struct OutrankConsoleLayer;

impl<S: Subscriber> Layer<S> for OutrankConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        if !accepts_target(metadata.target()) {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let output = format_event(&visitor, *metadata.level());
        if !output.is_empty() {
            let _ = writeln!(io::stdout(), "{}", output);
        }
    }
}

fn accepts_target(target: &str) -> bool {
    target == "outrank" || TARGETS.iter().any(|prefix| target.starts_with(prefix))
}

#[derive(Debug, Default)]
struct EventVisitor {
    event: Option<String>,
    message: Option<String>,
    algorithm: Option<String>,
    stage: Option<String>,
    path: Option<String>,
    error: Option<String>,
    step: Option<u64>,
    steps: Option<u64>,
    alternatives: Option<u64>,
    criteria: Option<u64>,
    duration_us: Option<u64>,
    duration_ms: Option<u64>,
    survivors: Option<u64>,
    detected: Option<u64>,
    removed_edges: Option<u64>,
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let s = format!("{:?}", value);
        let s = s.trim_matches('"').to_string();
        match field.name() {
            "message" => self.message = Some(s),
            "path" => self.path = Some(s),
            "error" => self.error = Some(s),
            "event" | "algorithm" | "stage" => self.record_str(field, &s),
            _ => {}
        }
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        match field.name() {
            "step" => self.step = Some(value),
            "steps" => self.steps = Some(value),
            "alternatives" => self.alternatives = Some(value),
            "criteria" => self.criteria = Some(value),
            "duration_us" => self.duration_us = Some(value),
            "duration_ms" => self.duration_ms = Some(value),
            "survivors" => self.survivors = Some(value),
            "detected" => self.detected = Some(value),
            "removed_edges" => self.removed_edges = Some(value),
            _ => {}
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.record_u64(field, value.max(0) as u64);
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            "event" => self.event = Some(value.to_string()),
            "algorithm" => self.algorithm = Some(value.to_string()),
            "stage" => self.stage = Some(value.to_string()),
            "path" => self.path = Some(value.to_string()),
            "error" => self.error = Some(value.to_string()),
            "message" => self.message = Some(value.to_string()),
            _ => {}
        }
    }
}

fn format_event(v: &EventVisitor, level: Level) -> String {
    let event = v.event.as_deref().unwrap_or("");

    match event {
        "run_start" => format_run_start(v),
        "run_end" => format_run_end(v),
        "run_failed" => format_run_failed(v),
        "stage_start" => format_stage_start(v),
        "stage_end" => format_stage_end(v),
        "cycles" => format_cycles(v),
        "export" => format_export(v),
        _ if level == Level::WARN || level == Level::ERROR => format_warning(v),
        _ => String::new(),
    }
}

fn format_elapsed() -> String {
    format!("{:>7.3}s", elapsed_secs())
        .bright_black()
        .to_string()
}

fn format_step(v: &EventVisitor) -> String {
    format!("[Step {}/{}]", v.step.unwrap_or(0), v.steps.unwrap_or(0))
}

fn format_run_start(v: &EventVisitor) -> String {
    mark_run_start();
    let algorithm = v.algorithm.as_deref().unwrap_or("Unknown");
    let alternatives = v.alternatives.unwrap_or(0);
    let criteria = v.criteria.unwrap_or(0);

    format!(
        "{} {} {} │ {} alternatives │ {} criteria │ {} pairs",
        format_elapsed(),
        "▶".bright_green().bold(),
        algorithm.white().bold(),
        alternatives.to_formatted_string(&Locale::en).bright_yellow(),
        criteria.to_formatted_string(&Locale::en).bright_yellow(),
        pair_count(alternatives)
            .to_formatted_string(&Locale::en)
            .bright_magenta()
    )
}

fn format_run_end(v: &EventVisitor) -> String {
    let algorithm = v.algorithm.as_deref().unwrap_or("Unknown");
    let duration = v.duration_ms.unwrap_or(0);
    let survivors = v.survivors.unwrap_or(0);

    format!(
        "{} {} {} complete │ {} │ {} top-ranked",
        format_elapsed(),
        "■".bright_cyan().bold(),
        algorithm.white().bold(),
        format_duration_ms(duration).yellow(),
        survivors
            .to_formatted_string(&Locale::en)
            .bright_green()
            .bold()
    )
}

fn format_run_failed(v: &EventVisitor) -> String {
    let algorithm = v.algorithm.as_deref().unwrap_or("Unknown");
    let error = v.error.as_deref().unwrap_or("unknown error");

    format!(
        "{} {} {} failed │ {}",
        format_elapsed(),
        "✗".bright_red().bold(),
        algorithm.white().bold(),
        error.bright_red()
    )
}

fn format_stage_start(v: &EventVisitor) -> String {
    let stage = v.stage.as_deref().unwrap_or("Unknown");

    format!(
        "{} {} {} {}",
        format_elapsed(),
        format_step(v).bright_blue(),
        stage.white().bold(),
        "...".bright_black()
    )
}

fn format_stage_end(v: &EventVisitor) -> String {
    let stage = v.stage.as_deref().unwrap_or("Unknown");
    let micros = v.duration_us.unwrap_or(0);

    format!(
        "{} {} {} {} │ {}",
        format_elapsed(),
        format_step(v).bright_blue(),
        stage.white().bold(),
        "✓".bright_green(),
        format_duration_us(micros).yellow()
    )
}

fn format_cycles(v: &EventVisitor) -> String {
    let detected = v.detected.unwrap_or(0);
    let removed = v.removed_edges.unwrap_or(0);

    let detected_str = detected.to_formatted_string(&Locale::en);
    let detected_str = if detected == 0 {
        detected_str.bright_green().to_string()
    } else {
        detected_str.bright_yellow().to_string()
    };

    format!(
        "{} {} {} cycles │ {} edges removed",
        format_elapsed(),
        "↻".bright_magenta(),
        detected_str,
        removed.to_formatted_string(&Locale::en).bright_yellow()
    )
}

fn format_export(v: &EventVisitor) -> String {
    let path = v.path.as_deref().unwrap_or("?");
    format!(
        "{} {} Saved {}",
        format_elapsed(),
        "↓".bright_cyan(),
        path.underline()
    )
}

fn format_warning(v: &EventVisitor) -> String {
    let message = v.message.as_deref().unwrap_or("");
    format!("{} {}", "⚠".bright_yellow().bold(), message.yellow())
}

fn pair_count(alternatives: u64) -> u64 {
    alternatives.saturating_mul(alternatives.saturating_sub(1))
}

fn format_duration_us(us: u64) -> String {
    if us < 1000 {
        format!("{}µs", us)
    } else {
        format_duration_ms(us / 1000)
    }
}

fn format_duration_ms(ms: u64) -> String {
    if ms < 1000 {
        format!("{}ms", ms)
    } else if ms < 60_000 {
        format!("{:.2}s", ms as f64 / 1000.0)
    } else {
        let mins = ms / 60_000;
        let secs = (ms % 60_000) / 1000;
        format!("{}m {}s", mins, secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_targets() {
        assert!(accepts_target("outrank_methods::electre"));
        assert!(accepts_target("outrank_io"));
        assert!(accepts_target("outrank"));
        assert!(accepts_target("outrank::analysis"));
        assert!(!accepts_target("outrank_console"));
        assert!(!accepts_target("hyper::client"));
    }

    #[test]
    fn test_stage_lines() {
        let v = EventVisitor {
            event: Some("stage_end".into()),
            stage: Some("Concordance".into()),
            step: Some(1),
            steps: Some(5),
            duration_us: Some(2_500),
            ..EventVisitor::default()
        };
        let line = format_event(&v, Level::INFO);
        assert!(line.contains("[Step 1/5]"));
        assert!(line.contains("Concordance"));
        assert!(line.contains("2ms"));
    }

    #[test]
    fn test_run_start_groups_digits() {
        let v = EventVisitor {
            event: Some("run_start".into()),
            algorithm: Some("ELECTRE".into()),
            alternatives: Some(1_200),
            criteria: Some(4),
            ..EventVisitor::default()
        };
        let line = format_event(&v, Level::INFO);
        assert!(line.contains("1,200"));
        assert!(line.contains("1,438,800"));
    }

    #[test]
    fn test_unknown_events_are_silent() {
        let v = EventVisitor {
            message: Some("Dominance".into()),
            ..EventVisitor::default()
        };
        assert!(format_event(&v, Level::TRACE).is_empty());
        assert!(format_event(&v, Level::WARN).contains("Dominance"));
    }

    #[test]
    fn test_durations() {
        assert_eq!(format_duration_us(999), "999µs");
        assert_eq!(format_duration_us(1_500), "1ms");
        assert_eq!(format_duration_ms(2_500), "2.50s");
        assert_eq!(format_duration_ms(125_000), "2m 5s");
    }

    #[test]
    fn test_pair_count() {
        assert_eq!(pair_count(0), 0);
        assert_eq!(pair_count(1), 0);
        assert_eq!(pair_count(6), 30);
    }
}
