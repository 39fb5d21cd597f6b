// crates/outrank-cli/src/main.rs
//
// Entry point of the `outrank` binary: parse flags, merge them with an
// optional config file, run the selected methods and print their summaries.

mod args;

use std::process::ExitCode;

use clap::{CommandFactory, FromArgMatches};
use outrank::{Analyzer, RunConfig};
use owo_colors::OwoColorize;

use args::{algorithm_help, Cli};

fn main() -> ExitCode {
    let matches = Cli::command().after_help(algorithm_help()).get_matches();
    let cli = match Cli::from_arg_matches(&matches) {
        Ok(cli) => cli,
        Err(e) => e.exit(),
    };

    if !cli.quiet {
        outrank::console::init();
    }

    match cli.into_config() {
        Ok(config) => run(config),
        Err(e) => fail(&e),
    }
}

fn run(config: RunConfig) -> ExitCode {
    let analysis = match Analyzer::new(config).run() {
        Ok(analysis) => analysis,
        Err(e) => return fail(&e),
    };

    for code in &analysis.rejected {
        eprintln!("{} '{}' is not a valid algorithm", "Warning:".yellow().bold(), code);
    }
    for report in &analysis.reports {
        println!(
            "{} {}",
            format!("{}:", report.kind.name()).bold(),
            report.summary.as_deref().unwrap_or("no result")
        );
        for file in &report.files {
            println!("  {}", file.display());
        }
        if let Some(e) = &report.export_error {
            eprintln!("  {} {}", "Error:".bright_red().bold(), e);
        }
    }

    if analysis.failed_exports().next().is_some() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn fail(error: &dyn std::error::Error) -> ExitCode {
    eprintln!("{} {}", "Error:".bright_red().bold(), error);
    ExitCode::FAILURE
}
