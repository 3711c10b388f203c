//! Application entry point.
//!
//! Parses command-line arguments and delegates execution to [`runner::run`].

use clap::Parser;
use catena::{cli::Cli, runner};
use std::io::{self, Write};
use std::process::ExitCode;
use tracing::Level;
use tracing_subscriber::fmt;

fn main() -> ExitCode {
    let cli = Cli::parse();
    let max_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::ERROR
    };
    fmt().with_writer(io::stderr).with_max_level(max_level).init();
    match runner::run(&cli) {
        Ok(outcome) => {
            let mut stdout = io::stdout().lock();
            drop(writeln!(stdout, "Files in concatenation order:"));
            for id in &outcome.order {
                drop(writeln!(stdout, "  {}", id.display_relative(&outcome.root)));
            }
            drop(writeln!(
                stdout,
                "Concatenated file is located at {}",
                outcome.artifact.path
            ));
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::debug!(error = ?err, "run failed");
            let mut stderr = io::stderr();
            drop(writeln!(stderr, "{err:#}"));
            if let Some(help) = runner::help_for(&err) {
                drop(writeln!(stderr, "help: {help}"));
            }
            ExitCode::FAILURE
        }
    }
}
