//! CLI execution and pipeline orchestration.
//!
//! This module keeps `main` minimal: [`run`] resolves the root directory and
//! drives [`concatenate_tree`], which executes the stages in order and stops
//! at the first structural failure.

mod error;

pub use error::{RunnerError, help_for};

use anyhow::{Context, Result};
use camino::Utf8PathBuf;
use tracing::{debug, info, warn};

use crate::cli::Cli;
use crate::concat::{self, Artifact};
use crate::config::{self, RunConfig};
use crate::directive;
use crate::graph::GraphBuilder;
use crate::node_id::NodeId;
use crate::scan;
use crate::status::{Stage, StatusMode, StatusReporter};

/// Result of a successful run.
#[derive(Debug, Clone)]
pub struct Outcome {
    /// Canonical root directory.
    pub root: Utf8PathBuf,
    /// Files in the order they were concatenated.
    pub order: Vec<NodeId>,
    /// The written artifact.
    pub artifact: Artifact,
    /// Directives dropped because they named no discovered file.
    pub dropped_directives: usize,
    /// Files whose directives could not be read.
    pub unreadable: Vec<NodeId>,
}

/// Execute the parsed [`Cli`].
///
/// Prompts on standard input when no root was given on the command line.
///
/// # Errors
///
/// Returns an error if the root is invalid, the tree cannot be scanned, a
/// circular dependency exists or the artifact cannot be written.
pub fn run(cli: &Cli) -> Result<Outcome> {
    let config = match cli.root.as_deref() {
        Some(root) => RunConfig::from_input(root)?,
        None => config::prompt_stdio()?,
    };
    let reporter = StatusMode::resolve(cli.accessible).reporter();
    concatenate_tree(&config, reporter.as_ref())
}

/// Run every stage against the configured root.
///
/// # Errors
///
/// See [`run`]. A file that cannot be read is logged and never fails the
/// run: while parsing it declares no directives and is listed in
/// [`Outcome::unreadable`]; while concatenating it is left out of the output
/// and listed in [`Artifact::skipped`].
pub fn concatenate_tree(config: &RunConfig, reporter: &dyn StatusReporter) -> Result<Outcome> {
    let root = config
        .root()
        .canonicalize_utf8()
        .map_err(|source| RunnerError::RootUnavailable {
            path: config.root().to_owned(),
            source,
        })?;
    debug!(%root, "resolved root directory");

    reporter.report_stage(Stage::Scan);
    let files = scan::scan(&root).context("scanning root directory")?;
    info!(files = files.len(), "scanned root directory");

    reporter.report_stage(Stage::Parse);
    let mut builder = GraphBuilder::new(root.clone());
    for file in &files {
        builder.add_file(file.clone());
    }
    let mut unreadable = Vec::new();
    for file in &files {
        match directive::read_directives(file.as_path()) {
            Ok(raw) => builder.add_requires(file, raw),
            Err(err) => {
                warn!(file = %file, error = %err, "cannot read file; treating it as having no directives");
                unreadable.push(file.clone());
            }
        }
    }
    let dropped_directives = builder.dropped();
    let graph = builder.build();
    info!(
        nodes = graph.len(),
        edges = graph.edge_count(),
        dropped = dropped_directives,
        "built dependency graph",
    );

    reporter.report_stage(Stage::CycleCheck);
    let acyclic = graph.into_acyclic()?;

    reporter.report_stage(Stage::Sort);
    let order = acyclic.sorted();
    for (position, id) in order.iter().enumerate() {
        debug!(position, file = %id.display_relative(&root), "ordered file");
    }

    reporter.report_stage(Stage::Write);
    let artifact = concat::write_artifact(&root, &order).context("writing concatenated output")?;
    reporter.report_complete();

    Ok(Outcome {
        root,
        order,
        artifact,
        dropped_directives,
        unreadable,
    })
}
