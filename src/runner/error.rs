//! Error types for the runner module.

use camino::Utf8PathBuf;
use miette::Diagnostic;
use std::io;
use thiserror::Error;

use crate::concat::ConcatError;
use crate::config::ConfigError;
use crate::graph::CycleError;
use crate::scan::ScanError;

/// Errors raised by the runner itself rather than by a pipeline stage.
#[derive(Debug, Error, Diagnostic)]
pub enum RunnerError {
    /// The root directory could not be resolved to a canonical path.
    #[error("cannot resolve root directory {path}")]
    #[diagnostic(
        code(catena::runner::root_unavailable),
        help("check that the directory exists and is readable")
    )]
    RootUnavailable {
        /// Root as configured.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
}

/// Find the first diagnostic help text attached anywhere in `err`'s chain.
#[must_use]
pub fn help_for(err: &anyhow::Error) -> Option<String> {
    err.chain().find_map(|cause| {
        let diagnostic: &dyn Diagnostic = if let Some(e) = cause.downcast_ref::<CycleError>() {
            e
        } else if let Some(e) = cause.downcast_ref::<ScanError>() {
            e
        } else if let Some(e) = cause.downcast_ref::<ConfigError>() {
            e
        } else if let Some(e) = cause.downcast_ref::<ConcatError>() {
            e
        } else if let Some(e) = cause.downcast_ref::<RunnerError>() {
            e
        } else {
            return None;
        };
        diagnostic.help().map(|help| help.to_string())
    })
}
