//! Root directory configuration.
//!
//! The root can come from the command line or the interactive prompt; both go
//! through [`RunConfig::from_input`] so they accept and reject the same values.

use camino::{Utf8Path, Utf8PathBuf};
use miette::Diagnostic;
use std::io::{self, BufRead, Write};
use thiserror::Error;

/// Prompt shown when asking for the root directory.
pub const PROMPT: &str = "Enter path to the root folder:";

/// Problems with a user-supplied root path.
#[derive(Debug, Error, Diagnostic, PartialEq, Eq)]
pub enum ConfigError {
    /// Nothing was entered.
    #[error("Path is empty")]
    #[diagnostic(code(catena::config::empty_path))]
    EmptyPath,
    /// The path does not name an existing directory.
    #[error("Path is not a directory: {path}")]
    #[diagnostic(code(catena::config::not_a_directory))]
    NotADirectory {
        /// Path as entered.
        path: Utf8PathBuf,
    },
    /// Standard input closed before a valid path was entered.
    #[error("no root directory was provided before input ended")]
    #[diagnostic(code(catena::config::no_input))]
    NoInput,
}

/// Settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    root: Utf8PathBuf,
}

impl RunConfig {
    /// Validate a root path as typed by the user.
    ///
    /// Surrounding whitespace, including the trailing newline of a prompt
    /// answer, is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyPath`] for blank input and
    /// [`ConfigError::NotADirectory`] when the path is not an existing
    /// directory.
    pub fn from_input(input: &str) -> Result<Self, ConfigError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ConfigError::EmptyPath);
        }
        let root = Utf8PathBuf::from(trimmed);
        if !root.is_dir() {
            return Err(ConfigError::NotADirectory { path: root });
        }
        Ok(Self { root })
    }

    /// Root directory as entered.
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }
}

/// Ask for the root directory until a valid one is entered.
///
/// Each rejection is written to `output` before prompting again.
///
/// # Errors
///
/// Returns [`ConfigError::NoInput`] when `input` reaches end of file, or an
/// I/O error wrapped in [`anyhow::Error`] if reading or writing fails.
pub fn prompt_for_root<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
) -> anyhow::Result<RunConfig> {
    let mut line = String::new();
    loop {
        writeln!(output, "{PROMPT}")?;
        output.flush()?;
        line.clear();
        if input.read_line(&mut line)? == 0 {
            return Err(ConfigError::NoInput.into());
        }
        match RunConfig::from_input(&line) {
            Ok(config) => return Ok(config),
            Err(err) => writeln!(output, "{err}")?,
        }
    }
}

/// Prompt on the process's standard streams.
///
/// # Errors
///
/// See [`prompt_for_root`].
pub fn prompt_stdio() -> anyhow::Result<RunConfig> {
    let stdin = io::stdin();
    prompt_for_root(&mut stdin.lock(), &mut io::stdout())
}
