//! Concatenation of ordered files into the output artifact.
//!
//! Content is copied verbatim, `require` lines included. Every line is
//! terminated by `\n`: `\r\n` endings are rewritten and a missing final
//! newline is supplied, so the output never fuses the last line of one file
//! with the first line of the next.
//!
//! An input that cannot be read is logged and skipped; lines copied before a
//! mid-file read failure stay in the output. Only a failure to write the
//! artifact aborts, and then the temporary file beside the destination is
//! discarded so any previous artifact is left untouched.
//!
//! The artifact name is not excluded from scanning: a `concatenated.txt` left
//! by an earlier run is an ordinary input file on the next run.

use camino::{Utf8Path, Utf8PathBuf};
use miette::Diagnostic;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use tempfile::Builder;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::node_id::NodeId;

/// File name of the artifact written into the root directory.
pub const OUTPUT_FILE_NAME: &str = "concatenated.txt";

/// Errors raised while producing the output artifact.
#[derive(Debug, Error, Diagnostic)]
pub enum ConcatError {
    /// The artifact could not be written.
    #[error("failed to write {path}")]
    #[diagnostic(code(catena::concat::write))]
    Write {
        /// Artifact being written.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
}

/// Summary of a written artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    /// Location of the artifact.
    pub path: Utf8PathBuf,
    /// Number of input files it contains.
    pub files: usize,
    /// Number of lines written.
    pub lines: usize,
    /// Inputs that could not be read, in whole or in part.
    pub skipped: Vec<NodeId>,
}

/// What [`concatenate`] copied into its sink.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Copied {
    /// Number of lines written.
    pub lines: usize,
    /// Inputs whose content is missing or truncated because reading failed.
    pub skipped: Vec<NodeId>,
}

enum Failure {
    Read(io::Error),
    Write(io::Error),
}

/// Stream every file in `order` into `sink`.
///
/// A file that cannot be opened or read is logged and recorded in
/// [`Copied::skipped`]; the remaining files are still copied.
///
/// # Errors
///
/// Returns [`ConcatError::Write`] (tagged with `sink_path`) if `sink` rejects
/// data.
pub fn concatenate<W: Write>(
    order: &[NodeId],
    sink: &mut W,
    sink_path: &Utf8Path,
) -> Result<Copied, ConcatError> {
    let mut copied = Copied::default();
    let mut buf = Vec::new();
    for id in order {
        let mut lines = 0;
        match copy_file(id.as_path(), sink, &mut buf, &mut lines) {
            Ok(()) => debug!(file = %id, lines, "appended file"),
            Err(Failure::Read(err)) => {
                warn!(file = %id, lines, error = %err, "cannot read file; skipping the rest of it");
                copied.skipped.push(id.clone());
            }
            Err(Failure::Write(source)) => {
                return Err(ConcatError::Write {
                    path: sink_path.to_owned(),
                    source,
                });
            }
        }
        copied.lines += lines;
    }
    Ok(copied)
}

fn copy_file<W: Write>(
    path: &Utf8Path,
    sink: &mut W,
    buf: &mut Vec<u8>,
    lines: &mut usize,
) -> Result<(), Failure> {
    let mut reader = BufReader::new(File::open(path).map_err(Failure::Read)?);
    loop {
        buf.clear();
        if reader.read_until(b'\n', buf).map_err(Failure::Read)? == 0 {
            return Ok(());
        }
        write_line(sink, strip_line_ending(buf)).map_err(Failure::Write)?;
        *lines += 1;
    }
}

/// Concatenate `order` into `<root>/concatenated.txt`.
///
/// # Errors
///
/// Returns [`ConcatError`] if the artifact cannot be created, written, synced
/// or moved into place. Unreadable inputs are reported in
/// [`Artifact::skipped`] instead.
pub fn write_artifact(root: &Utf8Path, order: &[NodeId]) -> Result<Artifact, ConcatError> {
    let path = root.join(OUTPUT_FILE_NAME);
    let write_error = |source| ConcatError::Write {
        path: path.clone(),
        source,
    };

    let tmp = Builder::new()
        .prefix(".catena.")
        .suffix(".tmp")
        .tempfile_in(root)
        .map_err(write_error)?;
    let mut writer = BufWriter::new(tmp);
    let Copied { lines, skipped } = concatenate(order, &mut writer, &path)?;
    let tmp = writer
        .into_inner()
        .map_err(|err| write_error(err.into_error()))?;
    tmp.as_file().sync_all().map_err(write_error)?;
    tmp.persist(&path).map_err(|err| write_error(err.error))?;

    info!(
        artifact = %path,
        files = order.len(),
        lines,
        skipped = skipped.len(),
        "wrote concatenated output",
    );
    Ok(Artifact {
        path,
        files: order.len(),
        lines,
        skipped,
    })
}

fn strip_line_ending(line: &[u8]) -> &[u8] {
    let without_lf = line.strip_suffix(b"\n").unwrap_or(line);
    without_lf.strip_suffix(b"\r").unwrap_or(without_lf)
}

fn write_line<W: Write>(sink: &mut W, line: &[u8]) -> io::Result<()> {
    sink.write_all(line)?;
    sink.write_all(b"\n")
}
