//! Directory enumeration.
//!
//! Walks the root directory and yields one [`NodeId`] per regular file at any
//! depth. Directories are never nodes. Entries are visited in file-name order
//! so graph enumeration is stable between runs on an unchanged tree.

use camino::{Utf8Path, Utf8PathBuf};
use miette::Diagnostic;
use thiserror::Error;
use tracing::debug;
use walkdir::{DirEntry, WalkDir};

use crate::node_id::NodeId;

/// Errors raised while enumerating the root directory.
#[derive(Debug, Error, Diagnostic)]
pub enum ScanError {
    /// The directory tree could not be traversed.
    #[error("failed to read directory tree under {root}")]
    #[diagnostic(code(catena::scan::walk))]
    Walk {
        /// Root being scanned.
        root: Utf8PathBuf,
        /// Underlying traversal error.
        #[source]
        source: walkdir::Error,
    },
    /// A discovered file path is not valid UTF-8.
    #[error("path is not valid UTF-8: {path}")]
    #[diagnostic(
        code(catena::scan::non_utf8),
        help("rename the file so its path is valid UTF-8")
    )]
    NonUtf8Path {
        /// Lossy rendering of the offending path.
        path: String,
    },
}

/// Enumerate every regular file below `root`.
///
/// Symbolic links are not followed into directories, but a link that points
/// at a regular file counts as a file.
///
/// # Errors
///
/// Returns [`ScanError`] if any part of the tree cannot be read or a path is
/// not valid UTF-8.
pub fn scan(root: &Utf8Path) -> Result<Vec<NodeId>, ScanError> {
    let walker = WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter();

    let mut files = Vec::new();
    for walk_entry in walker {
        let entry = walk_entry.map_err(|source| ScanError::Walk {
            root: root.to_owned(),
            source,
        })?;
        if !is_file_entry(&entry) {
            continue;
        }
        let path = Utf8PathBuf::from_path_buf(entry.into_path()).map_err(|path_buf| {
            ScanError::NonUtf8Path {
                path: path_buf.to_string_lossy().into_owned(),
            }
        })?;
        debug!(file = %path, "discovered file");
        files.push(NodeId::from_path(&path));
    }
    Ok(files)
}

fn is_file_entry(entry: &DirEntry) -> bool {
    let file_type = entry.file_type();
    file_type.is_file() || (file_type.is_symlink() && entry.path().is_file())
}
