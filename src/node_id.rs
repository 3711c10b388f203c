//! Canonical identifiers for discovered files.
//!
//! A [`NodeId`] is the key under which a file lives in the dependency graph.
//! Scan-derived paths and paths written in `require` directives both pass
//! through the same lexical normalisation, so two spellings of one file
//! compare equal.
//!
//! # Examples
//!
//! ```
//! use camino::Utf8Path;
//! use catena::node_id::NodeId;
//!
//! let root = Utf8Path::new("/project");
//! let scanned = NodeId::from_path(Utf8Path::new("/project/Folder 2/File 2-1"));
//! let required = NodeId::resolve(root, "./Folder 1/../Folder 2/File 2-1");
//! assert_eq!(scanned, required);
//! ```

use camino::{Utf8Component, Utf8Path, Utf8PathBuf};
use std::fmt;

/// Canonical, separator-agnostic path identifying one discovered file.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(Utf8PathBuf);

impl NodeId {
    /// Build an identifier from a path produced by the directory scanner.
    #[must_use]
    pub fn from_path(path: &Utf8Path) -> Self {
        Self(normalize(path))
    }

    /// Resolve a directive path relative to `root`.
    ///
    /// Both `/` and `\` are accepted as separators in `relative`. A leading
    /// separator does not make the path absolute: it is still anchored at
    /// `root`.
    #[must_use]
    pub fn resolve(root: &Utf8Path, relative: &str) -> Self {
        let unified = relative.replace('\\', "/");
        Self::from_path(&root.join(unified.trim_start_matches('/')))
    }

    /// Borrow the identifier as a filesystem path.
    #[must_use]
    pub fn as_path(&self) -> &Utf8Path {
        &self.0
    }

    /// Path of this node relative to `root`, or the full path when it lies
    /// outside `root`.
    #[must_use]
    pub fn display_relative<'a>(&'a self, root: &Utf8Path) -> &'a Utf8Path {
        self.0.strip_prefix(root).unwrap_or(&self.0)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.as_str())
    }
}

impl AsRef<Utf8Path> for NodeId {
    fn as_ref(&self) -> &Utf8Path {
        &self.0
    }
}

/// Collapse `.` and `..` components without touching the filesystem.
///
/// `..` never climbs above a root or prefix component.
fn normalize(path: &Utf8Path) -> Utf8PathBuf {
    let mut out = Utf8PathBuf::new();
    for component in path.components() {
        match component {
            Utf8Component::CurDir => {}
            Utf8Component::ParentDir => match out.components().next_back() {
                Some(Utf8Component::Normal(_)) => {
                    out.pop();
                }
                Some(Utf8Component::RootDir | Utf8Component::Prefix(_)) => {}
                Some(Utf8Component::ParentDir | Utf8Component::CurDir) | None => {
                    out.push("..");
                }
            },
            other => out.push(other.as_str()),
        }
    }
    out
}
