//! Shared helpers for integration tests.
//!
//! Integration tests under `tests/` compile as independent crates. This module
//! is included via `mod common;` in individual test files to share fixtures
//! and helpers.

use anyhow::{Context, Result};
use camino::Utf8PathBuf;
use std::fs;
use tempfile::TempDir;

/// Contents of the worked example: `Folder 1/File 1-1`.
pub const FILE_1_1: &str = "Lorem ipsum dolor sit amet, consectetur adipiscing elit.
require 'Folder 2/File 2-1'
Praesent feugiat egestas sem, id luctus lectus dignissim ac.
";

/// Contents of the worked example: `Folder 2/File 2-1`.
pub const FILE_2_1: &str = "Phasellus eget tellus ac risus iaculis feugiat nec in eros.
Nulla lacinia ante ac felis malesuada auctor.
";

/// Contents of the worked example: `Folder 2/File 2-2`.
pub const FILE_2_2: &str = "require 'Folder 1/File 1-1'
require 'Folder 2/File 2-1'
In pretium dictum lacinia.
";

/// The worked example tree.
pub const SCENARIO_A: &[(&str, &str)] = &[
    ("Folder 1/File 1-1", FILE_1_1),
    ("Folder 2/File 2-1", FILE_2_1),
    ("Folder 2/File 2-2", FILE_2_2),
];

/// A temporary directory tree populated with text files.
pub struct SourceTree {
    _dir: TempDir,
    /// Root of the tree.
    pub root: Utf8PathBuf,
}

impl SourceTree {
    /// Create a tree holding `files`, given as `(relative path, content)`.
    pub fn new(files: &[(&str, &str)]) -> Result<Self> {
        let dir = tempfile::tempdir().context("create temp dir for source tree")?;
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf())
            .map_err(|path| anyhow::anyhow!("temp dir is not UTF-8: {}", path.display()))?;
        let tree = Self { _dir: dir, root };
        for (relative, content) in files {
            tree.write(relative, content)?;
        }
        Ok(tree)
    }

    /// Write `content` to `relative`, creating parent directories.
    pub fn write(&self, relative: &str, content: &str) -> Result<()> {
        let path = self.root.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| format!("create {parent}"))?;
        }
        fs::write(&path, content).with_context(|| format!("write {path}"))
    }

    /// Read a file of the tree back as a string.
    pub fn read(&self, relative: &str) -> Result<String> {
        let path = self.root.join(relative);
        fs::read_to_string(&path).with_context(|| format!("read {path}"))
    }
}
