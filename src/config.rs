//! Paths for one compression or decompression run.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Appended to the data path to name its paired tree artifact.
pub const TREE_SUFFIX: &str = ".tree";

/// Source, destination and optional tree path for one operation.
///
/// On compression the tree is written next to the destination; on
/// decompression it is read next to the source. [`Config::with_tree`]
/// overrides either.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Input artifact.
    pub source: PathBuf,
    /// Output artifact.
    pub destination: PathBuf,
    /// Explicit tree artifact path.
    pub tree: Option<PathBuf>,
}

impl Config {
    /// Paths with the tree paired by naming convention.
    pub fn new(source: impl Into<PathBuf>, destination: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
            tree: None,
        }
    }

    /// Use `tree` instead of the conventional tree path.
    pub fn with_tree(mut self, tree: impl Into<PathBuf>) -> Self {
        self.tree = Some(tree.into());
        self
    }

    /// Where compression writes the tree.
    pub fn encode_tree_path(&self) -> PathBuf {
        self.tree
            .clone()
            .unwrap_or_else(|| tree_path_for(&self.destination))
    }

    /// Where decompression reads the tree.
    pub fn decode_tree_path(&self) -> PathBuf {
        self.tree.clone().unwrap_or_else(|| tree_path_for(&self.source))
    }
}

/// `data` with [`TREE_SUFFIX`] appended to its final component.
pub fn tree_path_for(data: &Path) -> PathBuf {
    let mut s = OsString::from(data.as_os_str());
    s.push(TREE_SUFFIX);
    PathBuf::from(s)
}
