//! Ledger of directories already entered during a run.

use std::path::{Path, PathBuf};

use indexmap::IndexSet;

/// Canonical paths of every directory the walker has committed to opening.
///
/// Append-only: a directory stays "seen" for the rest of the run.
#[derive(Debug, Default)]
pub struct VisitedSet {
    paths: IndexSet<PathBuf>,
}

impl VisitedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Exact comparison; callers pass canonical paths.
    pub fn contains(&self, path: &Path) -> bool {
        self.paths.contains(path)
    }

    pub fn insert(&mut self, path: PathBuf) {
        self.paths.insert(path);
    }

    /// Insert `path`, returning `true` if it was not already present.
    pub fn test_and_insert(&mut self, path: &Path) -> bool {
        if self.paths.contains(path) {
            return false;
        }
        self.paths.insert(path.to_path_buf())
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Paths in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        self.paths.iter().map(PathBuf::as_path)
    }
}
