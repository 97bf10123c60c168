//! Test utilities: temporary directory trees and an output that records
//! lines instead of printing them.
//!
//! This module is only compiled for tests and benchmarks.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::stats::Counters;
use crate::tree::{TreeLine, TreeOutput};

/// A temporary directory tree for testing.
///
/// Files and directories get fixed permission bits so styling does not
/// depend on the caller's umask. The tree is removed when dropped.
pub struct TestTree {
    dir: TempDir,
}

impl TestTree {
    /// Create a new empty temporary directory.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        Self { dir }
    }

    /// Get the path to the temporary directory.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Add a non-executable file, creating parent directories as needed.
    pub fn add_file(&self, path: &str, content: &str) -> PathBuf {
        let full_path = self.dir.path().join(path);
        if let Some(parent) = full_path.parent() {
            self.create_dirs(parent);
        }
        fs::write(&full_path, content).expect("Failed to write file");
        set_mode(&full_path, 0o644);
        full_path
    }

    /// Add a file with execute permission.
    pub fn add_executable(&self, path: &str, content: &str) -> PathBuf {
        let full_path = self.add_file(path, content);
        set_mode(&full_path, 0o755);
        full_path
    }

    /// Add a directory (and any missing parents).
    pub fn add_dir(&self, path: &str) -> PathBuf {
        let full_path = self.dir.path().join(path);
        self.create_dirs(&full_path);
        full_path
    }

    /// Create a symbolic link at `link` storing `target` verbatim.
    #[cfg(unix)]
    pub fn add_symlink(&self, target: impl AsRef<Path>, link: &str) -> PathBuf {
        let full_path = self.dir.path().join(link);
        if let Some(parent) = full_path.parent() {
            self.create_dirs(parent);
        }
        std::os::unix::fs::symlink(target, &full_path).expect("Failed to create symlink");
        full_path
    }

    /// Change permission bits of an existing path.
    pub fn set_mode(&self, path: &str, mode: u32) {
        set_mode(&self.dir.path().join(path), mode);
    }

    fn create_dirs(&self, path: &Path) {
        if path.exists() {
            return;
        }
        fs::create_dir_all(path).expect("Failed to create dirs");
        // Normalize every directory created below the root.
        let mut current = path;
        while current != self.dir.path() {
            set_mode(current, 0o755);
            match current.parent() {
                Some(parent) => current = parent,
                None => break,
            }
        }
    }
}

impl Default for TestTree {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(unix)]
fn set_mode(path: &Path, mode: u32) {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(mode)).expect("Failed to set mode");
}

#[cfg(not(unix))]
fn set_mode(_path: &Path, _mode: u32) {}

/// `TreeOutput` that keeps every line in memory.
#[derive(Debug, Default)]
pub struct RecordingOutput {
    pub lines: Vec<TreeLine>,
    /// Counters handed to `finish`, if it was called.
    pub summary: Option<Counters>,
}

impl RecordingOutput {
    /// First line whose entry name is `name`.
    pub fn find(&self, name: &str) -> Option<&TreeLine> {
        self.lines.iter().find(|line| line.name == name)
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.lines.iter().position(|line| line.name == name)
    }

    /// How many lines carry the entry name `name`.
    pub fn count(&self, name: &str) -> usize {
        self.lines.iter().filter(|line| line.name == name).count()
    }

    /// Lines as unstyled text.
    pub fn rendered(&self) -> Vec<String> {
        self.lines.iter().map(ToString::to_string).collect()
    }
}

impl TreeOutput for RecordingOutput {
    fn output_line(&mut self, line: &TreeLine) -> io::Result<()> {
        self.lines.push(line.clone());
        Ok(())
    }

    fn finish(&mut self, counters: &Counters) -> io::Result<()> {
        self.summary = Some(*counters);
        Ok(())
    }
}
