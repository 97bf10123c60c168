//! Run-wide directory and file totals
//!
//! The walker bumps these as it emits lines; the formatter reads them once at
//! the end of the run to print the summary.

/// Totals accumulated during a traversal. Never decremented.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Counters {
    directories: usize,
    files: usize,
}

impl Counters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a directory (plain or symlinked).
    pub fn increment_directories(&mut self) {
        self.directories += 1;
    }

    /// Record a file or a non-directory link.
    pub fn increment_files(&mut self) {
        self.files += 1;
    }

    pub fn directories(&self) -> usize {
        self.directories
    }

    pub fn files(&self) -> usize {
        self.files
    }

    /// Summary such as `3 directories, 1 file`.
    ///
    /// Singular forms are used only when a count is exactly 1.
    pub fn summary_line(&self) -> String {
        let dir_word = if self.directories == 1 {
            "directory"
        } else {
            "directories"
        };
        let file_word = if self.files == 1 { "file" } else { "files" };
        format!(
            "{} {}, {} {}",
            self.directories, dir_word, self.files, file_word
        )
    }
}
