//! Test harness for wtree integration tests

use std::path::Path;
use std::process::Command;

pub use wtree::test_utils::TestTree;

/// Run the binary with colors off; returns (stdout, stderr, success).
pub fn run_wtree(dir: &Path, args: &[&str]) -> (String, String, bool) {
    let binary = env!("CARGO_BIN_EXE_wtree");
    let output = Command::new(binary)
        .arg("--color")
        .arg("never")
        .args(args)
        .current_dir(dir)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to run wtree");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let success = output.status.success();

    (stdout, stderr, success)
}

/// The summary is the last non-empty line of stdout.
pub fn summary_line(stdout: &str) -> &str {
    stdout
        .lines()
        .rev()
        .find(|line| !line.is_empty())
        .unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_harness_creates_temp_dir() {
        let tree = TestTree::new();
        assert!(tree.path().exists());
    }

    #[test]
    fn test_harness_add_file() {
        let tree = TestTree::new();
        let file_path = tree.add_file("nested/dir/file.txt", "content");
        assert!(file_path.exists());
    }

    #[test]
    fn test_summary_line_skips_trailing_blank() {
        assert_eq!(summary_line("a\n\n1 directory, 2 files\n"), "1 directory, 2 files");
    }
}
