//! Per-call traversal values: the entry being visited and the branch
//! pattern used to draw its prefix.
//!
//! Each recursive call owns its own `Entry`, path and prefix strings; nothing
//! here is shared between frames.

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

use crate::error::TreeError;

const BRANCH: &str = "|   ";
const BLANK: &str = "    ";
const CONNECTOR: &str = "+---";

/// One directory entry as seen by the walker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    name: OsString,
    containing: PathBuf,
    depth: usize,
}

impl Entry {
    /// The traversal root. Its path is displayed verbatim.
    pub fn root(path: impl Into<PathBuf>) -> Self {
        Self {
            name: OsString::new(),
            containing: path.into(),
            depth: 0,
        }
    }

    /// The canonical target of a followed directory link, visited in place
    /// of the link at the link's own depth.
    pub fn followed(target: impl Into<PathBuf>, depth: usize) -> Self {
        Self {
            name: OsString::new(),
            containing: target.into(),
            depth,
        }
    }

    pub fn child(containing: &Path, name: impl Into<OsString>, depth: usize) -> Self {
        Self {
            name: name.into(),
            containing: containing.to_path_buf(),
            depth,
        }
    }

    pub fn name(&self) -> &OsStr {
        &self.name
    }

    pub fn containing_path(&self) -> &Path {
        &self.containing
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn is_root(&self) -> bool {
        self.depth == 0
    }

    /// Reject entries that cannot name anything.
    pub fn validate(&self, followed_via_symlink: bool) -> Result<(), TreeError> {
        if self.containing.as_os_str().is_empty() {
            return Err(TreeError::InvalidArgument {
                reason: "empty containing path",
            });
        }
        if self.name.is_empty() && self.depth > 0 && !followed_via_symlink {
            return Err(TreeError::InvalidArgument {
                reason: "empty entry name",
            });
        }
        Ok(())
    }

    /// Containing path joined with the name; the containing path alone when
    /// the entry has no name.
    pub fn full_path(&self) -> Result<PathBuf, TreeError> {
        let extra = if self.name.is_empty() {
            0
        } else {
            self.name.len() + 1
        };
        #[allow(unused_mut)]
        let mut needed = self.containing.as_os_str().len() + extra;
        #[cfg(test)]
        if reserve_fails_for(&self.name) {
            needed = usize::MAX;
        }
        let mut path = PathBuf::new();
        path.try_reserve(needed)
            .map_err(|e| TreeError::allocation("full path", e))?;
        path.push(&self.containing);
        if !self.name.is_empty() {
            path.push(&self.name);
        }
        Ok(path)
    }

    /// Text shown for this entry, safe to print on a single line.
    pub fn display_name(&self) -> String {
        if self.name.is_empty() {
            printable(self.containing.as_os_str())
        } else {
            printable(&self.name)
        }
    }

    /// Dotfile other than `.` itself.
    pub fn is_hidden(&self) -> bool {
        is_hidden_name(&self.name)
    }
}

#[cfg(test)]
thread_local! {
    static RESERVE_FAILS_FOR: std::cell::RefCell<Option<OsString>> =
        const { std::cell::RefCell::new(None) };
}

/// Make building the full path of entries named `name` fail as if memory
/// ran out, on the current thread only.
#[cfg(test)]
pub(crate) fn fail_reserve_for(name: Option<&str>) {
    RESERVE_FAILS_FOR.with(|cell| *cell.borrow_mut() = name.map(OsString::from));
}

#[cfg(test)]
fn reserve_fails_for(name: &OsStr) -> bool {
    RESERVE_FAILS_FOR.with(|cell| cell.borrow().as_deref() == Some(name))
}

/// Lossy UTF-8 text with every control character replaced by `?`, so a
/// name never spans more than one output line.
pub fn printable(text: &OsStr) -> String {
    text.to_string_lossy()
        .chars()
        .map(|c| if c.is_control() { '?' } else { c })
        .collect()
}

pub fn is_hidden_name(name: &OsStr) -> bool {
    let bytes = name.as_encoded_bytes();
    bytes.len() > 1 && bytes[0] == b'.'
}

/// Which ancestor levels still have siblings to come, plus whether the
/// current entry does.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderContext {
    ancestor_branches: Vec<bool>,
    has_more_siblings: bool,
}

impl RenderContext {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn ancestor_branches(&self) -> &[bool] {
        &self.ancestor_branches
    }

    pub fn has_more_siblings(&self) -> bool {
        self.has_more_siblings
    }

    /// Indentation and connector for an entry at `depth`.
    pub fn prefix(&self, depth: usize) -> Result<String, TreeError> {
        if depth == 0 {
            return Ok(String::new());
        }
        let mut prefix = String::new();
        prefix
            .try_reserve((self.ancestor_branches.len() + 1) * CONNECTOR.len())
            .map_err(|e| TreeError::allocation("line prefix", e))?;
        for &more in &self.ancestor_branches {
            prefix.push_str(if more { BRANCH } else { BLANK });
        }
        prefix.push_str(CONNECTOR);
        Ok(prefix)
    }

    /// Context for a child of the entry at `depth`.
    pub fn child(&self, depth: usize, has_more_siblings: bool) -> Result<Self, TreeError> {
        let mut ancestor_branches = Vec::new();
        ancestor_branches
            .try_reserve(self.ancestor_branches.len() + 1)
            .map_err(|e| TreeError::allocation("branch pattern", e))?;
        ancestor_branches.extend_from_slice(&self.ancestor_branches);
        // The root draws no column of its own.
        if depth > 0 {
            ancestor_branches.push(self.has_more_siblings);
        }
        Ok(Self {
            ancestor_branches,
            has_more_siblings,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_full_path_is_verbatim() {
        let root = Entry::root("./");
        assert_eq!(root.full_path().unwrap(), PathBuf::from("./"));
        assert_eq!(root.display_name(), "./");
        assert!(root.is_root());
    }

    #[test]
    fn test_child_full_path_joins_name() {
        let child = Entry::child(Path::new("/tmp/base"), "file.txt", 1);
        assert_eq!(
            child.full_path().unwrap(),
            PathBuf::from("/tmp/base/file.txt")
        );
        assert_eq!(child.display_name(), "file.txt");
    }

    #[test]
    fn test_control_characters_are_replaced() {
        let child = Entry::child(Path::new("/tmp"), "a\nb\tc\u{1b}", 1);
        assert_eq!(child.display_name(), "a?b?c?");
        assert_eq!(printable(OsStr::new("plain é 🎉")), "plain é 🎉");
    }

    #[test]
    fn test_full_path_reports_allocation_failure() {
        let child = Entry::child(Path::new("/tmp"), "huge", 1);
        fail_reserve_for(Some("huge"));
        let result = child.full_path();
        fail_reserve_for(None);

        let err = result.unwrap_err();
        assert!(matches!(err, TreeError::AllocationFailed { .. }));
        assert_eq!(err.code(), -7);
        assert!(child.full_path().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_inputs() {
        let no_path = Entry::child(Path::new(""), "x", 1);
        assert!(matches!(
            no_path.validate(false),
            Err(TreeError::InvalidArgument { .. })
        ));

        let no_name = Entry::child(Path::new("/tmp"), "", 2);
        assert!(no_name.validate(false).is_err());
        // A followed link target has no name of its own.
        assert!(no_name.validate(true).is_ok());
    }

    #[test]
    fn test_hidden_names() {
        assert!(is_hidden_name(OsStr::new(".git")));
        assert!(is_hidden_name(OsStr::new("..x")));
        assert!(!is_hidden_name(OsStr::new(".")));
        assert!(!is_hidden_name(OsStr::new("visible")));
        assert!(!is_hidden_name(OsStr::new("")));
    }

    #[test]
    fn test_prefix_for_root_and_first_level() {
        let root = RenderContext::root();
        assert_eq!(root.prefix(0).unwrap(), "");

        let first = root.child(0, true).unwrap();
        assert_eq!(first.prefix(1).unwrap(), "+---");
        assert!(first.ancestor_branches().is_empty());
    }

    #[test]
    fn test_prefix_draws_branch_for_pending_siblings() {
        let root = RenderContext::root();
        let not_last = root.child(0, true).unwrap();
        let last = root.child(0, false).unwrap();

        assert_eq!(not_last.child(1, false).unwrap().prefix(2).unwrap(), "|   +---");
        assert_eq!(last.child(1, false).unwrap().prefix(2).unwrap(), "    +---");
    }

    #[test]
    fn test_prefix_three_levels() {
        let level1 = RenderContext::root().child(0, true).unwrap();
        let level2 = level1.child(1, false).unwrap();
        let level3 = level2.child(2, true).unwrap();
        assert_eq!(level3.ancestor_branches(), &[true, false]);
        assert_eq!(level3.prefix(3).unwrap(), "|       +---");
        assert!(level3.has_more_siblings());
    }
}
