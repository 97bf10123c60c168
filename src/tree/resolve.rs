//! Symbolic link target resolution
//!
//! Cycle detection compares the canonical paths produced here, so every
//! result must be absolute with all `.`, `..` and intermediate links removed.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::TreeError;

/// A link's stored target and the canonical path it names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLink {
    /// Target text exactly as stored in the link.
    pub raw: PathBuf,
    /// Absolute, link-free path of the target.
    pub canonical: PathBuf,
}

/// Resolve the symbolic link at `link`.
///
/// Relative targets are interpreted against the link's canonicalized
/// containing directory. Fails if the link cannot be read, the containing
/// directory cannot be canonicalized, or the target does not exist.
pub fn resolve_link(link: &Path) -> Result<ResolvedLink, TreeError> {
    let unresolvable = || TreeError::SymlinkUnresolvable {
        path: link.to_path_buf(),
    };

    let raw = fs::read_link(link).map_err(|_| unresolvable())?;

    let canonical = if raw.is_absolute() {
        fs::canonicalize(&raw).map_err(|_| unresolvable())?
    } else {
        let parent = containing_dir(link);
        let parent = fs::canonicalize(parent).map_err(|_| unresolvable())?;
        fs::canonicalize(parent.join(&raw)).map_err(|_| unresolvable())?
    };

    Ok(ResolvedLink { raw, canonical })
}

/// Directory holding `path`; a bare name lives in the current directory.
fn containing_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}
