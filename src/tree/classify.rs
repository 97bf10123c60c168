//! Entry classification
//!
//! `probe` reads metadata without following a terminal symlink; `classify`
//! turns that into the closed `Classification` variant that both the walker
//! and the line styling match on.

use std::fs::{self, Metadata};
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::TreeError;

use super::resolve::{ResolvedLink, resolve_link};

/// Extensions treated as archives. Matching is case-sensitive.
const ARCHIVE_EXTENSIONS: &[&str] = &["gz", "bz2", "zip", "tar", "tgz", "7z", "rar"];

/// Longest extension the archive back-scan will consider.
const MAX_EXTENSION_LEN: usize = 3;

const EXECUTE_BITS: u32 = 0o111;
const WORLD_ALL: u32 = 0o777;

/// What an entry is, decided once per visit.
#[derive(Debug)]
pub enum Classification {
    RegularFile { archive: bool },
    ExecutableFile,
    Directory { world_writable: bool },
    Symlink(LinkInfo),
}

/// Kind of a resolved link target. Never chased beyond one level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetKind {
    RegularFile { archive: bool },
    ExecutableFile,
    Directory,
    Symlink,
}

/// A link target that resolved to an existing path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTarget {
    /// Absolute, link-free path of the target.
    pub canonical: PathBuf,
    pub kind: TargetKind,
    /// Permission bits of the final target.
    pub mode: u32,
}

impl ResolvedTarget {
    pub fn is_dir(&self) -> bool {
        self.kind == TargetKind::Directory
    }

    pub fn world_writable(&self) -> bool {
        is_world_writable(self.mode)
    }
}

/// Everything known about a symbolic link entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkInfo {
    /// Stored target text, if the link could be read at all.
    pub raw_target: Option<PathBuf>,
    /// `None` when the target could not be resolved or stat'ed.
    pub resolved: Option<ResolvedTarget>,
}

/// Query metadata for `path` without following a terminal symlink.
pub fn probe(path: &Path) -> io::Result<Metadata> {
    fs::symlink_metadata(path)
}

/// Classify the entry at `path`.
///
/// Only a failed `lstat` of `path` itself is an error; a broken link is a
/// `Symlink` whose `resolved` is `None`.
pub fn classify(path: &Path) -> Result<Classification, TreeError> {
    let meta = probe(path).map_err(|source| TreeError::MetadataQueryFailed {
        path: path.to_path_buf(),
        source,
    })?;
    let file_type = meta.file_type();

    if file_type.is_symlink() {
        return Ok(Classification::Symlink(classify_link(path)));
    }

    let mode = permission_bits(&meta);
    if file_type.is_dir() {
        return Ok(Classification::Directory {
            world_writable: is_world_writable(mode),
        });
    }

    if mode & EXECUTE_BITS != 0 {
        Ok(Classification::ExecutableFile)
    } else {
        Ok(Classification::RegularFile {
            archive: has_archive_name(path),
        })
    }
}

fn classify_link(path: &Path) -> LinkInfo {
    match resolve_link(path) {
        Ok(link) => {
            let resolved = resolve_target(path, &link);
            LinkInfo {
                raw_target: Some(link.raw),
                resolved,
            }
        }
        Err(err) => {
            debug!(path = %path.display(), error = %err, "link target unresolved");
            LinkInfo {
                raw_target: fs::read_link(path).ok(),
                resolved: None,
            }
        }
    }
}

fn resolve_target(link_path: &Path, link: &ResolvedLink) -> Option<ResolvedTarget> {
    let meta = match fs::metadata(&link.canonical) {
        Ok(meta) => meta,
        Err(err) => {
            debug!(target = %link.canonical.display(), error = %err, "cannot stat link target");
            return None;
        }
    };
    let mode = permission_bits(&meta);

    let kind = if meta.is_dir() {
        TargetKind::Directory
    } else if raw_target_is_link(link_path, &link.raw) {
        TargetKind::Symlink
    } else if mode & EXECUTE_BITS != 0 {
        TargetKind::ExecutableFile
    } else {
        TargetKind::RegularFile {
            archive: has_archive_name(&link.canonical),
        }
    };

    Some(ResolvedTarget {
        canonical: link.canonical.clone(),
        kind,
        mode,
    })
}

/// Whether the stored target names another link (one hop only).
fn raw_target_is_link(link_path: &Path, raw: &Path) -> bool {
    let location = if raw.is_absolute() {
        raw.to_path_buf()
    } else {
        match link_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.join(raw),
            _ => raw.to_path_buf(),
        }
    };
    probe(&location).is_ok_and(|meta| meta.file_type().is_symlink())
}

fn has_archive_name(path: &Path) -> bool {
    path.file_name()
        .map(|name| is_archive_name(&name.to_string_lossy()))
        .unwrap_or(false)
}

/// Archive heuristic over a file name.
///
/// Only the last `MAX_EXTENSION_LEN + 1` bytes are scanned for the final
/// `.`, so a longer extension or a name without a `.` never matches.
pub fn is_archive_name(name: &str) -> bool {
    let bytes = name.as_bytes();
    let window = bytes.len().min(MAX_EXTENSION_LEN + 1);
    let start = bytes.len() - window;

    let Some(dot) = bytes[start..].iter().rposition(|&b| b == b'.') else {
        return false;
    };
    let extension = &name[start + dot + 1..];
    !extension.is_empty() && ARCHIVE_EXTENSIONS.contains(&extension)
}

/// Mode 777: readable, writable and executable by everyone.
pub fn is_world_writable(mode: u32) -> bool {
    mode & WORLD_ALL == WORLD_ALL
}

#[cfg(unix)]
fn permission_bits(meta: &Metadata) -> u32 {
    use std::os::unix::fs::PermissionsExt;
    meta.permissions().mode()
}

#[cfg(not(unix))]
fn permission_bits(_meta: &Metadata) -> u32 {
    0
}
