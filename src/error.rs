//! Error taxonomy for a traversal run.
//!
//! Every variant except `AllocationFailed` is recovered at the node where it
//! happens: the walker prints a warning marker, updates the counters and moves
//! on to the next sibling. Only a failure of the root entry fails the run.

use std::collections::TryReserveError;
use std::path::PathBuf;

use thiserror::Error;

/// Errors produced while visiting a single entry.
#[derive(Debug, Error)]
pub enum TreeError {
    /// An entry was built with an empty path or name.
    #[error("invalid argument: {reason}")]
    InvalidArgument { reason: &'static str },

    /// `lstat` failed: the path does not exist or is inaccessible.
    #[error("cannot stat {path}: {source}")]
    MetadataQueryFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The directory exists but could not be read.
    #[error("cannot open directory {path}: {source}")]
    DirectoryOpenFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The link target could not be read or canonicalized.
    #[error("cannot resolve symbolic link {path}")]
    SymlinkUnresolvable { path: PathBuf },

    /// Reserving space for a path or prefix buffer failed.
    #[error("out of memory while building {what}")]
    AllocationFailed {
        what: &'static str,
        #[source]
        source: TryReserveError,
    },
}

impl TreeError {
    /// Numeric code reported when the run fails.
    pub fn code(&self) -> i32 {
        match self {
            TreeError::InvalidArgument { .. } => -1,
            TreeError::MetadataQueryFailed { .. } => -3,
            TreeError::DirectoryOpenFailed { .. } => -5,
            TreeError::AllocationFailed { .. } => -7,
            TreeError::SymlinkUnresolvable { .. } => -9,
        }
    }

    pub(crate) fn allocation(what: &'static str, source: TryReserveError) -> Self {
        TreeError::AllocationFailed { what, source }
    }
}

/// Result of visiting one entry. Write failures on the output are carried
/// separately as `std::io::Error`.
pub type VisitOutcome = Result<(), TreeError>;
