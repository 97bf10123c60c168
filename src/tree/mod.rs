//! Directory tree walking logic
//!
//! The walker visits entries depth-first in directory-read order and streams
//! one `TreeLine` per entry to a `TreeOutput`.
//!
//! - `classify` - lstat-based classification of an entry
//! - `resolve` - symbolic link target canonicalization
//! - `visited` - ledger of directories already entered
//! - `entry` - per-call entry and branch prefix values
//! - `walker` - the recursive traversal itself

mod classify;
mod config;
mod entry;
mod line;
mod resolve;
mod visited;
mod walker;

// Re-export public types
pub use classify::{
    Classification, LinkInfo, ResolvedTarget, TargetKind, classify, is_archive_name,
    is_world_writable, probe,
};
pub use config::WalkerConfig;
pub use entry::{Entry, RenderContext, is_hidden_name, printable};
pub use line::{LinkText, Marker, TreeLine};
pub use resolve::{ResolvedLink, resolve_link};
pub use visited::VisitedSet;
pub use walker::{RunReport, TreeOutput, TreeWalker};
