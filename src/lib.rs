//! wtree - a tree listing that resolves symbolic links and never loops on them

pub mod error;
pub mod output;
pub mod stats;
pub mod style;
pub mod tree;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use error::{TreeError, VisitOutcome};
pub use output::{OutputConfig, StreamingFormatter};
pub use stats::Counters;
pub use style::LineStyle;
pub use tree::{RunReport, TreeLine, TreeOutput, TreeWalker, WalkerConfig};
