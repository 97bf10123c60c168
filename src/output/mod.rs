//! Tree formatting and display
//!
//! - `config` - Output configuration types
//! - `streaming` - Streaming formatter for console output

mod config;
mod streaming;

// Re-export public types
pub use config::OutputConfig;
pub use streaming::StreamingFormatter;
