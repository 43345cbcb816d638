//! Error types for cglyph

use thiserror::Error;

/// Result type alias for cglyph operations
pub type Result<T> = std::result::Result<T, HighlightError>;

/// Highlighting error types
///
/// Nothing inside the highlighting core surfaces these to the user; they are
/// logged and absorbed. Only configuration loading and the binary propagate them.
#[derive(Error, Debug)]
pub enum HighlightError {
    #[error("invalid pattern '{pattern}': {source}")]
    PatternCompile {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("invalid range {start}..{end} for text of length {len}")]
    InvalidRange { start: usize, end: usize, len: usize },

    #[error("configuration error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("highlight worker is not running")]
    WorkerUnavailable,

    #[error("{0}")]
    Message(String),
}
