//! Error types for docpush.
//!
//! Library crates use [`DocPushError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.

use std::path::PathBuf;

/// Top-level error type for all docpush operations.
///
/// A non-200 response from the remote store is deliberately *not* represented
/// here: the publisher logs it, continues the pass, and reports it in the pass
/// summary instead.
#[derive(Debug, thiserror::Error)]
pub enum DocPushError {
    /// Incomplete or invalid publish configuration.
    #[error("config error: {message}")]
    Config { message: String },

    /// Failure surfaced by a handler registry while extracting records.
    /// Propagated unchanged, never wrapped or retried.
    #[error("extraction error: {message}")]
    Extraction { message: String },

    /// Network-level failure issuing an HTTP request (connection refused,
    /// timeout, DNS failure). Aborts the remaining records of the pass.
    #[error("transport error: {0}")]
    Transport(String),

    /// Filesystem or stream I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, DocPushError>;

impl DocPushError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create an extraction error from any displayable message.
    pub fn extraction(msg: impl Into<String>) -> Self {
        Self::Extraction {
            message: msg.into(),
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
