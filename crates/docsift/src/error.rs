//! Error types for docsift.
//!
//! All fallible library operations return [`DocsiftError`]. The error handling
//! rules mirror how the index treats failures:
//!
//! - `DocsiftError::Io` wraps `std::io::Error` and bubbles up unchanged. These are
//!   real system problems (permissions, missing directories) and must stay visible.
//! - `Parsing` and `Encoding` describe a single unreadable document. The scan logs
//!   them and drops the file; they never abort a batch.
//! - `Validation` covers bad configuration and bad operation arguments.
//! - `Timeout` marks an extraction that exceeded the configured per-file budget.
//!
//! # Example
//!
//! ```rust
//! use docsift::{DocsiftError, Result};
//!
//! fn read_note(path: &str) -> Result<String> {
//!     let content = std::fs::read_to_string(path)?;
//!     if content.is_empty() {
//!         return Err(DocsiftError::validation(format!("File is empty: {}", path)));
//!     }
//!     Ok(content)
//! }
//! ```
use thiserror::Error;

/// Result type alias using `DocsiftError`.
pub type Result<T> = std::result::Result<T, DocsiftError>;

type BoxedSource = Box<dyn std::error::Error + Send + Sync>;

/// Main error type for all docsift operations.
#[derive(Debug, Error)]
pub enum DocsiftError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parsing error: {message}")]
    Parsing {
        message: String,
        #[source]
        source: Option<BoxedSource>,
    },

    #[error("Encoding error: {message}")]
    Encoding { message: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Extraction timed out after {seconds}s: {path}")]
    Timeout { path: String, seconds: u64 },

    #[error("{0}")]
    Other(String),
}

impl From<lopdf::Error> for DocsiftError {
    fn from(err: lopdf::Error) -> Self {
        match err {
            // Real IO error - bubble up unchanged
            lopdf::Error::IO(io_err) => DocsiftError::Io(io_err),
            other => DocsiftError::Parsing {
                message: format!("Invalid PDF: {}", other),
                source: Some(Box::new(other)),
            },
        }
    }
}

impl DocsiftError {
    /// Create a parsing error.
    pub fn parsing<S: Into<String>>(message: S) -> Self {
        Self::Parsing {
            message: message.into(),
            source: None,
        }
    }

    /// Create an encoding error.
    pub fn encoding<S: Into<String>>(message: S) -> Self {
        Self::Encoding {
            message: message.into(),
        }
    }

    /// Create a validation error.
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
}
