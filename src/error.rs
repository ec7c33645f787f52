//! Error types for the Xiphos library.
//!
//! All fallible operations return [`Result`], whose error side is the
//! [`XiphosError`] enum. Every variant maps onto an [`ErrorKind`], which is the
//! structured "kind + message" pair handed to whatever API layer sits on top
//! of the engine.
//!
//! # Examples
//!
//! ```
//! use xiphos::error::{ErrorKind, Result, XiphosError};
//!
//! fn lookup(name: &str) -> Result<()> {
//!     Err(XiphosError::not_found(format!("index '{name}'")))
//! }
//!
//! let err = lookup("books").unwrap_err();
//! assert_eq!(err.kind(), ErrorKind::NotFound);
//! assert_eq!(err.to_string(), "Not found: index 'books'");
//! ```

use std::io;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The main error type for Xiphos operations.
#[derive(Error, Debug)]
pub enum XiphosError {
    /// An index, document or model does not exist where one is required.
    #[error("Not found: {0}")]
    NotFound(String),

    /// An index with the same name already exists.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Invalid user input (missing document text, malformed payload, bad config).
    #[error("Validation error: {0}")]
    Validation(String),

    /// A boolean query failed to parse.
    #[error("Query syntax error at position {position}: {message}")]
    QuerySyntax { position: usize, message: String },

    /// The index structures disagree with each other. Never caused by user input.
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    /// Text analysis failed (bad tokenizer pattern and similar).
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// I/O errors (reading ingestion files and configuration).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization errors.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for operations that may fail with XiphosError.
pub type Result<T> = std::result::Result<T, XiphosError>;

/// Coarse classification of an error, suitable for an API response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    NotFound,
    Conflict,
    Validation,
    QuerySyntax,
    InvariantViolation,
    Analysis,
    Io,
}

impl XiphosError {
    /// Create a new not found error.
    pub fn not_found<S: Into<String>>(msg: S) -> Self {
        XiphosError::NotFound(msg.into())
    }

    /// Create a new conflict error.
    pub fn conflict<S: Into<String>>(msg: S) -> Self {
        XiphosError::Conflict(msg.into())
    }

    /// Create a new validation error.
    pub fn validation<S: Into<String>>(msg: S) -> Self {
        XiphosError::Validation(msg.into())
    }

    /// Create a new query syntax error at the given character position.
    pub fn query_syntax<S: Into<String>>(position: usize, msg: S) -> Self {
        XiphosError::QuerySyntax {
            position,
            message: msg.into(),
        }
    }

    /// Create a new invariant violation error.
    pub fn invariant<S: Into<String>>(msg: S) -> Self {
        XiphosError::InvariantViolation(msg.into())
    }

    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        XiphosError::Analysis(msg.into())
    }

    /// The structured kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            XiphosError::NotFound(_) => ErrorKind::NotFound,
            XiphosError::Conflict(_) => ErrorKind::Conflict,
            XiphosError::Validation(_) | XiphosError::Json(_) => ErrorKind::Validation,
            XiphosError::QuerySyntax { .. } => ErrorKind::QuerySyntax,
            XiphosError::InvariantViolation(_) => ErrorKind::InvariantViolation,
            XiphosError::Analysis(_) => ErrorKind::Analysis,
            XiphosError::Io(_) => ErrorKind::Io,
        }
    }

    /// Whether the error was caused by the caller rather than by the engine.
    pub fn is_user_error(&self) -> bool {
        !matches!(self.kind(), ErrorKind::InvariantViolation | ErrorKind::Io)
    }
}
