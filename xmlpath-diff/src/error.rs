//! Error types for xmlpath-diff.

use thiserror::Error;

/// Result type alias for xmlpath-diff operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or comparing trees.
#[derive(Error, Debug)]
pub enum Error {
    /// The input was rejected before any parsing was attempted.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The XML parser reported malformed markup.
    ///
    /// The message is already collapsed to one line and truncated.
    #[error("XML parse error: {0}")]
    Parse(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error for settings or protocol messages.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Returns true if this is an input validation failure.
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation(_))
    }

    /// Returns true if this is an XML syntax failure.
    pub fn is_parse(&self) -> bool {
        matches!(self, Error::Parse(_))
    }
}

/// Input shape errors, detected before parsing.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    /// The document was not a string (only possible at untyped boundaries).
    #[error("XML input must be a string")]
    NotAString,

    /// The document was empty or whitespace only.
    #[error("XML input cannot be empty")]
    Empty,
}
