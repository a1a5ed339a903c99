//! Error types for reportdoc library.

use std::io;
use thiserror::Error;

/// Result type alias for reportdoc operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur at the boundaries of the editing core.
///
/// Editing, pagination and extraction never fail; these variants cover
/// import/export, corpus loading and the external adapters.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The document violates a structural invariant (e.g. duplicate block ids).
    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    /// The block type string is not part of the closed block set.
    #[error("Unknown block type: {0}")]
    UnknownBlockType(String),

    /// No question with the given id exists in the question list.
    #[error("Question not found: {0}")]
    QuestionNotFound(String),

    /// No responses are loaded for the given survey type.
    #[error("Survey type not found: {0}")]
    SurveyNotFound(String),

    /// A persistence or export adapter failed. Recoverable by the caller.
    #[error("Adapter error: {0}")]
    Adapter(String),

    /// A pending save/export job was cancelled before it completed.
    #[error("Operation cancelled")]
    Cancelled,

    /// Error during rendering (Markdown, text, JSON).
    #[error("Rendering error: {0}")]
    Render(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Whether the caller may retry the operation (adapter-side failures).
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Error::Adapter(_) | Error::Io(_) | Error::Cancelled)
    }
}
