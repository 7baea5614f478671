//! Error types for the notes client.

use thiserror::Error;

use crate::types::NoteId;

/// Result type for notes client operations.
pub type Result<T> = std::result::Result<T, NotesError>;

/// Notes client errors.
#[derive(Debug, Error)]
pub enum NotesError {
    /// Configuration error (missing or invalid API URL)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Transport failure or non-2xx response
    #[error("Network error: {message}")]
    Network {
        status: Option<u16>,
        message: String,
    },

    /// The server no longer knows this note
    #[error("Note not found: {id}")]
    NotFound { id: NoteId },

    /// Response body could not be decoded or lacks required fields
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

impl NotesError {
    /// HTTP status that caused the error, if one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            NotesError::Network { status, .. } => *status,
            NotesError::NotFound { .. } => Some(404),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for NotesError {
    fn from(err: reqwest::Error) -> Self {
        NotesError::Network {
            status: err.status().map(|s| s.as_u16()),
            message: err.to_string(),
        }
    }
}
