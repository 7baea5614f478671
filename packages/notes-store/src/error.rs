//! Typed errors for the note store.

use notes_client::{NoteId, NotesError};
use thiserror::Error;

/// Errors returned by store operations.
///
/// A failed operation never mutates the store: both collections stay at
/// their last-known-good state.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The notes API rejected or failed the call
    #[error(transparent)]
    Api(#[from] NotesError),

    /// Mutations are refused until the initial load succeeds
    #[error("notes have not been loaded yet")]
    NotReady,

    /// The observer limit is reached
    #[error("subscriber limit reached: {limit}")]
    TooManySubscribers { limit: usize },

    /// The note is not in the canonical collection
    #[error("note not in store: {id}")]
    UnknownNote { id: NoteId },
}

impl StoreError {
    /// The underlying API error, if any.
    pub fn api_error(&self) -> Option<&NotesError> {
        match self {
            StoreError::Api(err) => Some(err),
            _ => None,
        }
    }
}

/// Result type alias for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
