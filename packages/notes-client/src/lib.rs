//! Pure notes REST API client.
//!
//! A minimal client for the notes resource. Supports listing, creating,
//! partially updating and deleting notes. Holds no state besides the HTTP
//! client and the base URL.
//!
//! # Example
//!
//! ```rust,ignore
//! use notes_client::{NoteDraft, NotesClient};
//!
//! let client = NotesClient::from_env()?;
//!
//! let note = client.create_note(&NoteDraft::new("Milk", "2 liters")).await?;
//! for note in client.list_notes().await? {
//!     println!("{} {}", note.id, note.title);
//! }
//! ```

pub mod error;
pub mod types;

pub use error::{NotesError, Result};
pub use types::{Note, NoteDraft, NoteId, NotePatch, WireNote, DEFAULT_COLOR};

use std::time::Duration;

use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use types::ApiResponse;

/// Client for the `/notes` resource.
#[derive(Debug, Clone)]
pub struct NotesClient {
    http_client: Client,
    base_url: String,
}

impl NotesClient {
    /// Create a client against the given API root, e.g. `http://localhost:3333`.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http_client: Client::new(),
            base_url,
        }
    }

    /// Create from environment variable `NOTES_API_URL`.
    pub fn from_env() -> Result<Self> {
        let base_url = std::env::var("NOTES_API_URL")
            .map_err(|_| NotesError::Config("NOTES_API_URL not set".into()))?;
        if base_url.trim().is_empty() {
            return Err(NotesError::Config("NOTES_API_URL is empty".into()));
        }
        Ok(Self::new(base_url))
    }

    /// Use a transport-level timeout for every request.
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self> {
        self.http_client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| NotesError::Config(format!("Failed to build HTTP client: {}", e)))?;
        Ok(self)
    }

    /// Use a preconfigured `reqwest` client.
    pub fn with_http_client(mut self, client: Client) -> Self {
        self.http_client = client;
        self
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn notes_url(&self) -> String {
        format!("{}/notes", self.base_url)
    }

    fn note_url(&self, id: &NoteId) -> String {
        format!("{}/notes/{}", self.base_url, urlencoding::encode(id.as_str()))
    }

    /// Fetch every note, in server order.
    pub async fn list_notes(&self) -> Result<Vec<Note>> {
        debug!("Listing notes");

        let response = self
            .http_client
            .get(self.notes_url())
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "List notes request failed");
                NotesError::from(e)
            })?;

        let response = check_status(response, None).await?;
        let body: ApiResponse<Vec<WireNote>> = decode(response).await?;

        let notes = body
            .data
            .into_iter()
            .map(Note::try_from)
            .collect::<Result<Vec<_>>>()?;

        debug!(count = notes.len(), "Listed notes");
        Ok(notes)
    }

    /// Create a note. The server assigns id and timestamps.
    pub async fn create_note(&self, draft: &NoteDraft) -> Result<Note> {
        debug!(title = %draft.title, "Creating note");

        let response = self
            .http_client
            .post(self.notes_url())
            .json(draft)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Create note request failed");
                NotesError::from(e)
            })?;

        let response = check_status(response, None).await?;
        let body: ApiResponse<WireNote> = decode(response).await?;
        let note = Note::try_from(body.data)?;

        debug!(note_id = %note.id, "Created note");
        Ok(note)
    }

    /// Partially update a note and return the server's full representation.
    pub async fn update_note(&self, id: &NoteId, patch: &NotePatch) -> Result<Note> {
        debug!(note_id = %id, "Updating note");

        let response = self
            .http_client
            .put(self.note_url(id))
            .json(patch)
            .send()
            .await
            .map_err(|e| {
                warn!(note_id = %id, error = %e, "Update note request failed");
                NotesError::from(e)
            })?;

        let response = check_status(response, Some(id)).await?;
        let body: ApiResponse<WireNote> = decode(response).await?;
        let note = Note::try_from(body.data)?;

        if note.id != *id {
            return Err(NotesError::MalformedResponse(format!(
                "update of note {} returned note {}",
                id, note.id
            )));
        }

        Ok(note)
    }

    /// Delete a note. Any response body is ignored.
    pub async fn delete_note(&self, id: &NoteId) -> Result<()> {
        debug!(note_id = %id, "Deleting note");

        let response = self
            .http_client
            .delete(self.note_url(id))
            .send()
            .await
            .map_err(|e| {
                warn!(note_id = %id, error = %e, "Delete note request failed");
                NotesError::from(e)
            })?;

        check_status(response, Some(id)).await?;
        Ok(())
    }
}

/// Map non-2xx responses to errors. A 404 on a single note becomes `NotFound`.
async fn check_status(response: Response, id: Option<&NoteId>) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    if let (StatusCode::NOT_FOUND, Some(id)) = (status, id) {
        warn!(note_id = %id, "Note not found on server");
        return Err(NotesError::NotFound { id: id.clone() });
    }

    let error_text = response.text().await.unwrap_or_default();
    warn!(status = %status, error = %error_text, "Notes API error");
    Err(NotesError::Network {
        status: Some(status.as_u16()),
        message: format!("Notes API error ({}): {}", status, error_text),
    })
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    let bytes = response.bytes().await?;
    serde_json::from_slice(&bytes).map_err(|e| {
        warn!(error = %e, "Undecodable notes API response");
        NotesError::MalformedResponse(e.to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_builder() {
        let client = NotesClient::new("http://localhost:3333/");
        assert_eq!(client.base_url(), "http://localhost:3333");
        assert_eq!(client.notes_url(), "http://localhost:3333/notes");
    }

    #[test]
    fn test_note_url_encodes_id() {
        let client = NotesClient::new("http://localhost:3333");
        assert_eq!(
            client.note_url(&NoteId::from("a b/c")),
            "http://localhost:3333/notes/a%20b%2Fc"
        );
    }
}
