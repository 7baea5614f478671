// Trait seam between the store and the notes API.
//
// Infrastructure only: the store owns every reconciliation rule, the API
// implementation only moves notes over the wire.

use async_trait::async_trait;
use notes_client::{Note, NoteDraft, NoteId, NotePatch, NotesClient, Result};

#[async_trait]
pub trait BaseNotesApi: Send + Sync {
    /// Fetch every note
    async fn list_notes(&self) -> Result<Vec<Note>>;

    /// Create a note and return the server's representation
    async fn create_note(&self, draft: &NoteDraft) -> Result<Note>;

    /// Apply a partial update and return the full updated note
    async fn update_note(&self, id: &NoteId, patch: &NotePatch) -> Result<Note>;

    /// Delete a note
    async fn delete_note(&self, id: &NoteId) -> Result<()>;
}

#[async_trait]
impl BaseNotesApi for NotesClient {
    async fn list_notes(&self) -> Result<Vec<Note>> {
        NotesClient::list_notes(self).await
    }

    async fn create_note(&self, draft: &NoteDraft) -> Result<Note> {
        NotesClient::create_note(self, draft).await
    }

    async fn update_note(&self, id: &NoteId, patch: &NotePatch) -> Result<Note> {
        NotesClient::update_note(self, id, patch).await
    }

    async fn delete_note(&self, id: &NoteId) -> Result<()> {
        NotesClient::delete_note(self, id).await
    }
}
