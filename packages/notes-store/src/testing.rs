//! Test doubles for the notes API.
//!
//! Available under `cfg(test)` and with the `testing` feature:
//!
//! ```toml
//! [dev-dependencies]
//! notes-store = { path = "../notes-store", features = ["testing"] }
//! ```

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use notes_client::{Note, NoteDraft, NoteId, NotePatch, NotesError, Result};

use crate::api::BaseNotesApi;

/// Fixed origin for fixture timestamps.
pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap()
}

/// White, non-favorite note updated `minutes` after [`base_time`].
pub fn note(id: &str, title: &str, minutes: i64) -> Note {
    let at = base_time() + chrono::Duration::minutes(minutes);
    Note {
        id: NoteId::from(id),
        title: title.to_string(),
        description: String::new(),
        color: notes_client::DEFAULT_COLOR.to_string(),
        is_favorite: false,
        created_at: at,
        updated_at: at,
    }
}

/// Transport failure as the client would report it.
pub fn network_error() -> NotesError {
    NotesError::Network {
        status: None,
        message: "connection refused".to_string(),
    }
}

/// A recorded API call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiCall {
    List,
    Create(NoteDraft),
    Update(NoteId, NotePatch),
    Delete(NoteId),
}

/// Queued response, optionally delayed to control completion order.
struct Queued<T> {
    result: Result<T>,
    delay: Option<Duration>,
}

/// Scriptable notes API.
///
/// Responses are queued per operation and consumed in order. With an empty
/// queue, `list` returns no notes, `create` echoes the draft with a fresh
/// id, `delete` succeeds and `update` fails.
#[derive(Default)]
pub struct MockNotesApi {
    lists: Mutex<VecDeque<Queued<Vec<Note>>>>,
    creates: Mutex<VecDeque<Queued<Note>>>,
    updates: Mutex<VecDeque<Queued<Note>>>,
    deletes: Mutex<VecDeque<Queued<()>>>,
    calls: Mutex<Vec<ApiCall>>,
    next_id: AtomicU64,
}

impl MockNotesApi {
    pub fn new() -> Self {
        Self::default()
    }

    fn push<T>(queue: &Mutex<VecDeque<Queued<T>>>, result: Result<T>, delay: Option<Duration>) {
        queue.lock().unwrap().push_back(Queued { result, delay });
    }

    async fn pop<T>(queue: &Mutex<VecDeque<Queued<T>>>) -> Option<Result<T>> {
        let queued = queue.lock().unwrap().pop_front()?;
        if let Some(delay) = queued.delay {
            tokio::time::sleep(delay).await;
        }
        Some(queued.result)
    }

    pub fn with_list(self, notes: Vec<Note>) -> Self {
        Self::push(&self.lists, Ok(notes), None);
        self
    }

    pub fn with_list_error(self, err: NotesError) -> Self {
        Self::push(&self.lists, Err(err), None);
        self
    }

    pub fn with_created(self, note: Note) -> Self {
        Self::push(&self.creates, Ok(note), None);
        self
    }

    pub fn with_create_error(self, err: NotesError) -> Self {
        Self::push(&self.creates, Err(err), None);
        self
    }

    pub fn with_updated(self, note: Note) -> Self {
        Self::push(&self.updates, Ok(note), None);
        self
    }

    /// Queue an update response that completes after `delay`.
    pub fn with_updated_after(self, note: Note, delay: Duration) -> Self {
        Self::push(&self.updates, Ok(note), Some(delay));
        self
    }

    pub fn with_update_error(self, err: NotesError) -> Self {
        Self::push(&self.updates, Err(err), None);
        self
    }

    pub fn with_deleted(self) -> Self {
        Self::push(&self.deletes, Ok(()), None);
        self
    }

    pub fn with_delete_error(self, err: NotesError) -> Self {
        Self::push(&self.deletes, Err(err), None);
        self
    }

    /// Every call made so far, in issue order.
    pub fn calls(&self) -> Vec<ApiCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    fn record(&self, call: ApiCall) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl BaseNotesApi for MockNotesApi {
    async fn list_notes(&self) -> Result<Vec<Note>> {
        self.record(ApiCall::List);
        Self::pop(&self.lists).await.unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn create_note(&self, draft: &NoteDraft) -> Result<Note> {
        self.record(ApiCall::Create(draft.clone()));
        if let Some(result) = Self::pop(&self.creates).await {
            return result;
        }

        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1000;
        let at = Utc::now();
        Ok(Note {
            id: NoteId::from(id.to_string()),
            title: draft.title.clone(),
            description: draft.description.clone(),
            color: draft.color.clone(),
            is_favorite: draft.is_favorite,
            created_at: at,
            updated_at: at,
        })
    }

    async fn update_note(&self, id: &NoteId, patch: &NotePatch) -> Result<Note> {
        self.record(ApiCall::Update(id.clone(), patch.clone()));
        Self::pop(&self.updates).await.unwrap_or_else(|| {
            Err(NotesError::Network {
                status: None,
                message: "no mocked update response".to_string(),
            })
        })
    }

    async fn delete_note(&self, id: &NoteId) -> Result<()> {
        self.record(ApiCall::Delete(id.clone()));
        Self::pop(&self.deletes).await.unwrap_or(Ok(()))
    }
}
