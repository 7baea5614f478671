//! The note store.
//!
//! Owns the canonical note collection and the derived search view, applies
//! confirmed mutations returned by the notes API and publishes a snapshot
//! to subscribers after every state transition.
//!
//! # Guarantees
//!
//! - **Confirmed-only**: collections change only after the API succeeds
//! - **Unique ids**: the canonical collection never holds two notes with one id
//! - **Last writer wins**: concurrent mutations of one note are not serialized;
//!   the response that arrives last is the one that stays
//! - **No reentrancy**: observers receive snapshots over a channel, never
//!   inside the store's critical section

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use notes_client::{Note, NoteDraft, NoteId, NotePatch};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::api::BaseNotesApi;
use crate::colors::ColorCatalog;
use crate::error::{Result, StoreError};
use crate::search;

/// Default upper bound on concurrent subscribers.
const DEFAULT_MAX_SUBSCRIBERS: usize = 16;

/// Store tuning.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Maximum number of live [`Subscription`]s.
    pub max_subscribers: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            max_subscribers: DEFAULT_MAX_SUBSCRIBERS,
        }
    }
}

/// Where the store is in its lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    /// Waiting for the initial listing.
    Initializing,
    /// Notes are loaded; mutations are accepted. Terminal.
    Ready,
    /// The initial listing failed. `load` may be called again.
    LoadFailed { error: String },
}

/// Immutable view of the store at one point in time.
#[derive(Debug, Clone)]
pub struct NotesSnapshot {
    pub canonical: Vec<Note>,
    pub filtered: Vec<Note>,
    pub is_loading: bool,
    pub is_search_active: bool,
    pub query: String,
    pub status: LoadStatus,
}

impl NotesSnapshot {
    /// Notes the view should show: search results while searching, otherwise everything.
    pub fn visible(&self) -> &[Note] {
        if self.is_search_active {
            &self.filtered
        } else {
            &self.canonical
        }
    }

    /// Visible favorites, order preserved.
    pub fn favorites(&self) -> Vec<&Note> {
        self.visible().iter().filter(|n| n.is_favorite).collect()
    }

    /// Visible non-favorites, order preserved.
    pub fn others(&self) -> Vec<&Note> {
        self.visible().iter().filter(|n| !n.is_favorite).collect()
    }

    /// Search is active and nothing matched.
    pub fn no_search_results(&self) -> bool {
        self.is_search_active && self.filtered.is_empty()
    }

    pub fn is_ready(&self) -> bool {
        self.status == LoadStatus::Ready
    }
}

/// A registered observer. Dropping it unsubscribes.
#[derive(Debug)]
pub struct Subscription {
    receiver: watch::Receiver<NotesSnapshot>,
}

impl Subscription {
    /// The latest published snapshot.
    pub fn current(&self) -> NotesSnapshot {
        self.receiver.borrow().clone()
    }

    /// Wait for the next state transition.
    ///
    /// Returns `None` once the store is gone.
    pub async fn changed(&mut self) -> Option<NotesSnapshot> {
        self.receiver.changed().await.ok()?;
        Some(self.receiver.borrow_and_update().clone())
    }
}

struct NotesState {
    canonical: Vec<Note>,
    filtered: Vec<Note>,
    query: String,
    is_search_active: bool,
    status: LoadStatus,
}

impl NotesState {
    fn new() -> Self {
        Self {
            canonical: Vec::new(),
            filtered: Vec::new(),
            query: String::new(),
            is_search_active: false,
            status: LoadStatus::Initializing,
        }
    }

    fn snapshot(&self) -> NotesSnapshot {
        NotesSnapshot {
            canonical: self.canonical.clone(),
            filtered: self.filtered.clone(),
            is_loading: self.status != LoadStatus::Ready,
            is_search_active: self.is_search_active,
            query: self.query.clone(),
            status: self.status.clone(),
        }
    }

    /// Restrict the filtered view to ids it already held, in canonical order.
    ///
    /// Notes outside the previous view stay out even if they would match the
    /// current query now.
    fn reconcile_filtered(&mut self) {
        let members: HashSet<&NoteId> = self.filtered.iter().map(|n| &n.id).collect();
        let filtered = self
            .canonical
            .iter()
            .filter(|n| members.contains(&n.id))
            .cloned()
            .collect();
        self.filtered = filtered;
    }

    /// Put `note` at the head, replacing any entry with the same id.
    fn move_to_front(&mut self, note: Note) {
        self.canonical.retain(|n| n.id != note.id);
        self.canonical.insert(0, note);
    }
}

/// Most recently updated first; the first occurrence of a duplicate id wins.
fn sort_for_display(mut notes: Vec<Note>) -> Vec<Note> {
    notes.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
    let mut seen = HashSet::new();
    notes.retain(|n| seen.insert(n.id.clone()));
    notes
}

/// Single source of truth for the notes shown by a view.
pub struct NoteStore {
    api: Arc<dyn BaseNotesApi>,
    catalog: ColorCatalog,
    config: StoreConfig,
    state: Mutex<NotesState>,
    publisher: watch::Sender<NotesSnapshot>,
}

impl NoteStore {
    /// Create a store in the `Initializing` state. Nothing is fetched until [`load`](Self::load).
    pub fn new(api: Arc<dyn BaseNotesApi>, catalog: ColorCatalog, config: StoreConfig) -> Self {
        let state = NotesState::new();
        let (publisher, _) = watch::channel(state.snapshot());
        Self {
            api,
            catalog,
            config,
            state: Mutex::new(state),
            publisher,
        }
    }

    /// Create a shared store and start the initial load in the background.
    pub fn connect(
        api: Arc<dyn BaseNotesApi>,
        catalog: ColorCatalog,
        config: StoreConfig,
    ) -> (Arc<Self>, JoinHandle<Result<()>>) {
        let store = Arc::new(Self::new(api, catalog, config));
        let loader = Arc::clone(&store);
        let handle = tokio::spawn(async move { loader.load().await });
        (store, handle)
    }

    pub fn catalog(&self) -> &ColorCatalog {
        &self.catalog
    }

    fn state(&self) -> MutexGuard<'_, NotesState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn publish(&self, state: &NotesState) {
        self.publisher.send_replace(state.snapshot());
    }

    /// Current state.
    pub fn snapshot(&self) -> NotesSnapshot {
        self.state().snapshot()
    }

    pub fn status(&self) -> LoadStatus {
        self.state().status.clone()
    }

    /// The canonical entry for `id`, if present.
    pub fn note(&self, id: &NoteId) -> Option<Note> {
        self.state().canonical.iter().find(|n| &n.id == id).cloned()
    }

    /// Register an observer. The subscription sees every snapshot published after this call.
    pub fn subscribe(&self) -> Result<Subscription> {
        let limit = self.config.max_subscribers;
        // Held so concurrent callers cannot both pass the limit check.
        let _state = self.state();
        if self.publisher.receiver_count() >= limit {
            warn!(limit, "Subscriber limit reached");
            return Err(StoreError::TooManySubscribers { limit });
        }
        Ok(Subscription {
            receiver: self.publisher.subscribe(),
        })
    }

    pub fn subscriber_count(&self) -> usize {
        self.publisher.receiver_count()
    }

    fn ensure_ready(&self) -> Result<()> {
        match self.state().status {
            LoadStatus::Ready => Ok(()),
            _ => Err(StoreError::NotReady),
        }
    }

    /// Fetch every note and become `Ready`.
    ///
    /// A no-op once ready. On failure the store moves to `LoadFailed`; calling
    /// `load` again retries.
    pub async fn load(&self) -> Result<()> {
        {
            let mut state = self.state();
            if state.status == LoadStatus::Ready {
                return Ok(());
            }
            if state.status != LoadStatus::Initializing {
                state.status = LoadStatus::Initializing;
                self.publish(&state);
            }
        }

        info!("Loading notes");
        let result = self.api.list_notes().await;

        let mut state = self.state();
        if state.status == LoadStatus::Ready {
            // A concurrent load finished first.
            return Ok(());
        }

        match result {
            Ok(notes) => {
                state.canonical = sort_for_display(notes);
                state.status = LoadStatus::Ready;
                if state.is_search_active {
                    state.filtered = search::filter(&state.query, &state.canonical, &self.catalog);
                } else {
                    state.reconcile_filtered();
                }
                info!(count = state.canonical.len(), "Notes loaded");
                self.publish(&state);
                Ok(())
            }
            Err(err) => {
                error!(error = %err, "Error fetching notes");
                state.status = LoadStatus::LoadFailed {
                    error: err.to_string(),
                };
                self.publish(&state);
                Err(err.into())
            }
        }
    }

    /// Apply a confirmed change to the canonical collection, then reconcile and publish.
    fn commit(&self, apply: impl FnOnce(&mut NotesState)) {
        let mut state = self.state();
        apply(&mut *state);
        state.reconcile_filtered();
        self.publish(&state);
    }

    /// Create a note and put the server's version at the head of the collection.
    pub async fn add_note(&self, draft: NoteDraft) -> Result<Note> {
        self.ensure_ready()?;

        let note = self.api.create_note(&draft).await.map_err(|err| {
            warn!(error = %err, "Could not create note");
            err
        })?;

        info!(note_id = %note.id, "Note created");
        let created = note.clone();
        self.commit(|state| state.move_to_front(created));
        Ok(note)
    }

    /// Update a note and move the server's version to the head of the collection.
    pub async fn update_note(&self, id: &NoteId, patch: NotePatch) -> Result<Note> {
        self.ensure_ready()?;

        let note = self.api.update_note(id, &patch).await.map_err(|err| {
            warn!(note_id = %id, error = %err, "Could not update note");
            err
        })?;

        debug!(note_id = %note.id, updated_at = %note.updated_at, "Note updated");
        let updated = note.clone();
        self.commit(|state| state.move_to_front(updated));
        Ok(note)
    }

    /// Delete a note. Confirming with the user is the caller's job.
    ///
    /// Removing an id the store does not hold leaves the collection as is.
    pub async fn delete_note(&self, id: &NoteId) -> Result<()> {
        self.ensure_ready()?;

        self.api.delete_note(id).await.map_err(|err| {
            warn!(note_id = %id, error = %err, "Could not delete note");
            err
        })?;

        info!(note_id = %id, "Note deleted");
        self.commit(|state| state.canonical.retain(|n| &n.id != id));
        Ok(())
    }

    /// Flip the favorite flag of a note.
    pub async fn toggle_favorite(&self, id: &NoteId) -> Result<Note> {
        let current = self.require(id)?;
        self.update_note(id, NotePatch::default().is_favorite(!current.is_favorite))
            .await
    }

    /// Change a note's color.
    pub async fn recolor(&self, id: &NoteId, hex_code: impl Into<String>) -> Result<Note> {
        self.require(id)?;
        self.update_note(id, NotePatch::default().color(hex_code))
            .await
    }

    /// Save title and description edits. Unchanged text is not sent.
    pub async fn edit_note(
        &self,
        id: &NoteId,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<Note> {
        let current = self.require(id)?;
        let (title, description) = (title.into(), description.into());
        if current.title == title && current.description == description {
            debug!(note_id = %id, "Edit left note unchanged");
            return Ok(current);
        }

        self.update_note(id, NotePatch::default().title(title).description(description))
            .await
    }

    fn require(&self, id: &NoteId) -> Result<Note> {
        self.ensure_ready()?;
        self.note(id)
            .ok_or_else(|| StoreError::UnknownNote { id: id.clone() })
    }

    /// Replace the filtered collection directly.
    pub fn set_filtered_collection(&self, notes: Vec<Note>) {
        let mut state = self.state();
        state.filtered = notes;
        self.publish(&state);
    }

    /// Update the search query.
    ///
    /// At two or more normalized characters the search engine recomputes the
    /// filtered view. Below that, search turns off and the view falls back to
    /// the canonical collection; the filtered collection is left alone.
    pub fn set_search_query(&self, query: impl Into<String>) {
        let query = query.into();
        let is_active = search::is_search_active(&query);

        let mut state = self.state();
        if state.is_search_active != is_active {
            debug!(active = is_active, "Search toggled");
        }
        if is_active {
            state.filtered = search::filter(&query, &state.canonical, &self.catalog);
        }
        state.query = query;
        state.is_search_active = is_active;
        self.publish(&state);
    }
}

impl std::fmt::Debug for NoteStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state();
        f.debug_struct("NoteStore")
            .field("status", &state.status)
            .field("notes", &state.canonical.len())
            .field("subscriber_count", &self.subscriber_count())
            .finish()
    }
}
