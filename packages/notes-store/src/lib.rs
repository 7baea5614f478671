//! # Notes store
//!
//! Client-side state for a note-taking view: the canonical note collection,
//! the derived search view and a subscription channel for views.
//!
//! ## Architecture
//!
//! ```text
//! View (intent)
//!     │
//!     ├─► NoteStore::set_search_query ─► search::filter ─► filtered view
//!     │
//!     └─► NoteStore::add/update/delete_note
//!             │
//!             ▼
//!         BaseNotesApi (NotesClient) ─► remote /notes resource
//!             │
//!             ▼ confirmed response
//!         reconcile canonical + filtered ─► publish NotesSnapshot
//!                                               │
//!                                               ▼
//!                                          Subscription::changed()
//! ```
//!
//! Mutations are confirmed-only: nothing changes until the API answers.
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use notes_client::{NoteDraft, NotesClient};
//! use notes_store::{ColorCatalog, NoteStore, StoreConfig};
//!
//! let api = Arc::new(NotesClient::from_env()?);
//! let (store, loading) = NoteStore::connect(api, ColorCatalog::builtin(), StoreConfig::default());
//! loading.await??;
//!
//! let mut changes = store.subscribe()?;
//! store.add_note(NoteDraft::new("Milk", "2 liters")).await?;
//! let snapshot = changes.changed().await;
//! ```

pub mod api;
pub mod colors;
pub mod error;
pub mod search;
mod store;

// Test doubles (feature-gated)
#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use api::BaseNotesApi;
pub use colors::{ColorCatalog, ColorEntry, PALETTE};
pub use error::{Result, StoreError};
pub use store::{LoadStatus, NoteStore, NotesSnapshot, StoreConfig, Subscription};

// Re-export the entity model so views need a single dependency
pub use notes_client::{Note, NoteDraft, NoteId, NotePatch, NotesError};
