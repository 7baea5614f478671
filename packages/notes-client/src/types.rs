use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::NotesError;

/// Hex code of the default note color.
pub const DEFAULT_COLOR: &str = "#fff";

/// Server-assigned note identifier.
///
/// Opaque to the client. The wire format may carry it as a string or a
/// number; both end up here as text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(String);

impl NoteId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NoteId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for NoteId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A note as held in memory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Note {
    pub id: NoteId,
    pub title: String,
    pub description: String,
    pub color: String,
    pub is_favorite: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields for a note that does not exist yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NoteDraft {
    pub title: String,
    pub description: String,
    pub is_favorite: bool,
    pub color: String,
}

impl NoteDraft {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            ..Default::default()
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    pub fn favorite(mut self, is_favorite: bool) -> Self {
        self.is_favorite = is_favorite;
        self
    }
}

impl Default for NoteDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            is_favorite: false,
            color: DEFAULT_COLOR.to_string(),
        }
    }
}

/// Partial update. Only the fields that are set go over the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NotePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_favorite: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl NotePatch {
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn is_favorite(mut self, is_favorite: bool) -> Self {
        self.is_favorite = Some(is_favorite);
        self
    }

    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }
}

/// Envelope around every notes API response body.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse<T> {
    pub data: T,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum WireId {
    Text(String),
    Number(serde_json::Number),
}

impl From<WireId> for NoteId {
    fn from(id: WireId) -> Self {
        match id {
            WireId::Text(s) => NoteId(s),
            WireId::Number(n) => NoteId(n.to_string()),
        }
    }
}

/// A note exactly as the server sends it.
///
/// Every field is optional here; [`Note::try_from`] decides which ones
/// are required.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WireNote {
    pub id: Option<WireId>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub is_favorite: Option<bool>,
    pub color: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl TryFrom<WireNote> for Note {
    type Error = NotesError;

    fn try_from(wire: WireNote) -> Result<Self, Self::Error> {
        let id: NoteId = wire
            .id
            .ok_or_else(|| missing("id", None))?
            .into();
        let created_at = wire
            .created_at
            .ok_or_else(|| missing("created_at", Some(&id)))?;
        let updated_at = wire
            .updated_at
            .ok_or_else(|| missing("updated_at", Some(&id)))?;

        Ok(Note {
            id,
            title: wire.title.unwrap_or_default(),
            description: wire.description.unwrap_or_default(),
            color: wire.color.unwrap_or_else(|| DEFAULT_COLOR.to_string()),
            is_favorite: wire.is_favorite.unwrap_or(false),
            created_at,
            updated_at,
        })
    }
}

fn missing(field: &str, id: Option<&NoteId>) -> NotesError {
    match id {
        Some(id) => NotesError::MalformedResponse(format!("note {} is missing `{}`", id, field)),
        None => NotesError::MalformedResponse(format!("note is missing `{}`", field)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn wire(value: serde_json::Value) -> WireNote {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_wire_note_translates_field_names() {
        let note = Note::try_from(wire(json!({
            "id": "abc",
            "title": "Milk",
            "description": "2 liters",
            "is_favorite": true,
            "color": "#BAE2FF",
            "created_at": "2024-01-01T10:00:00Z",
            "updated_at": "2024-01-02T10:00:00Z",
        })))
        .unwrap();

        assert_eq!(note.id, NoteId::from("abc"));
        assert_eq!(note.title, "Milk");
        assert!(note.is_favorite);
        assert_eq!(note.color, "#BAE2FF");
        assert!(note.updated_at > note.created_at);
    }

    #[test]
    fn test_numeric_id_becomes_text() {
        let note = Note::try_from(wire(json!({
            "id": 42,
            "created_at": "2024-01-01T10:00:00Z",
            "updated_at": "2024-01-01T10:00:00Z",
        })))
        .unwrap();

        assert_eq!(note.id.as_str(), "42");
    }

    #[test]
    fn test_missing_optional_fields_get_defaults() {
        let note = Note::try_from(wire(json!({
            "id": "1",
            "description": null,
            "created_at": "2024-01-01T10:00:00Z",
            "updated_at": "2024-01-01T10:00:00Z",
        })))
        .unwrap();

        assert_eq!(note.title, "");
        assert_eq!(note.description, "");
        assert_eq!(note.color, DEFAULT_COLOR);
        assert!(!note.is_favorite);
    }

    #[test]
    fn test_missing_id_is_malformed() {
        let err = Note::try_from(wire(json!({
            "title": "Milk",
            "created_at": "2024-01-01T10:00:00Z",
            "updated_at": "2024-01-01T10:00:00Z",
        })))
        .unwrap_err();

        assert!(matches!(err, NotesError::MalformedResponse(msg) if msg.contains("`id`")));
    }

    #[test]
    fn test_missing_timestamp_is_malformed() {
        let err = Note::try_from(wire(json!({ "id": "7", "title": "Milk" }))).unwrap_err();
        assert!(matches!(err, NotesError::MalformedResponse(msg) if msg.contains("note 7")));
    }

    #[test]
    fn test_patch_serializes_only_set_fields() {
        let patch = NotePatch::default().is_favorite(true);
        assert_eq!(
            serde_json::to_value(&patch).unwrap(),
            json!({ "is_favorite": true })
        );
    }

    #[test]
    fn test_draft_defaults_to_white() {
        let draft = NoteDraft::new("Eggs", "a dozen");
        assert_eq!(
            serde_json::to_value(&draft).unwrap(),
            json!({
                "title": "Eggs",
                "description": "a dozen",
                "is_favorite": false,
                "color": "#fff",
            })
        );
    }
}
