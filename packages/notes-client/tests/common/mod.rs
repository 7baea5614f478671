//! In-process notes server for exercising the client over real HTTP.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use chrono::{Duration, TimeZone, Utc};
use serde_json::{json, Value};
use tokio::net::TcpListener;

/// Notes held by the fake server, as raw wire JSON.
#[derive(Clone, Default)]
pub struct FakeNotes {
    inner: Arc<Mutex<FakeState>>,
}

#[derive(Default)]
struct FakeState {
    notes: Vec<Value>,
    next_id: u64,
    tick: i64,
}

impl FakeNotes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a note with an explicit id and `updated_at` offset in minutes.
    pub fn with_note(self, id: u64, title: &str, minutes: i64) -> Self {
        {
            let mut state = self.inner.lock().unwrap();
            let at = timestamp(minutes);
            state.notes.push(json!({
                "id": id,
                "title": title,
                "description": "",
                "is_favorite": false,
                "color": "#fff",
                "created_at": at,
                "updated_at": at,
            }));
            state.next_id = state.next_id.max(id);
            state.tick = state.tick.max(minutes);
        }
        self
    }

    pub fn len(&self) -> usize {
        self.inner.lock().unwrap().notes.len()
    }
}

fn timestamp(minutes: i64) -> String {
    let base = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
    (base + Duration::minutes(minutes)).to_rfc3339()
}

async fn list_notes(State(db): State<FakeNotes>) -> Json<Value> {
    let state = db.inner.lock().unwrap();
    Json(json!({ "data": state.notes }))
}

async fn create_note(State(db): State<FakeNotes>, Json(body): Json<Value>) -> Json<Value> {
    let mut state = db.inner.lock().unwrap();
    state.next_id += 1;
    state.tick += 1;
    let at = timestamp(state.tick);
    let note = json!({
        "id": state.next_id,
        "title": body["title"],
        "description": body["description"],
        "is_favorite": body["is_favorite"],
        "color": body["color"],
        "created_at": at,
        "updated_at": at,
    });
    state.notes.push(note.clone());
    Json(json!({ "data": note }))
}

async fn update_note(
    State(db): State<FakeNotes>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    let mut state = db.inner.lock().unwrap();
    state.tick += 1;
    let at = timestamp(state.tick);
    let Some(note) = state
        .notes
        .iter_mut()
        .find(|n| n["id"].to_string() == id)
    else {
        return (StatusCode::NOT_FOUND, Json(json!({ "error": "not found" })));
    };

    if let Some(fields) = body.as_object() {
        for (key, value) in fields {
            note[key] = value.clone();
        }
    }
    note["updated_at"] = json!(at);
    (StatusCode::OK, Json(json!({ "data": note.clone() })))
}

async fn delete_note(State(db): State<FakeNotes>, Path(id): Path<String>) -> StatusCode {
    let mut state = db.inner.lock().unwrap();
    let before = state.notes.len();
    state.notes.retain(|n| n["id"].to_string() != id);
    if state.notes.len() == before {
        StatusCode::NOT_FOUND
    } else {
        StatusCode::NO_CONTENT
    }
}

pub fn notes_router(db: FakeNotes) -> Router {
    Router::new()
        .route("/notes", get(list_notes).post(create_note))
        .route("/notes/:id", axum::routing::put(update_note).delete(delete_note))
        .with_state(db)
}

/// Every route answers 500.
pub fn failing_router() -> Router {
    async fn fail() -> impl IntoResponse {
        (StatusCode::INTERNAL_SERVER_ERROR, "database unavailable")
    }
    Router::new()
        .route("/notes", get(fail).post(fail))
        .route("/notes/:id", axum::routing::put(fail).delete(fail))
}

/// Answers with a fixed body on `GET /notes`, `POST /notes` and `PUT /notes/:id`.
pub fn fixed_body_router(body: Value) -> Router {
    let list_body = body.clone();
    let create_body = body.clone();
    Router::new()
        .route(
            "/notes",
            get(move || {
                let body = list_body.clone();
                async move { Json(body) }
            })
            .post(move || {
                let body = create_body.clone();
                async move { Json(body) }
            }),
        )
        .route(
            "/notes/:id",
            axum::routing::put(move || {
                let body = body.clone();
                async move { Json(body) }
            }),
        )
}

/// Serve `router` on an ephemeral port and return its base URL.
pub async fn spawn(router: Router) -> String {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}
