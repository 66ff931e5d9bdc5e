#![allow(dead_code)]

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use notes_api::auth::{generate_jwt, Claims};
use notes_api::config::AppConfig;
use notes_api::database::{MemoryNoteStore, NewNote, Note, NoteStore, StoreError};
use notes_api::drive::DriveClient;
use notes_api::{app, AppState};

pub const SECRET: &str = "integration-test-secret";

// Nothing listens here; uploads against it fail at the transport level.
pub const UNREACHABLE_DRIVE: &str = "http://127.0.0.1:1";

pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryNoteStore>,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_drive_url(UNREACHABLE_DRIVE)
    }

    pub fn with_drive_url(drive_url: &str) -> Self {
        let store = Arc::new(MemoryNoteStore::new());
        let router = router_for(store.clone(), drive_url);
        Self { router, store }
    }

    pub async fn send(&self, request: Request<Body>) -> Result<TestResponse> {
        send(&self.router, request).await
    }
}

pub fn router_for(store: Arc<dyn NoteStore>, drive_url: &str) -> Router {
    let drive = DriveClient::new(drive_url).expect("valid drive url");
    let state = AppState::new(store, drive, SECRET);

    let mut config = AppConfig::development();
    config.api.enable_request_logging = false;
    app(state, &config)
}

pub async fn send(router: &Router, request: Request<Body>) -> Result<TestResponse> {
    let response = router.clone().oneshot(request).await?;
    let status = response.status();
    let headers = response.headers().clone();
    let body = to_bytes(response.into_body(), usize::MAX).await?.to_vec();
    Ok(TestResponse { status, headers, body })
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body)
            .unwrap_or_else(|e| panic!("response is not JSON ({}): {:?}", e, String::from_utf8_lossy(&self.body)))
    }
}

/// Session token for `user` with no Drive access
pub fn token(user: &str) -> String {
    generate_jwt(&Claims::new(user, None, 1).expect("claims"), SECRET).expect("token")
}

/// Session token for `user` carrying a delegated Drive access token
pub fn token_with_drive(user: &str, drive_token: &str) -> String {
    generate_jwt(&Claims::new(user, Some(drive_token.to_string()), 1).expect("claims"), SECRET).expect("token")
}

pub fn request(method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .expect("request"),
        None => builder.body(Body::empty()).expect("request"),
    }
}

pub fn note(id: &str, author: &str, fields: Value) -> Note {
    Note {
        id: id.to_string(),
        author: author.to_string(),
        fields: fields.as_object().cloned().unwrap_or_default(),
    }
}

/// Store whose every operation fails, for exercising the 500 paths
pub struct FailingStore;

fn broken() -> StoreError {
    StoreError::Sqlx(sqlx::Error::PoolTimedOut)
}

#[async_trait]
impl NoteStore for FailingStore {
    async fn find_by_author(&self, _author: &str) -> Result<Vec<Note>, StoreError> {
        Err(broken())
    }

    async fn find_by_id(&self, _id: &str) -> Result<Option<Note>, StoreError> {
        Err(broken())
    }

    async fn create(&self, _author: &str, _note: NewNote) -> Result<Note, StoreError> {
        Err(broken())
    }

    async fn save(&self, _note: &Note) -> Result<Note, StoreError> {
        Err(broken())
    }

    async fn remove(&self, _id: &str) -> Result<bool, StoreError> {
        Err(broken())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Err(broken())
    }
}

/// Store where every note is found but has already been deleted by the time
/// it is written back or removed.
pub struct VanishingStore {
    pub note: Note,
}

#[async_trait]
impl NoteStore for VanishingStore {
    async fn find_by_author(&self, _author: &str) -> Result<Vec<Note>, StoreError> {
        Ok(vec![self.note.clone()])
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Note>, StoreError> {
        Ok((id == self.note.id).then(|| self.note.clone()))
    }

    async fn create(&self, _author: &str, _note: NewNote) -> Result<Note, StoreError> {
        Err(broken())
    }

    async fn save(&self, note: &Note) -> Result<Note, StoreError> {
        Err(StoreError::Gone(note.id.clone()))
    }

    async fn remove(&self, _id: &str) -> Result<bool, StoreError> {
        Ok(false)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
