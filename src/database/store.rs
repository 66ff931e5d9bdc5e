use async_trait::async_trait;
use thiserror::Error;

use crate::database::models::note::{NewNote, Note};

/// Errors raised by a note store backend
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Missing configuration: {0}")]
    ConfigMissing(&'static str),

    #[error("Invalid database URL")]
    InvalidDatabaseUrl,

    /// The document vanished between lookup and write.
    #[error("Note {0} no longer exists")]
    Gone(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Single-document operations the note controller relies on.
///
/// Absence is reported as `Ok(None)` / `Ok(false)`, never as an error.
#[async_trait]
pub trait NoteStore: Send + Sync {
    /// All notes written by `author`, oldest first.
    async fn find_by_author(&self, author: &str) -> Result<Vec<Note>, StoreError>;

    async fn find_by_id(&self, id: &str) -> Result<Option<Note>, StoreError>;

    /// Insert a note and return it with its store-assigned id.
    async fn create(&self, author: &str, note: NewNote) -> Result<Note, StoreError>;

    /// Persist the full document, replacing what is stored under `note.id`.
    async fn save(&self, note: &Note) -> Result<Note, StoreError>;

    /// Returns false when nothing was stored under `id`.
    async fn remove(&self, id: &str) -> Result<bool, StoreError>;

    /// Cheap liveness probe used by the health endpoint.
    async fn ping(&self) -> Result<(), StoreError>;
}
