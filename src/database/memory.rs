use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::database::models::note::{NewNote, Note};
use crate::database::store::{NoteStore, StoreError};

/// In-process note store, used when no database is configured and in tests.
#[derive(Default)]
pub struct MemoryNoteStore {
    inner: RwLock<Inner>,
}

#[derive(Default)]
struct Inner {
    next_seq: u64,
    // seq keeps listing in insertion order
    notes: HashMap<String, (u64, Note)>,
}

impl MemoryNoteStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a fully formed note as-is. Test fixtures use this to pin ids.
    pub async fn insert(&self, note: Note) {
        let mut inner = self.inner.write().await;
        let seq = inner.next_seq;
        inner.next_seq += 1;
        inner.notes.insert(note.id.clone(), (seq, note));
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.notes.len()
    }
}

#[async_trait]
impl NoteStore for MemoryNoteStore {
    async fn find_by_author(&self, author: &str) -> Result<Vec<Note>, StoreError> {
        let inner = self.inner.read().await;
        let mut found: Vec<&(u64, Note)> = inner
            .notes
            .values()
            .filter(|(_, note)| note.author == author)
            .collect();
        found.sort_by_key(|(seq, _)| *seq);
        Ok(found.into_iter().map(|(_, note)| note.clone()).collect())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Note>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.notes.get(id).map(|(_, note)| note.clone()))
    }

    async fn create(&self, author: &str, note: NewNote) -> Result<Note, StoreError> {
        let created = Note {
            id: Uuid::new_v4().to_string(),
            author: author.to_string(),
            fields: note.fields,
        };
        self.insert(created.clone()).await;
        Ok(created)
    }

    async fn save(&self, note: &Note) -> Result<Note, StoreError> {
        let mut inner = self.inner.write().await;
        match inner.notes.get_mut(&note.id) {
            Some((_, stored)) => {
                *stored = note.clone();
                Ok(note.clone())
            }
            None => Err(StoreError::Gone(note.id.clone())),
        }
    }

    async fn remove(&self, id: &str) -> Result<bool, StoreError> {
        let mut inner = self.inner.write().await;
        Ok(inner.notes.remove(id).is_some())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
