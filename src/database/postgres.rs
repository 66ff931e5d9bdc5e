use async_trait::async_trait;
use serde_json::{Map, Value};
use sqlx::{types::Json, FromRow, PgPool};
use uuid::Uuid;

use crate::database::models::note::{NewNote, Note};
use crate::database::store::{NoteStore, StoreError};

/// Note documents kept in a single Postgres table, free-form fields in JSONB.
#[derive(Clone)]
pub struct PgNoteStore {
    pool: PgPool,
}

#[derive(Debug, FromRow)]
struct NoteRow {
    id: String,
    author: String,
    fields: Json<Map<String, Value>>,
}

impl From<NoteRow> for Note {
    fn from(row: NoteRow) -> Self {
        Note {
            id: row.id,
            author: row.author,
            fields: row.fields.0,
        }
    }
}

impl PgNoteStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NoteStore for PgNoteStore {
    async fn find_by_author(&self, author: &str) -> Result<Vec<Note>, StoreError> {
        let rows = sqlx::query_as::<_, NoteRow>(
            "SELECT id, author, fields FROM notes WHERE author = $1 ORDER BY created_at, id",
        )
        .bind(author)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Note::from).collect())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Note>, StoreError> {
        let row = sqlx::query_as::<_, NoteRow>("SELECT id, author, fields FROM notes WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Note::from))
    }

    async fn create(&self, author: &str, note: NewNote) -> Result<Note, StoreError> {
        let row = sqlx::query_as::<_, NoteRow>(
            "INSERT INTO notes (id, author, fields) VALUES ($1, $2, $3) RETURNING id, author, fields",
        )
        .bind(Uuid::new_v4().to_string())
        .bind(author)
        .bind(Json(&note.fields))
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!("Inserted note {} for {}", row.id, row.author);
        Ok(row.into())
    }

    async fn save(&self, note: &Note) -> Result<Note, StoreError> {
        let row = sqlx::query_as::<_, NoteRow>(
            r#"
            UPDATE notes
            SET author = $2, fields = $3, updated_at = now()
            WHERE id = $1
            RETURNING id, author, fields
            "#,
        )
        .bind(&note.id)
        .bind(&note.author)
        .bind(Json(&note.fields))
        .fetch_optional(&self.pool)
        .await?;

        row.map(Note::from)
            .ok_or_else(|| StoreError::Gone(note.id.clone()))
    }

    async fn remove(&self, id: &str) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM notes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
