//! Owner-scoped note persistence.
//!
//! Every statement that touches an existing note filters on both the note id
//! and the owner id, so a foreign note is indistinguishable from a missing one.

use crate::repositories::user_repository::timestamp;
use crate::{DbError, Result as DbErrorResult};

use notes_core::Note;

use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

const NOTE_COLUMNS: &str = "id, user_id, title, description, created_at, updated_at";

#[derive(Clone)]
pub struct NoteRepository {
    pool: SqlitePool,
}

impl NoteRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, note: &Note) -> DbErrorResult<()> {
        sqlx::query(
            r#"
                INSERT INTO notes (id, user_id, title, description, created_at, updated_at)
                VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(note.id.to_string())
        .bind(note.user_id.to_string())
        .bind(&note.title)
        .bind(&note.description)
        .bind(note.created_at.timestamp_millis())
        .bind(note.updated_at.timestamp_millis())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// All notes owned by `user_id`, newest first
    pub async fn list_for_user(&self, user_id: Uuid) -> DbErrorResult<Vec<Note>> {
        let rows = sqlx::query(&format!(
            "SELECT {NOTE_COLUMNS} FROM notes WHERE user_id = ? \
             ORDER BY created_at DESC, rowid DESC"
        ))
        .bind(user_id.to_string())
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(Self::from_row).collect()
    }

    pub async fn find_for_user(&self, id: Uuid, user_id: Uuid) -> DbErrorResult<Option<Note>> {
        let row = sqlx::query(&format!(
            "SELECT {NOTE_COLUMNS} FROM notes WHERE id = ? AND user_id = ?"
        ))
        .bind(id.to_string())
        .bind(user_id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(Self::from_row).transpose()
    }

    /// Persist title/description/updated_at. Returns false when the note does
    /// not exist for this owner.
    pub async fn update_for_user(&self, note: &Note) -> DbErrorResult<bool> {
        let result = sqlx::query(
            r#"
                UPDATE notes
                SET title = ?, description = ?, updated_at = ?
                WHERE id = ? AND user_id = ?
            "#,
        )
        .bind(&note.title)
        .bind(&note.description)
        .bind(note.updated_at.timestamp_millis())
        .bind(note.id.to_string())
        .bind(note.user_id.to_string())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Returns false when the note does not exist for this owner.
    pub async fn delete_for_user(&self, id: Uuid, user_id: Uuid) -> DbErrorResult<bool> {
        let result = sqlx::query("DELETE FROM notes WHERE id = ? AND user_id = ?")
            .bind(id.to_string())
            .bind(user_id.to_string())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    fn from_row(row: &SqliteRow) -> DbErrorResult<Note> {
        let id: String = row.try_get("id")?;
        let user_id: String = row.try_get("user_id")?;
        let created_at: i64 = row.try_get("created_at")?;
        let updated_at: i64 = row.try_get("updated_at")?;

        Ok(Note {
            id: Uuid::parse_str(&id)
                .map_err(|e| DbError::decode(format!("Invalid UUID in notes.id: {}", e)))?,
            user_id: Uuid::parse_str(&user_id)
                .map_err(|e| DbError::decode(format!("Invalid UUID in notes.user_id: {}", e)))?,
            title: row.try_get("title")?,
            description: row.try_get("description")?,
            created_at: timestamp(created_at, "notes.created_at")?,
            updated_at: timestamp(updated_at, "notes.updated_at")?,
        })
    }
}
