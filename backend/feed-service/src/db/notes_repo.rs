/// Notes Repository
///
/// Reads and writes against the `opennotes` table. Substring filtering is done
/// by Postgres `ILIKE` so only matching rows cross the wire.
use async_trait::async_trait;
use sqlx::PgPool;

use crate::error::Result;
use crate::models::{NewTextNote, Note, NoteRow};

const NOTE_COLUMNS: &str =
    "id, name, url, title, description, tags, type, parent_post_id, created_at";

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NoteRepository: Send + Sync {
    async fn find_by_ids(&self, ids: &[i64]) -> Result<Vec<Note>>;

    /// Notes where any keyword is a case-insensitive substring of tags, title
    /// or description, newest first. An empty keyword list matches every note.
    async fn search_any(&self, keywords: &[String]) -> Result<Vec<Note>>;

    /// File notes attached to a text post, newest first
    async fn list_attachments(&self, parent_post_id: i64) -> Result<Vec<Note>>;

    async fn create_text_note(&self, note: NewTextNote) -> Result<Note>;
}

pub struct PgNoteRepository {
    pool: PgPool,
}

impl PgNoteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Build an `ILIKE` pattern that matches `keyword` literally anywhere
pub fn like_pattern(keyword: &str) -> String {
    let mut escaped = String::with_capacity(keyword.len() + 2);
    escaped.push('%');
    for c in keyword.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

fn into_notes(rows: Vec<NoteRow>) -> Result<Vec<Note>> {
    rows.into_iter().map(Note::try_from).collect()
}

#[async_trait]
impl NoteRepository for PgNoteRepository {
    async fn find_by_ids(&self, ids: &[i64]) -> Result<Vec<Note>> {
        if ids.is_empty() {
            return Ok(vec![]);
        }

        let sql = format!("SELECT {NOTE_COLUMNS} FROM opennotes WHERE id = ANY($1)");
        let rows = sqlx::query_as::<_, NoteRow>(&sql)
            .bind(ids)
            .fetch_all(&self.pool)
            .await?;

        into_notes(rows)
    }

    async fn search_any(&self, keywords: &[String]) -> Result<Vec<Note>> {
        let rows = if keywords.is_empty() {
            let sql = format!(
                "SELECT {NOTE_COLUMNS} FROM opennotes ORDER BY created_at DESC, id DESC"
            );
            sqlx::query_as::<_, NoteRow>(&sql)
                .fetch_all(&self.pool)
                .await?
        } else {
            let patterns: Vec<String> = keywords.iter().map(|k| like_pattern(k)).collect();
            let sql = format!(
                "SELECT {NOTE_COLUMNS} FROM opennotes \
                 WHERE tags ILIKE ANY($1) OR title ILIKE ANY($1) OR description ILIKE ANY($1) \
                 ORDER BY created_at DESC, id DESC"
            );
            sqlx::query_as::<_, NoteRow>(&sql)
                .bind(&patterns)
                .fetch_all(&self.pool)
                .await?
        };

        into_notes(rows)
    }

    async fn list_attachments(&self, parent_post_id: i64) -> Result<Vec<Note>> {
        let sql = format!(
            "SELECT {NOTE_COLUMNS} FROM opennotes \
             WHERE parent_post_id = $1 \
             ORDER BY created_at DESC"
        );
        let rows = sqlx::query_as::<_, NoteRow>(&sql)
            .bind(parent_post_id)
            .fetch_all(&self.pool)
            .await?;

        into_notes(rows)
    }

    async fn create_text_note(&self, note: NewTextNote) -> Result<Note> {
        let sql = format!(
            "INSERT INTO opennotes (name, url, title, tags, description, type, created_at) \
             VALUES (NULL, NULL, $1, '', $2, 'text', NOW()) \
             RETURNING {NOTE_COLUMNS}"
        );
        let row = sqlx::query_as::<_, NoteRow>(&sql)
            .bind(&note.title)
            .bind(&note.description)
            .fetch_one(&self.pool)
            .await?;

        Note::try_from(row)
    }
}
