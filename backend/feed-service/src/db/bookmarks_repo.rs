/// Bookmarks Repository
use async_trait::async_trait;
use sqlx::PgPool;
use std::collections::HashMap;
use uuid::Uuid;

use crate::error::Result;
use crate::models::{BookmarkToggle, Note, NoteRow};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookmarkRepository: Send + Sync {
    /// Subset of `post_ids` the user has bookmarked
    async fn bookmarked_post_ids(&self, user_id: Uuid, post_ids: &[i64]) -> Result<Vec<i64>>;

    /// Bookmark count per note across all users; notes without bookmarks are absent
    async fn count_by_note(&self, post_ids: &[i64]) -> Result<HashMap<i64, i64>>;

    /// Remove the bookmark if present, add it otherwise
    async fn toggle(&self, user_id: Uuid, note_id: i64) -> Result<BookmarkToggle>;

    /// Returns whether a bookmark was removed
    async fn remove(&self, user_id: Uuid, note_id: i64) -> Result<bool>;

    /// Bookmarked notes, newest first
    async fn list_notes_for_user(&self, user_id: Uuid) -> Result<Vec<Note>>;
}

const BOOKMARKED_NOTES_SQL: &str = r#"
    SELECT n.id, n.name, n.url, n.title, n.description, n.tags, n.type,
           n.parent_post_id, n.created_at
    FROM bookmarks b
    JOIN opennotes n ON n.id = b.opennote_id
    WHERE b.user_id = $1
    ORDER BY n.created_at DESC, n.id DESC
"#;

pub struct PgBookmarkRepository {
    pool: PgPool,
}

impl PgBookmarkRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookmarkRepository for PgBookmarkRepository {
    async fn bookmarked_post_ids(&self, user_id: Uuid, post_ids: &[i64]) -> Result<Vec<i64>> {
        if post_ids.is_empty() {
            return Ok(vec![]);
        }

        let ids: Vec<i64> = sqlx::query_scalar(
            r#"
            SELECT DISTINCT opennote_id
            FROM bookmarks
            WHERE user_id = $1 AND opennote_id = ANY($2)
            "#,
        )
        .bind(user_id)
        .bind(post_ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(ids)
    }

    async fn count_by_note(&self, post_ids: &[i64]) -> Result<HashMap<i64, i64>> {
        if post_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows: Vec<(i64, i64)> = sqlx::query_as(
            r#"
            SELECT opennote_id, COUNT(*)
            FROM bookmarks
            WHERE opennote_id = ANY($1)
            GROUP BY opennote_id
            "#,
        )
        .bind(post_ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().collect())
    }

    async fn toggle(&self, user_id: Uuid, note_id: i64) -> Result<BookmarkToggle> {
        if self.remove(user_id, note_id).await? {
            return Ok(BookmarkToggle::Removed);
        }

        sqlx::query(
            r#"
            INSERT INTO bookmarks (user_id, opennote_id)
            VALUES ($1, $2)
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(user_id)
        .bind(note_id)
        .execute(&self.pool)
        .await?;

        Ok(BookmarkToggle::Added)
    }

    async fn remove(&self, user_id: Uuid, note_id: i64) -> Result<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM bookmarks
            WHERE user_id = $1 AND opennote_id = $2
            "#,
        )
        .bind(user_id)
        .bind(note_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_notes_for_user(&self, user_id: Uuid) -> Result<Vec<Note>> {
        let rows = sqlx::query_as::<_, NoteRow>(BOOKMARKED_NOTES_SQL)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(Note::try_from).collect()
    }
}
