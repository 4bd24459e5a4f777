/// Comments Repository
use async_trait::async_trait;
use sqlx::PgPool;
use std::collections::HashMap;
use uuid::Uuid;

use crate::error::Result;
use crate::models::{Comment, CommentAuthor, CommentWithAuthor};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Comment count per note; notes without comments are absent
    async fn count_by_note(&self, post_ids: &[i64]) -> Result<HashMap<i64, i64>>;

    async fn create(&self, user_id: Uuid, post_id: i64, comment_text: String) -> Result<Comment>;

    /// Comments on a note with their author, newest first
    async fn list_for_note(&self, post_id: i64) -> Result<Vec<CommentWithAuthor>>;
}

pub struct PgCommentRepository {
    pool: PgPool,
}

impl PgCommentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct CommentAuthorRow {
    id: i64,
    user_id: Uuid,
    post_id: i64,
    comment_text: String,
    created_at: chrono::DateTime<chrono::Utc>,
    author_id: Option<Uuid>,
    author_name: Option<String>,
    author_avatar_url: Option<String>,
}

impl From<CommentAuthorRow> for CommentWithAuthor {
    fn from(row: CommentAuthorRow) -> Self {
        let user = row.author_id.map(|id| CommentAuthor {
            id,
            name: row.author_name,
            avatar_url: row.author_avatar_url,
        });

        CommentWithAuthor {
            comment: Comment {
                id: row.id,
                user_id: row.user_id,
                post_id: row.post_id,
                comment_text: row.comment_text,
                created_at: row.created_at,
            },
            user,
        }
    }
}

#[async_trait]
impl CommentRepository for PgCommentRepository {
    async fn count_by_note(&self, post_ids: &[i64]) -> Result<HashMap<i64, i64>> {
        if post_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows: Vec<(i64, i64)> = sqlx::query_as(
            r#"
            SELECT post_id, COUNT(*)
            FROM comments
            WHERE post_id = ANY($1)
            GROUP BY post_id
            "#,
        )
        .bind(post_ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().collect())
    }

    async fn create(&self, user_id: Uuid, post_id: i64, comment_text: String) -> Result<Comment> {
        let comment = sqlx::query_as::<_, Comment>(
            r#"
            INSERT INTO comments (user_id, post_id, comment_text)
            VALUES ($1, $2, $3)
            RETURNING id, user_id, post_id, comment_text, created_at
            "#,
        )
        .bind(user_id)
        .bind(post_id)
        .bind(&comment_text)
        .fetch_one(&self.pool)
        .await?;

        Ok(comment)
    }

    async fn list_for_note(&self, post_id: i64) -> Result<Vec<CommentWithAuthor>> {
        let rows = sqlx::query_as::<_, CommentAuthorRow>(
            r#"
            SELECT c.id, c.user_id, c.post_id, c.comment_text, c.created_at,
                   u.id AS author_id, u.name AS author_name, u.avatar_url AS author_avatar_url
            FROM comments c
            LEFT JOIN users u ON u.id = c.user_id
            WHERE c.post_id = $1
            ORDER BY c.created_at DESC
            "#,
        )
        .bind(post_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(CommentWithAuthor::from).collect())
    }
}
