/// Interactions Repository
///
/// Append-only log of likes, views and shares
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::Result;
use crate::models::{Interaction, InteractionRow, InteractionType};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InteractionRepository: Send + Sync {
    /// Most recent interactions of a user, newest first, at most `limit` rows
    async fn recent_for_user(&self, user_id: Uuid, limit: i64) -> Result<Vec<Interaction>>;

    /// Subset of `post_ids` the user has liked
    async fn liked_post_ids(&self, user_id: Uuid, post_ids: &[i64]) -> Result<Vec<i64>>;

    async fn record(
        &self,
        user_id: Uuid,
        post_id: i64,
        interaction_type: InteractionType,
    ) -> Result<()>;
}

pub struct PgInteractionRepository {
    pool: PgPool,
}

impl PgInteractionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl InteractionRepository for PgInteractionRepository {
    async fn recent_for_user(&self, user_id: Uuid, limit: i64) -> Result<Vec<Interaction>> {
        let rows = sqlx::query_as::<_, InteractionRow>(
            r#"
            SELECT user_id, post_id, interaction_type, created_at
            FROM user_interactions
            WHERE user_id = $1
            ORDER BY created_at DESC
            LIMIT $2
            "#,
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Interaction::try_from).collect()
    }

    async fn liked_post_ids(&self, user_id: Uuid, post_ids: &[i64]) -> Result<Vec<i64>> {
        if post_ids.is_empty() {
            return Ok(vec![]);
        }

        let liked: Vec<i64> = sqlx::query_scalar(
            r#"
            SELECT DISTINCT post_id
            FROM user_interactions
            WHERE user_id = $1
              AND interaction_type = 'like'
              AND post_id = ANY($2)
            "#,
        )
        .bind(user_id)
        .bind(post_ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(liked)
    }

    async fn record(
        &self,
        user_id: Uuid,
        post_id: i64,
        interaction_type: InteractionType,
    ) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO user_interactions (user_id, post_id, interaction_type)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(user_id)
        .bind(post_id)
        .bind(interaction_type.as_str())
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
