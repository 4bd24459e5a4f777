/// Users Repository
///
/// Directory lookups used by the feed and user registration
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::Result;
use crate::models::{NewUser, User};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Look up a single user; `None` when no row exists
    async fn find_by_id(&self, user_id: Uuid) -> Result<Option<User>>;

    async fn create(&self, user: NewUser) -> Result<User>;
}

pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_by_id(&self, user_id: Uuid) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, interests, avatar_url
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn create(&self, user: NewUser) -> Result<User> {
        let created = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, email, interests)
            VALUES ($1, $2, $3)
            RETURNING id, name, email, interests, avatar_url
            "#,
        )
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.interests)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }
}
