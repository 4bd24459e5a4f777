//! Typed repositories over the managed Postgres backend.
//!
//! Each collaborator table sits behind its own trait so handlers and the
//! ranking service can be exercised against fakes or mocks.

pub mod bookmarks_repo;
pub mod comments_repo;
pub mod interactions_repo;
pub mod notes_repo;
pub mod users_repo;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use crate::config::DatabaseConfig;
use crate::error::Result;

pub use bookmarks_repo::{BookmarkRepository, PgBookmarkRepository};
pub use comments_repo::{CommentRepository, PgCommentRepository};
pub use interactions_repo::{InteractionRepository, PgInteractionRepository};
pub use notes_repo::{NoteRepository, PgNoteRepository};
pub use users_repo::{PgUserRepository, UserRepository};

/// Handles to every collaborator store, shared by all workers
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub interactions: Arc<dyn InteractionRepository>,
    pub notes: Arc<dyn NoteRepository>,
    pub bookmarks: Arc<dyn BookmarkRepository>,
    pub comments: Arc<dyn CommentRepository>,
}

impl Repositories {
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            users: Arc::new(PgUserRepository::new(pool.clone())),
            interactions: Arc::new(PgInteractionRepository::new(pool.clone())),
            notes: Arc::new(PgNoteRepository::new(pool.clone())),
            bookmarks: Arc::new(PgBookmarkRepository::new(pool.clone())),
            comments: Arc::new(PgCommentRepository::new(pool)),
        }
    }
}

pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
        .connect(&config.url)
        .await?;

    info!(
        max_connections = config.max_connections,
        "Database pool created"
    );
    Ok(pool)
}
