use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::AppError;

/// Row shape of the `users` table
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: Uuid,
    pub name: Option<String>,
    pub email: Option<String>,
    /// Comma-separated interest tags as entered by the user
    pub interests: Option<String>,
    pub avatar_url: Option<String>,
}

/// Raw `opennotes` row. Converted into [`Note`] before anything reads it.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct NoteRow {
    pub id: i64,
    pub name: Option<String>,
    pub url: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub tags: Option<String>,
    #[sqlx(rename = "type")]
    pub note_type: Option<String>,
    pub parent_post_id: Option<i64>,
    pub created_at: DateTime<Utc>,
}

/// A text or file note, the unit of content served by the feed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Note {
    pub id: i64,
    pub name: Option<String>,
    /// Public URL of the attachment, set for file notes
    pub url: Option<String>,
    pub title: String,
    pub description: String,
    /// Comma-separated tags, empty for text posts
    pub tags: String,
    #[serde(rename = "type")]
    pub note_type: String,
    pub parent_post_id: Option<i64>,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<NoteRow> for Note {
    type Error = AppError;

    fn try_from(row: NoteRow) -> Result<Self, Self::Error> {
        let title = row
            .title
            .ok_or_else(|| AppError::Internal(format!("note {} has no title", row.id)))?;
        let description = row
            .description
            .ok_or_else(|| AppError::Internal(format!("note {} has no description", row.id)))?;

        let note_type = match row.note_type {
            Some(t) => t,
            None if row.url.is_some() => "file".to_string(),
            None => "text".to_string(),
        };

        Ok(Note {
            id: row.id,
            name: row.name,
            url: row.url,
            title,
            description,
            tags: row.tags.unwrap_or_default(),
            note_type,
            parent_post_id: row.parent_post_id,
            created_at: row.created_at,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InteractionType {
    Like,
    View,
    Share,
}

impl InteractionType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Like => "like",
            Self::View => "view",
            Self::Share => "share",
        }
    }
}

impl fmt::Display for InteractionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for InteractionType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "like" => Ok(Self::Like),
            "view" => Ok(Self::View),
            "share" => Ok(Self::Share),
            other => Err(AppError::BadRequest(format!(
                "Invalid interaction type: {}",
                other
            ))),
        }
    }
}

/// Raw `user_interactions` row
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct InteractionRow {
    pub user_id: Uuid,
    pub post_id: i64,
    pub interaction_type: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interaction {
    pub user_id: Uuid,
    pub post_id: i64,
    pub interaction_type: InteractionType,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<InteractionRow> for Interaction {
    type Error = AppError;

    fn try_from(row: InteractionRow) -> Result<Self, Self::Error> {
        // A stored row with an unknown type is corrupt data, not a bad request
        let interaction_type = row.interaction_type.parse().map_err(|_| {
            AppError::Internal(format!(
                "interaction on post {} has unknown type {:?}",
                row.post_id, row.interaction_type
            ))
        })?;

        Ok(Interaction {
            user_id: row.user_id,
            post_id: row.post_id,
            interaction_type,
            created_at: row.created_at,
        })
    }
}

/// A note placed in a ranked feed.
///
/// `relevance_score` is absent when the feed was served without a keyword set.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedNote {
    pub note: Note,
    pub relevance_score: Option<u32>,
}

/// Feed item as returned to the mobile client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct FeedNote {
    #[serde(flatten)]
    pub note: Note,
    #[serde(rename = "relevanceScore", skip_serializing_if = "Option::is_none")]
    pub relevance_score: Option<u32>,
    #[serde(rename = "isLiked")]
    pub is_liked: bool,
    #[serde(rename = "isBookmarked")]
    pub is_bookmarked: bool,
    #[serde(rename = "commentcount")]
    pub comment_count: i64,
    #[serde(rename = "bookmarkcount")]
    pub bookmark_count: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FeedResponse {
    pub feed: Vec<FeedNote>,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Comment {
    pub id: i64,
    pub user_id: Uuid,
    pub post_id: i64,
    pub comment_text: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentAuthor {
    pub id: Uuid,
    pub name: Option<String>,
    pub avatar_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentWithAuthor {
    #[serde(flatten)]
    pub comment: Comment,
    pub user: Option<CommentAuthor>,
}

/// Outcome of toggling a bookmark
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BookmarkToggle {
    Added,
    Removed,
}

/// New text note submitted through `POST /post/post`
#[derive(Debug, Clone)]
pub struct NewTextNote {
    pub title: String,
    pub description: String,
}

/// New user submitted through `POST /register`
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub interests: Option<String>,
}
