//! Per-viewer enrichment of note lists
//!
//! Attaches like/bookmark flags for the requesting user and comment/bookmark
//! counts across all users. The four lookups only depend on the id list, so
//! they run concurrently.

use std::collections::HashSet;

use tracing::debug;
use uuid::Uuid;

use crate::db::Repositories;
use crate::error::Result;
use crate::models::{FeedNote, RankedNote};

pub async fn enrich(
    repos: &Repositories,
    user_id: Uuid,
    notes: Vec<RankedNote>,
) -> Result<Vec<FeedNote>> {
    if notes.is_empty() {
        return Ok(vec![]);
    }

    let ids: Vec<i64> = notes.iter().map(|n| n.note.id).collect();

    let (liked, bookmarked, comment_counts, bookmark_counts) = tokio::try_join!(
        repos.interactions.liked_post_ids(user_id, &ids),
        repos.bookmarks.bookmarked_post_ids(user_id, &ids),
        repos.comments.count_by_note(&ids),
        repos.bookmarks.count_by_note(&ids),
    )?;

    let liked: HashSet<i64> = liked.into_iter().collect();
    let bookmarked: HashSet<i64> = bookmarked.into_iter().collect();

    debug!(
        "Enriched {} notes for user {} (liked={}, bookmarked={})",
        ids.len(),
        user_id,
        liked.len(),
        bookmarked.len()
    );

    Ok(notes
        .into_iter()
        .map(|ranked| {
            let id = ranked.note.id;
            FeedNote {
                relevance_score: ranked.relevance_score,
                is_liked: liked.contains(&id),
                is_bookmarked: bookmarked.contains(&id),
                comment_count: comment_counts.get(&id).copied().unwrap_or(0),
                bookmark_count: bookmark_counts.get(&id).copied().unwrap_or(0),
                note: ranked.note,
            }
        })
        .collect())
}
