/// Bookmark endpoints
use actix_web::{delete, get, post, web, HttpResponse};
use serde::Deserialize;
use utoipa::ToSchema;
use serde_json::json;
use tracing::{debug, error};

use crate::error::{ErrorBody, Result};
use crate::handlers::{parse_user_id, required, required_text};
use crate::models::{BookmarkToggle, RankedNote};
use crate::services::enrichment::enrich;
use crate::state::AppState;

#[derive(Debug, Deserialize, ToSchema)]
pub struct BookmarkRequest {
    pub user_id: Option<String>,
    pub opennote_id: Option<i64>,
}

const MISSING_BOOKMARK_FIELDS: &str = "Missing user_id or opennote_id";

impl BookmarkRequest {
    fn validate(self) -> Result<(uuid::Uuid, i64)> {
        let user_id = required_text(self.user_id, MISSING_BOOKMARK_FIELDS)?;
        let note_id = required(self.opennote_id, MISSING_BOOKMARK_FIELDS)?;
        Ok((parse_user_id(&user_id)?, note_id))
    }
}

/// POST /bookmark/bookmark
///
/// Toggles the bookmark: removes it when present, adds it otherwise.
#[utoipa::path(
    post,
    path = "/bookmark/bookmark",
    tag = "Bookmarks",
    request_body = BookmarkRequest,
    responses(
        (status = 200, description = "Bookmark added or removed"),
        (status = 400, description = "Missing user_id or opennote_id", body = ErrorBody),
        (status = 500, description = "Backend failure", body = ErrorBody)
    )
)]
#[post("/bookmark")]
pub async fn toggle_bookmark(
    body: web::Json<BookmarkRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let (user_id, note_id) = body.into_inner().validate()?;

    let outcome = state
        .repos
        .bookmarks
        .toggle(user_id, note_id)
        .await
        .map_err(|e| {
            error!("Bookmark toggle error: {}", e);
            e
        })?;

    let message = match outcome {
        BookmarkToggle::Added => "Post bookmarked successfully",
        BookmarkToggle::Removed => "Bookmark removed successfully",
    };

    Ok(HttpResponse::Ok().json(json!({ "message": message, "status": outcome })))
}

/// DELETE /bookmark/bookmark
#[utoipa::path(
    delete,
    path = "/bookmark/bookmark",
    tag = "Bookmarks",
    request_body = BookmarkRequest,
    responses(
        (status = 200, description = "Bookmark removed"),
        (status = 400, description = "Missing user_id or opennote_id", body = ErrorBody),
        (status = 500, description = "Backend failure", body = ErrorBody)
    )
)]
#[delete("/bookmark")]
pub async fn delete_bookmark(
    body: web::Json<BookmarkRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let (user_id, note_id) = body.into_inner().validate()?;

    let removed = state.repos.bookmarks.remove(user_id, note_id).await.map_err(|e| {
        error!("Delete bookmark error: {}", e);
        e
    })?;
    debug!(
        "Bookmark delete user={} note={} removed={}",
        user_id, note_id, removed
    );

    Ok(HttpResponse::Ok().json(json!({ "message": "Bookmark removed successfully" })))
}

/// GET /bookmark/bookmark/{user_id}
///
/// Bookmarked notes with the same per-viewer enrichment as the feed.
#[utoipa::path(
    get,
    path = "/bookmark/bookmark/{user_id}",
    tag = "Bookmarks",
    params(("user_id" = String, Path, description = "User id (uuid)")),
    responses(
        (status = 200, description = "Bookmarked notes, newest first"),
        (status = 400, description = "Malformed user id", body = ErrorBody),
        (status = 500, description = "Backend failure", body = ErrorBody)
    )
)]
#[get("/bookmark/{user_id}")]
pub async fn list_bookmarks(
    path: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let user_id = parse_user_id(&path)?;

    let notes = state
        .repos
        .bookmarks
        .list_notes_for_user(user_id)
        .await
        .map_err(|e| {
            error!("Fetch bookmarks error: {}", e);
            e
        })?;

    let ranked = notes
        .into_iter()
        .map(|note| RankedNote {
            note,
            relevance_score: None,
        })
        .collect();
    let bookmarks = enrich(&state.repos, user_id, ranked).await?;

    Ok(HttpResponse::Ok().json(json!({ "bookmarks": bookmarks })))
}
