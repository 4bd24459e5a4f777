/// Keyword search over notes (non-personalized)
use actix_web::{get, web, HttpResponse};
use serde::Deserialize;
use tracing::{debug, error};

use crate::error::{ErrorBody, Result};
use crate::models::Note;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub query: Option<String>,
}

/// GET /retrieve/files?query=
///
/// Notes whose title, tags or description contain the query, newest first.
/// Without a query every note is returned.
#[utoipa::path(
    get,
    path = "/retrieve/files",
    tag = "Notes",
    params(("query" = Option<String>, Query, description = "Case-insensitive substring")),
    responses(
        (status = 200, description = "Matching notes, newest first", body = [Note]),
        (status = 500, description = "Backend failure", body = ErrorBody)
    )
)]
#[get("/files")]
pub async fn search_files(
    query: web::Query<SearchQuery>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let keywords: Vec<String> = query
        .query
        .as_deref()
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .map(|q| vec![q.to_string()])
        .unwrap_or_default();

    debug!("Fetching files with search query: {:?}", keywords.first());

    let notes = state.repos.notes.search_any(&keywords).await.map_err(|e| {
        error!("Error fetching files: {}", e);
        e
    })?;

    Ok(HttpResponse::Ok().json(notes))
}
