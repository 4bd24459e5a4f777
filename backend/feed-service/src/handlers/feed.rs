/// Personalized feed endpoint
use actix_web::{get, web, HttpResponse};
use tracing::{debug, error};

use crate::error::{ErrorBody, Result};
use crate::handlers::parse_user_id;
use crate::models::FeedResponse;
use crate::state::AppState;

/// GET /feed/personalizedfeed/{user_id}
///
/// Notes ranked by keyword overlap with the user's interests and history,
/// most relevant first, ties broken by recency.
#[utoipa::path(
    get,
    path = "/feed/personalizedfeed/{user_id}",
    tag = "Feed",
    params(("user_id" = String, Path, description = "User id (uuid)")),
    responses(
        (status = 200, description = "Ranked feed", body = FeedResponse),
        (status = 400, description = "Malformed user id", body = ErrorBody),
        (status = 404, description = "Unknown user", body = ErrorBody),
        (status = 500, description = "Backend failure", body = ErrorBody)
    )
)]
#[get("/personalizedfeed/{user_id}")]
pub async fn get_personalized_feed(
    path: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let user_id = parse_user_id(&path)?;
    debug!("Personalized feed request: user={}", user_id);

    let feed = state.feed.build_feed(user_id).await.map_err(|e| {
        error!("Personalized feed failed for user {}: {}", user_id, e);
        e
    })?;

    Ok(HttpResponse::Ok().json(FeedResponse { feed }))
}
