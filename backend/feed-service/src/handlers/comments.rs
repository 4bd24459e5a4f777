/// Comment endpoints
use actix_web::{get, post, web, HttpResponse};
use serde::Deserialize;
use utoipa::ToSchema;
use serde_json::json;
use tracing::{error, info};

use crate::error::{ErrorBody, Result};
use crate::handlers::{parse_user_id, required, required_text};
use crate::state::AppState;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CommentRequest {
    pub user_id: Option<String>,
    pub post_id: Option<i64>,
    pub comment_text: Option<String>,
}

const MISSING_COMMENT_FIELDS: &str = "Missing required fields";

/// POST /comment/comment
#[utoipa::path(
    post,
    path = "/comment/comment",
    tag = "Comments",
    request_body = CommentRequest,
    responses(
        (status = 200, description = "Comment posted"),
        (status = 400, description = "Missing required fields", body = ErrorBody),
        (status = 500, description = "Backend failure", body = ErrorBody)
    )
)]
#[post("/comment")]
pub async fn create_comment(
    body: web::Json<CommentRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let body = body.into_inner();
    let user_id = parse_user_id(&required_text(body.user_id, MISSING_COMMENT_FIELDS)?)?;
    let post_id = required(body.post_id, MISSING_COMMENT_FIELDS)?;
    let text = required_text(body.comment_text, MISSING_COMMENT_FIELDS)?;

    let comment = state
        .repos
        .comments
        .create(user_id, post_id, text)
        .await
        .map_err(|e| {
            error!("Comment error: {}", e);
            e
        })?;

    info!("Comment {} posted on note {}", comment.id, post_id);

    Ok(HttpResponse::Ok().json(json!({
        "message": "Comment posted successfully",
        "data": [comment],
    })))
}

/// GET /comment/comment/{post_id}
#[utoipa::path(
    get,
    path = "/comment/comment/{post_id}",
    tag = "Comments",
    params(("post_id" = i64, Path, description = "Note id")),
    responses(
        (status = 200, description = "Comments with authors, newest first"),
        (status = 400, description = "Non-numeric note id", body = ErrorBody),
        (status = 500, description = "Backend failure", body = ErrorBody)
    )
)]
#[get("/comment/{post_id}")]
pub async fn list_comments(
    path: web::Path<i64>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let post_id = path.into_inner();

    let comments = state
        .repos
        .comments
        .list_for_note(post_id)
        .await
        .map_err(|e| {
            error!("Fetch comments error: {}", e);
            e
        })?;

    Ok(HttpResponse::Ok().json(json!({ "comments": comments })))
}
