/// Text posts and attachment listing
use actix_web::{get, post, web, HttpResponse};
use serde::Deserialize;
use utoipa::ToSchema;
use serde_json::json;
use tracing::{error, info};

use crate::error::{ErrorBody, Result};
use crate::handlers::required_text;
use crate::models::NewTextNote;
use crate::state::AppState;

#[derive(Debug, Deserialize, ToSchema)]
pub struct TextPostRequest {
    pub title: Option<String>,
    pub description: Option<String>,
}

/// POST /post/post
#[utoipa::path(
    post,
    path = "/post/post",
    tag = "Notes",
    request_body = TextPostRequest,
    responses(
        (status = 200, description = "Text note created"),
        (status = 400, description = "Missing fields", body = ErrorBody),
        (status = 500, description = "Backend failure", body = ErrorBody)
    )
)]
#[post("/post")]
pub async fn create_text_post(
    body: web::Json<TextPostRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let body = body.into_inner();
    let note = NewTextNote {
        title: required_text(body.title, "Missing fields")?,
        description: required_text(body.description, "Missing fields")?,
    };

    let created = state
        .repos
        .notes
        .create_text_note(note)
        .await
        .map_err(|e| {
            error!("Post error: {}", e);
            e
        })?;

    info!("Text note {} created", created.id);

    Ok(HttpResponse::Ok().json(json!({ "message": "Text post created successfully" })))
}

/// GET /upload/uploads-for-post/{post_id}
#[utoipa::path(
    get,
    path = "/upload/uploads-for-post/{post_id}",
    tag = "Notes",
    params(("post_id" = i64, Path, description = "Parent text note id")),
    responses(
        (status = 200, description = "Attached file notes, newest first"),
        (status = 400, description = "Non-numeric note id", body = ErrorBody),
        (status = 500, description = "Backend failure", body = ErrorBody)
    )
)]
#[get("/uploads-for-post/{post_id}")]
pub async fn list_uploads_for_post(
    path: web::Path<i64>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let uploads = state
        .repos
        .notes
        .list_attachments(path.into_inner())
        .await
        .map_err(|e| {
            error!("List uploads for post error: {}", e);
            e
        })?;

    Ok(HttpResponse::Ok().json(json!({ "uploads": uploads })))
}
