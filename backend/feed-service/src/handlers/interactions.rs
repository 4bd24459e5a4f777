/// Interaction recording (like / view / share)
use actix_web::{post, web, HttpResponse};
use serde::Deserialize;
use utoipa::ToSchema;
use serde_json::json;
use tracing::{error, info};

use crate::error::{ErrorBody, Result};
use crate::handlers::{parse_user_id, required, required_text};
use crate::models::InteractionType;
use crate::state::AppState;

#[derive(Debug, Deserialize, ToSchema)]
pub struct InteractionRequest {
    pub user_id: Option<String>,
    pub post_id: Option<i64>,
    pub interaction_type: Option<String>,
}

/// POST /interact/interact
#[utoipa::path(
    post,
    path = "/interact/interact",
    tag = "Interactions",
    request_body = InteractionRequest,
    responses(
        (status = 200, description = "Interaction recorded"),
        (status = 400, description = "Missing fields or unknown type", body = ErrorBody),
        (status = 500, description = "Backend failure", body = ErrorBody)
    )
)]
#[post("/interact")]
pub async fn record_interaction(
    body: web::Json<InteractionRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let body = body.into_inner();
    let user_id = required_text(body.user_id, "Missing fields")?;
    let post_id = required(body.post_id, "Missing fields")?;
    let interaction_type: InteractionType =
        required_text(body.interaction_type, "Missing fields")?.parse()?;
    let user_id = parse_user_id(&user_id)?;

    state
        .repos
        .interactions
        .record(user_id, post_id, interaction_type)
        .await
        .map_err(|e| {
            error!("Interaction error: {}", e);
            e
        })?;

    info!(
        "Recorded {} on note {} by user {}",
        interaction_type, post_id, user_id
    );

    Ok(HttpResponse::Ok().json(json!({
        "message": format!("{} recorded successfully", interaction_type)
    })))
}
