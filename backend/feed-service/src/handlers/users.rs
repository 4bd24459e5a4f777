/// User registration
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use utoipa::ToSchema;
use serde_json::json;
use tracing::{error, info};

use crate::error::{ErrorBody, Result};
use crate::handlers::required_text;
use crate::models::NewUser;
use crate::state::AppState;

#[derive(Debug, Deserialize, ToSchema)]
pub struct RegisterRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub interests: Option<String>,
}

/// POST /register
#[utoipa::path(
    post,
    path = "/register",
    tag = "Users",
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "User registered"),
        (status = 400, description = "Name and email are required", body = ErrorBody),
        (status = 500, description = "Backend failure", body = ErrorBody)
    )
)]
pub async fn register(
    body: web::Json<RegisterRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let body = body.into_inner();
    let new_user = NewUser {
        name: required_text(body.name, "Name and email are required")?,
        email: required_text(body.email, "Name and email are required")?,
        interests: body.interests,
    };

    let user = state.repos.users.create(new_user).await.map_err(|e| {
        error!("Registration error: {}", e);
        e
    })?;

    info!("User {} registered", user.id);

    Ok(HttpResponse::Ok().json(json!({
        "message": "User registered successfully",
        "user": user,
    })))
}
