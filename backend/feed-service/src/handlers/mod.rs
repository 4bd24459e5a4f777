//! HTTP handlers
//!
//! Route layout mirrors the mobile client's expectations: each resource is
//! mounted under its own prefix (`/feed`, `/bookmark`, ...).

pub mod bookmarks;
pub mod comments;
pub mod feed;
pub mod interactions;
pub mod notes;
pub mod search;
pub mod users;

use actix_web::web;
use tracing::debug;
use uuid::Uuid;

use crate::error::{AppError, Result};

/// Register every API route on an actix `App`
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .app_data(path_config())
        .service(web::scope("/feed").service(feed::get_personalized_feed))
        .service(web::scope("/retrieve").service(search::search_files))
        .service(web::scope("/interact").service(interactions::record_interaction))
        .service(
            web::scope("/bookmark")
                .service(bookmarks::toggle_bookmark)
                .service(bookmarks::delete_bookmark)
                .service(bookmarks::list_bookmarks),
        )
        .service(
            web::scope("/comment")
                .service(comments::create_comment)
                .service(comments::list_comments),
        )
        .service(web::scope("/post").service(notes::create_text_post))
        .service(web::scope("/upload").service(notes::list_uploads_for_post))
        .service(web::resource("/register").route(web::post().to(users::register)));
}

/// Body extraction failures (no body, wrong content type, wrong field types)
/// answer with the same `{"error"}` body as handler errors
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, req| {
        debug!("Rejected JSON body on {}: {}", req.path(), err);
        AppError::BadRequest(format!("Invalid request body: {}", err)).into()
    })
}

fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(|err, req| {
        debug!("Rejected path {}: {}", req.path(), err);
        AppError::BadRequest(format!("Invalid path parameter: {}", err)).into()
    })
}

pub(crate) fn parse_user_id(raw: &str) -> Result<Uuid> {
    Uuid::parse_str(raw.trim())
        .map_err(|_| AppError::BadRequest(format!("Invalid user_id: {}", raw)))
}

/// Unwrap a required body field, rejecting absent or blank strings
pub(crate) fn required_text(value: Option<String>, message: &str) -> Result<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(AppError::BadRequest(message.to_string())),
    }
}

pub(crate) fn required<T>(value: Option<T>, message: &str) -> Result<T> {
    value.ok_or_else(|| AppError::BadRequest(message.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_user_id() {
        let id = Uuid::new_v4();
        assert_eq!(parse_user_id(&id.to_string()).unwrap(), id);
        assert!(matches!(
            parse_user_id("not-a-uuid"),
            Err(AppError::BadRequest(_))
        ));
    }

    #[test]
    fn test_required_text_rejects_blank() {
        assert!(required_text(Some("  ".into()), "Missing fields").is_err());
        assert!(required_text(None, "Missing fields").is_err());
        assert_eq!(required_text(Some("hi".into()), "x").unwrap(), "hi");
    }
}
