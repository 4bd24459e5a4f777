use utoipa::OpenApi;

use crate::error::ErrorBody;
use crate::handlers::{bookmarks, comments, feed, interactions, notes, search, users};
use crate::models::{FeedNote, FeedResponse, Note};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "OpenNotes Feed Service API",
        description = "Personalized feed, search, bookmarks, comments and interactions for OpenNotes."
    ),
    paths(
        feed::get_personalized_feed,
        search::search_files,
        interactions::record_interaction,
        bookmarks::toggle_bookmark,
        bookmarks::delete_bookmark,
        bookmarks::list_bookmarks,
        comments::create_comment,
        comments::list_comments,
        notes::create_text_post,
        notes::list_uploads_for_post,
        users::register
    ),
    components(schemas(
        FeedResponse,
        FeedNote,
        Note,
        ErrorBody,
        interactions::InteractionRequest,
        bookmarks::BookmarkRequest,
        comments::CommentRequest,
        notes::TextPostRequest,
        users::RegisterRequest
    )),
    tags(
        (name = "Feed", description = "Personalized note feed"),
        (name = "Notes", description = "Note search, text posts and attachments"),
        (name = "Interactions", description = "Likes, views and shares"),
        (name = "Bookmarks", description = "Saved notes"),
        (name = "Comments", description = "Note comments"),
        (name = "Users", description = "Registration")
    )
)]
pub struct ApiDoc;

/// OpenAPI document served at `/api/v1/openapi.json`
pub fn doc() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}
