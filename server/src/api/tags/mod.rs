pub mod delete;
pub mod list;
pub mod rename;


use crate::AppState;
use axum::routing::{get, patch};
use axum::Router;
use utoipa::OpenApi;

/// Returns the router for the tag endpoints (mounted at /api/tags)
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list::list_tags))
        .route("/{id}", patch(rename::rename_tag).delete(delete::delete_tag))
}

#[derive(OpenApi)]
#[openapi(
    paths(list::list_tags, rename::rename_tag, delete::delete_tag),
    components(schemas(
        list::TagsListResponse,
        list::TagItem,
        rename::RenameTagRequest,
    ))
)]
pub struct ApiDoc;
