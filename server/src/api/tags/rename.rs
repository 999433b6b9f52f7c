use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::db::DbPool;
use crate::get_conn;
use crate::schema::tags;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use diesel::prelude::*;
use serde::Deserialize;
use std::sync::Arc;
use utoipa::ToSchema;

use super::list::TagItem;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct RenameTagRequest {
    pub name: String,
}

#[utoipa::path(
    patch,
    path = "/api/tags/{id}",
    tag = "tags",
    params(
        ("id" = i32, Path, description = "Tag ID")
    ),
    request_body = RenameTagRequest,
    responses(
        (status = 200, description = "Tag renamed successfully", body = TagItem),
        (status = 400, description = "Invalid request (empty name)", body = ErrorResponse),
        (status = 404, description = "Tag not found", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn rename_tag(
    AuthUser(user): AuthUser,
    State(pool): State<Arc<DbPool>>,
    Path(id): Path<i32>,
    Json(request): Json<RenameTagRequest>,
) -> impl IntoResponse {
    if request.name.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "Tag name cannot be empty".to_string(),
            }),
        )
            .into_response();
    }

    let mut conn = get_conn!(pool);

    let renamed: Result<Option<(i32, String)>, _> = diesel::update(
        tags::table
            .filter(tags::id.eq(id))
            .filter(tags::user_id.eq(user.id)),
    )
    .set(tags::name.eq(&request.name))
    .returning((tags::id, tags::name))
    .get_result(&mut conn)
    .optional();

    match renamed {
        Ok(Some((id, name))) => (StatusCode::OK, Json(TagItem { id, name })).into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: "Tag not found".to_string(),
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Failed to rename tag: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to rename tag".to_string(),
                }),
            )
                .into_response()
        }
    }
}
