use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::db::DbPool;
use crate::get_conn;
use crate::schema::{recipe_tags, tags};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Deserialize, IntoParams)]
pub struct ListTagsParams {
    /// When set to a nonzero value, only return tags attached to at least
    /// one recipe
    pub assigned_only: Option<i32>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TagItem {
    pub id: i32,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TagsListResponse {
    pub tags: Vec<TagItem>,
}

#[utoipa::path(
    get,
    path = "/api/tags",
    tag = "tags",
    params(ListTagsParams),
    responses(
        (status = 200, description = "Caller's tags in descending name order", body = TagsListResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_tags(
    AuthUser(user): AuthUser,
    State(pool): State<Arc<DbPool>>,
    Query(params): Query<ListTagsParams>,
) -> impl IntoResponse {
    let assigned_only = params.assigned_only.unwrap_or(0) != 0;

    let mut conn = get_conn!(pool);

    // The join multiplies rows per attached recipe; distinct collapses them
    let rows: Result<Vec<(i32, String)>, _> = if assigned_only {
        tags::table
            .inner_join(recipe_tags::table)
            .filter(tags::user_id.eq(user.id))
            .select((tags::id, tags::name))
            .distinct()
            .order(tags::name.desc())
            .load(&mut conn)
    } else {
        tags::table
            .filter(tags::user_id.eq(user.id))
            .select((tags::id, tags::name))
            .order(tags::name.desc())
            .load(&mut conn)
    };

    match rows {
        Ok(rows) => (
            StatusCode::OK,
            Json(TagsListResponse {
                tags: rows
                    .into_iter()
                    .map(|(id, name)| TagItem { id, name })
                    .collect(),
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Failed to fetch tags: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to fetch tags".to_string(),
                }),
            )
                .into_response()
        }
    }
}
