use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::db::DbPool;
use crate::get_conn;
use crate::schema::ingredients;
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

use super::list::IngredientItem;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct RenameIngredientRequest {
    pub name: String,
}

#[utoipa::path(
    patch,
    path = "/api/ingredients/{id}",
    tag = "ingredients",
    params(
        ("id" = i32, Path, description = "Ingredient ID")
    ),
    request_body = RenameIngredientRequest,
    responses(
        (status = 200, description = "Ingredient renamed successfully", body = IngredientItem),
        (status = 400, description = "Invalid request (empty name)", body = ErrorResponse),
        (status = 404, description = "Ingredient not found", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn rename_ingredient(
    AuthUser(user): AuthUser,
    State(pool): State<Arc<DbPool>>,
    Path(id): Path<i32>,
    Json(request): Json<RenameIngredientRequest>,
) -> impl IntoResponse {
    if request.name.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "Ingredient name cannot be empty".to_string(),
            }),
        )
            .into_response();
    }

    let mut conn = get_conn!(pool);

    let renamed: Result<Option<(i32, String)>, _> = diesel::update(
        ingredients::table
            .filter(ingredients::id.eq(id))
            .filter(ingredients::user_id.eq(user.id)),
    )
    .set(ingredients::name.eq(&request.name))
    .returning((ingredients::id, ingredients::name))
    .get_result(&mut conn)
    .optional();

    match renamed {
        Ok(Some((id, name))) => {
            (StatusCode::OK, Json(IngredientItem { id, name })).into_response()
        }
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: "Ingredient not found".to_string(),
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Failed to rename ingredient: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to rename ingredient".to_string(),
                }),
            )
                .into_response()
        }
    }
}
