use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::db::DbPool;
use crate::get_conn;
use crate::schema::{ingredients, recipe_ingredients};
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
pub struct ListIngredientsParams {
    /// When set to a nonzero value, only return ingredients attached to at
    /// least one recipe
    pub assigned_only: Option<i32>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct IngredientItem {
    pub id: i32,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct IngredientsListResponse {
    pub ingredients: Vec<IngredientItem>,
}

#[utoipa::path(
    get,
    path = "/api/ingredients",
    tag = "ingredients",
    params(ListIngredientsParams),
    responses(
        (status = 200, description = "Caller's ingredients in descending name order", body = IngredientsListResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_ingredients(
    AuthUser(user): AuthUser,
    State(pool): State<Arc<DbPool>>,
    Query(params): Query<ListIngredientsParams>,
) -> impl IntoResponse {
    let assigned_only = params.assigned_only.unwrap_or(0) != 0;

    let mut conn = get_conn!(pool);

    let rows: Result<Vec<(i32, String)>, _> = if assigned_only {
        ingredients::table
            .inner_join(recipe_ingredients::table)
            .filter(ingredients::user_id.eq(user.id))
            .select((ingredients::id, ingredients::name))
            .distinct()
            .order(ingredients::name.desc())
            .load(&mut conn)
    } else {
        ingredients::table
            .filter(ingredients::user_id.eq(user.id))
            .select((ingredients::id, ingredients::name))
            .order(ingredients::name.desc())
            .load(&mut conn)
    };

    match rows {
        Ok(rows) => (
            StatusCode::OK,
            Json(IngredientsListResponse {
                ingredients: rows
                    .into_iter()
                    .map(|(id, name)| IngredientItem { id, name })
                    .collect(),
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Failed to fetch ingredients: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to fetch ingredients".to_string(),
                }),
            )
                .into_response()
        }
    }
}
