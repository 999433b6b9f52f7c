use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::db::DbPool;
use crate::get_conn;
use crate::models::Recipe;
use crate::schema::recipes;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use bigdecimal::BigDecimal;
use diesel::prelude::*;
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

use super::associations::{ingredients_for_recipes, tags_for_recipes, AttachedItem};

/// List representation; the description is only exposed on the detail view.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RecipeSummary {
    pub id: i32,
    pub title: String,
    pub time_minutes: i32,
    #[schema(value_type = String, example = "5.25")]
    pub price: BigDecimal,
    pub link: String,
    pub tags: Vec<AttachedItem>,
    pub ingredients: Vec<AttachedItem>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ListRecipesResponse {
    pub recipes: Vec<RecipeSummary>,
}

#[utoipa::path(
    get,
    path = "/api/recipes",
    tag = "recipes",
    responses(
        (status = 200, description = "Caller's recipes, newest first", body = ListRecipesResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_recipes(
    AuthUser(user): AuthUser,
    State(pool): State<Arc<DbPool>>,
) -> impl IntoResponse {
    let mut conn = get_conn!(pool);

    let rows: Vec<Recipe> = match recipes::table
        .filter(recipes::user_id.eq(user.id))
        .order(recipes::id.desc())
        .select(Recipe::as_select())
        .load(&mut conn)
    {
        Ok(r) => r,
        Err(e) => {
            tracing::error!("Failed to fetch recipes: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to fetch recipes".to_string(),
                }),
            )
                .into_response();
        }
    };

    let ids: Vec<i32> = rows.iter().map(|r| r.id).collect();

    let mut tags = match tags_for_recipes(&mut conn, &ids) {
        Ok(map) => map,
        Err(e) => {
            tracing::error!("Failed to fetch recipe tags: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to fetch recipes".to_string(),
                }),
            )
                .into_response();
        }
    };
    let mut ingredients = match ingredients_for_recipes(&mut conn, &ids) {
        Ok(map) => map,
        Err(e) => {
            tracing::error!("Failed to fetch recipe ingredients: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to fetch recipes".to_string(),
                }),
            )
                .into_response();
        }
    };

    let recipes = rows
        .into_iter()
        .map(|r| RecipeSummary {
            id: r.id,
            title: r.title,
            time_minutes: r.time_minutes,
            price: r.price,
            link: r.link,
            tags: tags.remove(&r.id).unwrap_or_default(),
            ingredients: ingredients.remove(&r.id).unwrap_or_default(),
        })
        .collect();

    (StatusCode::OK, Json(ListRecipesResponse { recipes })).into_response()
}
