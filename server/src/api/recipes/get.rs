use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::db::DbPool;
use crate::get_conn;
use crate::models::Recipe;
use crate::schema::recipes;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use bigdecimal::BigDecimal;
use diesel::prelude::*;
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

use super::associations::{ingredients_for_recipes, tags_for_recipes, AttachedItem};

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RecipeDetail {
    pub id: i32,
    pub title: String,
    pub time_minutes: i32,
    #[schema(value_type = String, example = "5.25")]
    pub price: BigDecimal,
    pub description: String,
    pub link: String,
    pub tags: Vec<AttachedItem>,
    pub ingredients: Vec<AttachedItem>,
}

/// Load the full representation of a recipe owned by `user_id`.
/// Returns Ok(None) when the id does not exist or belongs to someone else,
/// so callers cannot tell the two apart.
pub(super) fn load_recipe_detail(
    conn: &mut PgConnection,
    user_id: Uuid,
    recipe_id: i32,
) -> QueryResult<Option<RecipeDetail>> {
    let recipe: Option<Recipe> = recipes::table
        .filter(recipes::id.eq(recipe_id))
        .filter(recipes::user_id.eq(user_id))
        .select(Recipe::as_select())
        .first(conn)
        .optional()?;

    let Some(recipe) = recipe else {
        return Ok(None);
    };

    let mut tags = tags_for_recipes(conn, &[recipe.id])?;
    let mut ingredients = ingredients_for_recipes(conn, &[recipe.id])?;

    Ok(Some(RecipeDetail {
        id: recipe.id,
        title: recipe.title,
        time_minutes: recipe.time_minutes,
        price: recipe.price,
        description: recipe.description,
        link: recipe.link,
        tags: tags.remove(&recipe.id).unwrap_or_default(),
        ingredients: ingredients.remove(&recipe.id).unwrap_or_default(),
    }))
}

#[utoipa::path(
    get,
    path = "/api/recipes/{id}",
    tag = "recipes",
    params(
        ("id" = i32, Path, description = "Recipe ID")
    ),
    responses(
        (status = 200, description = "Recipe details", body = RecipeDetail),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_recipe(
    AuthUser(user): AuthUser,
    State(pool): State<Arc<DbPool>>,
    Path(id): Path<i32>,
) -> impl IntoResponse {
    let mut conn = get_conn!(pool);

    match load_recipe_detail(&mut conn, user.id, id) {
        Ok(Some(detail)) => (StatusCode::OK, Json(detail)).into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: "Recipe not found".to_string(),
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Failed to fetch recipe: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to fetch recipe".to_string(),
                }),
            )
                .into_response()
        }
    }
}
