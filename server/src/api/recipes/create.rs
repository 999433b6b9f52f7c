use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::db::DbPool;
use crate::get_conn;
use crate::models::NewRecipe;
use crate::schema::recipes;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use bigdecimal::BigDecimal;
use diesel::prelude::*;
use serde::Deserialize;
use std::sync::Arc;
use utoipa::ToSchema;

use super::associations::{replace_ingredients, replace_tags, NameRef};
use super::get::load_recipe_detail;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateRecipeRequest {
    pub title: String,
    pub time_minutes: i32,
    #[schema(value_type = String, example = "5.25")]
    pub price: BigDecimal,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub link: String,
    pub tags: Option<Vec<NameRef>>,
    pub ingredients: Option<Vec<NameRef>>,
}

#[utoipa::path(
    post,
    path = "/api/recipes",
    tag = "recipes",
    request_body = CreateRecipeRequest,
    responses(
        (status = 201, description = "Recipe created successfully", body = super::get::RecipeDetail),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn create_recipe(
    AuthUser(user): AuthUser,
    State(pool): State<Arc<DbPool>>,
    Json(request): Json<CreateRecipeRequest>,
) -> impl IntoResponse {
    if request.title.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "Title cannot be empty".to_string(),
            }),
        )
            .into_response();
    }

    let mut conn = get_conn!(pool);

    // Recipe row and its association set are written atomically
    let result: Result<i32, diesel::result::Error> = conn.transaction(|conn| {
        let new_recipe = NewRecipe {
            user_id: user.id,
            title: &request.title,
            time_minutes: request.time_minutes,
            price: &request.price,
            description: &request.description,
            link: &request.link,
        };

        let recipe_id: i32 = diesel::insert_into(recipes::table)
            .values(&new_recipe)
            .returning(recipes::id)
            .get_result(conn)?;

        if let Some(ref tags) = request.tags {
            replace_tags(conn, recipe_id, user.id, tags)?;
        }
        if let Some(ref ingredients) = request.ingredients {
            replace_ingredients(conn, recipe_id, user.id, ingredients)?;
        }

        Ok(recipe_id)
    });

    let recipe_id = match result {
        Ok(id) => id,
        Err(e) => {
            tracing::error!("Failed to create recipe: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to create recipe".to_string(),
                }),
            )
                .into_response();
        }
    };

    match load_recipe_detail(&mut conn, user.id, recipe_id) {
        Ok(Some(detail)) => (StatusCode::CREATED, Json(detail)).into_response(),
        _ => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: "Failed to fetch created recipe".to_string(),
            }),
        )
            .into_response(),
    }
}
