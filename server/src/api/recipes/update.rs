use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::db::DbPool;
use crate::get_conn;
use crate::models::User;
use crate::schema::recipes;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use bigdecimal::BigDecimal;
use diesel::prelude::*;
use serde::Deserialize;
use std::sync::Arc;
use utoipa::ToSchema;

use super::associations::{replace_ingredients, replace_tags, NameRef};
use super::get::load_recipe_detail;

/// Partial update; omitted fields keep their stored value, and omitted
/// `tags`/`ingredients` leave the association set untouched.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateRecipeRequest {
    pub title: Option<String>,
    pub time_minutes: Option<i32>,
    #[schema(value_type = Option<String>, example = "5.25")]
    pub price: Option<BigDecimal>,
    pub description: Option<String>,
    pub link: Option<String>,
    pub tags: Option<Vec<NameRef>>,
    pub ingredients: Option<Vec<NameRef>>,
}

/// Full update; the core recipe fields are mandatory.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ReplaceRecipeRequest {
    pub title: String,
    pub time_minutes: i32,
    #[schema(value_type = String, example = "5.25")]
    pub price: BigDecimal,
    pub description: Option<String>,
    pub link: Option<String>,
    pub tags: Option<Vec<NameRef>>,
    pub ingredients: Option<Vec<NameRef>>,
}

#[derive(AsChangeset)]
#[diesel(table_name = recipes)]
struct RecipeChanges<'a> {
    title: Option<&'a str>,
    time_minutes: Option<i32>,
    price: Option<&'a BigDecimal>,
    description: Option<&'a str>,
    link: Option<&'a str>,
}

#[utoipa::path(
    put,
    path = "/api/recipes/{id}",
    tag = "recipes",
    params(
        ("id" = i32, Path, description = "Recipe ID")
    ),
    request_body = ReplaceRecipeRequest,
    responses(
        (status = 200, description = "Recipe updated successfully", body = super::get::RecipeDetail),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn put_recipe(
    AuthUser(user): AuthUser,
    State(pool): State<Arc<DbPool>>,
    Path(id): Path<i32>,
    Json(request): Json<ReplaceRecipeRequest>,
) -> Response {
    let update = UpdateRecipeRequest {
        title: Some(request.title),
        time_minutes: Some(request.time_minutes),
        price: Some(request.price),
        description: request.description,
        link: request.link,
        tags: request.tags,
        ingredients: request.ingredients,
    };
    apply_update(user, pool, id, update).await
}

#[utoipa::path(
    patch,
    path = "/api/recipes/{id}",
    tag = "recipes",
    params(
        ("id" = i32, Path, description = "Recipe ID")
    ),
    request_body = UpdateRecipeRequest,
    responses(
        (status = 200, description = "Recipe updated successfully", body = super::get::RecipeDetail),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn patch_recipe(
    AuthUser(user): AuthUser,
    State(pool): State<Arc<DbPool>>,
    Path(id): Path<i32>,
    Json(request): Json<UpdateRecipeRequest>,
) -> Response {
    apply_update(user, pool, id, request).await
}

async fn apply_update(
    user: User,
    pool: Arc<DbPool>,
    id: i32,
    request: UpdateRecipeRequest,
) -> Response {
    if let Some(ref title) = request.title {
        if title.trim().is_empty() {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: "Title cannot be empty".to_string(),
                }),
            )
                .into_response();
        }
    }

    let mut conn = get_conn!(pool);

    // Ownership check first; an id owned by someone else reads as missing
    let owned: Option<i32> = match recipes::table
        .filter(recipes::id.eq(id))
        .filter(recipes::user_id.eq(user.id))
        .select(recipes::id)
        .first(&mut conn)
        .optional()
    {
        Ok(row) => row,
        Err(e) => {
            tracing::error!("Failed to fetch recipe: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to fetch recipe".to_string(),
                }),
            )
                .into_response();
        }
    };

    if owned.is_none() {
        return (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: "Recipe not found".to_string(),
            }),
        )
            .into_response();
    }

    let result: Result<(), diesel::result::Error> = conn.transaction(|conn| {
        let changes = RecipeChanges {
            title: request.title.as_deref(),
            time_minutes: request.time_minutes,
            price: request.price.as_ref(),
            description: request.description.as_deref(),
            link: request.link.as_deref(),
        };

        // Diesel rejects an all-None changeset
        let has_field_changes = changes.title.is_some()
            || changes.time_minutes.is_some()
            || changes.price.is_some()
            || changes.description.is_some()
            || changes.link.is_some();

        if has_field_changes {
            diesel::update(recipes::table.find(id))
                .set(&changes)
                .execute(conn)?;
        }

        if let Some(ref tags) = request.tags {
            replace_tags(conn, id, user.id, tags)?;
        }
        if let Some(ref ingredients) = request.ingredients {
            replace_ingredients(conn, id, user.id, ingredients)?;
        }

        Ok(())
    });

    if let Err(e) = result {
        tracing::error!("Failed to update recipe: {}", e);
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: "Failed to update recipe".to_string(),
            }),
        )
            .into_response();
    }

    match load_recipe_detail(&mut conn, user.id, id) {
        Ok(Some(detail)) => (StatusCode::OK, Json(detail)).into_response(),
        _ => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: "Failed to fetch updated recipe".to_string(),
            }),
        )
            .into_response(),
    }
}
