pub mod delete;
pub mod list;
pub mod rename;

#[cfg(test)]
mod tests;

use crate::AppState;
use axum::routing::{get, patch};
use axum::Router;
use utoipa::OpenApi;

/// Returns the router for the ingredient endpoints (mounted at /api/ingredients)
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list::list_ingredients))
        .route(
            "/{id}",
            patch(rename::rename_ingredient).delete(delete::delete_ingredient),
        )
}

#[derive(OpenApi)]
#[openapi(
    paths(
        list::list_ingredients,
        rename::rename_ingredient,
        delete::delete_ingredient,
    ),
    components(schemas(
        list::IngredientsListResponse,
        list::IngredientItem,
        rename::RenameIngredientRequest,
    ))
)]
pub struct ApiDoc;
