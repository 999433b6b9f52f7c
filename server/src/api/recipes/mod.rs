pub mod associations;
pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

#[cfg(test)]
mod tests;

use crate::AppState;
use axum::routing::get;
use axum::Router;
use utoipa::OpenApi;

/// Returns the router for the recipe endpoints (mounted at /api/recipes)
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list::list_recipes).post(create::create_recipe))
        .route(
            "/{id}",
            get(get::get_recipe)
                .put(update::put_recipe)
                .patch(update::patch_recipe)
                .delete(delete::delete_recipe),
        )
}

#[derive(OpenApi)]
#[openapi(
    paths(
        list::list_recipes,
        create::create_recipe,
        get::get_recipe,
        update::put_recipe,
        update::patch_recipe,
        delete::delete_recipe,
    ),
    components(schemas(
        associations::NameRef,
        associations::AttachedItem,
        create::CreateRecipeRequest,
        list::ListRecipesResponse,
        list::RecipeSummary,
        get::RecipeDetail,
        update::ReplaceRecipeRequest,
        update::UpdateRecipeRequest,
    ))
)]
pub struct ApiDoc;
