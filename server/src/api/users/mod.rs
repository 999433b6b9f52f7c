pub mod create;
pub mod me;
pub mod token;


use crate::AppState;
use axum::routing::{get, post};
use axum::Router;
use utoipa::OpenApi;

/// Returns the router for the public user endpoints (no auth required)
pub fn public_router() -> Router<AppState> {
    Router::new()
        .route("/api/user/create", post(create::create_user))
        .route("/api/user/token", post(token::create_token))
}

/// Returns the router for the authenticated user endpoints (mounted at /api/user)
pub fn router() -> Router<AppState> {
    Router::new().route("/me", get(me::get_me).patch(me::update_me))
}

#[derive(OpenApi)]
#[openapi(
    paths(create::create_user, token::create_token, me::get_me, me::update_me),
    components(schemas(
        create::CreateUserRequest,
        create::UserResponse,
        token::TokenRequest,
        token::TokenResponse,
        me::UpdateMeRequest,
    ))
)]
pub struct ApiDoc;
