pub mod ping;
pub mod unauthed_ping;

use crate::AppState;
use axum::routing::get;
use axum::Router;
use utoipa::OpenApi;

/// Returns the router for the public test endpoints (no auth required)
pub fn public_router() -> Router<AppState> {
    Router::new().route(unauthed_ping::PATH, get(unauthed_ping::handler))
}

/// Returns the router for /api/test endpoints (mounted at /api/test)
pub fn router() -> Router<AppState> {
    Router::new().route("/ping", get(ping::ping))
}

#[derive(OpenApi)]
#[openapi(
    paths(ping::ping, unauthed_ping::handler),
    components(schemas(ping::PingResponse, unauthed_ping::Response))
)]
pub struct ApiDoc;
