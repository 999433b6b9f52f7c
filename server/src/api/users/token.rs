use crate::api::ErrorResponse;
use crate::auth::{create_session, verify_password};
use crate::db::DbPool;
use crate::get_conn;
use crate::models::User;
use crate::schema::users;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct TokenRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TokenResponse {
    pub token: String,
}

// Every failure path returns the same status and body so callers cannot
// distinguish an unknown email from a wrong password.
fn bad_credentials() -> axum::response::Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: "Unable to authenticate with provided credentials".to_string(),
        }),
    )
        .into_response()
}

#[utoipa::path(
    post,
    path = "/api/user/token",
    tag = "user",
    request_body(content = TokenRequest, example = json!({"email": "user@example.com", "password": "password"})),
    responses(
        (status = 200, description = "Token issued", body = TokenResponse),
        (status = 400, description = "Bad or blank credentials", body = ErrorResponse)
    )
)]
pub async fn create_token(
    State(pool): State<Arc<DbPool>>,
    Json(request): Json<TokenRequest>,
) -> impl IntoResponse {
    if request.email.is_empty() || request.password.is_empty() {
        return bad_credentials();
    }

    let mut conn = get_conn!(pool);

    let user: User = match users::table
        .filter(users::email.eq(&request.email))
        .select(User::as_select())
        .first(&mut conn)
    {
        Ok(u) => u,
        Err(_) => return bad_credentials(),
    };

    if !verify_password(&request.password, &user.password_hash) {
        return bad_credentials();
    }

    let token = match create_session(&mut conn, user.id) {
        Ok(t) => t,
        Err(e) => {
            tracing::error!("Failed to create session: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to create session".to_string(),
                }),
            )
                .into_response();
        }
    };

    (StatusCode::OK, Json(TokenResponse { token })).into_response()
}
