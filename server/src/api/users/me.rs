use crate::api::ErrorResponse;
use crate::auth::{hash_password, AuthUser};
use crate::db::DbPool;
use crate::get_conn;
use crate::schema::users;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use diesel::prelude::*;
use serde::Deserialize;
use std::sync::Arc;
use utoipa::ToSchema;

use super::create::{validate_email, validate_password, UserResponse};

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateMeRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    pub name: Option<String>,
}

#[derive(AsChangeset)]
#[diesel(table_name = users)]
struct UserChanges<'a> {
    email: Option<&'a str>,
    password_hash: Option<&'a str>,
    name: Option<&'a str>,
}

#[utoipa::path(
    get,
    path = "/api/user/me",
    tag = "user",
    responses(
        (status = 200, description = "Authenticated user's profile", body = UserResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_me(AuthUser(user): AuthUser) -> impl IntoResponse {
    Json(UserResponse {
        email: user.email,
        name: user.name,
    })
}

#[utoipa::path(
    patch,
    path = "/api/user/me",
    tag = "user",
    request_body = UpdateMeRequest,
    responses(
        (status = 200, description = "Profile updated", body = UserResponse),
        (status = 400, description = "Invalid email, weak password, or duplicate email", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_me(
    AuthUser(user): AuthUser,
    State(pool): State<Arc<DbPool>>,
    Json(request): Json<UpdateMeRequest>,
) -> impl IntoResponse {
    if let Some(ref email) = request.email {
        if let Err(message) = validate_email(email) {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: message.to_string(),
                }),
            )
                .into_response();
        }
    }

    let password_hash = match request.password {
        Some(ref password) => {
            if let Err(message) = validate_password(password) {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(ErrorResponse {
                        error: message.to_string(),
                    }),
                )
                    .into_response();
            }
            match hash_password(password) {
                Ok(h) => Some(h),
                Err(_) => {
                    return (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        Json(ErrorResponse {
                            error: "Failed to hash password".to_string(),
                        }),
                    )
                        .into_response()
                }
            }
        }
        None => None,
    };

    let changes = UserChanges {
        email: request.email.as_deref(),
        password_hash: password_hash.as_deref(),
        name: request.name.as_deref(),
    };

    // Diesel rejects an all-None changeset, and there is nothing to do anyway.
    if changes.email.is_none() && changes.password_hash.is_none() && changes.name.is_none() {
        return Json(UserResponse {
            email: user.email,
            name: user.name,
        })
        .into_response();
    }

    let mut conn = get_conn!(pool);

    let updated: (String, String) = match diesel::update(users::table.find(user.id))
        .set(&changes)
        .returning((users::email, users::name))
        .get_result(&mut conn)
    {
        Ok(row) => row,
        Err(diesel::result::Error::DatabaseError(
            diesel::result::DatabaseErrorKind::UniqueViolation,
            _,
        )) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: "A user with that email already exists".to_string(),
                }),
            )
                .into_response()
        }
        Err(e) => {
            tracing::error!("Failed to update profile: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to update profile".to_string(),
                }),
            )
                .into_response();
        }
    };

    Json(UserResponse {
        email: updated.0,
        name: updated.1,
    })
    .into_response()
}
