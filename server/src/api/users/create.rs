use crate::api::ErrorResponse;
use crate::auth::hash_password;
use crate::db::DbPool;
use crate::get_conn;
use crate::models::{NewUser, User};
use crate::schema::users;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateUserRequest {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub name: String,
}

/// Public profile representation; never carries the password hash.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserResponse {
    pub email: String,
    pub name: String,
}

/// Validate an email the same way for signup and profile update.
pub(super) fn validate_email(email: &str) -> Result<(), &'static str> {
    if email.trim().is_empty() {
        return Err("Email cannot be blank");
    }
    if !email.contains('@') {
        return Err("Enter a valid email address");
    }
    Ok(())
}

pub(super) fn validate_password(password: &str) -> Result<(), &'static str> {
    if password.len() < 5 {
        return Err("Password must be at least 5 characters");
    }
    Ok(())
}

#[utoipa::path(
    post,
    path = "/api/user/create",
    tag = "user",
    request_body(content = CreateUserRequest, example = json!({"email": "user@example.com", "password": "password", "name": "User"})),
    responses(
        (status = 201, description = "User created successfully", body = UserResponse),
        (status = 400, description = "Invalid email, weak password, or duplicate email", body = ErrorResponse)
    )
)]
pub async fn create_user(
    State(pool): State<Arc<DbPool>>,
    Json(request): Json<CreateUserRequest>,
) -> impl IntoResponse {
    if let Err(message) = validate_email(&request.email) {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: message.to_string(),
            }),
        )
            .into_response();
    }

    if let Err(message) = validate_password(&request.password) {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: message.to_string(),
            }),
        )
            .into_response();
    }

    let password_hash = match hash_password(&request.password) {
        Ok(h) => h,
        Err(_) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to hash password".to_string(),
                }),
            )
                .into_response()
        }
    };

    let mut conn = get_conn!(pool);

    let new_user = NewUser {
        email: &request.email,
        password_hash: &password_hash,
        name: &request.name,
    };

    let user: User = match diesel::insert_into(users::table)
        .values(&new_user)
        .returning(User::as_returning())
        .get_result(&mut conn)
    {
        Ok(u) => u,
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
            tracing::error!("Failed to create user: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to create user".to_string(),
                }),
            )
                .into_response();
        }
    };

    (
        StatusCode::CREATED,
        Json(UserResponse {
            email: user.email,
            name: user.name,
        }),
    )
        .into_response()
}
