//! Helpers for the HTTP tests: a shared pool against TEST_DATABASE_URL and
//! request plumbing for driving the real router with oneshot calls.
//!
//! The HTTP tests need a Postgres database. When TEST_DATABASE_URL is unset
//! they skip themselves with a notice, so the rest of the suite still runs.

use crate::AppState;
use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::sync::{Arc, LazyLock};
use tower::ServiceExt;
use uuid::Uuid;

static POOL: LazyLock<Option<AppState>> = LazyLock::new(|| {
    let url = std::env::var("TEST_DATABASE_URL").ok()?;
    // Full-strength argon2 would dominate the suite's runtime
    std::env::set_var("INSECURE_PASSWORD_HASHING", "1");
    Some(Arc::new(crate::db::create_pool(&url)))
});

/// The app wired to the shared test database, or None when no database is
/// configured.
pub fn test_app() -> Option<Router> {
    Some(crate::app(POOL.as_ref()?.clone()))
}

/// Get the test app, or skip the calling test when TEST_DATABASE_URL is
/// unset.
macro_rules! require_test_app {
    () => {
        match crate::test_support::test_app() {
            Some(app) => app,
            None => {
                eprintln!("TEST_DATABASE_URL not set, skipping");
                return;
            }
        }
    };
}
pub(crate) use require_test_app;

/// Fire one request at the router and return (status, parsed JSON body).
/// Empty and non-JSON bodies come back as Value::Null.
pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, body)
}

/// Every test gets its own user so the suite can share one database.
pub fn unique_email() -> String {
    format!("user-{}@example.com", Uuid::new_v4().simple())
}

/// Create a fresh user and exchange credentials for a token.
/// Returns (email, token).
pub async fn signup(app: &Router, password: &str) -> (String, String) {
    let email = unique_email();
    let (status, _) = send(
        app,
        Method::POST,
        "/api/user/create",
        None,
        Some(json!({"email": email, "password": password, "name": "Test Name"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(
        app,
        Method::POST,
        "/api/user/token",
        None,
        Some(json!({"email": email, "password": password})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let token = body["token"].as_str().expect("token missing").to_string();
    (email, token)
}

/// Create a recipe from a default payload merged with `overrides`.
/// Returns the created recipe's response body.
pub async fn create_recipe(app: &Router, token: &str, overrides: Value) -> Value {
    let mut payload = json!({
        "title": "Sample recipe title",
        "time_minutes": 22,
        "price": "5.25",
        "description": "Sample description",
        "link": "http://example.com/recipe.pdf",
    });
    if let (Some(base), Some(extra)) = (payload.as_object_mut(), overrides.as_object()) {
        for (key, value) in extra {
            base.insert(key.clone(), value.clone());
        }
    }

    let (status, body) = send(app, Method::POST, "/api/recipes", Some(token), Some(payload)).await;
    assert_eq!(status, StatusCode::CREATED);
    body
}
