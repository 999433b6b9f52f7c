use crate::test_support::{create_recipe, require_test_app, send, signup};
use axum::http::{Method, StatusCode};
use serde_json::{json, Value};

async fn list_ingredients(app: &axum::Router, token: &str, query: &str) -> Vec<Value> {
    let uri = format!("/api/ingredients{query}");
    let (status, body) = send(app, Method::GET, &uri, Some(token), None).await;
    assert_eq!(status, StatusCode::OK);
    body["ingredients"].as_array().unwrap().clone()
}

#[tokio::test]
async fn test_auth_required() {
    let app = require_test_app!();

    let (status, _) = send(&app, Method::GET, "/api/ingredients", None, None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_retrieve_ingredients_descending_name() {
    let app = require_test_app!();
    let (_, token) = signup(&app, "pass123").await;
    create_recipe(
        &app,
        &token,
        json!({"ingredients": [{"name": "Kale"}, {"name": "Vanilla"}]}),
    )
    .await;

    let ingredients = list_ingredients(&app, &token, "").await;

    assert_eq!(ingredients.len(), 2);
    assert_eq!(ingredients[0]["name"], "Vanilla");
    assert_eq!(ingredients[1]["name"], "Kale");
}

#[tokio::test]
async fn test_ingredients_limited_to_user() {
    let app = require_test_app!();
    let (_, token) = signup(&app, "pass123").await;
    let (_, other_token) = signup(&app, "pass456").await;

    create_recipe(
        &app,
        &other_token,
        json!({"ingredients": [{"name": "Pepper"}]}),
    )
    .await;
    create_recipe(&app, &token, json!({"ingredients": [{"name": "Salt"}]})).await;

    let ingredients = list_ingredients(&app, &token, "").await;

    assert_eq!(ingredients.len(), 1);
    assert_eq!(ingredients[0]["name"], "Salt");
}

#[tokio::test]
async fn test_update_ingredient() {
    let app = require_test_app!();
    let (_, token) = signup(&app, "pass123").await;
    let recipe = create_recipe(&app, &token, json!({"ingredients": [{"name": "Tomato"}]})).await;
    let ingredient_id = recipe["ingredients"][0]["id"].as_i64().unwrap();

    let (status, body) = send(
        &app,
        Method::PATCH,
        &format!("/api/ingredients/{ingredient_id}"),
        Some(&token),
        Some(json!({"name": "Onion"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"id": ingredient_id, "name": "Onion"}));
}

#[tokio::test]
async fn test_update_other_users_ingredient_error() {
    let app = require_test_app!();
    let (_, token) = signup(&app, "pass123").await;
    let (_, other_token) = signup(&app, "pass456").await;
    let recipe = create_recipe(
        &app,
        &other_token,
        json!({"ingredients": [{"name": "Theirs"}]}),
    )
    .await;
    let ingredient_id = recipe["ingredients"][0]["id"].as_i64().unwrap();

    let (status, _) = send(
        &app,
        Method::PATCH,
        &format!("/api/ingredients/{ingredient_id}"),
        Some(&token),
        Some(json!({"name": "Mine now"})),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_ingredient() {
    let app = require_test_app!();
    let (_, token) = signup(&app, "pass123").await;
    let recipe = create_recipe(&app, &token, json!({"ingredients": [{"name": "Paprika"}]})).await;
    let ingredient_id = recipe["ingredients"][0]["id"].as_i64().unwrap();

    let (status, _) = send(
        &app,
        Method::DELETE,
        &format!("/api/ingredients/{ingredient_id}"),
        Some(&token),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(list_ingredients(&app, &token, "").await.is_empty());
}

#[tokio::test]
async fn test_filter_ingredients_assigned_to_recipes() {
    let app = require_test_app!();
    let (_, token) = signup(&app, "pass123").await;

    create_recipe(&app, &token, json!({"ingredients": [{"name": "Apples"}]})).await;
    let orphan = create_recipe(&app, &token, json!({"ingredients": [{"name": "Turkey"}]})).await;
    send(
        &app,
        Method::PATCH,
        &format!("/api/recipes/{}", orphan["id"].as_i64().unwrap()),
        Some(&token),
        Some(json!({"ingredients": []})),
    )
    .await;

    let assigned = list_ingredients(&app, &token, "?assigned_only=1").await;

    assert_eq!(assigned.len(), 1);
    assert_eq!(assigned[0]["name"], "Apples");
}

#[tokio::test]
async fn test_filtered_ingredients_unique() {
    let app = require_test_app!();
    let (_, token) = signup(&app, "pass123").await;

    create_recipe(&app, &token, json!({"ingredients": [{"name": "Eggs"}]})).await;
    create_recipe(&app, &token, json!({"ingredients": [{"name": "Eggs"}]})).await;

    let assigned = list_ingredients(&app, &token, "?assigned_only=1").await;

    assert_eq!(assigned.len(), 1);
}
