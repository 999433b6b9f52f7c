use crate::test_support::{create_recipe, require_test_app, send, signup};
use axum::http::{Method, StatusCode};
use serde_json::{json, Value};

fn recipe_url(body: &Value) -> String {
    format!("/api/recipes/{}", body["id"].as_i64().unwrap())
}

fn tag_names(recipe: &Value) -> Vec<&str> {
    recipe["tags"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["name"].as_str().unwrap())
        .collect()
}

#[tokio::test]
async fn test_auth_required() {
    let app = require_test_app!();

    let (status, _) = send(&app, Method::GET, "/api/recipes", None, None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_retrieve_recipes_newest_first() {
    let app = require_test_app!();
    let (_, token) = signup(&app, "pass123").await;

    let first = create_recipe(&app, &token, json!({})).await;
    let second = create_recipe(&app, &token, json!({})).await;

    let (status, body) = send(&app, Method::GET, "/api/recipes", Some(&token), None).await;

    assert_eq!(status, StatusCode::OK);
    let recipes = body["recipes"].as_array().unwrap();
    assert_eq!(recipes.len(), 2);
    assert_eq!(recipes[0]["id"], second["id"]);
    assert_eq!(recipes[1]["id"], first["id"]);
}

#[tokio::test]
async fn test_recipe_list_limited_to_user() {
    let app = require_test_app!();
    let (_, token) = signup(&app, "pass123").await;
    let (_, other_token) = signup(&app, "password123").await;

    create_recipe(&app, &other_token, json!({})).await;
    let mine = create_recipe(&app, &token, json!({})).await;

    let (status, body) = send(&app, Method::GET, "/api/recipes", Some(&token), None).await;

    assert_eq!(status, StatusCode::OK);
    let recipes = body["recipes"].as_array().unwrap();
    assert_eq!(recipes.len(), 1);
    assert_eq!(recipes[0]["id"], mine["id"]);
}

#[tokio::test]
async fn test_get_recipe_detail() {
    let app = require_test_app!();
    let (_, token) = signup(&app, "pass123").await;
    let recipe = create_recipe(&app, &token, json!({})).await;

    let (status, body) = send(&app, Method::GET, &recipe_url(&recipe), Some(&token), None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Sample recipe title");
    assert_eq!(body["description"], "Sample description");
    assert_eq!(body["price"], "5.25");
}

#[tokio::test]
async fn test_list_omits_description() {
    let app = require_test_app!();
    let (_, token) = signup(&app, "pass123").await;
    create_recipe(&app, &token, json!({})).await;

    let (_, body) = send(&app, Method::GET, "/api/recipes", Some(&token), None).await;

    let recipes = body["recipes"].as_array().unwrap();
    assert!(recipes[0].get("description").is_none());
    assert!(recipes[0].get("title").is_some());
}

#[tokio::test]
async fn test_create_recipe() {
    let app = require_test_app!();
    let (_, token) = signup(&app, "pass123").await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/recipes",
        Some(&token),
        Some(json!({"title": "Sample recipe", "time_minutes": 30, "price": "5.50"})),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["title"], "Sample recipe");
    assert_eq!(body["time_minutes"], 30);
    assert_eq!(body["price"], "5.50");
    assert_eq!(body["description"], "");
    assert_eq!(body["link"], "");
}

#[tokio::test]
async fn test_create_recipe_empty_title_error() {
    let app = require_test_app!();
    let (_, token) = signup(&app, "pass123").await;

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/recipes",
        Some(&token),
        Some(json!({"title": "   ", "time_minutes": 30, "price": "5.50"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_partial_update() {
    let app = require_test_app!();
    let (_, token) = signup(&app, "pass123").await;
    let recipe = create_recipe(
        &app,
        &token,
        json!({"link": "https://example.com/recipe.pdf"}),
    )
    .await;

    let (status, body) = send(
        &app,
        Method::PATCH,
        &recipe_url(&recipe),
        Some(&token),
        Some(json!({"title": "New recipe title"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "New recipe title");
    assert_eq!(body["link"], "https://example.com/recipe.pdf");
}

#[tokio::test]
async fn test_full_update() {
    let app = require_test_app!();
    let (_, token) = signup(&app, "pass123").await;
    let recipe = create_recipe(&app, &token, json!({})).await;

    let payload = json!({
        "title": "New recipe title",
        "link": "https://example.com/new-recipe.pdf",
        "description": "New description for recipe",
        "price": "5.50",
        "time_minutes": 20,
    });
    let (status, body) = send(
        &app,
        Method::PUT,
        &recipe_url(&recipe),
        Some(&token),
        Some(payload.clone()),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    for (key, expected) in payload.as_object().unwrap() {
        assert_eq!(&body[key], expected, "field {key}");
    }
}

#[tokio::test]
async fn test_put_omitted_link_keeps_value() {
    let app = require_test_app!();
    let (_, token) = signup(&app, "pass123").await;
    let recipe = create_recipe(
        &app,
        &token,
        json!({"link": "https://example.com/recipe.pdf"}),
    )
    .await;

    let (status, body) = send(
        &app,
        Method::PUT,
        &recipe_url(&recipe),
        Some(&token),
        Some(json!({"title": "New title", "time_minutes": 10, "price": "1.00"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["link"], "https://example.com/recipe.pdf");
}

#[tokio::test]
async fn test_update_owner_is_ignored() {
    let app = require_test_app!();
    let (_, token) = signup(&app, "pass123").await;
    let recipe = create_recipe(&app, &token, json!({})).await;

    // Unknown fields in the payload are dropped, owner included
    let (status, _) = send(
        &app,
        Method::PATCH,
        &recipe_url(&recipe),
        Some(&token),
        Some(json!({"user_id": "00000000-0000-0000-0000-000000000000"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, Method::GET, &recipe_url(&recipe), Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_delete_recipe() {
    let app = require_test_app!();
    let (_, token) = signup(&app, "pass123").await;
    let recipe = create_recipe(&app, &token, json!({})).await;

    let (status, _) = send(
        &app,
        Method::DELETE,
        &recipe_url(&recipe),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, Method::GET, &recipe_url(&recipe), Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_other_users_recipe_error() {
    let app = require_test_app!();
    let (_, token) = signup(&app, "pass123").await;
    let (_, other_token) = signup(&app, "pass456").await;
    let recipe = create_recipe(&app, &other_token, json!({})).await;

    let (status, _) = send(
        &app,
        Method::DELETE,
        &recipe_url(&recipe),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Still there for its owner
    let (status, _) = send(
        &app,
        Method::GET,
        &recipe_url(&recipe),
        Some(&other_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_create_recipe_with_new_tags() {
    let app = require_test_app!();
    let (_, token) = signup(&app, "pass123").await;

    let recipe = create_recipe(
        &app,
        &token,
        json!({
            "title": "Thai Prawn Curry",
            "time_minutes": 30,
            "price": "2.50",
            "tags": [{"name": "Thai"}, {"name": "Dinner"}],
        }),
    )
    .await;

    let names = tag_names(&recipe);
    assert_eq!(names.len(), 2);
    assert!(names.contains(&"Thai"));
    assert!(names.contains(&"Dinner"));

    let (_, body) = send(&app, Method::GET, "/api/tags", Some(&token), None).await;
    assert_eq!(body["tags"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_create_recipe_with_existing_tag() {
    let app = require_test_app!();
    let (_, token) = signup(&app, "pass123").await;

    let first = create_recipe(&app, &token, json!({"tags": [{"name": "Indian"}]})).await;
    let second = create_recipe(
        &app,
        &token,
        json!({
            "title": "Pongal",
            "tags": [{"name": "Indian"}, {"name": "Breakfast"}],
        }),
    )
    .await;

    assert_eq!(second["tags"].as_array().unwrap().len(), 2);

    // The existing row is reused, not duplicated
    assert_eq!(first["tags"][0]["id"], second["tags"][0]["id"]);
    let (_, body) = send(&app, Method::GET, "/api/tags", Some(&token), None).await;
    assert_eq!(body["tags"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_create_tag_on_update() {
    let app = require_test_app!();
    let (_, token) = signup(&app, "pass123").await;
    let recipe = create_recipe(&app, &token, json!({})).await;

    let (status, body) = send(
        &app,
        Method::PATCH,
        &recipe_url(&recipe),
        Some(&token),
        Some(json!({"tags": [{"name": "Lunch"}]})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(tag_names(&body), vec!["Lunch"]);

    let (_, tags) = send(&app, Method::GET, "/api/tags", Some(&token), None).await;
    assert_eq!(tags["tags"][0]["name"], "Lunch");
}

#[tokio::test]
async fn test_update_recipe_assign_tag() {
    let app = require_test_app!();
    let (_, token) = signup(&app, "pass123").await;
    let recipe = create_recipe(&app, &token, json!({"tags": [{"name": "Breakfast"}]})).await;

    let (status, body) = send(
        &app,
        Method::PATCH,
        &recipe_url(&recipe),
        Some(&token),
        Some(json!({"tags": [{"name": "Lunch"}]})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(tag_names(&body), vec!["Lunch"]);

    // Breakfast is detached from the recipe but not deleted
    let (_, tags) = send(&app, Method::GET, "/api/tags", Some(&token), None).await;
    let names: Vec<&str> = tags["tags"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["name"].as_str().unwrap())
        .collect();
    assert!(names.contains(&"Breakfast"));
    assert!(names.contains(&"Lunch"));
}

#[tokio::test]
async fn test_clear_recipe_tags() {
    let app = require_test_app!();
    let (_, token) = signup(&app, "pass123").await;
    let recipe = create_recipe(&app, &token, json!({"tags": [{"name": "Dessert"}]})).await;

    let (status, body) = send(
        &app,
        Method::PATCH,
        &recipe_url(&recipe),
        Some(&token),
        Some(json!({"tags": []})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["tags"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_omitted_tags_leave_associations() {
    let app = require_test_app!();
    let (_, token) = signup(&app, "pass123").await;
    let recipe = create_recipe(&app, &token, json!({"tags": [{"name": "Dinner"}]})).await;

    let (status, body) = send(
        &app,
        Method::PATCH,
        &recipe_url(&recipe),
        Some(&token),
        Some(json!({"title": "Still tagged"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(tag_names(&body), vec!["Dinner"]);
}

#[tokio::test]
async fn test_tag_names_never_reuse_other_users() {
    let app = require_test_app!();
    let (_, token) = signup(&app, "pass123").await;
    let (_, other_token) = signup(&app, "pass456").await;

    let mine = create_recipe(&app, &token, json!({"tags": [{"name": "Vegan"}]})).await;
    let theirs = create_recipe(&app, &other_token, json!({"tags": [{"name": "Vegan"}]})).await;

    assert_ne!(mine["tags"][0]["id"], theirs["tags"][0]["id"]);
}

#[tokio::test]
async fn test_create_recipe_with_new_ingredients() {
    let app = require_test_app!();
    let (_, token) = signup(&app, "pass123").await;

    let recipe = create_recipe(
        &app,
        &token,
        json!({
            "title": "Cauliflower Tacos",
            "ingredients": [{"name": "Cauliflower"}, {"name": "Salt"}],
        }),
    )
    .await;

    assert_eq!(recipe["ingredients"].as_array().unwrap().len(), 2);

    let (_, body) = send(&app, Method::GET, "/api/ingredients", Some(&token), None).await;
    assert_eq!(body["ingredients"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_update_recipe_replaces_ingredients() {
    let app = require_test_app!();
    let (_, token) = signup(&app, "pass123").await;
    let recipe = create_recipe(
        &app,
        &token,
        json!({"ingredients": [{"name": "Pepper"}]}),
    )
    .await;

    let (status, body) = send(
        &app,
        Method::PATCH,
        &recipe_url(&recipe),
        Some(&token),
        Some(json!({"ingredients": [{"name": "Chili"}]})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = body["ingredients"]
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Chili"]);
}
