//! HTTP-level integration tests for projects, project ordering and history.
//!
//! Requests go straight to the router through `tower::ServiceExt::oneshot`.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, build_test_app, create_project, create_site_admin, create_user, get, get_anonymous,
    post_json, put_json,
};
use serde_json::json;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_project_returns_201(pool: PgPool) {
    let (owner, token) = create_user(&pool, "owner").await;
    let response = post_json(
        build_test_app(pool.clone()),
        "/api/v1/projects",
        &token,
        json!({"name": "Apollo Mission", "tags": [" Backend ", "backend", "API"]}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["name"], "Apollo Mission");
    assert_eq!(json["data"]["slug"], "apollo-mission");
    assert_eq!(json["data"]["owner_id"], owner.id);
    assert_eq!(json["data"]["tags"], json!(["backend", "api"]));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_project_requires_auth(pool: PgPool) {
    let response = get_anonymous(build_test_app(pool), "/api/v1/projects").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_client_cannot_set_slug_or_owner(pool: PgPool) {
    let (owner, token) = create_user(&pool, "owner").await;
    let project = create_project(
        &pool,
        &token,
        json!({"name": "Apollo", "slug": "custom", "owner_id": 999, "blocked_code": "x"}),
    )
    .await;

    assert_eq!(project["slug"], "apollo");
    assert_eq!(project["owner_id"], owner.id);
    assert!(project["blocked_code"].is_null());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unknown_anon_permission_is_rejected(pool: PgPool) {
    let (_, token) = create_user(&pool, "owner").await;
    let response = post_json(
        build_test_app(pool),
        "/api/v1/projects",
        &token,
        json!({"name": "Apollo", "anon_permissions": ["view_project", "add_us"]}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["field"], "anon_permissions");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unknown_template_is_rejected(pool: PgPool) {
    let (_, token) = create_user(&pool, "owner").await;
    let response = post_json(
        build_test_app(pool),
        "/api/v1/projects",
        &token,
        json!({"name": "Apollo", "template_id": 424242}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["field"], "template_id");
}

// ---------------------------------------------------------------------------
// Read / update
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_private_project_hidden_from_non_members(pool: PgPool) {
    let (_, owner_token) = create_user(&pool, "owner").await;
    let (_, other_token) = create_user(&pool, "other").await;
    let project = create_project(&pool, &owner_token, json!({"name": "Apollo"})).await;
    let id = project["id"].as_i64().unwrap();

    let response = get(build_test_app(pool.clone()), &format!("/api/v1/projects/{id}"), &owner_token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = get(build_test_app(pool), &format!("/api/v1/projects/{id}"), &other_token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_get_nonexistent_project_returns_404(pool: PgPool) {
    let (_, token) = create_user(&pool, "owner").await;
    let response = get(build_test_app(pool), "/api/v1/projects/999999", &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_project_records_history(pool: PgPool) {
    let (_, token) = create_user(&pool, "owner").await;
    let project = create_project(&pool, &token, json!({"name": "Apollo"})).await;
    let id = project["id"].as_i64().unwrap();

    let response = put_json(
        build_test_app(pool.clone()),
        &format!("/api/v1/projects/{id}"),
        &token,
        json!({"name": "Artemis", "is_private": false}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["name"], "Artemis");
    assert_eq!(json["data"]["slug"], "apollo");

    let response = get(
        build_test_app(pool),
        &format!("/api/v1/history/projects.project:{id}"),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let entries = body_json(response).await["data"].clone();
    let entries = entries.as_array().unwrap();
    assert_eq!(entries.len(), 2);

    let change = &entries[0];
    assert_eq!(change["entry_type"], 1);
    assert_eq!(change["diff"]["name"], json!(["Apollo", "Artemis"]));
    assert_eq!(change["diff"]["is_private"], json!([true, false]));
    assert!(change["values"].is_null());

    let creation = &entries[1];
    assert_eq!(creation["entry_type"], 2);
    assert!(creation["diff"].is_null());
    assert_eq!(creation["snapshot"]["name"], "Apollo");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_private_project_history_hidden_from_non_members(pool: PgPool) {
    let (_, owner_token) = create_user(&pool, "owner").await;
    let (_, other_token) = create_user(&pool, "other").await;
    let project = create_project(
        &pool,
        &owner_token,
        json!({"name": "Apollo", "description": "classified"}),
    )
    .await;
    let id = project["id"].as_i64().unwrap();
    let uri = format!("/api/v1/history/projects.project:{id}");

    let response = get(build_test_app(pool.clone()), &uri, &other_token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = get(build_test_app(pool), &uri, &owner_token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"][0]["snapshot"]["description"], "classified");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_public_project_history_visible_to_others(pool: PgPool) {
    let (_, owner_token) = create_user(&pool, "owner").await;
    let (_, other_token) = create_user(&pool, "other").await;
    let project = create_project(
        &pool,
        &owner_token,
        json!({"name": "Apollo", "is_private": false}),
    )
    .await;
    let id = project["id"].as_i64().unwrap();

    let response = get(
        build_test_app(pool),
        &format!("/api/v1/history/projects.project:{id}"),
        &other_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_history_of_other_keys_requires_site_admin(pool: PgPool) {
    let (_, token) = create_user(&pool, "owner").await;
    let (_, staff_token) = create_site_admin(&pool, "staff").await;

    let response = get(build_test_app(pool.clone()), "/api/v1/history/userstories.userstory:1", &token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = get(build_test_app(pool.clone()), "/api/v1/history/userstories.userstory:1", &staff_token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = get(build_test_app(pool), "/api/v1/history/projects.project:999999", &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_requires_project_admin(pool: PgPool) {
    let (_, owner_token) = create_user(&pool, "owner").await;
    let (_, other_token) = create_user(&pool, "other").await;
    let project = create_project(&pool, &owner_token, json!({"name": "Apollo"})).await;
    let id = project["id"].as_i64().unwrap();

    let response = put_json(
        build_test_app(pool),
        &format!("/api/v1/projects/{id}"),
        &other_token,
        json!({"name": "Hijacked"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

// ---------------------------------------------------------------------------
// Bulk order
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_bulk_update_order_reorders_list(pool: PgPool) {
    let (_, token) = create_user(&pool, "owner").await;
    let a = create_project(&pool, &token, json!({"name": "Alpha"})).await["id"]
        .as_i64()
        .unwrap();
    let b = create_project(&pool, &token, json!({"name": "Beta"})).await["id"]
        .as_i64()
        .unwrap();

    let response = post_json(
        build_test_app(pool.clone()),
        "/api/v1/projects/bulk-update-order",
        &token,
        json!([{"project_id": a, "order": 20}, {"project_id": b, "order": 10}]),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["updated"], 2);

    let response = get(build_test_app(pool), "/api/v1/projects", &token).await;
    let json = body_json(response).await;
    let ids: Vec<i64> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![b, a]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_bulk_update_order_unknown_project_writes_nothing(pool: PgPool) {
    let (_, token) = create_user(&pool, "owner").await;
    let a = create_project(&pool, &token, json!({"name": "Alpha"})).await["id"]
        .as_i64()
        .unwrap();

    let response = post_json(
        build_test_app(pool.clone()),
        "/api/v1/projects/bulk-update-order",
        &token,
        json!([{"project_id": a, "order": 1}, {"project_id": 999999, "order": 2}]),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "There's no project with that id");
    assert_eq!(json["field"], "project_id");

    let order: i64 = sqlx::query_scalar("SELECT user_order FROM memberships WHERE project_id = $1")
        .bind(a)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(order, 10000);
}
