//! HTTP-level integration tests for project-scoped options.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, create_project, create_user, delete, get, post_json, put_json};
use serde_json::json;
use sqlx::PgPool;

async fn create_option(pool: &PgPool, token: &str, project_id: i64, kind: &str, name: &str) -> i64 {
    let response = post_json(
        build_test_app(pool.clone()),
        &format!("/api/v1/projects/{project_id}/options/{kind}"),
        token,
        json!({"name": name}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_name_in_project_fails(pool: PgPool) {
    let (_, token) = create_user(&pool, "owner").await;
    let project_id = create_project(&pool, &token, json!({"name": "Apollo"})).await["id"]
        .as_i64()
        .unwrap();
    create_option(&pool, &token, project_id, "task-statuses", "Done").await;

    let response = post_json(
        build_test_app(pool),
        &format!("/api/v1/projects/{project_id}/options/task-statuses"),
        &token,
        json!({"name": "Done"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Name duplicated for the project");
    assert_eq!(json["field"], "name");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_same_name_in_other_project_or_kind_passes(pool: PgPool) {
    let (_, token) = create_user(&pool, "owner").await;
    let a = create_project(&pool, &token, json!({"name": "Apollo"})).await["id"]
        .as_i64()
        .unwrap();
    let b = create_project(&pool, &token, json!({"name": "Gemini"})).await["id"]
        .as_i64()
        .unwrap();

    create_option(&pool, &token, a, "priorities", "High").await;
    create_option(&pool, &token, b, "priorities", "High").await;
    create_option(&pool, &token, a, "severities", "High").await;

    let response = get(
        build_test_app(pool),
        &format!("/api/v1/projects/{a}/options/priorities"),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"].as_array().unwrap().len(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_rename_to_own_name_passes_and_to_sibling_fails(pool: PgPool) {
    let (_, token) = create_user(&pool, "owner").await;
    let project_id = create_project(&pool, &token, json!({"name": "Apollo"})).await["id"]
        .as_i64()
        .unwrap();
    let new_id = create_option(&pool, &token, project_id, "issue-types", "Bug").await;
    create_option(&pool, &token, project_id, "issue-types", "Question").await;

    let uri = format!("/api/v1/projects/{project_id}/options/issue-types/{new_id}");
    let response = put_json(
        build_test_app(pool.clone()),
        &uri,
        &token,
        json!({"name": "Bug", "color": "#ff0000"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["color"], "#ff0000");

    let response = put_json(build_test_app(pool), &uri, &token, json!({"name": "Question"})).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_option_write_on_unknown_project_fails(pool: PgPool) {
    let (_, token) = create_user(&pool, "owner").await;

    let response = post_json(
        build_test_app(pool),
        "/api/v1/projects/999999/options/points",
        &token,
        json!({"name": "1/2"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["field"], "project_id");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unknown_kind_is_rejected(pool: PgPool) {
    let (_, token) = create_user(&pool, "owner").await;
    let project_id = create_project(&pool, &token, json!({"name": "Apollo"})).await["id"]
        .as_i64()
        .unwrap();

    let response = get(
        build_test_app(pool),
        &format!("/api/v1/projects/{project_id}/options/colours"),
        &token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_option(pool: PgPool) {
    let (_, token) = create_user(&pool, "owner").await;
    let project_id = create_project(&pool, &token, json!({"name": "Apollo"})).await["id"]
        .as_i64()
        .unwrap();
    let id = create_option(&pool, &token, project_id, "epic-statuses", "New").await;

    let uri = format!("/api/v1/projects/{project_id}/options/epic-statuses/{id}");
    let response = delete(build_test_app(pool.clone()), &uri, &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = delete(build_test_app(pool), &uri, &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
