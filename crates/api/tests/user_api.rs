//! HTTP-level tests for registration, token exchange and `/user/me`.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, get, get_auth, patch_json_auth, post_json, put_json_auth, register_and_login,
    TEST_PASSWORD,
};
use serde_json::json;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Registration
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_user_returns_201_without_password(pool: PgPool) {
    let test = common::build_test_app(pool);
    let response = post_json(
        test.app(),
        "/api/v1/user/create",
        json!({"email": "Cook@Example.COM", "password": TEST_PASSWORD, "name": "Cook"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["email"], "Cook@example.com");
    assert_eq!(json["name"], "Cook");
    assert!(json["id"].is_number());
    assert!(json.get("password").is_none());
    assert!(json.get("password_hash").is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_user_duplicate_email_is_400(pool: PgPool) {
    let test = common::build_test_app(pool);
    register_and_login(&test, "dup@example.com").await;

    let response = post_json(
        test.app(),
        "/api/v1/user/create",
        json!({"email": "dup@example.com", "password": TEST_PASSWORD, "name": "Again"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_user_short_password_is_400(pool: PgPool) {
    let test = common::build_test_app(pool);
    let response = post_json(
        test.app(),
        "/api/v1/user/create",
        json!({"email": "short@example.com", "password": "pw", "name": "Short"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_user_missing_field_is_400(pool: PgPool) {
    let test = common::build_test_app(pool);
    let response = post_json(
        test.app(),
        "/api/v1/user/create",
        json!({"email": "nameless@example.com", "password": TEST_PASSWORD}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Tokens
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_token_wrong_password_is_400(pool: PgPool) {
    let test = common::build_test_app(pool);
    register_and_login(&test, "tok@example.com").await;

    let response = post_json(
        test.app(),
        "/api/v1/user/token",
        json!({"email": "tok@example.com", "password": "wrong-password"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_json(response).await.get("token").is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_token_unknown_user_is_400(pool: PgPool) {
    let test = common::build_test_app(pool);
    let response = post_json(
        test.app(),
        "/api/v1/user/token",
        json!({"email": "ghost@example.com", "password": TEST_PASSWORD}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_token_blank_password_is_400(pool: PgPool) {
    let test = common::build_test_app(pool);
    register_and_login(&test, "blank@example.com").await;

    let response = post_json(
        test.app(),
        "/api/v1/user/token",
        json!({"email": "blank@example.com", "password": ""}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Profile
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_me_requires_auth(pool: PgPool) {
    let test = common::build_test_app(pool);
    let response = get(test.app(), "/api/v1/user/me").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = get_auth(test.app(), "/api/v1/user/me", "not-a-jwt").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_me_returns_profile(pool: PgPool) {
    let test = common::build_test_app(pool);
    let token = register_and_login(&test, "me@example.com").await;

    let response = get_auth(test.app(), "/api/v1/user/me", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["email"], "me@example.com");
    assert_eq!(json["name"], "Test User");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_patch_me_updates_name_and_password(pool: PgPool) {
    let test = common::build_test_app(pool);
    let token = register_and_login(&test, "patch@example.com").await;

    let response = patch_json_auth(
        test.app(),
        "/api/v1/user/me",
        &token,
        json!({"name": "Renamed", "password": "newpassword"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["name"], "Renamed");
    assert_eq!(json["email"], "patch@example.com");

    let response = post_json(
        test.app(),
        "/api/v1/user/token",
        json!({"email": "patch@example.com", "password": "newpassword"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = post_json(
        test.app(),
        "/api/v1/user/token",
        json!({"email": "patch@example.com", "password": TEST_PASSWORD}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_put_me_requires_every_field(pool: PgPool) {
    let test = common::build_test_app(pool);
    let token = register_and_login(&test, "put@example.com").await;

    let response = put_json_auth(
        test.app(),
        "/api/v1/user/me",
        &token,
        json!({"name": "Only Name"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = put_json_auth(
        test.app(),
        "/api/v1/user/me",
        &token,
        json!({"email": "moved@example.com", "password": TEST_PASSWORD, "name": "Moved"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["email"], "moved@example.com");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_patch_me_to_taken_email_is_400_and_changes_nothing(pool: PgPool) {
    let test = common::build_test_app(pool);
    register_and_login(&test, "taken@example.com").await;
    let token = register_and_login(&test, "mine@example.com").await;

    let response = patch_json_auth(
        test.app(),
        "/api/v1/user/me",
        &token,
        json!({"email": "taken@EXAMPLE.com", "name": "Changed", "password": "otherpass"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = get_auth(test.app(), "/api/v1/user/me", &token).await;
    let json = body_json(response).await;
    assert_eq!(json["email"], "mine@example.com");
    assert_eq!(json["name"], "Test User");

    let response = post_json(
        test.app(),
        "/api/v1/user/token",
        json!({"email": "mine@example.com", "password": TEST_PASSWORD}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_put_me_with_own_email_is_allowed(pool: PgPool) {
    let test = common::build_test_app(pool);
    let token = register_and_login(&test, "same@example.com").await;

    let response = put_json_auth(
        test.app(),
        "/api/v1/user/me",
        &token,
        json!({"email": "same@example.com", "password": TEST_PASSWORD, "name": "Same"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["name"], "Same");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_deactivated_user_token_is_rejected(pool: PgPool) {
    let test = common::build_test_app(pool.clone());
    let token = register_and_login(&test, "inactive@example.com").await;

    sqlx::query("UPDATE users SET is_active = FALSE WHERE email = $1")
        .bind("inactive@example.com")
        .execute(&pool)
        .await
        .unwrap();

    let response = get_auth(test.app(), "/api/v1/user/me", &token).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let response = get_auth(test.app(), "/api/v1/recipes", &token).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_deleted_user_token_is_rejected(pool: PgPool) {
    let test = common::build_test_app(pool.clone());
    let token = register_and_login(&test, "deleted@example.com").await;

    sqlx::query("DELETE FROM users WHERE email = $1")
        .bind("deleted@example.com")
        .execute(&pool)
        .await
        .unwrap();

    let response = get_auth(test.app(), "/api/v1/makeups", &token).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
