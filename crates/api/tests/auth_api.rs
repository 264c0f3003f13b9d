//! HTTP-level integration tests for registration, login, and password
//! change.

mod common;

use axum::http::StatusCode;
use common::{assert_error_code, body_json, post_json, put_json_auth};
use kplus_core::roles::ROLE_MEMBER;
use sqlx::PgPool;

/// Log in via the API and return the parsed response body.
async fn login(app: axum::Router, login: &str, password: &str) -> serde_json::Value {
    let body = serde_json::json!({ "login": login, "password": password });
    let response = post_json(app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await
}

// ---------------------------------------------------------------------------
// Registration
// ---------------------------------------------------------------------------

/// Registration returns 201 with a token and member-role account info.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_register_success(pool: PgPool) {
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "login": "newcomer", "password": "long_enough_pw" });
    let response = post_json(app, "/api/v1/auth/register", body).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert!(json["access_token"].is_string());
    assert!(json["expires_in"].is_number());
    assert_eq!(json["account"]["login"], "newcomer");
    assert_eq!(json["account"]["role_id"], ROLE_MEMBER);
}

/// Registering an already-taken login returns 409 and leaves one row.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_register_duplicate_login(pool: PgPool) {
    let body = serde_json::json!({ "login": "taken", "password": "long_enough_pw" });

    let app = common::build_test_app(pool.clone());
    let first = post_json(app, "/api/v1/auth/register", body.clone()).await;
    assert_eq!(first.status(), StatusCode::CREATED);

    let app = common::build_test_app(pool.clone());
    let second = post_json(app, "/api/v1/auth/register", body).await;
    assert_error_code(second, StatusCode::CONFLICT, "CONFLICT").await;

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM accounts WHERE login = 'taken'")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 1, "duplicate registration must not add a row");
}

/// A too-short password is rejected with a validation error.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_register_short_password(pool: PgPool) {
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "login": "shorty", "password": "abc" });
    let response = post_json(app, "/api/v1/auth/register", body).await;

    assert_error_code(response, StatusCode::BAD_REQUEST, "VALIDATION_ERROR").await;
}

/// A blank login is rejected.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_register_blank_login(pool: PgPool) {
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "login": "   ", "password": "long_enough_pw" });
    let response = post_json(app, "/api/v1/auth/register", body).await;

    assert_error_code(response, StatusCode::BAD_REQUEST, "VALIDATION_ERROR").await;
}

// ---------------------------------------------------------------------------
// Login
// ---------------------------------------------------------------------------

/// Successful login returns the token and account info.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_login_success(pool: PgPool) {
    let (account, password) = common::create_test_account(&pool, "loginuser").await;
    let app = common::build_test_app(pool);

    let json = login(app, "loginuser", &password).await;
    assert!(json["access_token"].is_string());
    assert_eq!(json["account"]["id"], account.id);
    assert_eq!(json["account"]["login"], "loginuser");
}

/// A wrong password returns the same generic 401 as an unknown login.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_login_wrong_password(pool: PgPool) {
    let _ = common::create_test_account(&pool, "wrongpw").await;
    let app = common::build_test_app(pool.clone());

    let body = serde_json::json!({ "login": "wrongpw", "password": "incorrect" });
    let wrong = post_json(app, "/api/v1/auth/login", body).await;
    assert_eq!(wrong.status(), StatusCode::UNAUTHORIZED);
    let wrong_msg = body_json(wrong).await["error"].as_str().unwrap().to_string();

    let app = common::build_test_app(pool);
    let body = serde_json::json!({ "login": "ghost", "password": "incorrect" });
    let unknown = post_json(app, "/api/v1/auth/login", body).await;
    assert_eq!(unknown.status(), StatusCode::UNAUTHORIZED);
    let unknown_msg = body_json(unknown).await["error"].as_str().unwrap().to_string();

    // No account enumeration: both failures read identically.
    assert_eq!(wrong_msg, unknown_msg);
}

// ---------------------------------------------------------------------------
// Password change
// ---------------------------------------------------------------------------

/// Changing the password invalidates the old one for login.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_change_password(pool: PgPool) {
    let (account, old_password) = common::create_test_account(&pool, "rotator").await;
    let token = common::token_for(&account);

    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "new_password": "brand_new_password" });
    let response = put_json_auth(app, "/api/v1/auth/change-password", body, &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // New password works.
    let app = common::build_test_app(pool.clone());
    login(app, "rotator", "brand_new_password").await;

    // Old password no longer does.
    let app = common::build_test_app(pool);
    let body = serde_json::json!({ "login": "rotator", "password": old_password });
    let response = post_json(app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// Password change requires a bearer token.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_change_password_requires_auth(pool: PgPool) {
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "new_password": "brand_new_password" });
    let response = common::put_json(app, "/api/v1/auth/change-password", body).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
