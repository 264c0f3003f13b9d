//! Shared helpers for HTTP integration tests.
//!
//! Builds the production router (same middleware stack as `main.rs`)
//! on top of the per-test database that `#[sqlx::test]` provides, and
//! offers small request/response helpers around `tower::ServiceExt::oneshot`.

#![allow(dead_code)] // each test binary uses a subset of these helpers

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use kplus_api::auth::jwt::{generate_access_token, JwtConfig};
use kplus_api::auth::password::hash_password;
use kplus_api::config::ServerConfig;
use kplus_api::router::build_app_router;
use kplus_api::state::AppState;
use kplus_core::roles::ROLE_MEMBER;
use kplus_core::types::DbId;
use kplus_db::models::account::{Account, CreateAccount};
use kplus_db::models::course::CourseInput;
use kplus_db::repositories::{AccountRepo, CourseRepo};

/// Build a test `ServerConfig` with safe defaults and a fixed JWT secret.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "integration-test-secret-not-for-production".to_string(),
            access_token_expiry_mins: 60,
        },
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool.
///
/// This mirrors the router construction in `main.rs` so integration tests
/// exercise the same middleware stack (CORS, request ID, timeout, tracing,
/// panic recovery) that production uses.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Create a member account directly in the database and return the row
/// plus the plaintext password used.
pub async fn create_test_account(pool: &PgPool, login: &str) -> (Account, String) {
    let password = "test_password_123!";
    let hashed = hash_password(password).expect("hashing should succeed");
    let account = AccountRepo::create(
        pool,
        &CreateAccount {
            login: login.to_string(),
            password_hash: hashed,
            role_id: ROLE_MEMBER,
        },
    )
    .await
    .expect("account creation should succeed");
    (account, password.to_string())
}

/// Mint a bearer token for an account without going through the login
/// endpoint. Uses the same JWT config as [`build_test_app`].
pub fn token_for(account: &Account) -> String {
    generate_access_token(account.id, account.role_id, &test_config().jwt)
        .expect("token generation should succeed")
}

/// Insert a course with the given monetization/price and page bodies
/// directly through the repository, returning its id.
pub async fn create_test_course(
    pool: &PgPool,
    author_id: DbId,
    title: &str,
    monetization_type_id: DbId,
    price: Option<i64>,
    pages: &[&str],
) -> DbId {
    let input = CourseInput {
        title: title.to_string(),
        description: Some("test course".to_string()),
        icon: None,
        monetization_type_id,
        price,
        category_id: 1,
        age_band_id: 1,
        level_id: 1,
    };
    let bodies: Vec<String> = pages.iter().map(|p| (*p).to_string()).collect();
    CourseRepo::create(pool, author_id, &input, &bodies)
        .await
        .expect("course creation should succeed")
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response {
    app.oneshot(
        Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response {
    app.oneshot(
        Request::builder()
            .method("GET")
            .uri(uri)
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    app.oneshot(
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response {
    app.oneshot(
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    app.oneshot(
        Request::builder()
            .method("PUT")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response {
    app.oneshot(
        Request::builder()
            .method("PUT")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response {
    app.oneshot(
        Request::builder()
            .method("DELETE")
            .uri(uri)
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Read the response body and parse it as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should be readable")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be valid JSON")
}

// ---------------------------------------------------------------------------
// Multipart helpers (course create/replace)
// ---------------------------------------------------------------------------

/// Fixed boundary for hand-built multipart bodies.
pub const BOUNDARY: &str = "kplus-test-boundary-7MA4YWxkTrZu0gW";

/// Incrementally builds a `multipart/form-data` body.
#[derive(Default)]
pub struct MultipartForm {
    buf: Vec<u8>,
}

impl MultipartForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.buf.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
        self
    }

    pub fn file(mut self, name: &str, filename: &str, data: &[u8]) -> Self {
        self.buf.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; \
                 filename=\"{filename}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        self.buf.extend_from_slice(data);
        self.buf.extend_from_slice(b"\r\n");
        self
    }

    pub fn build(mut self) -> Vec<u8> {
        self.buf
            .extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        self.buf
    }
}

/// Send a multipart request with a bearer token.
pub async fn send_multipart_auth(
    app: Router,
    method: &str,
    uri: &str,
    body: Vec<u8>,
    token: &str,
) -> Response {
    app.oneshot(
        Request::builder()
            .method(method)
            .uri(uri)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .body(Body::from(body))
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Assert the standard error envelope: `{"error": ..., "code": ...}`.
pub async fn assert_error_code(response: Response, status: StatusCode, code: &str) {
    assert_eq!(response.status(), status);
    let json = body_json(response).await;
    assert_eq!(json["code"], code, "unexpected error code: {json}");
    assert!(json["error"].is_string(), "error message must be a string");
}
