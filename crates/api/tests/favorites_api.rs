//! HTTP-level integration tests for the favorites/history ledger.

mod common;

use axum::http::StatusCode;
use common::{assert_error_code, body_json, get_auth, post_json_auth};
use kplus_core::course::MONETIZATION_FREE;
use sqlx::PgPool;

/// Upserting the same (account, course) pair repeatedly keeps one row
/// and updates the viewed flag in place.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_upsert_is_idempotent(pool: PgPool) {
    let (account, _) = common::create_test_account(&pool, "reader").await;
    let token = common::token_for(&account);
    let course_id = common::create_test_course(
        &pool,
        account.id,
        "Watched",
        MONETIZATION_FREE,
        None,
        &["# A"],
    )
    .await;

    // First touch: history only.
    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "course_id": course_id, "viewed": 0 });
    let response = post_json_auth(app, "/api/v1/favorites", body, &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let first = body_json(response).await;
    assert_eq!(first["data"]["viewed"], 0);

    // Favoriting the same course flips the flag on the same row.
    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "course_id": course_id, "viewed": 1 });
    let response = post_json_auth(app, "/api/v1/favorites", body, &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let second = body_json(response).await;
    assert_eq!(second["data"]["viewed"], 1);
    assert_eq!(second["data"]["id"], first["data"]["id"]);

    let count: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM favorites WHERE account_id = $1 AND course_id = $2",
    )
    .bind(account.id)
    .bind(course_id)
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(count, 1, "repeated upserts must keep a single row");
}

/// A viewed value outside {0,1} is rejected.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_upsert_rejects_bad_viewed(pool: PgPool) {
    let (account, _) = common::create_test_account(&pool, "reader").await;
    let token = common::token_for(&account);
    let course_id =
        common::create_test_course(&pool, account.id, "C", MONETIZATION_FREE, None, &["# A"])
            .await;

    let app = common::build_test_app(pool);
    let body = serde_json::json!({ "course_id": course_id, "viewed": 2 });
    let response = post_json_auth(app, "/api/v1/favorites", body, &token).await;

    assert_error_code(response, StatusCode::BAD_REQUEST, "VALIDATION_ERROR").await;
}

/// Favoriting an unknown course is a 404.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_upsert_unknown_course(pool: PgPool) {
    let (account, _) = common::create_test_account(&pool, "reader").await;
    let token = common::token_for(&account);

    let app = common::build_test_app(pool);
    let body = serde_json::json!({ "course_id": 424242, "viewed": 1 });
    let response = post_json_auth(app, "/api/v1/favorites", body, &token).await;

    assert_error_code(response, StatusCode::NOT_FOUND, "NOT_FOUND").await;
}

/// The list returns only the caller's rows, joined with course metadata.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_list_is_scoped_to_account(pool: PgPool) {
    let (account, _) = common::create_test_account(&pool, "reader").await;
    let (other, _) = common::create_test_account(&pool, "other").await;
    let token = common::token_for(&account);
    let other_token = common::token_for(&other);

    let course_id = common::create_test_course(
        &pool,
        account.id,
        "Shared course",
        MONETIZATION_FREE,
        None,
        &["# A"],
    )
    .await;

    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "course_id": course_id, "viewed": 1 });
    post_json_auth(app, "/api/v1/favorites", body, &token).await;

    let app = common::build_test_app(pool.clone());
    let json = body_json(get_auth(app, "/api/v1/favorites", &token).await).await;
    let items = json["data"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["title"], "Shared course");
    assert_eq!(items[0]["viewed"], 1);

    // The other account sees nothing.
    let app = common::build_test_app(pool);
    let json = body_json(get_auth(app, "/api/v1/favorites", &other_token).await).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 0);
}

/// The ledger requires authentication.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_favorites_require_auth(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = common::get(app, "/api/v1/favorites").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
