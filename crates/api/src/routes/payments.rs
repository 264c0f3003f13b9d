//! Route definitions for the `/payments` ledger.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::payments;
use crate::state::AppState;

/// Routes mounted at `/payments`. All require auth.
///
/// ```text
/// GET  /check  -> check (?course_id=)
/// POST /       -> record
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/check", get(payments::check))
        .route("/", post(payments::record))
}
