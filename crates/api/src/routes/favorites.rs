//! Route definitions for the `/favorites` ledger.

use axum::routing::get;
use axum::Router;

use crate::handlers::favorites;
use crate::state::AppState;

/// Routes mounted at `/favorites`. All require auth.
///
/// ```text
/// GET  /  -> list
/// POST /  -> upsert
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(favorites::list).post(favorites::upsert))
}
