//! Route definition for support-ticket intake.

use axum::routing::post;
use axum::Router;

use crate::handlers::support;
use crate::state::AppState;

/// Routes mounted at `/support`. Requires auth.
///
/// ```text
/// POST /  -> file_ticket
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", post(support::file_ticket))
}
