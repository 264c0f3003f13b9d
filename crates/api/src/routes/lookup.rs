//! Route definitions for the read-only lookup tables.

use axum::routing::get;
use axum::Router;

use crate::handlers::lookup;
use crate::state::AppState;

/// Routes mounted at `/lookup`. All public.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/categories", get(lookup::categories))
        .route("/age-bands", get(lookup::age_bands))
        .route("/levels", get(lookup::levels))
        .route("/monetization-types", get(lookup::monetization_types))
        .route("/support-types", get(lookup::support_types))
        .route("/support-statuses", get(lookup::support_statuses))
}
