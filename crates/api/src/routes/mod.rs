pub mod auth;
pub mod courses;
pub mod favorites;
pub mod health;
pub mod lookup;
pub mod payments;
pub mod support;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                 register (public)
/// /auth/login                    login (public)
/// /auth/change-password          change password (requires auth)
///
/// /courses                       list (public), create (auth, multipart)
/// /courses/{id}                  detail (public), replace (auth, multipart),
///                                delete (auth)
/// /courses/author/{author_id}    author's own list (public)
///
/// /favorites                     list, upsert (auth)
///
/// /payments/check                access check (auth)
/// /payments                      record payment (auth)
///
/// /support                       file ticket (auth)
///
/// /lookup/categories             seeded reference data (public)
/// /lookup/age-bands
/// /lookup/levels
/// /lookup/monetization-types
/// /lookup/support-types
/// /lookup/support-statuses
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Account registration, login, password change.
        .nest("/auth", auth::router())
        // Course aggregate: browse, detail, author list, create/replace/delete.
        .nest("/courses", courses::router())
        // Favorites/history ledger.
        .nest("/favorites", favorites::router())
        // Simulated payment ledger.
        .nest("/payments", payments::router())
        // Support ticket intake.
        .nest("/support", support::router())
        // Read-only lookup tables.
        .nest("/lookup", lookup::router())
}
