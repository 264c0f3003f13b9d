//! Route definitions for the `/courses` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::courses;
use crate::state::AppState;

/// Routes mounted at `/courses`.
///
/// ```text
/// GET    /                    -> list (public)
/// POST   /                    -> create (auth, multipart)
/// GET    /{id}                -> get_detail (public)
/// PUT    /{id}                -> replace (auth, multipart)
/// DELETE /{id}                -> delete (auth)
/// GET    /author/{author_id}  -> list_by_author (public)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(courses::list).post(courses::create))
        .route(
            "/{id}",
            get(courses::get_detail)
                .put(courses::replace)
                .delete(courses::delete),
        )
        .route("/author/{author_id}", get(courses::list_by_author))
}
