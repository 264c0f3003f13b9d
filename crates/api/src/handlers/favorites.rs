//! Handlers for the `/favorites` ledger.
//!
//! One ledger serves both views: `viewed = 0` rows are browsing
//! history, `viewed = 1` rows are explicit favorites. The account
//! always comes from the bearer token.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use kplus_core::error::CoreError;
use kplus_core::types::DbId;
use kplus_db::models::favorite::Favorite;
use kplus_db::repositories::{CourseRepo, FavoriteRepo};

use crate::error::{AppError, AppResult};
use crate::handlers::icon_data_uri;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /favorites`.
#[derive(Debug, Deserialize)]
pub struct UpsertFavoriteRequest {
    pub course_id: DbId,
    /// 0 = history only, 1 = favorited.
    pub viewed: i16,
}

/// One ledger row joined with course display metadata.
#[derive(Debug, Serialize)]
pub struct FavoriteCourse {
    pub id: DbId,
    pub course_id: DbId,
    pub viewed: i16,
    pub title: String,
    pub description: Option<String>,
    pub monetization_type_id: DbId,
    pub price: Option<i64>,
    pub icon: Option<String>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/favorites
///
/// Insert or update the ledger row for (account, course). Idempotent:
/// repeated identical calls leave exactly one row.
pub async fn upsert(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<UpsertFavoriteRequest>,
) -> AppResult<Json<DataResponse<Favorite>>> {
    if !(0..=1).contains(&input.viewed) {
        return Err(AppError::Core(CoreError::Validation(
            "Field 'viewed' must be 0 or 1".into(),
        )));
    }
    if !CourseRepo::exists(&state.pool, input.course_id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Course",
            id: input.course_id,
        }));
    }

    let row =
        FavoriteRepo::upsert(&state.pool, auth.account_id, input.course_id, input.viewed).await?;
    tracing::debug!(
        account_id = auth.account_id,
        course_id = input.course_id,
        viewed = input.viewed,
        "Favorite upserted"
    );
    Ok(Json(DataResponse { data: row }))
}

/// GET /api/v1/favorites
///
/// Every ledger row for the authenticated account, newest first.
/// Clients filter `viewed = 1` for the favorites view.
pub async fn list(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<FavoriteCourse>>>> {
    let items: Vec<FavoriteCourse> = FavoriteRepo::list_for_account(&state.pool, auth.account_id)
        .await?
        .into_iter()
        .map(|row| FavoriteCourse {
            id: row.id,
            course_id: row.course_id,
            viewed: row.viewed,
            title: row.title,
            description: row.description,
            monetization_type_id: row.monetization_type_id,
            price: row.price,
            icon: icon_data_uri(row.icon.as_deref()),
        })
        .collect();

    Ok(Json(DataResponse { data: items }))
}
