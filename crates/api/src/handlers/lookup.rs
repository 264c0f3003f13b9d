//! Handlers for the read-only lookup/reference tables.

use axum::extract::State;
use axum::Json;

use kplus_db::models::lookup::LookupRow;
use kplus_db::repositories::LookupRepo;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

type LookupList = Json<DataResponse<Vec<LookupRow>>>;

/// GET /api/v1/lookup/categories
pub async fn categories(State(state): State<AppState>) -> AppResult<LookupList> {
    let items = LookupRepo::list_categories(&state.pool).await?;
    Ok(Json(DataResponse { data: items }))
}

/// GET /api/v1/lookup/age-bands
pub async fn age_bands(State(state): State<AppState>) -> AppResult<LookupList> {
    let items = LookupRepo::list_age_bands(&state.pool).await?;
    Ok(Json(DataResponse { data: items }))
}

/// GET /api/v1/lookup/levels
pub async fn levels(State(state): State<AppState>) -> AppResult<LookupList> {
    let items = LookupRepo::list_levels(&state.pool).await?;
    Ok(Json(DataResponse { data: items }))
}

/// GET /api/v1/lookup/monetization-types
pub async fn monetization_types(State(state): State<AppState>) -> AppResult<LookupList> {
    let items = LookupRepo::list_monetization_types(&state.pool).await?;
    Ok(Json(DataResponse { data: items }))
}

/// GET /api/v1/lookup/support-types
pub async fn support_types(State(state): State<AppState>) -> AppResult<LookupList> {
    let items = LookupRepo::list_support_types(&state.pool).await?;
    Ok(Json(DataResponse { data: items }))
}

/// GET /api/v1/lookup/support-statuses
pub async fn support_statuses(State(state): State<AppState>) -> AppResult<LookupList> {
    let items = LookupRepo::list_support_statuses(&state.pool).await?;
    Ok(Json(DataResponse { data: items }))
}
