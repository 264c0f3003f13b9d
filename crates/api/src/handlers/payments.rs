//! Handlers for the simulated payment ledger.
//!
//! A payment row is a per-viewer unlock fact. No gateway is involved;
//! the card form on the client is presentation only.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use kplus_core::course::MONETIZATION_FREE;
use kplus_core::error::CoreError;
use kplus_core::types::DbId;
use kplus_db::models::payment::Payment;
use kplus_db::repositories::{CourseRepo, PaymentRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Query parameters for `GET /payments/check`.
#[derive(Debug, Deserialize)]
pub struct CheckParams {
    pub course_id: DbId,
}

/// Request body for `POST /payments`.
#[derive(Debug, Deserialize)]
pub struct RecordPaymentRequest {
    pub course_id: DbId,
}

/// Response payload for the access check.
#[derive(Debug, Serialize)]
pub struct HasPaidResponse {
    pub has_paid: bool,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/payments/check?course_id=
///
/// Whether the authenticated account may read the course's pages. Free
/// courses are readable unconditionally.
pub async fn check(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<CheckParams>,
) -> AppResult<Json<DataResponse<HasPaidResponse>>> {
    let monetization = CourseRepo::find_monetization(&state.pool, params.course_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Course",
            id: params.course_id,
        }))?;

    let has_paid = monetization == MONETIZATION_FREE
        || PaymentRepo::exists(&state.pool, auth.account_id, params.course_id).await?;

    Ok(Json(DataResponse {
        data: HasPaidResponse { has_paid },
    }))
}

/// POST /api/v1/payments
///
/// Record that the authenticated account has unlocked a course. A
/// second payment for the same pair is a 409.
pub async fn record(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<RecordPaymentRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Payment>>)> {
    if !CourseRepo::exists(&state.pool, input.course_id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Course",
            id: input.course_id,
        }));
    }
    if PaymentRepo::exists(&state.pool, auth.account_id, input.course_id).await? {
        return Err(AppError::Core(CoreError::Conflict(
            "Course already purchased".into(),
        )));
    }

    let payment = PaymentRepo::create(&state.pool, auth.account_id, input.course_id).await?;
    tracing::info!(
        account_id = auth.account_id,
        course_id = input.course_id,
        "Payment recorded"
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: payment })))
}
