//! Handler for support-ticket intake.
//!
//! Intake only: tickets have no update, delete, or workflow surface.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use kplus_core::error::CoreError;
use kplus_core::support::{validate_description, STATUS_OPEN};
use kplus_db::models::support_ticket::{CreateSupportTicket, SupportTicket};
use kplus_db::repositories::{AccountRepo, CourseRepo, LookupRepo, SupportRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/support
///
/// File a new ticket. Every referenced entity must exist before the
/// insert; on any failure no row is written. The status defaults to
/// open when omitted.
pub async fn file_ticket(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateSupportTicket>,
) -> AppResult<(StatusCode, Json<DataResponse<SupportTicket>>)> {
    validate_description(&input.description)?;

    if !LookupRepo::support_type_exists(&state.pool, input.type_id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "SupportType",
            id: input.type_id,
        }));
    }
    if !CourseRepo::exists(&state.pool, input.course_id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Course",
            id: input.course_id,
        }));
    }
    if !AccountRepo::exists(&state.pool, auth.account_id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Account",
            id: auth.account_id,
        }));
    }

    let status_id = input.status_id.unwrap_or(STATUS_OPEN);
    if !LookupRepo::support_status_exists(&state.pool, status_id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "SupportStatus",
            id: status_id,
        }));
    }

    let ticket = SupportRepo::create(
        &state.pool,
        auth.account_id,
        input.type_id,
        input.course_id,
        status_id,
        &input.description,
    )
    .await?;
    tracing::info!(id = ticket.id, account_id = auth.account_id, "Support ticket filed");

    Ok((StatusCode::CREATED, Json(DataResponse { data: ticket })))
}
