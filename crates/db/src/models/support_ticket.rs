//! Support ticket model and DTOs.

use kplus_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `support_tickets` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SupportTicket {
    pub id: DbId,
    pub type_id: DbId,
    pub description: String,
    pub course_id: DbId,
    pub account_id: DbId,
    pub status_id: DbId,
    pub created_at: Timestamp,
}

/// DTO for filing a new ticket. The account comes from the request's
/// auth context, never from the body.
#[derive(Debug, Deserialize)]
pub struct CreateSupportTicket {
    pub type_id: DbId,
    pub description: String,
    pub course_id: DbId,
    /// Defaults to the open status when omitted.
    pub status_id: Option<DbId>,
}
