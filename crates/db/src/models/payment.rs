//! Payment ledger model.

use kplus_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `payments` table. Existence means the account has
/// unlocked the course.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Payment {
    pub id: DbId,
    pub account_id: DbId,
    pub course_id: DbId,
    pub created_at: Timestamp,
}
