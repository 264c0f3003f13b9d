//! Shared shape of the lookup/reference tables.

use kplus_core::types::DbId;
use serde::Serialize;
use sqlx::FromRow;

/// A row from any of the seeded `(id, label)` lookup tables.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct LookupRow {
    pub id: DbId,
    pub label: String,
}
