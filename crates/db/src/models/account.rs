//! Account entity model and DTOs.

use kplus_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `accounts` table.
///
/// Deliberately not `Serialize`: the password hash must never leave the
/// server, so handlers build their own response DTOs.
#[derive(Debug, Clone, FromRow)]
pub struct Account {
    pub id: DbId,
    pub login: String,
    pub password_hash: String,
    pub role_id: DbId,
    pub created_at: Timestamp,
}

/// DTO for inserting a new account.
#[derive(Debug)]
pub struct CreateAccount {
    pub login: String,
    pub password_hash: String,
    pub role_id: DbId,
}
