//! Domain error taxonomy shared by the repository and API layers.

use crate::types::DbId;

/// Domain-level error. The API layer maps each variant onto an HTTP
/// status and a stable error code.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A referenced entity does not exist.
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: DbId },

    /// Malformed or missing input; the message names the offending field.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The operation would violate a uniqueness rule (duplicate login,
    /// duplicate payment).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Missing or invalid credentials.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Authenticated but not allowed.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Unexpected internal failure. Detail is logged server-side only.
    #[error("Internal error: {0}")]
    Internal(String),
}
