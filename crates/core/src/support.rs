//! Support ticket status constants and validation.

use crate::error::CoreError;
use crate::types::DbId;

/// Default status id for a newly filed ticket.
pub const STATUS_OPEN: DbId = 1;

/// Maximum length for the complaint description (characters).
pub const MAX_DESCRIPTION_LENGTH: usize = 10_000;

/// Validate a ticket description: non-blank and within the length cap.
pub fn validate_description(description: &str) -> Result<(), CoreError> {
    if description.trim().is_empty() {
        return Err(CoreError::Validation(
            "Description must not be empty".into(),
        ));
    }
    if description.chars().count() > MAX_DESCRIPTION_LENGTH {
        return Err(CoreError::Validation(format!(
            "Description exceeds maximum length of {MAX_DESCRIPTION_LENGTH} characters"
        )));
    }
    Ok(())
}
