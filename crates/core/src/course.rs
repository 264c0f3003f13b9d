//! Course monetization constants and aggregate validation.
//!
//! A course together with its ordered pages is one unit of consistency:
//! validation runs over the whole aggregate before any row is written,
//! and the repository persists it in a single transaction.

use crate::error::CoreError;
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Monetization constants
// ---------------------------------------------------------------------------

/// Monetization type id for free courses.
pub const MONETIZATION_FREE: DbId = 1;

/// Monetization type id for paid courses.
pub const MONETIZATION_PAID: DbId = 2;

// ---------------------------------------------------------------------------
// Validation constants
// ---------------------------------------------------------------------------

/// Maximum length for a course title (characters).
pub const MAX_TITLE_LENGTH: usize = 200;

/// Maximum number of pages a single course may carry.
pub const MAX_PAGES: usize = 500;

// ---------------------------------------------------------------------------
// Validation helpers
// ---------------------------------------------------------------------------

/// Validate a course title.
pub fn validate_title(title: &str) -> Result<(), CoreError> {
    if title.trim().is_empty() {
        return Err(CoreError::Validation("Title must not be empty".into()));
    }
    if title.chars().count() > MAX_TITLE_LENGTH {
        return Err(CoreError::Validation(format!(
            "Title exceeds maximum length of {MAX_TITLE_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Validate the ordered page bodies of a course aggregate.
///
/// A course must have at least one page and every page body must be
/// non-blank. Page numbers are assigned from list position, so only the
/// bodies are checked here.
pub fn validate_pages(pages: &[String]) -> Result<(), CoreError> {
    if pages.is_empty() {
        return Err(CoreError::Validation(
            "A course must have at least one page".into(),
        ));
    }
    if pages.len() > MAX_PAGES {
        return Err(CoreError::Validation(format!(
            "A course may have at most {MAX_PAGES} pages"
        )));
    }
    for (idx, body) in pages.iter().enumerate() {
        if body.trim().is_empty() {
            return Err(CoreError::Validation(format!(
                "Page {} content must not be empty",
                idx + 1
            )));
        }
    }
    Ok(())
}

/// Validate the monetization type / price pairing.
///
/// Paid courses require a positive price. For free courses the returned
/// price is `None` regardless of input, so a leftover price from a
/// paid-to-free edit never survives.
pub fn validate_price(
    monetization_type_id: DbId,
    price: Option<i64>,
) -> Result<Option<i64>, CoreError> {
    match monetization_type_id {
        MONETIZATION_FREE => Ok(None),
        MONETIZATION_PAID => match price {
            Some(p) if p > 0 => Ok(Some(p)),
            Some(_) => Err(CoreError::Validation(
                "Price must be positive for a paid course".into(),
            )),
            None => Err(CoreError::Validation(
                "Price is required for a paid course".into(),
            )),
        },
        other => Err(CoreError::Validation(format!(
            "Unknown monetization type id {other}"
        ))),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_title_is_rejected() {
        assert!(validate_title("").is_err());
        assert!(validate_title("   ").is_err());
    }

    #[test]
    fn reasonable_title_is_accepted() {
        assert!(validate_title("Intro to Rust").is_ok());
    }

    #[test]
    fn overlong_title_is_rejected() {
        let title = "x".repeat(MAX_TITLE_LENGTH + 1);
        assert!(validate_title(&title).is_err());
    }

    #[test]
    fn empty_page_list_is_rejected() {
        assert!(validate_pages(&[]).is_err());
    }

    #[test]
    fn blank_page_body_is_rejected() {
        let pages = vec!["# A".to_string(), "  ".to_string()];
        let err = validate_pages(&pages).unwrap_err();
        assert!(err.to_string().contains("Page 2"));
    }

    #[test]
    fn valid_pages_are_accepted() {
        let pages = vec!["# A".to_string(), "# B".to_string()];
        assert!(validate_pages(&pages).is_ok());
    }

    #[test]
    fn free_course_drops_any_price() {
        assert_eq!(validate_price(MONETIZATION_FREE, None).unwrap(), None);
        assert_eq!(validate_price(MONETIZATION_FREE, Some(500)).unwrap(), None);
    }

    #[test]
    fn paid_course_requires_positive_price() {
        assert_eq!(
            validate_price(MONETIZATION_PAID, Some(1500)).unwrap(),
            Some(1500)
        );
        assert!(validate_price(MONETIZATION_PAID, None).is_err());
        assert!(validate_price(MONETIZATION_PAID, Some(0)).is_err());
        assert!(validate_price(MONETIZATION_PAID, Some(-10)).is_err());
    }

    #[test]
    fn unknown_monetization_type_is_rejected() {
        assert!(validate_price(99, Some(100)).is_err());
    }
}
