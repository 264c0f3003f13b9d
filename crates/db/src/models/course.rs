//! Course aggregate models and DTOs.

use kplus_core::types::{DbId, Timestamp};
use serde::Deserialize;
use sqlx::FromRow;

/// A row from the `courses` table.
#[derive(Debug, Clone, FromRow)]
pub struct Course {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub icon: Option<Vec<u8>>,
    pub author_id: DbId,
    pub monetization_type_id: DbId,
    pub price: Option<i64>,
    pub category_id: DbId,
    pub age_band_id: DbId,
    pub level_id: DbId,
    pub created_at: Timestamp,
}

/// Metadata for creating or replacing a course. Page bodies travel
/// separately since they are persisted as an ordered set.
#[derive(Debug)]
pub struct CourseInput {
    pub title: String,
    pub description: Option<String>,
    /// `None` on replace means "keep the stored icon".
    pub icon: Option<Vec<u8>>,
    pub monetization_type_id: DbId,
    pub price: Option<i64>,
    pub category_id: DbId,
    pub age_band_id: DbId,
    pub level_id: DbId,
}

/// Course metadata joined with resolved lookup labels, for the detail view.
#[derive(Debug, Clone, FromRow)]
pub struct CourseDetailRow {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub icon: Option<Vec<u8>>,
    pub author_id: DbId,
    pub monetization_type_id: DbId,
    pub monetization_label: String,
    pub price: Option<i64>,
    pub category_id: DbId,
    pub category_label: String,
    pub age_band_id: DbId,
    pub age_band_label: String,
    pub level_id: DbId,
    pub level_label: String,
    pub created_at: Timestamp,
}

/// One course in the browse/search listing. No page bodies.
#[derive(Debug, Clone, FromRow)]
pub struct CourseSummaryRow {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub icon: Option<Vec<u8>>,
    pub monetization_type_id: DbId,
    pub monetization_label: String,
    pub price: Option<i64>,
    pub category_label: String,
    pub age_band_label: String,
    pub level_label: String,
    pub created_at: Timestamp,
}

/// Lightweight (id, title, created_at) tuple for the author's own list.
#[derive(Debug, Clone, FromRow)]
pub struct AuthorCourseRow {
    pub id: DbId,
    pub title: String,
    pub created_at: Timestamp,
}

/// Query parameters for the course listing.
///
/// Absent filters mean "no restriction on that dimension". The price
/// range only applies when the monetization filter selects paid courses.
#[derive(Debug, Default, Deserialize)]
pub struct CourseListParams {
    pub search: Option<String>,
    pub category: Option<DbId>,
    pub age: Option<DbId>,
    pub level: Option<DbId>,
    pub monetization: Option<DbId>,
    pub price_min: Option<i64>,
    pub price_max: Option<i64>,
}
