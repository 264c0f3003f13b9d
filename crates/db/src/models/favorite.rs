//! Favorites/history ledger models.

use kplus_core::types::DbId;
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `favorites` table.
///
/// `viewed = 0` means the course is merely in the account's history;
/// `viewed = 1` means it was explicitly favorited.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Favorite {
    pub id: DbId,
    pub account_id: DbId,
    pub course_id: DbId,
    pub viewed: i16,
}

/// A ledger row joined with its course's display metadata, for the
/// combined history/favorites view.
#[derive(Debug, Clone, FromRow)]
pub struct FavoriteWithCourse {
    pub id: DbId,
    pub course_id: DbId,
    pub viewed: i16,
    pub title: String,
    pub description: Option<String>,
    pub monetization_type_id: DbId,
    pub price: Option<i64>,
    pub icon: Option<Vec<u8>>,
}
