//! Page entity model.

use kplus_core::types::DbId;
use sqlx::FromRow;

/// A row from the `pages` table. `content` is the raw UTF-8 bytes of
/// the markdown body; decoding happens at the presentation boundary.
#[derive(Debug, Clone, FromRow)]
pub struct Page {
    pub id: DbId,
    pub course_id: DbId,
    pub page_number: i32,
    pub content: Vec<u8>,
}
