//! Repository for the `support_tickets` table.

use kplus_core::types::DbId;
use sqlx::PgPool;

use crate::models::support_ticket::SupportTicket;

/// Column list for `support_tickets` queries.
const COLUMNS: &str = "id, type_id, description, course_id, account_id, status_id, created_at";

/// Provides ticket intake. No update/delete surface exists by design.
pub struct SupportRepo;

impl SupportRepo {
    /// File a new ticket, returning the full row.
    pub async fn create(
        pool: &PgPool,
        account_id: DbId,
        type_id: DbId,
        course_id: DbId,
        status_id: DbId,
        description: &str,
    ) -> Result<SupportTicket, sqlx::Error> {
        let query = format!(
            "INSERT INTO support_tickets \
                (type_id, description, course_id, account_id, status_id) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SupportTicket>(&query)
            .bind(type_id)
            .bind(description)
            .bind(course_id)
            .bind(account_id)
            .bind(status_id)
            .fetch_one(pool)
            .await
    }
}
