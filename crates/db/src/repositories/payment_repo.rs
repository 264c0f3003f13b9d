//! Repository for the `payments` ledger.

use kplus_core::types::DbId;
use sqlx::PgPool;

use crate::models::payment::Payment;

/// Provides existence checks and inserts for the payment ledger.
pub struct PaymentRepo;

impl PaymentRepo {
    /// Check whether a payment row exists for an (account, course) pair.
    pub async fn exists(
        pool: &PgPool,
        account_id: DbId,
        course_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM payments WHERE account_id = $1 AND course_id = $2)",
        )
        .bind(account_id)
        .bind(course_id)
        .fetch_one(pool)
        .await
    }

    /// Record that an account has unlocked a course.
    ///
    /// The `uq_payments_account_course` constraint rejects a duplicate
    /// charge even when two requests race past the handler's check.
    pub async fn create(
        pool: &PgPool,
        account_id: DbId,
        course_id: DbId,
    ) -> Result<Payment, sqlx::Error> {
        sqlx::query_as::<_, Payment>(
            "INSERT INTO payments (account_id, course_id) \
             VALUES ($1, $2) \
             RETURNING id, account_id, course_id, created_at",
        )
        .bind(account_id)
        .bind(course_id)
        .fetch_one(pool)
        .await
    }
}
