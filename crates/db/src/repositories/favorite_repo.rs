//! Repository for the `favorites` ledger.

use kplus_core::types::DbId;
use sqlx::PgPool;

use crate::models::favorite::{Favorite, FavoriteWithCourse};

/// Provides upsert and listing for the favorites/history ledger.
pub struct FavoriteRepo;

impl FavoriteRepo {
    /// Insert or update the ledger row for an (account, course) pair.
    ///
    /// The `uq_favorites_account_course` constraint keeps the pair
    /// unique, so repeated identical calls leave exactly one row.
    pub async fn upsert(
        pool: &PgPool,
        account_id: DbId,
        course_id: DbId,
        viewed: i16,
    ) -> Result<Favorite, sqlx::Error> {
        sqlx::query_as::<_, Favorite>(
            "INSERT INTO favorites (account_id, course_id, viewed) \
             VALUES ($1, $2, $3) \
             ON CONFLICT ON CONSTRAINT uq_favorites_account_course \
             DO UPDATE SET viewed = EXCLUDED.viewed \
             RETURNING id, account_id, course_id, viewed",
        )
        .bind(account_id)
        .bind(course_id)
        .bind(viewed)
        .fetch_one(pool)
        .await
    }

    /// List every ledger row for an account, joined with course display
    /// metadata. The caller splits history from favorites on `viewed`.
    pub async fn list_for_account(
        pool: &PgPool,
        account_id: DbId,
    ) -> Result<Vec<FavoriteWithCourse>, sqlx::Error> {
        sqlx::query_as::<_, FavoriteWithCourse>(
            "SELECT f.id, f.course_id, f.viewed, \
                    c.title, c.description, c.monetization_type_id, c.price, c.icon \
             FROM favorites f \
             JOIN courses c ON c.id = f.course_id \
             WHERE f.account_id = $1 \
             ORDER BY f.id DESC",
        )
        .bind(account_id)
        .fetch_all(pool)
        .await
    }
}
