//! Read-only access to the seeded lookup/reference tables.

use kplus_core::types::DbId;
use sqlx::PgPool;

use crate::models::lookup::LookupRow;

/// Provides listings and existence checks for reference data.
pub struct LookupRepo;

impl LookupRepo {
    pub async fn list_categories(pool: &PgPool) -> Result<Vec<LookupRow>, sqlx::Error> {
        Self::list(pool, "categories").await
    }

    pub async fn list_age_bands(pool: &PgPool) -> Result<Vec<LookupRow>, sqlx::Error> {
        Self::list(pool, "age_bands").await
    }

    pub async fn list_levels(pool: &PgPool) -> Result<Vec<LookupRow>, sqlx::Error> {
        Self::list(pool, "levels").await
    }

    pub async fn list_monetization_types(pool: &PgPool) -> Result<Vec<LookupRow>, sqlx::Error> {
        Self::list(pool, "monetization_types").await
    }

    pub async fn list_support_types(pool: &PgPool) -> Result<Vec<LookupRow>, sqlx::Error> {
        Self::list(pool, "support_types").await
    }

    pub async fn list_support_statuses(pool: &PgPool) -> Result<Vec<LookupRow>, sqlx::Error> {
        Self::list(pool, "support_statuses").await
    }

    /// Check whether a support type id exists.
    pub async fn support_type_exists(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        Self::exists(pool, "support_types", id).await
    }

    /// Check whether a support status id exists.
    pub async fn support_status_exists(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        Self::exists(pool, "support_statuses", id).await
    }

    // -----------------------------------------------------------------------
    // Internal helpers (table names are static literals, never user input)
    // -----------------------------------------------------------------------

    async fn list(pool: &PgPool, table: &'static str) -> Result<Vec<LookupRow>, sqlx::Error> {
        let query = format!("SELECT id, label FROM {table} ORDER BY id");
        sqlx::query_as::<_, LookupRow>(&query).fetch_all(pool).await
    }

    async fn exists(pool: &PgPool, table: &'static str, id: DbId) -> Result<bool, sqlx::Error> {
        let query = format!("SELECT EXISTS (SELECT 1 FROM {table} WHERE id = $1)");
        sqlx::query_scalar(&query).bind(id).fetch_one(pool).await
    }
}
