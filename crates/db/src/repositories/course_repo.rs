//! Repository for the course aggregate: `courses` plus its ordered
//! `pages` set, written as one transaction.

use kplus_core::course::MONETIZATION_PAID;
use kplus_core::types::DbId;
use sqlx::PgPool;

use crate::models::course::{
    AuthorCourseRow, Course, CourseDetailRow, CourseInput, CourseListParams, CourseSummaryRow,
};
use crate::models::page::Page;

/// Column list for `courses` queries.
const COLUMNS: &str = "\
    id, title, description, icon, author_id, monetization_type_id, \
    price, category_id, age_band_id, level_id, created_at";

/// Joined projection shared by the detail and summary queries.
const LABELED_SELECT: &str = "\
    c.id, c.title, c.description, c.icon, c.author_id, \
    c.monetization_type_id, m.label AS monetization_label, c.price, \
    c.category_id, cat.label AS category_label, \
    c.age_band_id, a.label AS age_band_label, \
    c.level_id, l.label AS level_label, c.created_at \
    FROM courses c \
    JOIN monetization_types m ON m.id = c.monetization_type_id \
    JOIN categories cat ON cat.id = c.category_id \
    JOIN age_bands a ON a.id = c.age_band_id \
    JOIN levels l ON l.id = c.level_id";

/// Provides aggregate operations for courses and their pages.
pub struct CourseRepo;

impl CourseRepo {
    /// Create a course with its ordered pages in one transaction,
    /// returning the new course id.
    ///
    /// Page numbers are assigned from list position, 1-based, so a
    /// committed course always has contiguous numbering.
    pub async fn create(
        pool: &PgPool,
        author_id: DbId,
        input: &CourseInput,
        pages: &[String],
    ) -> Result<DbId, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let course_id: DbId = sqlx::query_scalar(
            "INSERT INTO courses \
                (title, description, icon, author_id, monetization_type_id, \
                 price, category_id, age_band_id, level_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
             RETURNING id",
        )
        .bind(&input.title)
        .bind(&input.description)
        .bind(&input.icon)
        .bind(author_id)
        .bind(input.monetization_type_id)
        .bind(input.price)
        .bind(input.category_id)
        .bind(input.age_band_id)
        .bind(input.level_id)
        .fetch_one(&mut *tx)
        .await?;

        Self::insert_pages(&mut tx, course_id, pages).await?;

        tx.commit().await?;
        Ok(course_id)
    }

    /// Replace a course's metadata and its entire page set in one
    /// transaction. Returns `false` if no course with `id` exists.
    ///
    /// A `None` icon keeps the stored icon; pages are always replaced
    /// wholesale (delete-all-then-reinsert) with fresh 1..N numbering.
    pub async fn replace(
        pool: &PgPool,
        id: DbId,
        input: &CourseInput,
        pages: &[String],
    ) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let updated: Option<DbId> = sqlx::query_scalar(
            "UPDATE courses SET \
                title = $2, description = $3, icon = COALESCE($4, icon), \
                monetization_type_id = $5, price = $6, \
                category_id = $7, age_band_id = $8, level_id = $9 \
             WHERE id = $1 \
             RETURNING id",
        )
        .bind(id)
        .bind(&input.title)
        .bind(&input.description)
        .bind(&input.icon)
        .bind(input.monetization_type_id)
        .bind(input.price)
        .bind(input.category_id)
        .bind(input.age_band_id)
        .bind(input.level_id)
        .fetch_optional(&mut *tx)
        .await?;

        if updated.is_none() {
            return Ok(false);
        }

        sqlx::query("DELETE FROM pages WHERE course_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        Self::insert_pages(&mut tx, id, pages).await?;

        tx.commit().await?;
        Ok(true)
    }

    /// Find a course row by id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Course>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM courses WHERE id = $1");
        sqlx::query_as::<_, Course>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Check whether a course exists.
    pub async fn exists(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM courses WHERE id = $1)")
            .bind(id)
            .fetch_one(pool)
            .await
    }

    /// Fetch a course's monetization type id, if the course exists.
    pub async fn find_monetization(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<DbId>, sqlx::Error> {
        sqlx::query_scalar("SELECT monetization_type_id FROM courses WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Fetch the detail projection with resolved lookup labels.
    pub async fn find_detail(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<CourseDetailRow>, sqlx::Error> {
        let query = format!("SELECT {LABELED_SELECT} WHERE c.id = $1");
        sqlx::query_as::<_, CourseDetailRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a course's pages ordered by page number.
    pub async fn list_pages(pool: &PgPool, course_id: DbId) -> Result<Vec<Page>, sqlx::Error> {
        sqlx::query_as::<_, Page>(
            "SELECT id, course_id, page_number, content \
             FROM pages WHERE course_id = $1 \
             ORDER BY page_number",
        )
        .bind(course_id)
        .fetch_all(pool)
        .await
    }

    /// List course summaries matching the given filters.
    ///
    /// Title search is a case-insensitive substring match. The price
    /// range is honored only when the monetization filter selects paid
    /// courses and both bounds are present.
    pub async fn list_filtered(
        pool: &PgPool,
        params: &CourseListParams,
    ) -> Result<Vec<CourseSummaryRow>, sqlx::Error> {
        let mut conditions: Vec<String> = Vec::new();
        let mut param_idx: usize = 1;

        let search = params
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty());
        if search.is_some() {
            conditions.push(format!("c.title ILIKE ${param_idx}"));
            param_idx += 1;
        }
        if params.category.is_some() {
            conditions.push(format!("c.category_id = ${param_idx}"));
            param_idx += 1;
        }
        if params.age.is_some() {
            conditions.push(format!("c.age_band_id = ${param_idx}"));
            param_idx += 1;
        }
        if params.level.is_some() {
            conditions.push(format!("c.level_id = ${param_idx}"));
            param_idx += 1;
        }
        if params.monetization.is_some() {
            conditions.push(format!("c.monetization_type_id = ${param_idx}"));
            param_idx += 1;
        }

        let price_range = match (params.monetization, params.price_min, params.price_max) {
            (Some(MONETIZATION_PAID), Some(min), Some(max)) => {
                conditions.push(format!(
                    "c.price IS NOT NULL AND c.price >= ${param_idx} AND c.price <= ${}",
                    param_idx + 1
                ));
                Some((min, max))
            }
            _ => None,
        };

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let query =
            format!("SELECT {LABELED_SELECT} {where_clause} ORDER BY c.created_at DESC, c.id DESC");

        let mut q = sqlx::query_as::<_, CourseSummaryRow>(&query);

        if let Some(s) = search {
            q = q.bind(format!("%{s}%"));
        }
        if let Some(v) = params.category {
            q = q.bind(v);
        }
        if let Some(v) = params.age {
            q = q.bind(v);
        }
        if let Some(v) = params.level {
            q = q.bind(v);
        }
        if let Some(v) = params.monetization {
            q = q.bind(v);
        }
        if let Some((min, max)) = price_range {
            q = q.bind(min).bind(max);
        }

        q.fetch_all(pool).await
    }

    /// List an author's courses newest-first, optionally filtered by a
    /// case-insensitive title substring.
    pub async fn list_by_author(
        pool: &PgPool,
        author_id: DbId,
        search: Option<&str>,
    ) -> Result<Vec<AuthorCourseRow>, sqlx::Error> {
        let search = search.map(str::trim).filter(|s| !s.is_empty());

        let query = if search.is_some() {
            "SELECT id, title, created_at FROM courses \
             WHERE author_id = $1 AND title ILIKE $2 \
             ORDER BY created_at DESC, id DESC"
        } else {
            "SELECT id, title, created_at FROM courses \
             WHERE author_id = $1 \
             ORDER BY created_at DESC, id DESC"
        };

        let mut q = sqlx::query_as::<_, AuthorCourseRow>(query).bind(author_id);
        if let Some(s) = search {
            q = q.bind(format!("%{s}%"));
        }
        q.fetch_all(pool).await
    }

    /// Delete a course. Pages, favorites, payments, and tickets go with
    /// it via FK cascade. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM courses WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // -----------------------------------------------------------------------
    // Internal helpers
    // -----------------------------------------------------------------------

    /// Insert page bodies with sequential 1-based numbers inside an
    /// existing transaction.
    async fn insert_pages(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        course_id: DbId,
        pages: &[String],
    ) -> Result<(), sqlx::Error> {
        for (idx, body) in pages.iter().enumerate() {
            sqlx::query(
                "INSERT INTO pages (course_id, page_number, content) VALUES ($1, $2, $3)",
            )
            .bind(course_id)
            .bind((idx + 1) as i32)
            .bind(body.as_bytes())
            .execute(&mut **tx)
            .await?;
        }
        Ok(())
    }
}
