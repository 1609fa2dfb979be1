//! Repository for the `best_practices` table.

use capkb_core::practice::Content;
use capkb_core::store::{ContentUpdate, PracticeFilter};
use capkb_core::types::DbId;
use sqlx::PgPool;

use crate::models::practice::PracticeRow;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, category, practice, rationale, added_by, added_on, \
                       last_edited_by, last_edited_on, edit_count";

/// Provides CRUD operations for best practices.
pub struct PracticeRepo;

impl PracticeRepo {
    /// Insert a new practice, returning the created row.
    ///
    /// `content` is stored as given; callers validate and trim it first.
    pub async fn create(
        pool: &PgPool,
        content: &Content,
        added_by: &str,
    ) -> Result<PracticeRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO best_practices (category, practice, rationale, added_by)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PracticeRow>(&query)
            .bind(&content.category)
            .bind(&content.practice)
            .bind(&content.rationale)
            .bind(added_by)
            .fetch_one(pool)
            .await
    }

    /// Find a practice by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<PracticeRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM best_practices WHERE id = $1");
        sqlx::query_as::<_, PracticeRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List practices in id order, applying any filter fields that are set.
    ///
    /// The search term matches case-insensitively anywhere in the practice
    /// text or the rationale; `strpos` keeps `%` and `_` literal.
    pub async fn list(
        pool: &PgPool,
        filter: &PracticeFilter,
    ) -> Result<Vec<PracticeRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM best_practices
             WHERE ($1::TEXT IS NULL
                    OR strpos(lower(practice), lower($1)) > 0
                    OR strpos(lower(rationale), lower($1)) > 0)
               AND ($2::TEXT IS NULL OR category = $2)
               AND ($3::TEXT IS NULL OR added_by = $3)
             ORDER BY id"
        );
        sqlx::query_as::<_, PracticeRow>(&query)
            .bind(filter.search_term())
            .bind(filter.category())
            .bind(filter.added_by())
            .fetch_all(pool)
            .await
    }

    /// Apply `update` only if the stored content still equals `expected`.
    ///
    /// A single `UPDATE`: a concurrent writer on the same row blocks until the
    /// first commits, then re-checks the `WHERE` clause against the new row
    /// version, so at most one of two racing updates matches.
    ///
    /// Returns `None` if nothing matched (changed content or missing row).
    pub async fn conditional_update(
        pool: &PgPool,
        id: DbId,
        expected: &Content,
        update: &ContentUpdate,
    ) -> Result<Option<PracticeRow>, sqlx::Error> {
        let query = format!(
            "UPDATE best_practices SET
                category = $5,
                practice = $6,
                rationale = $7,
                last_edited_by = $8,
                last_edited_on = $9,
                edit_count = edit_count + 1
             WHERE id = $1 AND category = $2 AND practice = $3 AND rationale = $4
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PracticeRow>(&query)
            .bind(id)
            .bind(&expected.category)
            .bind(&expected.practice)
            .bind(&expected.rationale)
            .bind(&update.content.category)
            .bind(&update.content.practice)
            .bind(&update.content.rationale)
            .bind(&update.editor)
            .bind(update.edited_at)
            .fetch_optional(pool)
            .await
    }

    /// Permanently delete a practice by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM best_practices WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
