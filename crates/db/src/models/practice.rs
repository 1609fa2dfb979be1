//! Practice row model.

use capkb_core::practice::{Content, Practice};
use capkb_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `best_practices` table.
#[derive(Debug, Clone, FromRow)]
pub struct PracticeRow {
    pub id: DbId,
    pub category: String,
    pub practice: String,
    pub rationale: String,
    pub added_by: String,
    pub added_on: Timestamp,
    pub last_edited_by: Option<String>,
    pub last_edited_on: Option<Timestamp>,
    pub edit_count: i64,
}

impl From<PracticeRow> for Practice {
    fn from(row: PracticeRow) -> Self {
        Practice {
            id: row.id,
            content: Content {
                category: row.category,
                practice: row.practice,
                rationale: row.rationale,
            },
            added_by: row.added_by,
            added_on: row.added_on,
            last_edited_by: row.last_edited_by,
            last_edited_on: row.last_edited_on,
            edit_count: row.edit_count,
        }
    }
}
