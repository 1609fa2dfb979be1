//! Record-store contract shared by every storage backend.
//!
//! [`RecordStore`] is the minimal surface the conflict-aware editor needs:
//! read by id, conditional update, delete. [`PracticeStore`] adds what the
//! rest of the application uses (create, list, health). Both are object safe
//! so a backend can be picked at start-up and shared as `Arc<dyn PracticeStore>`.

use async_trait::async_trait;

use crate::practice::{Content, Practice};
use crate::types::{DbId, Timestamp};

/// Failure of the storage backend itself.
///
/// Routine outcomes (missing record, failed compare) are not errors; they are
/// reported through return values.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Fields written by a successful conditional update.
///
/// `edit_count` is not part of it: the store increments the stored value.
#[derive(Debug, Clone)]
pub struct ContentUpdate {
    pub content: Content,
    pub editor: String,
    pub edited_at: Timestamp,
}

/// Result of [`RecordStore::conditional_update`].
#[derive(Debug, Clone, PartialEq)]
pub enum ConditionalUpdate {
    /// The stored content matched and the update was applied.
    Updated(Practice),
    /// Nothing was written: either the content changed or the record is gone.
    NoMatch,
}

#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Fetch a record by id.
    async fn get(&self, id: DbId) -> StoreResult<Option<Practice>>;

    /// Apply `update` iff the stored content of `id` equals `expected` exactly.
    ///
    /// The compare and the write must be one atomic step with respect to
    /// other callers touching the same id.
    async fn conditional_update(
        &self,
        id: DbId,
        expected: &Content,
        update: &ContentUpdate,
    ) -> StoreResult<ConditionalUpdate>;

    /// Remove a record. Returns `true` if it existed.
    async fn delete(&self, id: DbId) -> StoreResult<bool>;
}

/// Listing filter. Empty fields do not filter.
#[derive(Debug, Clone, Default)]
pub struct PracticeFilter {
    /// Case-insensitive substring of the practice text or the rationale.
    pub search: Option<String>,
    pub category: Option<String>,
    pub added_by: Option<String>,
}

impl PracticeFilter {
    pub fn search_term(&self) -> Option<&str> {
        self.search.as_deref().filter(|s| !s.is_empty())
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref().filter(|s| !s.is_empty())
    }

    pub fn added_by(&self) -> Option<&str> {
        self.added_by.as_deref().filter(|s| !s.is_empty())
    }

    /// In-process evaluation, used by the memory and file backends.
    pub fn matches(&self, practice: &Practice) -> bool {
        if let Some(term) = self.search_term() {
            let term = term.to_lowercase();
            let hit = practice.content.practice.to_lowercase().contains(&term)
                || practice.content.rationale.to_lowercase().contains(&term);
            if !hit {
                return false;
            }
        }
        if let Some(category) = self.category() {
            if practice.content.category != category {
                return false;
            }
        }
        if let Some(added_by) = self.added_by() {
            if practice.added_by != added_by {
                return false;
            }
        }
        true
    }
}

#[async_trait]
pub trait PracticeStore: RecordStore {
    /// Insert a new practice with `edit_count = 0` and no editor.
    ///
    /// `content` must already be validated and trimmed.
    async fn create(&self, content: &Content, added_by: &str) -> StoreResult<Practice>;

    /// Practices matching `filter`, ordered by id ascending.
    async fn list(&self, filter: &PracticeFilter) -> StoreResult<Vec<Practice>>;

    /// Cheap liveness probe of the backend.
    async fn health_check(&self) -> StoreResult<()>;
}
