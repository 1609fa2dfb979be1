//! In-process record store.
//!
//! [`StoreState`] holds the records and implements the store semantics as
//! plain synchronous methods. [`InMemoryStore`] puts it behind a mutex; the
//! file backend in `capkb-db` reuses the same state and persists it.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::practice::{Content, Practice};
use crate::store::{
    ConditionalUpdate, ContentUpdate, PracticeFilter, PracticeStore, RecordStore, StoreResult,
};
use crate::types::{DbId, Timestamp};

/// All records plus the id allocator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreState {
    /// Highest id ever issued. Ids are never reused, even after deletion.
    last_id: DbId,
    practices: BTreeMap<DbId, Practice>,
}

impl StoreState {
    pub fn get(&self, id: DbId) -> Option<&Practice> {
        self.practices.get(&id)
    }

    pub fn len(&self) -> usize {
        self.practices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.practices.is_empty()
    }

    pub fn insert(&mut self, content: &Content, added_by: &str, added_on: Timestamp) -> Practice {
        self.last_id += 1;
        let practice = Practice {
            id: self.last_id,
            content: content.clone(),
            added_by: added_by.to_string(),
            added_on,
            last_edited_by: None,
            last_edited_on: None,
            edit_count: 0,
        };
        self.practices.insert(practice.id, practice.clone());
        practice
    }

    /// Compare-and-set on the stored content.
    pub fn conditional_update(
        &mut self,
        id: DbId,
        expected: &Content,
        update: &ContentUpdate,
    ) -> ConditionalUpdate {
        let Some(practice) = self.practices.get_mut(&id) else {
            return ConditionalUpdate::NoMatch;
        };
        if practice.content != *expected {
            return ConditionalUpdate::NoMatch;
        }

        practice.content = update.content.clone();
        practice.last_edited_by = Some(update.editor.clone());
        practice.last_edited_on = Some(update.edited_at);
        practice.edit_count += 1;
        ConditionalUpdate::Updated(practice.clone())
    }

    pub fn delete(&mut self, id: DbId) -> bool {
        self.practices.remove(&id).is_some()
    }

    pub fn list(&self, filter: &PracticeFilter) -> Vec<Practice> {
        self.practices
            .values()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect()
    }
}

/// Mutex-guarded [`StoreState`]. Also the reference mock of the store contract.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    state: Mutex<StoreState>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the current state.
    pub async fn state(&self) -> StoreState {
        self.state.lock().await.clone()
    }
}

#[async_trait]
impl RecordStore for InMemoryStore {
    async fn get(&self, id: DbId) -> StoreResult<Option<Practice>> {
        Ok(self.state.lock().await.get(id).cloned())
    }

    async fn conditional_update(
        &self,
        id: DbId,
        expected: &Content,
        update: &ContentUpdate,
    ) -> StoreResult<ConditionalUpdate> {
        Ok(self.state.lock().await.conditional_update(id, expected, update))
    }

    async fn delete(&self, id: DbId) -> StoreResult<bool> {
        Ok(self.state.lock().await.delete(id))
    }
}

#[async_trait]
impl PracticeStore for InMemoryStore {
    async fn create(&self, content: &Content, added_by: &str) -> StoreResult<Practice> {
        Ok(self.state.lock().await.insert(content, added_by, Utc::now()))
    }

    async fn list(&self, filter: &PracticeFilter) -> StoreResult<Vec<Practice>> {
        Ok(self.state.lock().await.list(filter))
    }

    async fn health_check(&self) -> StoreResult<()> {
        Ok(())
    }
}
