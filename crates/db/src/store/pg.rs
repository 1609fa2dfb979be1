//! Postgres-backed record store.

use async_trait::async_trait;
use capkb_core::practice::{Content, Practice};
use capkb_core::store::{
    ConditionalUpdate, ContentUpdate, PracticeFilter, PracticeStore, RecordStore, StoreError,
    StoreResult,
};
use capkb_core::types::DbId;

use crate::repositories::PracticeRepo;
use crate::DbPool;

/// Record store over [`PracticeRepo`].
#[derive(Debug, Clone)]
pub struct PgPracticeStore {
    pool: DbPool,
}

impl PgPracticeStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn db_error(err: sqlx::Error) -> StoreError {
    StoreError::Database(err.to_string())
}

#[async_trait]
impl RecordStore for PgPracticeStore {
    async fn get(&self, id: DbId) -> StoreResult<Option<Practice>> {
        let row = PracticeRepo::find_by_id(&self.pool, id)
            .await
            .map_err(db_error)?;
        Ok(row.map(Practice::from))
    }

    async fn conditional_update(
        &self,
        id: DbId,
        expected: &Content,
        update: &ContentUpdate,
    ) -> StoreResult<ConditionalUpdate> {
        let row = PracticeRepo::conditional_update(&self.pool, id, expected, update)
            .await
            .map_err(db_error)?;
        Ok(match row {
            Some(row) => ConditionalUpdate::Updated(row.into()),
            None => {
                tracing::debug!(practice_id = id, "Conditional update matched no row");
                ConditionalUpdate::NoMatch
            }
        })
    }

    async fn delete(&self, id: DbId) -> StoreResult<bool> {
        PracticeRepo::delete(&self.pool, id).await.map_err(db_error)
    }
}

#[async_trait]
impl PracticeStore for PgPracticeStore {
    async fn create(&self, content: &Content, added_by: &str) -> StoreResult<Practice> {
        let row = PracticeRepo::create(&self.pool, content, added_by)
            .await
            .map_err(db_error)?;
        Ok(row.into())
    }

    async fn list(&self, filter: &PracticeFilter) -> StoreResult<Vec<Practice>> {
        let rows = PracticeRepo::list(&self.pool, filter)
            .await
            .map_err(db_error)?;
        Ok(rows.into_iter().map(Practice::from).collect())
    }

    async fn health_check(&self) -> StoreResult<()> {
        crate::health_check(&self.pool).await.map_err(db_error)
    }
}
