//! Flat-file record store.
//!
//! The whole knowledge base lives in one JSON document. Every mutation runs
//! against a copy of the state under the store mutex, the copy is written to
//! disk (temp file + rename), and only then replaces the in-memory state. A
//! failed write therefore leaves both the file and memory unchanged.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use capkb_core::memory_store::StoreState;
use capkb_core::practice::{Content, Practice};
use capkb_core::store::{
    ConditionalUpdate, ContentUpdate, PracticeFilter, PracticeStore, RecordStore, StoreResult,
};
use capkb_core::types::DbId;
use chrono::Utc;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

#[derive(Debug)]
pub struct FilePracticeStore {
    path: PathBuf,
    state: Mutex<StoreState>,
}

impl FilePracticeStore {
    /// Load the store from `path`, starting empty if the file does not exist yet.
    ///
    /// The parent directory is created if missing.
    pub async fn open(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let path = path.into();
        if let Some(dir) = parent_dir(&path) {
            fs::create_dir_all(dir).await?;
        }
        let state = match fs::read(&path).await {
            Ok(bytes) => serde_json::from_slice(&bytes)?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => StoreState::default(),
            Err(err) => return Err(err.into()),
        };
        tracing::info!(path = %path.display(), practices = state.len(), "Loaded practice file");

        Ok(Self {
            path,
            state: Mutex::new(state),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Run `op` on a copy of the state, persist the copy, then commit it.
    async fn mutate<R>(&self, op: impl FnOnce(&mut StoreState) -> R) -> StoreResult<R> {
        let mut state = self.state.lock().await;
        let mut next = state.clone();
        let result = op(&mut next);
        if next != *state {
            atomic_write(&self.path, &serde_json::to_vec_pretty(&next)?).await?;
            *state = next;
        }
        Ok(result)
    }
}

fn parent_dir(path: &Path) -> Option<&Path> {
    path.parent().filter(|p| !p.as_os_str().is_empty())
}

/// Write `bytes` to a synced temp file next to `path`, then rename it over
/// `path`. The temp file is removed if any step fails.
async fn atomic_write(path: &Path, bytes: &[u8]) -> StoreResult<()> {
    let tmp = temp_path(path);
    let result = async {
        let mut file = fs::File::create(&tmp).await?;
        file.write_all(bytes).await?;
        file.sync_all().await?;
        drop(file);
        fs::rename(&tmp, path).await
    }
    .await;

    if let Err(err) = result {
        if let Err(cleanup) = fs::remove_file(&tmp).await {
            if cleanup.kind() != std::io::ErrorKind::NotFound {
                tracing::warn!(path = %tmp.display(), error = %cleanup, "Failed to remove temp file");
            }
        }
        return Err(err.into());
    }
    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    path.with_extension("tmp")
}

#[async_trait]
impl RecordStore for FilePracticeStore {
    async fn get(&self, id: DbId) -> StoreResult<Option<Practice>> {
        Ok(self.state.lock().await.get(id).cloned())
    }

    async fn conditional_update(
        &self,
        id: DbId,
        expected: &Content,
        update: &ContentUpdate,
    ) -> StoreResult<ConditionalUpdate> {
        self.mutate(|state| state.conditional_update(id, expected, update))
            .await
    }

    async fn delete(&self, id: DbId) -> StoreResult<bool> {
        self.mutate(|state| state.delete(id)).await
    }
}

#[async_trait]
impl PracticeStore for FilePracticeStore {
    async fn create(&self, content: &Content, added_by: &str) -> StoreResult<Practice> {
        self.mutate(|state| state.insert(content, added_by, Utc::now()))
            .await
    }

    async fn list(&self, filter: &PracticeFilter) -> StoreResult<Vec<Practice>> {
        Ok(self.state.lock().await.list(filter))
    }

    async fn health_check(&self) -> StoreResult<()> {
        if let Some(dir) = parent_dir(&self.path) {
            fs::metadata(dir).await?;
        }
        Ok(())
    }
}
