//! Conflict-aware editing of shared practices.
//!
//! An edit is a read-modify-write cycle split across two requests:
//! [`PracticeEditor::begin_edit`] snapshots the current content and
//! [`PracticeEditor::save_edit`] writes the new content only if the stored
//! content still equals that snapshot. The compare happens inside the store's
//! conditional update, so two editors racing on the same record can never both
//! win: the loser gets [`SaveOutcome::Conflict`] with the current record.
//!
//! The editor keeps no state between calls. The [`EditSession`] belongs to the
//! caller; [`EditorSlot`] is the per-caller holder that enforces "one session
//! at a time" and drops stale snapshots when the caller moves to another record.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::practice::{validate_edit, Content, Practice};
use crate::store::{ConditionalUpdate, ContentUpdate, RecordStore, StoreError};
use crate::types::DbId;

/// A caller-owned edit in progress: which record, and what it looked like.
///
/// Serializable so a stateless server can hand it to a client and receive it
/// back with the save request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditSession {
    record_id: DbId,
    snapshot: Content,
}

impl EditSession {
    pub fn record_id(&self) -> DbId {
        self.record_id
    }

    /// Content as read when the edit began; the expected value of the save.
    pub fn snapshot(&self) -> &Content {
        &self.snapshot
    }
}

#[derive(Debug, thiserror::Error)]
pub enum EditError {
    #[error("Practice with id {0} not found")]
    NotFound(DbId),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<EditError> for CoreError {
    fn from(err: EditError) -> Self {
        match err {
            EditError::NotFound(id) => CoreError::NotFound {
                entity: "Practice",
                id,
            },
            EditError::Store(e) => CoreError::Internal(e.to_string()),
        }
    }
}

/// How a save ended. Every variant except `Invalid` closes the session.
#[derive(Debug, Clone, PartialEq)]
pub enum SaveOutcome {
    /// The write was applied; carries the updated record.
    Saved(Practice),
    /// New content equals the snapshot; nothing was written.
    Unchanged,
    /// Someone else changed the record first; carries the current record.
    Conflict(Practice),
    /// The record was deleted while the edit was open.
    Gone,
    /// The submission was rejected before reaching the store. The session is
    /// handed back for another attempt.
    Invalid {
        session: EditSession,
        reason: String,
    },
}

/// Runs the edit protocol against a [`RecordStore`].
pub struct PracticeEditor<'a, S: RecordStore + ?Sized> {
    store: &'a S,
}

impl<'a, S: RecordStore + ?Sized> PracticeEditor<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Snapshot the current content of `record_id`.
    pub async fn begin_edit(&self, record_id: DbId) -> Result<EditSession, EditError> {
        let practice = self
            .store
            .get(record_id)
            .await?
            .ok_or(EditError::NotFound(record_id))?;

        Ok(EditSession {
            record_id,
            snapshot: practice.content,
        })
    }

    /// Write `new_content` on behalf of `editor` if nobody changed the record
    /// since `session` began.
    ///
    /// Only backend failures are returned as `Err`; every protocol outcome is
    /// a [`SaveOutcome`].
    pub async fn save_edit(
        &self,
        session: EditSession,
        new_content: &Content,
        editor: &str,
    ) -> Result<SaveOutcome, StoreError> {
        let editor = editor.trim();
        if editor.is_empty() {
            return Ok(SaveOutcome::Invalid {
                session,
                reason: "An editor name is required to save changes.".into(),
            });
        }

        let content = match validate_edit(new_content) {
            Ok(content) => content,
            Err(err) => {
                return Ok(SaveOutcome::Invalid {
                    session,
                    reason: validation_reason(err),
                })
            }
        };

        if content.same_as(&session.snapshot) {
            return Ok(SaveOutcome::Unchanged);
        }

        let update = ContentUpdate {
            content,
            editor: editor.to_string(),
            edited_at: Utc::now(),
        };

        match self
            .store
            .conditional_update(session.record_id, &session.snapshot, &update)
            .await?
        {
            ConditionalUpdate::Updated(practice) => Ok(SaveOutcome::Saved(practice)),
            ConditionalUpdate::NoMatch => match self.store.get(session.record_id).await? {
                Some(current) => Ok(SaveOutcome::Conflict(current)),
                None => Ok(SaveOutcome::Gone),
            },
        }
    }

    /// Abandon an edit. Never touches the store.
    pub fn cancel_edit(&self, session: EditSession) {
        drop(session);
    }
}

fn validation_reason(err: CoreError) -> String {
    match err {
        CoreError::Validation(msg) => msg,
        other => other.to_string(),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SlotError {
    #[error("No edit in progress")]
    NoActiveSession,

    #[error(transparent)]
    Edit(#[from] EditError),
}

/// Holder for the single edit session of one caller.
///
/// Lives in the caller's own context (a form, a connection, a CLI loop) and is
/// never shared, so one user's pending edit cannot block or leak into another's.
#[derive(Debug, Default)]
pub struct EditorSlot {
    session: Option<EditSession>,
}

impl EditorSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&EditSession> {
        self.session.as_ref()
    }

    /// Begin editing `record_id`, discarding any session held for another record.
    ///
    /// If the record cannot be read the slot ends up empty.
    pub async fn open<S: RecordStore + ?Sized>(
        &mut self,
        editor: &PracticeEditor<'_, S>,
        record_id: DbId,
    ) -> Result<&EditSession, EditError> {
        self.session = None;
        let session = editor.begin_edit(record_id).await?;
        Ok(&*self.session.insert(session))
    }

    /// Save the held session. An `Invalid` outcome or a backend failure keeps
    /// it open; every other outcome closes it.
    pub async fn save<S: RecordStore + ?Sized>(
        &mut self,
        editor: &PracticeEditor<'_, S>,
        new_content: &Content,
        user: &str,
    ) -> Result<SaveOutcome, SlotError> {
        let session = self.session.take().ok_or(SlotError::NoActiveSession)?;
        let retry = session.clone();

        match editor.save_edit(session, new_content, user).await {
            Ok(SaveOutcome::Invalid { session, reason }) => {
                self.session = Some(session.clone());
                Ok(SaveOutcome::Invalid { session, reason })
            }
            Ok(outcome) => Ok(outcome),
            Err(err) => {
                self.session = Some(retry);
                Err(SlotError::Edit(err.into()))
            }
        }
    }

    /// Drop the held session, if any.
    pub fn cancel(&mut self) {
        self.session = None;
    }
}
