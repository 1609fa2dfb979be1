//! Handlers for conflict-aware editing of a practice.
//!
//! The server keeps no edit state. `begin` returns the edit session (record id
//! plus the content snapshot) and the client sends it back with `save`. The
//! save only lands if the practice still matches the snapshot; otherwise the
//! client gets 409 with the current version and must begin a new edit.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use capkb_core::editor::{EditSession, PracticeEditor, SaveOutcome};
use capkb_core::error::CoreError;
use capkb_core::practice::{Content, Practice};
use capkb_core::types::DbId;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::middleware::identity::Student;
use crate::response::DataResponse;
use crate::state::AppState;

/// Body of `POST /practices/{id}/edit/save`.
#[derive(Debug, Deserialize)]
pub struct SaveEditRequest {
    pub session: EditSession,
    pub content: Content,
}

/// Successful save responses. Failures are [`AppError`]s.
#[derive(Debug, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SaveEditResponse {
    Saved { practice: Practice },
    Unchanged,
}

/// POST /api/v1/practices/{id}/edit
///
/// Open an edit session on a practice.
pub async fn begin(
    student: Student,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<EditSession>>> {
    let session = PracticeEditor::new(state.store.as_ref())
        .begin_edit(id)
        .await?;

    tracing::debug!(practice_id = id, student = %student.name, "Edit started");
    Ok(Json(DataResponse { data: session }))
}

/// POST /api/v1/practices/{id}/edit/save
pub async fn save(
    student: Student,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<SaveEditRequest>,
) -> AppResult<Json<DataResponse<SaveEditResponse>>> {
    if input.session.record_id() != id {
        return Err(AppError::BadRequest(format!(
            "Edit session belongs to practice {}, not {id}. Start a new edit.",
            input.session.record_id()
        )));
    }

    let outcome = PracticeEditor::new(state.store.as_ref())
        .save_edit(input.session, &input.content, &student.name)
        .await?;

    let response = match outcome {
        SaveOutcome::Saved(practice) => {
            tracing::info!(
                practice_id = id,
                student = %student.name,
                email = student.email.as_deref(),
                class_section = student.class_section.as_deref(),
                edit_count = practice.edit_count,
                "Practice updated"
            );
            SaveEditResponse::Saved { practice }
        }
        SaveOutcome::Unchanged => {
            tracing::debug!(practice_id = id, student = %student.name, "Edit saved without changes");
            SaveEditResponse::Unchanged
        }
        SaveOutcome::Invalid { reason, .. } => {
            return Err(AppError::Core(CoreError::Validation(reason)));
        }
        SaveOutcome::Conflict(current) => {
            tracing::warn!(
                practice_id = id,
                student = %student.name,
                last_edited_by = current.last_edited_by.as_deref(),
                "Edit conflict"
            );
            return Err(AppError::EditConflict {
                current: Box::new(current),
            });
        }
        SaveOutcome::Gone => {
            tracing::warn!(practice_id = id, student = %student.name, "Practice deleted during edit");
            return Err(AppError::Gone { id });
        }
    };

    Ok(Json(DataResponse { data: response }))
}

/// POST /api/v1/practices/{id}/edit/cancel
///
/// Discard an edit session. Nothing is stored, so this always succeeds.
pub async fn cancel(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(session): Json<EditSession>,
) -> StatusCode {
    PracticeEditor::new(state.store.as_ref()).cancel_edit(session);
    tracing::debug!(practice_id = id, "Edit cancelled");
    StatusCode::NO_CONTENT
}
