use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use capkb_core::editor::EditError;
use capkb_core::error::CoreError;
use capkb_core::practice::Practice;
use capkb_core::store::StoreError;
use capkb_core::types::DbId;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `capkb_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The record store backend failed.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// A save lost the race: someone else changed the practice first.
    ///
    /// Carries the current record so the client can show it before the user
    /// starts a new edit.
    #[error("Practice {} was changed by someone else", current.id)]
    EditConflict { current: Box<Practice> },

    /// The practice was deleted while it was being edited.
    #[error("Practice {id} was deleted while it was being edited")]
    Gone { id: DbId },

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl From<EditError> for AppError {
    fn from(err: EditError) -> Self {
        match err {
            EditError::Store(e) => AppError::Store(e),
            other => AppError::Core(other.into()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::Unauthorized(msg) => {
                    (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone())
                }
                CoreError::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", msg.clone()),
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "INTERNAL_ERROR",
                        "An internal error occurred".to_string(),
                    )
                }
            },

            // --- Store errors ---
            AppError::Store(err) => {
                tracing::error!(error = %err, "Store error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }

            // --- Edit protocol outcomes ---
            AppError::EditConflict { current } => {
                let body = json!({
                    "error": "This practice was changed by someone else while you were editing. \
                              Review the current version and start a new edit.",
                    "code": "CONFLICT",
                    "current": current,
                });
                return (StatusCode::CONFLICT, axum::Json(body)).into_response();
            }
            AppError::Gone { id } => (
                StatusCode::GONE,
                "GONE",
                format!("Practice {id} was deleted while you were editing it"),
            ),

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}
