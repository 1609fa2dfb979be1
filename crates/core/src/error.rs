use crate::types::DbId;

/// Domain errors raised by validation, identity checks and lookups.
///
/// Lost races are not errors here: the editor reports them as
/// [`SaveOutcome::Conflict`](crate::editor::SaveOutcome::Conflict).
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: DbId },

    /// Rejected input; the message is shown to the student as-is.
    #[error("{0}")]
    Validation(String),

    /// No student name was supplied.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
