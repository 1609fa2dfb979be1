//! Route definitions for the `/practices` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{edit, practice};
use crate::state::AppState;

/// Routes mounted at `/practices`.
///
/// ```text
/// GET    /                   -> list
/// POST   /                   -> create
/// GET    /{id}               -> get_by_id
/// DELETE /{id}               -> delete
///
/// POST   /{id}/edit          -> edit::begin
/// POST   /{id}/edit/save     -> edit::save
/// POST   /{id}/edit/cancel   -> edit::cancel
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(practice::list).post(practice::create))
        .route("/{id}", get(practice::get_by_id).delete(practice::delete))
        .route("/{id}/edit", post(edit::begin))
        .route("/{id}/edit/save", post(edit::save))
        .route("/{id}/edit/cancel", post(edit::cancel))
}
