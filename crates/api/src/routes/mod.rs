pub mod contributions;
pub mod health;
pub mod practice;

use axum::routing::get;
use axum::Router;

use crate::handlers::category;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /practices                      list, create
/// /practices/{id}                 get, delete
/// /practices/{id}/edit            begin edit
/// /practices/{id}/edit/save       save edit (conflict-checked)
/// /practices/{id}/edit/cancel     cancel edit
/// /contributions                  leaderboard
/// /contributions/stats            totals
/// /categories                     valid categories
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/practices", practice::router())
        .nest("/contributions", contributions::router())
        .route("/categories", get(category::list))
}
