use axum::routing::get;
use axum::Router;

use crate::handlers::contributions;
use crate::state::AppState;

/// Routes mounted at `/contributions`.
///
/// ```text
/// GET    /        -> leaderboard
/// GET    /stats   -> stats
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(contributions::leaderboard))
        .route("/stats", get(contributions::stats))
}
