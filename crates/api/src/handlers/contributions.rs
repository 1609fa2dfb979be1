//! Handlers for the contributions leaderboard.

use axum::extract::State;
use axum::Json;
use capkb_core::contributions::{self, Contribution, KnowledgeBaseStats};
use capkb_core::store::{PracticeFilter, PracticeStore};

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/contributions
///
/// Students ranked by entries added plus entries they last edited.
pub async fn leaderboard(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Contribution>>>> {
    let practices = state.store.list(&PracticeFilter::default()).await?;
    Ok(Json(DataResponse {
        data: contributions::summarize(&practices),
    }))
}

/// GET /api/v1/contributions/stats
pub async fn stats(State(state): State<AppState>) -> AppResult<Json<DataResponse<KnowledgeBaseStats>>> {
    let practices = state.store.list(&PracticeFilter::default()).await?;
    Ok(Json(DataResponse {
        data: contributions::stats(&practices),
    }))
}
