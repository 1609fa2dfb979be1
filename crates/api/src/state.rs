use std::sync::Arc;

use capkb_core::store::PracticeStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Record store selected at start-up (Postgres or file).
    pub store: Arc<dyn PracticeStore>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}
