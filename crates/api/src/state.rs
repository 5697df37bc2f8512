use std::sync::Arc;

use crate::backend::BackendClient;
use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Client for the upstream raffle/prize backend.
    pub backend: Arc<BackendClient>,
}
