use std::sync::Arc;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via
/// `State<AppState>`.
///
/// Cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: reliefnet_db::DbPool,
    /// Server configuration (bind address, CORS, JWT settings).
    pub config: Arc<ServerConfig>,
}
