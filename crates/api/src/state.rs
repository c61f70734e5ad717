use std::sync::Arc;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheap to clone: the pool is reference-counted and the config sits behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: trove_db::DbPool,
    /// Server configuration (JWT settings, media root, upload limit).
    pub config: Arc<ServerConfig>,
}
