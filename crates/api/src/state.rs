use std::sync::Arc;

use taskboard_db::rule_store::PgRuleStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: the pool is reference-counted and the config is behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: taskboard_db::DbPool,
    /// Server configuration (JWT secret is read by the auth extractor).
    pub config: Arc<ServerConfig>,
}

impl AppState {
    /// Rule store over the shared pool, for running validators.
    pub fn rules(&self) -> PgRuleStore {
        PgRuleStore::new(self.pool.clone())
    }
}
