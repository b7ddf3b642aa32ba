use std::sync::Arc;

use rulegate_core::validation::ValidatorService;
use rulegate_db::PgRuleStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: rulegate_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}

impl AppState {
    /// A validator service over the database store, defaulting to the
    /// configured run mode.
    pub fn validator_service(&self) -> ValidatorService<PgRuleStore> {
        ValidatorService::new(PgRuleStore::new(self.pool.clone()))
            .with_mode(self.config.validation_mode)
    }
}
