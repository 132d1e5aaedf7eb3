use std::sync::Arc;

use eggwatch_core::monitoring::MonitoringCycle;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: the pool and the cycle's collaborators are reference counted.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: eggwatch_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Monitoring engine wired to the PostgreSQL stores.
    pub monitor: MonitoringCycle,
}

impl AppState {
    /// Wire the monitoring cycle to PostgreSQL-backed stores sharing `pool`.
    pub fn new(pool: eggwatch_db::DbPool, config: ServerConfig) -> Self {
        use eggwatch_db::stores::{PgHistoryRecorder, PgReadingSource, PgThresholdRegistry};

        let monitor = MonitoringCycle::new(
            Arc::new(PgThresholdRegistry::new(pool.clone())),
            Arc::new(PgHistoryRecorder::new(pool.clone())),
            Arc::new(PgReadingSource::new(pool.clone())),
            config.monitor.clone(),
        );

        Self {
            pool,
            config: Arc::new(config),
            monitor,
        }
    }
}
