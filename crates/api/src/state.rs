//! Shared application state.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::ApiConfig;

/// State shared across all request handlers.
///
/// Cloning is cheap: the config is behind an `Arc` and `PgPool` is itself a
/// reference-counted handle.
#[derive(Clone)]
pub struct AppState {
    config: Arc<ApiConfig>,
    pool: PgPool,
}

impl AppState {
    /// Build the application state from loaded config and a connected pool.
    #[must_use]
    pub fn new(config: ApiConfig, pool: PgPool) -> Self {
        Self {
            config: Arc::new(config),
            pool,
        }
    }

    /// The database connection pool.
    #[must_use]
    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// The loaded configuration.
    #[must_use]
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }
}
