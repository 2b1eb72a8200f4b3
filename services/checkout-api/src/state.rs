//! Application state for the Checkout API service.

use std::sync::Arc;

use coursepay_billing_core::PurchaseService;
use coursepay_db::DbPool;

use crate::auth::TokenVerifier;
use crate::config::Config;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// Purchase service (checkout, webhook, queries)
    pub purchases: Arc<PurchaseService>,
    /// Caller token verification
    pub tokens: Arc<TokenVerifier>,
    /// Database pool (readiness probe)
    pub pool: DbPool,
    /// Configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Create new application state
    pub fn new(purchases: PurchaseService, pool: DbPool, config: Config) -> Self {
        Self {
            purchases: Arc::new(purchases),
            tokens: Arc::new(TokenVerifier::new(&config.jwt_secret)),
            pool,
            config: Arc::new(config),
        }
    }

    /// Get request timeout from config
    pub fn request_timeout(&self) -> std::time::Duration {
        self.config.request_timeout
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
