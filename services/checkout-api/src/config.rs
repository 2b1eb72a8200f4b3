//! Configuration for the Checkout API service.

use std::time::Duration;

use coursepay_billing_core::config::DEFAULT_KONNECT_BASE_URL;
use coursepay_billing_core::KonnectConfig;

/// Checkout API configuration
#[derive(Clone)]
pub struct Config {
    /// HTTP server port
    pub http_port: u16,
    /// Database URL
    pub database_url: String,
    /// HS256 secret used to verify caller tokens
    pub jwt_secret: String,
    /// Konnect integration configuration
    pub konnect: KonnectConfig,
    /// Request timeout
    pub request_timeout: Duration,
    /// Metrics enabled
    pub metrics_enabled: bool,
    /// Apply embedded migrations at startup
    pub run_migrations: bool,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        // Database
        let database_url =
            std::env::var("DATABASE_URL").map_err(|_| ConfigError::Missing("DATABASE_URL"))?;

        let http_port = std::env::var("HTTP_PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse()
            .map_err(|_| ConfigError::Invalid("HTTP_PORT"))?;

        let jwt_secret =
            std::env::var("JWT_SECRET").map_err(|_| ConfigError::Missing("JWT_SECRET"))?;

        // Konnect
        let konnect_api_key = std::env::var("KONNECT_API_KEY")
            .map_err(|_| ConfigError::Missing("KONNECT_API_KEY"))?;

        let receiver_wallet_id = std::env::var("KONNECT_RECEIVER_WALLET_ID")
            .map_err(|_| ConfigError::Missing("KONNECT_RECEIVER_WALLET_ID"))?;

        let konnect_base_url = std::env::var("KONNECT_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_KONNECT_BASE_URL.to_string());

        let currency = std::env::var("KONNECT_CURRENCY").unwrap_or_else(|_| "TND".to_string());

        let lifespan_minutes: u32 = std::env::var("KONNECT_LIFESPAN_MINUTES")
            .unwrap_or_else(|_| "30".to_string())
            .parse()
            .map_err(|_| ConfigError::Invalid("KONNECT_LIFESPAN_MINUTES"))?;

        let konnect_timeout_secs: u64 = std::env::var("KONNECT_TIMEOUT_SECS")
            .unwrap_or_else(|_| "15".to_string())
            .parse()
            .map_err(|_| ConfigError::Invalid("KONNECT_TIMEOUT_SECS"))?;

        // Callback URLs
        let base_url = std::env::var("BASE_URL").map_err(|_| ConfigError::Missing("BASE_URL"))?;

        let frontend_url =
            std::env::var("FRONTEND_URL").map_err(|_| ConfigError::Missing("FRONTEND_URL"))?;

        // Request timeout
        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".to_string())
            .parse()
            .map_err(|_| ConfigError::Invalid("REQUEST_TIMEOUT_SECS"))?;

        let metrics_enabled = std::env::var("METRICS_ENABLED")
            .unwrap_or_else(|_| "true".to_string())
            .parse()
            .unwrap_or(true);

        let run_migrations = std::env::var("RUN_MIGRATIONS")
            .unwrap_or_else(|_| "true".to_string())
            .parse()
            .unwrap_or(true);

        let konnect = KonnectConfig::new(konnect_api_key, receiver_wallet_id, base_url, frontend_url)
            .with_base_url(konnect_base_url)
            .with_currency(currency)
            .with_lifespan_minutes(lifespan_minutes)
            .with_timeout(Duration::from_secs(konnect_timeout_secs));

        Ok(Self {
            http_port,
            database_url,
            jwt_secret,
            konnect,
            request_timeout: Duration::from_secs(request_timeout_secs),
            metrics_enabled,
            run_migrations,
        })
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("http_port", &self.http_port)
            .field("jwt_secret", &"[REDACTED]")
            .field("konnect", &self.konnect)
            .field("request_timeout", &self.request_timeout)
            .field("metrics_enabled", &self.metrics_enabled)
            .field("run_migrations", &self.run_migrations)
            .finish_non_exhaustive()
    }
}

/// Configuration error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for environment variable: {0}")]
    Invalid(&'static str),
}
