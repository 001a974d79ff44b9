//! API configuration, loaded from environment variables with development
//! fallbacks.

use serde::{Deserialize, Serialize};
use std::env;

/// REST server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// HTTP listen port.
    pub http_port: u16,

    /// Path to the SQLite database file.
    pub database_path: String,

    /// JWT signing secret. MUST be overridden in production.
    pub jwt_secret: String,

    /// Access token lifetime in seconds.
    pub jwt_lifetime_secs: i64,
}

impl ApiConfig {
    /// Loads configuration from environment variables.
    ///
    /// ## Variables
    /// - `HTTP_PORT` (default 8080)
    /// - `DATABASE_PATH` (default ./tillpoint.db)
    /// - `JWT_SECRET` (development default)
    /// - `JWT_LIFETIME_SECS` (default 3600)
    pub fn load() -> Result<Self, ConfigError> {
        Ok(ApiConfig {
            http_port: env::var("HTTP_PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("HTTP_PORT".to_string()))?,

            database_path: env::var("DATABASE_PATH")
                .unwrap_or_else(|_| "tillpoint.db".to_string()),

            jwt_secret: env::var("JWT_SECRET")
                .unwrap_or_else(|_| "tillpoint-dev-secret-change-in-production".to_string()),

            jwt_lifetime_secs: env::var("JWT_LIFETIME_SECS")
                .unwrap_or_else(|_| "3600".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("JWT_LIFETIME_SECS".to_string()))?,
        })
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}
