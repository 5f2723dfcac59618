//! Content service configuration.

use common::{AppResult, DatabaseConfig, JwtConfig};

pub(crate) const ENV_PREFIX: &str = "CONTENT_SERVICE";
pub(crate) const DEFAULT_DATABASE: &str = "content_db";

/// Content service configuration.
#[derive(Debug, Clone, Default)]
pub struct ContentServiceConfig {
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
}

impl ContentServiceConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> AppResult<Self> {
        Ok(Self {
            database: DatabaseConfig::from_env(ENV_PREFIX, DEFAULT_DATABASE),
            jwt: JwtConfig::from_env()?,
        })
    }
}
