//! Social service configuration.

use common::{AppResult, DatabaseConfig, JwtConfig};

pub(crate) const ENV_PREFIX: &str = "SOCIAL_SERVICE";
pub(crate) const DEFAULT_DATABASE: &str = "social_db";

/// Social service configuration.
#[derive(Debug, Clone, Default)]
pub struct SocialServiceConfig {
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
}

impl SocialServiceConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> AppResult<Self> {
        Ok(Self {
            database: DatabaseConfig::from_env(ENV_PREFIX, DEFAULT_DATABASE),
            jwt: JwtConfig::from_env()?,
        })
    }
}
