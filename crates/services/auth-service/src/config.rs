//! Auth service configuration.

use common::{AppResult, CacheConfig, DatabaseConfig, JwtConfig, RateLimitConfig};

pub(crate) const ENV_PREFIX: &str = "AUTH_SERVICE";
pub(crate) const DEFAULT_DATABASE: &str = "auth_db";

/// Auth service configuration.
#[derive(Debug, Clone, Default)]
pub struct AuthServiceConfig {
    pub database: DatabaseConfig,
    /// Redis backing the rate limiter
    pub cache: CacheConfig,
    pub jwt: JwtConfig,
    pub rate_limit: RateLimitConfig,
}

impl AuthServiceConfig {
    /// Load configuration from environment variables.
    ///
    /// Fails when `JWT_SECRET` is missing or too short.
    pub fn from_env() -> AppResult<Self> {
        Ok(Self {
            database: DatabaseConfig::from_env(ENV_PREFIX, DEFAULT_DATABASE),
            cache: CacheConfig::from_env(ENV_PREFIX),
            jwt: JwtConfig::from_env()?,
            rate_limit: RateLimitConfig::from_env(ENV_PREFIX),
        })
    }
}
