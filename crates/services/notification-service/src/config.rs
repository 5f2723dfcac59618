//! Notification service configuration.

use common::{env_with_prefix, AppResult, DatabaseConfig, JwtConfig};

pub(crate) const ENV_PREFIX: &str = "NOTIFICATION_SERVICE";
pub(crate) const DEFAULT_DATABASE: &str = "notification_db";

/// Outgoing mail addresses.
#[derive(Debug, Clone, PartialEq)]
pub struct EmailConfig {
    /// Sender used when a message does not set one (`MAIL_FROM`)
    pub from: String,
    /// Recipient of contact form notifications (`SUPPORT_EMAIL`)
    pub support_email: String,
}

impl EmailConfig {
    pub fn from_env(prefix: &str) -> Self {
        let defaults = Self::default();
        Self {
            from: env_with_prefix(prefix, "MAIL_FROM").unwrap_or(defaults.from),
            support_email: env_with_prefix(prefix, "SUPPORT_EMAIL")
                .unwrap_or(defaults.support_email),
        }
    }
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            from: "noreply@foundation.com".to_string(),
            support_email: "support@foundation.com".to_string(),
        }
    }
}

/// Notification service configuration.
#[derive(Debug, Clone, Default)]
pub struct NotificationServiceConfig {
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    pub email: EmailConfig,
}

impl NotificationServiceConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> AppResult<Self> {
        Ok(Self {
            database: DatabaseConfig::from_env(ENV_PREFIX, DEFAULT_DATABASE),
            jwt: JwtConfig::from_env()?,
            email: EmailConfig::from_env(ENV_PREFIX),
        })
    }
}
