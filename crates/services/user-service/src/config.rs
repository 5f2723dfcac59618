//! User service configuration.

use std::path::PathBuf;

use common::{env_with_prefix, parsed_env, AppResult, DatabaseConfig, JwtConfig};

pub(crate) const ENV_PREFIX: &str = "USER_SERVICE";
pub(crate) const DEFAULT_DATABASE: &str = "user_db";

/// Avatar upload limit: 5 MB
const DEFAULT_MAX_AVATAR_BYTES: usize = 5 * 1024 * 1024;

/// Where uploaded files live and how large an avatar may be.
#[derive(Debug, Clone)]
pub struct UploadConfig {
    /// Root served under `/files`; avatars go to `{dir}/avatars`
    pub dir: PathBuf,
    pub max_avatar_bytes: usize,
}

impl UploadConfig {
    pub fn from_env() -> Self {
        Self {
            dir: env_with_prefix(ENV_PREFIX, "UPLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("./uploads")),
            max_avatar_bytes: parsed_env(ENV_PREFIX, "MAX_AVATAR_BYTES", DEFAULT_MAX_AVATAR_BYTES),
        }
    }

    pub fn avatar_dir(&self) -> PathBuf {
        self.dir.join("avatars")
    }
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("./uploads"),
            max_avatar_bytes: DEFAULT_MAX_AVATAR_BYTES,
        }
    }
}

/// User service configuration.
#[derive(Debug, Clone, Default)]
pub struct UserServiceConfig {
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    pub upload: UploadConfig,
}

impl UserServiceConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> AppResult<Self> {
        Ok(Self {
            database: DatabaseConfig::from_env(ENV_PREFIX, DEFAULT_DATABASE),
            jwt: JwtConfig::from_env()?,
            upload: UploadConfig::from_env(),
        })
    }
}
