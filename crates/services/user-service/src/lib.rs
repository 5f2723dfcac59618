//! User Service Library
//!
//! Staff profiles: self-service profile and avatar management, plus the
//! administrator's user directory with soft delete.

pub mod config;
pub mod handlers;
pub mod infra;
pub mod openapi;
pub mod repository;
pub mod routes;
pub mod service;
pub mod state;

use std::sync::Arc;

use common::{DatabaseConfig, JwtKeys};

pub use common::MigrateAction;

use crate::config::{UserServiceConfig, DEFAULT_DATABASE, ENV_PREFIX};
use crate::infra::Database;
use crate::repository::ProfileStore;
use crate::routes::create_router;
use crate::service::UserManager;
use crate::state::AppState;

/// Run the user service as an embedded component (for combined binary).
pub async fn run_embedded(host: &str, port: u16) -> Result<(), Box<dyn std::error::Error>> {
    let config = UserServiceConfig::from_env()?;
    run_server_with_config(host, port, config).await
}

/// Run migrations (for CLI commands).
pub async fn run_migrations(action: MigrateAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = DatabaseConfig::from_env(ENV_PREFIX, DEFAULT_DATABASE);
    let db = Database::connect_without_migrations(&config).await?;
    db.apply("user-service", action).await?;
    Ok(())
}

/// Run the HTTP server with the given configuration.
async fn run_server_with_config(
    host: &str,
    port: u16,
    config: UserServiceConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::connect(&config.database).await?;

    let repo = Arc::new(ProfileStore::new(db.get_connection()));
    let user_service = Arc::new(UserManager::new(repo, config.upload.clone()));

    let state = AppState {
        user_service,
        db,
        keys: JwtKeys::new(&config.jwt),
    };
    let router = create_router(state, &config.upload.dir, config.upload.max_avatar_bytes);

    common::server::serve("User service", host, port, router).await
}
