//! Auth Service Library
//!
//! Registration, login and JWT issuance for foundation staff accounts.
//! It can be run as a standalone service or embedded in the combined binary.

pub mod config;
pub mod handlers;
pub mod infra;
pub mod openapi;
pub mod repository;
pub mod routes;
pub mod service;
pub mod state;

use std::sync::Arc;

use common::rate_limit::RateLimiter;
use common::{Cache, DatabaseConfig, JwtKeys};

pub use common::MigrateAction;

use crate::config::{AuthServiceConfig, DEFAULT_DATABASE, ENV_PREFIX};
use crate::infra::Database;
use crate::repository::AccountStore;
use crate::routes::create_router;
use crate::service::Authenticator;
use crate::state::AppState;

/// Run the auth service as an embedded component (for combined binary).
pub async fn run_embedded(host: &str, port: u16) -> Result<(), Box<dyn std::error::Error>> {
    let config = AuthServiceConfig::from_env()?;
    run_server_with_config(host, port, config).await
}

/// Run migrations (for CLI commands).
pub async fn run_migrations(action: MigrateAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = DatabaseConfig::from_env(ENV_PREFIX, DEFAULT_DATABASE);
    let db = Database::connect_without_migrations(&config).await?;
    db.apply("auth-service", action).await?;
    Ok(())
}

/// Run the HTTP server with the given configuration.
async fn run_server_with_config(
    host: &str,
    port: u16,
    config: AuthServiceConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::connect(&config.database).await?;
    let cache = Arc::new(Cache::connect(&config.cache.url).await?);
    let keys = JwtKeys::new(&config.jwt);

    let repo = Arc::new(AccountStore::new(db.get_connection()));
    let auth_service = Arc::new(Authenticator::new(repo, keys.clone()));

    let state = AppState {
        auth_service,
        db,
        rate_limiter: RateLimiter::new(cache.clone(), config.rate_limit),
        cache,
        keys,
    };

    common::server::serve("Auth service", host, port, create_router(state)).await
}
