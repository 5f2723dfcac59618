//! Content Service Library
//!
//! Public site content: news, events with registration, partners,
//! foundation presentation blocks, the contact form and the home page.

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

use crate::config::{ContentServiceConfig, DEFAULT_DATABASE, ENV_PREFIX};
use crate::infra::Database;
use crate::repository::{
    ContactStore, EventStore, FoundationInfoStore, NewsStore, PartnerStore, SiteInfoStore,
};
use crate::routes::create_router;
use crate::service::{
    ContactManager, EventManager, FoundationInfoManager, NewsManager, PartnerManager, SiteManager,
};
use crate::state::AppState;

/// Run the content service as an embedded component (for combined binary).
pub async fn run_embedded(host: &str, port: u16) -> Result<(), Box<dyn std::error::Error>> {
    let config = ContentServiceConfig::from_env()?;
    run_server_with_config(host, port, config).await
}

/// Run migrations (for CLI commands).
pub async fn run_migrations(action: MigrateAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = DatabaseConfig::from_env(ENV_PREFIX, DEFAULT_DATABASE);
    let db = Database::connect_without_migrations(&config).await?;
    db.apply("content-service", action).await?;
    Ok(())
}

/// Run the HTTP server with the given configuration.
async fn run_server_with_config(
    host: &str,
    port: u16,
    config: ContentServiceConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::connect(&config.database).await?;
    let conn = db.get_connection();

    let state = AppState {
        news_service: Arc::new(NewsManager::new(Arc::new(NewsStore::new(conn.clone())))),
        event_service: Arc::new(EventManager::new(Arc::new(EventStore::new(conn.clone())))),
        partner_service: Arc::new(PartnerManager::new(Arc::new(PartnerStore::new(
            conn.clone(),
        )))),
        foundation_info_service: Arc::new(FoundationInfoManager::new(Arc::new(
            FoundationInfoStore::new(conn.clone()),
        ))),
        contact_service: Arc::new(ContactManager::new(Arc::new(ContactStore::new(
            conn.clone(),
        )))),
        site_service: Arc::new(SiteManager::new(Arc::new(SiteInfoStore::new(conn)))),
        db,
        keys: JwtKeys::new(&config.jwt),
    };
    let router = create_router(state);

    common::server::serve("Content service", host, port, router).await
}
