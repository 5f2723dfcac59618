//! Social Service Library
//!
//! The social aid workflow: the prestation catalog, demandes moving through
//! their review lifecycle, moderated avis and the back-office dashboard.

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

use crate::config::{SocialServiceConfig, DEFAULT_DATABASE, ENV_PREFIX};
use crate::infra::Database;
use crate::repository::{
    AvisRepository, AvisStore, DemandeRepository, DemandeStore, PrestationRepository,
    PrestationStore,
};
use crate::routes::create_router;
use crate::service::{AvisManager, DashboardManager, DemandeManager, PrestationManager};
use crate::state::AppState;

/// Run the social service as an embedded component (for combined binary).
pub async fn run_embedded(host: &str, port: u16) -> Result<(), Box<dyn std::error::Error>> {
    let config = SocialServiceConfig::from_env()?;
    run_server_with_config(host, port, config).await
}

/// Run migrations (for CLI commands).
pub async fn run_migrations(action: MigrateAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = DatabaseConfig::from_env(ENV_PREFIX, DEFAULT_DATABASE);
    let db = Database::connect_without_migrations(&config).await?;
    db.apply("social-service", action).await?;
    Ok(())
}

/// Run the HTTP server with the given configuration.
async fn run_server_with_config(
    host: &str,
    port: u16,
    config: SocialServiceConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::connect(&config.database).await?;
    let conn = db.get_connection();

    let prestations: Arc<dyn PrestationRepository> = Arc::new(PrestationStore::new(conn.clone()));
    let demandes: Arc<dyn DemandeRepository> = Arc::new(DemandeStore::new(conn.clone()));
    let avis: Arc<dyn AvisRepository> = Arc::new(AvisStore::new(conn));

    let state = AppState {
        prestation_service: Arc::new(PrestationManager::new(prestations.clone())),
        demande_service: Arc::new(DemandeManager::new(demandes.clone(), prestations.clone())),
        avis_service: Arc::new(AvisManager::new(
            avis.clone(),
            prestations.clone(),
            demandes.clone(),
        )),
        dashboard_service: Arc::new(DashboardManager::new(demandes, prestations, avis)),
        db,
        keys: JwtKeys::new(&config.jwt),
    };
    let router = create_router(state);

    common::server::serve("Social service", host, port, router).await
}
