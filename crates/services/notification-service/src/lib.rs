//! Notification Service Library
//!
//! Records outgoing emails, queues them for the apalis email worker and
//! exposes the signed-in user's inbox.

pub mod config;
pub mod handlers;
pub mod infra;
pub mod jobs;
pub mod openapi;
pub mod repository;
pub mod routes;
pub mod service;
pub mod state;

use std::sync::Arc;

use common::{DatabaseConfig, JwtKeys};

pub use common::MigrateAction;

use crate::config::{NotificationServiceConfig, DEFAULT_DATABASE, ENV_PREFIX};
use crate::infra::Database;
use crate::jobs::{DeliveryContext, LogMailer, PostgresEmailQueue};
use crate::repository::{NotificationRepository, NotificationStore};
use crate::routes::create_router;
use crate::service::NotificationManager;
use crate::state::AppState;

/// Run the notification service as an embedded component (for combined binary).
pub async fn run_embedded(host: &str, port: u16) -> Result<(), Box<dyn std::error::Error>> {
    let config = NotificationServiceConfig::from_env()?;
    run_server_with_config(host, port, config).await
}

/// Run migrations (for CLI commands).
pub async fn run_migrations(action: MigrateAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = DatabaseConfig::from_env(ENV_PREFIX, DEFAULT_DATABASE);
    let db = Database::connect_without_migrations(&config).await?;
    db.apply("notification-service", action).await?;
    Ok(())
}

/// Run the HTTP server and the email worker until either stops.
async fn run_server_with_config(
    host: &str,
    port: u16,
    config: NotificationServiceConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::connect(&config.database).await?;
    let queue = PostgresEmailQueue::connect(&config.database.url).await?;

    let notifications: Arc<dyn NotificationRepository> =
        Arc::new(NotificationStore::new(db.get_connection()));
    let delivery = DeliveryContext {
        notifications: notifications.clone(),
        mailer: Arc::new(LogMailer),
    };

    let state = AppState {
        notification_service: Arc::new(NotificationManager::new(
            notifications,
            Arc::new(queue.clone()),
            config.email,
        )),
        db,
        keys: JwtKeys::new(&config.jwt),
    };
    let router = create_router(state);

    tokio::select! {
        result = common::server::serve("Notification service", host, port, router) => result,
        result = queue.run_worker(delivery) => {
            result.map_err(|e| Box::new(e) as Box<dyn std::error::Error>)
        }
    }
}
