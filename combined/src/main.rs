//! Combined binary for development - runs all services in one process.

use clap::{Parser, Subcommand};
use tracing::{error, info};

use common::MigrateAction;

#[derive(Parser)]
#[command(name = "foundation-api")]
#[command(about = "Combined microservices binary for development")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run all services in a single process (development mode)
    Serve {
        #[arg(long, default_value = "0.0.0.0")]
        host: String,
        #[arg(long, default_value = "8081")]
        auth_port: u16,
        #[arg(long, default_value = "8082")]
        user_port: u16,
        #[arg(long, default_value = "8083")]
        content_port: u16,
        #[arg(long, default_value = "8084")]
        social_port: u16,
        #[arg(long, default_value = "8085")]
        notification_port: u16,
    },
    /// Run database migrations for all services
    Migrate {
        #[command(subcommand)]
        action: MigrateAction,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    common::server::init_tracing("info,tower_http=debug");

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            host,
            auth_port,
            user_port,
            content_port,
            social_port,
            notification_port,
        } => {
            info!("Starting combined services in development mode");
            info!("  Auth service:         http://{}:{}", host, auth_port);
            info!("  User service:         http://{}:{}", host, user_port);
            info!("  Content service:      http://{}:{}", host, content_port);
            info!("  Social service:       http://{}:{}", host, social_port);
            info!("  Notification service: http://{}:{}", host, notification_port);

            let auth_host = host.clone();
            let auth_handle = tokio::spawn(async move {
                if let Err(e) = auth_service_lib::run_embedded(&auth_host, auth_port).await {
                    error!("Auth service failed: {}", e);
                }
            });

            let user_host = host.clone();
            let user_handle = tokio::spawn(async move {
                if let Err(e) = user_service_lib::run_embedded(&user_host, user_port).await {
                    error!("User service failed: {}", e);
                }
            });

            let content_host = host.clone();
            let content_handle = tokio::spawn(async move {
                if let Err(e) = content_service_lib::run_embedded(&content_host, content_port).await
                {
                    error!("Content service failed: {}", e);
                }
            });

            let social_host = host.clone();
            let social_handle = tokio::spawn(async move {
                if let Err(e) = social_service_lib::run_embedded(&social_host, social_port).await {
                    error!("Social service failed: {}", e);
                }
            });

            let notification_handle = tokio::spawn(async move {
                if let Err(e) =
                    notification_service_lib::run_embedded(&host, notification_port).await
                {
                    error!("Notification service failed: {}", e);
                }
            });

            // Wait for any service to exit (which would indicate an error)
            tokio::select! {
                _ = auth_handle => {
                    error!("Auth service exited unexpectedly");
                }
                _ = user_handle => {
                    error!("User service exited unexpectedly");
                }
                _ = content_handle => {
                    error!("Content service exited unexpectedly");
                }
                _ = social_handle => {
                    error!("Social service exited unexpectedly");
                }
                _ = notification_handle => {
                    error!("Notification service exited unexpectedly");
                }
            }
        }
        Commands::Migrate { action } => {
            // Each service owns its own database
            auth_service_lib::run_migrations(action).await?;
            user_service_lib::run_migrations(action).await?;
            content_service_lib::run_migrations(action).await?;
            social_service_lib::run_migrations(action).await?;
            notification_service_lib::run_migrations(action).await?;
        }
    }

    Ok(())
}
