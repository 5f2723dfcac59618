//! Notification Service - HTTP server and email worker.

use clap::{Parser, Subcommand};

use notification_service_lib::MigrateAction;

#[derive(Parser)]
#[command(name = "notification-service")]
#[command(about = "Email notification microservice")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        #[arg(long, env = "NOTIFICATION_SERVICE_HOST", default_value = "0.0.0.0")]
        host: String,
        #[arg(long, env = "NOTIFICATION_SERVICE_PORT", default_value = "8085")]
        port: u16,
    },
    /// Database migration commands
    Migrate {
        #[command(subcommand)]
        action: MigrateAction,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    common::server::init_tracing("info");

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { host, port } => {
            notification_service_lib::run_embedded(&host, port).await?;
        }
        Commands::Migrate { action } => {
            notification_service_lib::run_migrations(action).await?;
        }
    }

    Ok(())
}
