//! Email job queue backed by apalis PostgreSQL storage.

use apalis::prelude::*;
use apalis_sql::postgres::PostgresStorage;
use apalis_sql::sqlx::postgres::PgPoolOptions;
use async_trait::async_trait;

use common::{AppError, AppResult};

use super::email_job::{email_job_handler, DeliveryContext, EmailJob};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

const WORKER_NAME: &str = "email-worker";

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait EmailQueue: Send + Sync {
    async fn enqueue(&self, job: EmailJob) -> AppResult<()>;
}

/// apalis implementation of EmailQueue
#[derive(Clone)]
pub struct PostgresEmailQueue {
    storage: PostgresStorage<EmailJob>,
}

impl PostgresEmailQueue {
    /// Connect the job pool and create the apalis tables if needed.
    pub async fn connect(database_url: &str) -> AppResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await
            .map_err(|e| AppError::internal(format!("Failed to connect job storage: {}", e)))?;

        PostgresStorage::setup(&pool)
            .await
            .map_err(|e| AppError::internal(format!("Failed to setup job storage: {}", e)))?;

        Ok(Self {
            storage: PostgresStorage::new(pool),
        })
    }

    /// Consume queued emails until the monitor stops.
    pub async fn run_worker(&self, ctx: DeliveryContext) -> AppResult<()> {
        let worker = WorkerBuilder::new(WORKER_NAME)
            .data(ctx)
            .backend(self.storage.clone())
            .build_fn(email_job_handler);

        tracing::info!("Email worker started");
        Monitor::new()
            .register(worker)
            .run()
            .await
            .map_err(|e| AppError::internal(format!("Email worker failed: {}", e)))
    }
}

#[async_trait]
impl EmailQueue for PostgresEmailQueue {
    async fn enqueue(&self, job: EmailJob) -> AppResult<()> {
        let mut storage = self.storage.clone();
        storage
            .push(job)
            .await
            .map_err(|e| AppError::internal(format!("Failed to queue email: {}", e)))?;
        Ok(())
    }
}
