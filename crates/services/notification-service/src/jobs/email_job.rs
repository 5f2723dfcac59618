//! Email background job.
//!
//! Notifications are recorded first, then delivered by the email worker.
//! Until a mail transport is configured, messages are written to the log.

use std::sync::Arc;

use apalis::prelude::Data;
use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use common::{AppError, AppResult};
use domain::NotificationStatus;

use crate::repository::NotificationRepository;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Email job payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmailJob {
    /// Notification row tracking this email
    pub notification_id: i64,
    pub to: String,
    pub from: String,
    pub subject: String,
    /// Rendered HTML body
    pub html: String,
    #[serde(default)]
    pub reply_to: Option<String>,
}

/// Outgoing mail transport.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, job: &EmailJob) -> AppResult<()>;
}

/// Transport that logs each message instead of sending it.
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, job: &EmailJob) -> AppResult<()> {
        info!(
            "=== EMAIL (not sent) ===\n\
             From: {}\n\
             To: {}\n\
             Reply-To: {}\n\
             Subject: {}\n\
             Body:\n{}\n\
             ========================",
            job.from,
            job.to,
            job.reply_to.as_deref().unwrap_or("N/A"),
            job.subject,
            job.html
        );
        Ok(())
    }
}

/// Shared state of the email worker.
#[derive(Clone)]
pub struct DeliveryContext {
    pub notifications: Arc<dyn NotificationRepository>,
    pub mailer: Arc<dyn Mailer>,
}

/// Deliver one email and record the outcome on its notification.
pub async fn deliver(job: &EmailJob, ctx: &DeliveryContext) -> AppResult<()> {
    info!(
        notification_id = job.notification_id,
        to = %job.to,
        subject = %job.subject,
        "Processing email job"
    );

    match ctx.mailer.send(job).await {
        Ok(()) => {
            ctx.notifications
                .set_status(job.notification_id, NotificationStatus::Sent, Some(Utc::now()))
                .await?;
            info!(notification_id = job.notification_id, "Email delivered");
            Ok(())
        }
        Err(e) => {
            error!(notification_id = job.notification_id, "Email delivery failed: {}", e);
            ctx.notifications
                .set_status(job.notification_id, NotificationStatus::Failed, None)
                .await?;
            Err(e)
        }
    }
}

/// Email job handler - entry point for the apalis worker
pub async fn email_job_handler(job: EmailJob, ctx: Data<DeliveryContext>) -> Result<(), AppError> {
    deliver(&job, &ctx).await
}
