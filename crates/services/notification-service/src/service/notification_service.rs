//! Notification service - records emails, queues them and serves the inbox.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::future::join_all;
use tracing::{error, info, warn};

use common::{AppError, AppResult, CurrentUser, PageRequest, PageResponse};
use domain::{Notification, NotificationStatus, NotificationType};

use super::templates;
use crate::config::EmailConfig;
use crate::jobs::{EmailJob, EmailQueue};
use crate::repository::{NewNotification, NotificationRepository};

const CONTACT_SUBJECT_PREFIX: &str = "New Contact Form Submission: ";
const DEMANDE_STATUS_SUBJECT: &str = "Your demande status has been updated";
const NEWS_SUBJECT_PREFIX: &str = "New article published: ";
const EVENT_SUBJECT_PREFIX: &str = "New event: ";

/// A ready-to-send email.
#[derive(Debug, Clone, PartialEq)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub html: String,
    /// Defaults to the configured sender
    pub from: Option<String>,
    pub reply_to: Option<String>,
}

/// Contact form submission forwarded to support.
#[derive(Debug, Clone, PartialEq)]
pub struct ContactNotice {
    pub full_name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DemandeStatusNotice {
    pub to: String,
    pub user_name: String,
    pub demande_id: i64,
    pub prestation_title: String,
    pub status: String,
    pub admin_comment: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewsNotice {
    pub recipients: Vec<String>,
    pub title: String,
    pub summary: Option<String>,
    pub link: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EventNotice {
    pub recipients: Vec<String>,
    pub title: String,
    pub start_date: DateTime<Utc>,
    pub location: Option<String>,
    pub link: Option<String>,
}

/// Per-recipient outcome of a broadcast.
///
/// Recipients are independent: one failure does not undo the emails already
/// queued for the others.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Broadcast {
    pub queued: Vec<Notification>,
    /// Recipients whose email could not be recorded or queued
    pub failed: Vec<String>,
}

impl Broadcast {
    pub fn single(notification: Notification) -> Self {
        Self {
            queued: vec![notification],
            failed: Vec::new(),
        }
    }
}

/// Notification service trait for dependency injection.
#[async_trait]
pub trait NotificationService: Send + Sync {
    async fn send_email(&self, message: EmailMessage) -> AppResult<Notification>;

    async fn notify_contact(&self, notice: ContactNotice) -> AppResult<Notification>;

    async fn notify_demande_status(&self, notice: DemandeStatusNotice) -> AppResult<Notification>;

    /// One notification per distinct recipient. Fails only when no email
    /// could be queued.
    async fn notify_news(&self, notice: NewsNotice) -> AppResult<Broadcast>;

    async fn notify_event(&self, notice: EventNotice) -> AppResult<Broadcast>;

    async fn my_notifications(
        &self,
        user: &CurrentUser,
        page: PageRequest,
    ) -> AppResult<PageResponse<Notification>>;

    async fn unread_count(&self, user: &CurrentUser) -> AppResult<u64>;

    /// Recipient only.
    async fn mark_read(&self, id: i64, user: &CurrentUser) -> AppResult<Notification>;
}

pub struct NotificationManager {
    repo: Arc<dyn NotificationRepository>,
    queue: Arc<dyn EmailQueue>,
    email: EmailConfig,
}

impl NotificationManager {
    pub fn new(
        repo: Arc<dyn NotificationRepository>,
        queue: Arc<dyn EmailQueue>,
        email: EmailConfig,
    ) -> Self {
        Self { repo, queue, email }
    }

    /// Record the notification, then queue its delivery.
    async fn dispatch(&self, message: EmailMessage, kind: NotificationType) -> AppResult<Notification> {
        let recipient = normalize_email(&message.to);
        let notification = self
            .repo
            .create(NewNotification {
                recipient_email: recipient.clone(),
                subject: message.subject.clone(),
                content: message.html.clone(),
                notification_type: kind,
            })
            .await?;

        let job = EmailJob {
            notification_id: notification.id,
            to: recipient,
            from: message.from.unwrap_or_else(|| self.email.from.clone()),
            subject: message.subject,
            html: message.html,
            reply_to: message.reply_to,
        };

        if let Err(e) = self.queue.enqueue(job).await {
            error!(notification_id = notification.id, "Failed to queue email: {}", e);
            if let Err(status_err) = self
                .repo
                .set_status(notification.id, NotificationStatus::Failed, None)
                .await
            {
                warn!(
                    notification_id = notification.id,
                    "Could not mark notification as failed: {}", status_err
                );
            }
            return Err(e);
        }

        info!(
            notification_id = notification.id,
            kind = %kind,
            "Email queued"
        );
        Ok(notification)
    }

    async fn broadcast(
        &self,
        recipients: &[String],
        subject: String,
        html: String,
        kind: NotificationType,
    ) -> AppResult<Broadcast> {
        let recipients = distinct_recipients(recipients);
        if recipients.is_empty() {
            return Err(AppError::validation("At least one recipient is required"));
        }

        let results = join_all(recipients.iter().map(|to| {
            self.dispatch(
                EmailMessage {
                    to: to.clone(),
                    subject: subject.clone(),
                    html: html.clone(),
                    from: None,
                    reply_to: None,
                },
                kind,
            )
        }))
        .await;

        let mut broadcast = Broadcast::default();
        let mut last_error = None;
        for (recipient, result) in recipients.into_iter().zip(results) {
            match result {
                Ok(notification) => broadcast.queued.push(notification),
                Err(e) => {
                    broadcast.failed.push(recipient);
                    last_error = Some(e);
                }
            }
        }

        match last_error {
            Some(e) if broadcast.queued.is_empty() => Err(e),
            _ => {
                if !broadcast.failed.is_empty() {
                    warn!(
                        kind = %kind,
                        queued = broadcast.queued.len(),
                        failed = broadcast.failed.len(),
                        "Broadcast partially queued"
                    );
                }
                Ok(broadcast)
            }
        }
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Normalized recipients in first-seen order, blanks and repeats dropped.
fn distinct_recipients(recipients: &[String]) -> Vec<String> {
    let mut distinct: Vec<String> = Vec::with_capacity(recipients.len());
    for email in recipients.iter().map(|e| normalize_email(e)) {
        if !email.is_empty() && !distinct.contains(&email) {
            distinct.push(email);
        }
    }
    distinct
}

#[async_trait]
impl NotificationService for NotificationManager {
    async fn send_email(&self, message: EmailMessage) -> AppResult<Notification> {
        self.dispatch(message, NotificationType::Email).await
    }

    async fn notify_contact(&self, notice: ContactNotice) -> AppResult<Notification> {
        let html = templates::contact_email(
            &notice.full_name,
            &notice.email,
            &notice.subject,
            &notice.message,
        );
        let message = EmailMessage {
            to: self.email.support_email.clone(),
            subject: format!("{}{}", CONTACT_SUBJECT_PREFIX, notice.subject),
            html,
            from: None,
            reply_to: Some(notice.email),
        };
        self.dispatch(message, NotificationType::Contact).await
    }

    async fn notify_demande_status(&self, notice: DemandeStatusNotice) -> AppResult<Notification> {
        let html = templates::demande_status_email(
            &notice.user_name,
            notice.demande_id,
            &notice.prestation_title,
            &notice.status,
            notice.admin_comment.as_deref(),
        );
        let message = EmailMessage {
            to: notice.to,
            subject: DEMANDE_STATUS_SUBJECT.to_string(),
            html,
            from: None,
            reply_to: None,
        };
        self.dispatch(message, NotificationType::DemandeStatus).await
    }

    async fn notify_news(&self, notice: NewsNotice) -> AppResult<Broadcast> {
        let html = templates::news_published_email(
            &notice.title,
            notice.summary.as_deref(),
            notice.link.as_deref(),
        );
        let subject = format!("{}{}", NEWS_SUBJECT_PREFIX, notice.title);
        self.broadcast(&notice.recipients, subject, html, NotificationType::News)
            .await
    }

    async fn notify_event(&self, notice: EventNotice) -> AppResult<Broadcast> {
        let html = templates::event_published_email(
            &notice.title,
            notice.start_date,
            notice.location.as_deref(),
            notice.link.as_deref(),
        );
        let subject = format!("{}{}", EVENT_SUBJECT_PREFIX, notice.title);
        self.broadcast(&notice.recipients, subject, html, NotificationType::Event)
            .await
    }

    async fn my_notifications(
        &self,
        user: &CurrentUser,
        page: PageRequest,
    ) -> AppResult<PageResponse<Notification>> {
        let (items, total) = self
            .repo
            .list_for_recipient(&normalize_email(&user.email), page)
            .await?;
        Ok(PageResponse::new(items, page, total))
    }

    async fn unread_count(&self, user: &CurrentUser) -> AppResult<u64> {
        self.repo.unread_count(&normalize_email(&user.email)).await
    }

    async fn mark_read(&self, id: i64, user: &CurrentUser) -> AppResult<Notification> {
        let mut notification = self.repo.find_by_id(id).await?.ok_or(AppError::NotFound)?;
        if notification.recipient_email != normalize_email(&user.email) {
            return Err(AppError::forbidden(
                "You can only update your own notifications",
            ));
        }

        if !notification.is_read {
            self.repo.mark_read(id).await?;
            notification.is_read = true;
        }
        Ok(notification)
    }
}
