//! Notification records kept by the notification service.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

string_enum! {
    pub enum NotificationType ("notification type") {
        Email => "EMAIL",
        Contact => "CONTACT",
        DemandeStatus => "DEMANDE_STATUS",
        News => "NEWS",
        Event => "EVENT",
    }
}

string_enum! {
    /// Delivery state of the email behind a notification.
    pub enum NotificationStatus ("notification status") {
        Queued => "QUEUED",
        Sent => "SENT",
        Failed => "FAILED",
    }
}

/// Notification domain entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: i64,
    pub recipient_email: String,
    pub subject: String,
    pub content: String,
    pub notification_type: NotificationType,
    pub status: NotificationStatus,
    pub sent_at: Option<DateTime<Utc>>,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}
