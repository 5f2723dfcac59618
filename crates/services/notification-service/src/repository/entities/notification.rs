//! Notification database entity for SeaORM.

use sea_orm::entity::prelude::*;

use domain::{Notification, NotificationStatus, NotificationType};

use super::parse_code;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "notifications")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub recipient_email: String,
    pub subject: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub notification_type: String,
    pub status: String,
    pub sent_at: Option<DateTimeUtc>,
    pub is_read: bool,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Notification {
    fn from(model: Model) -> Self {
        Notification {
            id: model.id,
            recipient_email: model.recipient_email,
            subject: model.subject,
            content: model.content,
            notification_type: parse_code(&model.notification_type, NotificationType::Email),
            status: parse_code(&model.status, NotificationStatus::Queued),
            sent_at: model.sent_at,
            is_read: model.is_read,
            created_at: model.created_at,
        }
    }
}
