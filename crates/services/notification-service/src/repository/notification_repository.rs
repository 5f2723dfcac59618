//! Notification repository implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set,
};

use common::{AppError, AppResult, PageRequest};
use domain::{Notification, NotificationStatus, NotificationType};

use super::entities::notification::{self, ActiveModel, Entity as NotificationEntity};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Fields of a notification about to be queued.
#[derive(Debug, Clone, PartialEq)]
pub struct NewNotification {
    pub recipient_email: String,
    pub subject: String,
    pub content: String,
    pub notification_type: NotificationType,
}

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait NotificationRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Notification>>;

    /// Insert an unread notification in the `QUEUED` state.
    async fn create(&self, notification: NewNotification) -> AppResult<Notification>;

    /// Record the delivery outcome.
    async fn set_status(
        &self,
        id: i64,
        status: NotificationStatus,
        sent_at: Option<DateTime<Utc>>,
    ) -> AppResult<()>;

    async fn mark_read(&self, id: i64) -> AppResult<()>;

    /// Notifications addressed to `email`, newest first.
    async fn list_for_recipient(
        &self,
        email: &str,
        page: PageRequest,
    ) -> AppResult<(Vec<Notification>, u64)>;

    async fn unread_count(&self, email: &str) -> AppResult<u64>;
}

/// SeaORM implementation of NotificationRepository
pub struct NotificationStore {
    db: DatabaseConnection,
}

impl NotificationStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl NotificationRepository for NotificationStore {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Notification>> {
        let result = NotificationEntity::find_by_id(id).one(&self.db).await?;
        Ok(result.map(Notification::from))
    }

    async fn create(&self, notification: NewNotification) -> AppResult<Notification> {
        let active_model = ActiveModel {
            recipient_email: Set(notification.recipient_email),
            subject: Set(notification.subject),
            content: Set(notification.content),
            notification_type: Set(notification.notification_type.as_str().to_string()),
            status: Set(NotificationStatus::Queued.as_str().to_string()),
            sent_at: Set(None),
            is_read: Set(false),
            created_at: Set(Utc::now()),
            ..Default::default()
        };

        let model = active_model.insert(&self.db).await?;
        Ok(Notification::from(model))
    }

    async fn set_status(
        &self,
        id: i64,
        status: NotificationStatus,
        sent_at: Option<DateTime<Utc>>,
    ) -> AppResult<()> {
        let result = NotificationEntity::update_many()
            .col_expr(notification::Column::Status, Expr::value(status.as_str()))
            .col_expr(notification::Column::SentAt, Expr::value(sent_at))
            .filter(notification::Column::Id.eq(id))
            .exec(&self.db)
            .await?;
        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }
        Ok(())
    }

    async fn mark_read(&self, id: i64) -> AppResult<()> {
        let result = NotificationEntity::update_many()
            .col_expr(notification::Column::IsRead, Expr::value(true))
            .filter(notification::Column::Id.eq(id))
            .exec(&self.db)
            .await?;
        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }
        Ok(())
    }

    async fn list_for_recipient(
        &self,
        email: &str,
        page: PageRequest,
    ) -> AppResult<(Vec<Notification>, u64)> {
        let paginator = NotificationEntity::find()
            .filter(notification::Column::RecipientEmail.eq(email))
            .order_by_desc(notification::Column::CreatedAt)
            .order_by_desc(notification::Column::Id)
            .paginate(&self.db, page.size);

        let total = paginator.num_items().await?;
        let models = paginator.fetch_page(page.index()).await?;

        Ok((models.into_iter().map(Notification::from).collect(), total))
    }

    async fn unread_count(&self, email: &str) -> AppResult<u64> {
        let count = NotificationEntity::find()
            .filter(notification::Column::RecipientEmail.eq(email))
            .filter(notification::Column::IsRead.eq(false))
            .count(&self.db)
            .await?;
        Ok(count)
    }
}
