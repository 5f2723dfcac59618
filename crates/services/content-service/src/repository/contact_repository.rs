//! Contact message repository implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};

use common::db::contains_ci;
use common::{AppError, AppResult, PageRequest};
use domain::{ContactMessage, ContactStatus, NewContactMessage};

use super::entities::contact_message::{self, ActiveModel, Entity as ContactEntity};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Admin inbox filters; unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContactFilter {
    pub handled: Option<bool>,
    pub status: Option<ContactStatus>,
    /// Case-insensitive match on name, email or subject
    pub keyword: Option<String>,
    /// Received at or after
    pub start: Option<DateTime<Utc>>,
    /// Received at or before
    pub end: Option<DateTime<Utc>>,
}

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ContactRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<ContactMessage>>;

    async fn create(&self, message: NewContactMessage) -> AppResult<ContactMessage>;

    async fn update(&self, message: ContactMessage) -> AppResult<ContactMessage>;

    /// Returns false when no row matched.
    async fn delete(&self, id: i64) -> AppResult<bool>;

    /// Matching messages, newest first.
    async fn search(
        &self,
        filter: ContactFilter,
        page: PageRequest,
    ) -> AppResult<(Vec<ContactMessage>, u64)>;
}

/// SeaORM implementation of ContactRepository
pub struct ContactStore {
    db: DatabaseConnection,
}

impl ContactStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ContactRepository for ContactStore {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<ContactMessage>> {
        let result = ContactEntity::find_by_id(id).one(&self.db).await?;
        Ok(result.map(ContactMessage::from))
    }

    async fn create(&self, message: NewContactMessage) -> AppResult<ContactMessage> {
        let now = Utc::now();
        let active_model = ActiveModel {
            full_name: Set(message.full_name),
            email: Set(message.email),
            phone: Set(message.phone),
            subject: Set(message.subject),
            message: Set(message.message),
            status: Set(ContactStatus::New.as_str().to_string()),
            handled: Set(false),
            response_message: Set(None),
            responded_at: Set(None),
            responded_by: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let model = active_model.insert(&self.db).await?;
        Ok(ContactMessage::from(model))
    }

    async fn update(&self, message: ContactMessage) -> AppResult<ContactMessage> {
        let existing = ContactEntity::find_by_id(message.id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: ActiveModel = existing.into();
        active.status = Set(message.status.as_str().to_string());
        active.handled = Set(message.handled);
        active.response_message = Set(message.response_message);
        active.responded_at = Set(message.responded_at);
        active.responded_by = Set(message.responded_by);
        active.updated_at = Set(message.updated_at);

        let model = active.update(&self.db).await?;
        Ok(ContactMessage::from(model))
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        let result = ContactEntity::delete_by_id(id).exec(&self.db).await?;
        Ok(result.rows_affected > 0)
    }

    async fn search(
        &self,
        filter: ContactFilter,
        page: PageRequest,
    ) -> AppResult<(Vec<ContactMessage>, u64)> {
        let mut condition = Condition::all();

        if let Some(handled) = filter.handled {
            condition = condition.add(contact_message::Column::Handled.eq(handled));
        }
        if let Some(status) = filter.status {
            condition = condition.add(contact_message::Column::Status.eq(status.as_str()));
        }
        if let Some(term) = filter.keyword.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
            condition = condition.add(
                Condition::any()
                    .add(contains_ci(contact_message::Column::FullName, term))
                    .add(contains_ci(contact_message::Column::Email, term))
                    .add(contains_ci(contact_message::Column::Subject, term)),
            );
        }
        if let Some(start) = filter.start {
            condition = condition.add(contact_message::Column::CreatedAt.gte(start));
        }
        if let Some(end) = filter.end {
            condition = condition.add(contact_message::Column::CreatedAt.lte(end));
        }

        let paginator = ContactEntity::find()
            .filter(condition)
            .order_by_desc(contact_message::Column::CreatedAt)
            .paginate(&self.db, page.size);

        let total = paginator.num_items().await?;
        let models = paginator.fetch_page(page.index()).await?;

        Ok((models.into_iter().map(ContactMessage::from).collect(), total))
    }
}
