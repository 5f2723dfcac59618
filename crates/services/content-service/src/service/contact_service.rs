//! Contact form intake and the administrator inbox.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tracing::info;

use common::{AppError, AppResult, CurrentUser, OptionExt, PageRequest, PageResponse};
use domain::{ContactMessage, ContactStatus, NewContactMessage};

use crate::repository::{ContactFilter, ContactRepository};

#[async_trait]
pub trait ContactService: Send + Sync {
    /// Store a message from the public form with status NEW.
    async fn submit(&self, message: NewContactMessage) -> AppResult<ContactMessage>;

    async fn get(&self, id: i64) -> AppResult<ContactMessage>;

    async fn search(
        &self,
        filter: ContactFilter,
        page: PageRequest,
    ) -> AppResult<PageResponse<ContactMessage>>;

    async fn mark_handled(&self, id: i64) -> AppResult<ContactMessage>;

    async fn set_status(&self, id: i64, status: ContactStatus) -> AppResult<ContactMessage>;

    /// Record the reply; the message becomes RESPONDED and handled.
    async fn respond(
        &self,
        id: i64,
        response: String,
        responder: &CurrentUser,
    ) -> AppResult<ContactMessage>;

    async fn delete(&self, id: i64) -> AppResult<()>;
}

pub struct ContactManager {
    repo: Arc<dyn ContactRepository>,
}

impl ContactManager {
    pub fn new(repo: Arc<dyn ContactRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl ContactService for ContactManager {
    async fn submit(&self, message: NewContactMessage) -> AppResult<ContactMessage> {
        let stored = self.repo.create(message).await?;
        info!(message_id = stored.id, "Contact message received");
        Ok(stored)
    }

    async fn get(&self, id: i64) -> AppResult<ContactMessage> {
        self.repo.find_by_id(id).await?.ok_or_not_found()
    }

    async fn search(
        &self,
        filter: ContactFilter,
        page: PageRequest,
    ) -> AppResult<PageResponse<ContactMessage>> {
        if let (Some(start), Some(end)) = (filter.start, filter.end) {
            if end < start {
                return Err(AppError::validation("End date must not be before start date"));
            }
        }

        let (items, total) = self.repo.search(filter, page).await?;
        Ok(PageResponse::new(items, page, total))
    }

    async fn mark_handled(&self, id: i64) -> AppResult<ContactMessage> {
        let mut message = self.get(id).await?;
        message.mark_handled(Utc::now());
        self.repo.update(message).await
    }

    async fn set_status(&self, id: i64, status: ContactStatus) -> AppResult<ContactMessage> {
        let mut message = self.get(id).await?;
        message.set_status(status, Utc::now());
        self.repo.update(message).await
    }

    async fn respond(
        &self,
        id: i64,
        response: String,
        responder: &CurrentUser,
    ) -> AppResult<ContactMessage> {
        let mut message = self.get(id).await?;
        message.respond(response, responder.name.clone(), Utc::now());
        let message = self.repo.update(message).await?;
        info!(message_id = id, responder = %responder.email, "Contact message answered");
        Ok(message)
    }

    async fn delete(&self, id: i64) -> AppResult<()> {
        if !self.repo.delete(id).await? {
            return Err(AppError::NotFound);
        }
        Ok(())
    }
}
