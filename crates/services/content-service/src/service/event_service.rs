//! Event service - agenda management and participant registration.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::info;

use common::{AppError, AppResult, CurrentUser, OptionExt, PageRequest, PageResponse};
use domain::{ContentStatus, Event, EventChanges, EventDraft, EventType};

use crate::repository::{EventListing, EventRepository};

/// Size of the "next events" list.
pub const NEXT_EVENTS_LIMIT: u64 = 5;

#[async_trait]
pub trait EventService: Send + Sync {
    async fn create(&self, draft: EventDraft, organizer: &CurrentUser) -> AppResult<Event>;

    /// Apply only the provided fields.
    async fn update(&self, id: i64, changes: EventChanges) -> AppResult<Event>;

    async fn publish(&self, id: i64) -> AppResult<Event>;

    async fn unpublish(&self, id: i64) -> AppResult<Event>;

    async fn delete(&self, id: i64) -> AppResult<()>;

    /// Any status, for the back office.
    async fn get(&self, id: i64) -> AppResult<Event>;

    async fn get_published(&self, id: i64) -> AppResult<Event>;

    async fn list_all(&self, page: PageRequest) -> AppResult<PageResponse<Event>>;

    /// Published events starting at or after `from` (defaults to now).
    async fn upcoming(
        &self,
        from: Option<DateTime<Utc>>,
        page: PageRequest,
    ) -> AppResult<PageResponse<Event>>;

    async fn past(&self, page: PageRequest) -> AppResult<PageResponse<Event>>;

    async fn by_type(&self, event_type: EventType, page: PageRequest) -> AppResult<PageResponse<Event>>;

    async fn search(&self, keyword: String, page: PageRequest) -> AppResult<PageResponse<Event>>;

    async fn next(&self) -> AppResult<Vec<Event>>;

    async fn register(&self, id: i64) -> AppResult<Event>;

    async fn unregister(&self, id: i64) -> AppResult<Event>;
}

pub struct EventManager {
    repo: Arc<dyn EventRepository>,
}

impl EventManager {
    pub fn new(repo: Arc<dyn EventRepository>) -> Self {
        Self { repo }
    }

    async fn find(&self, id: i64) -> AppResult<Event> {
        self.repo.find_by_id(id).await?.ok_or_not_found()
    }

    async fn paged(&self, listing: EventListing, page: PageRequest) -> AppResult<PageResponse<Event>> {
        let (items, total) = self.repo.list(listing, page).await?;
        Ok(PageResponse::new(items, page, total))
    }
}

#[async_trait]
impl EventService for EventManager {
    async fn create(&self, draft: EventDraft, organizer: &CurrentUser) -> AppResult<Event> {
        draft.validate()?;

        let now = Utc::now();
        let event = Event {
            id: 0,
            title: draft.title,
            description: draft.description,
            start_date: draft.start_date,
            end_date: draft.end_date,
            location: draft.location,
            image_url: draft.image_url,
            event_type: draft.event_type,
            status: ContentStatus::Draft,
            published: false,
            max_participants: draft.max_participants,
            current_participants: 0,
            registration_required: draft.registration_required,
            registration_deadline: draft.registration_deadline,
            organizer_id: Some(organizer.id),
            organizer_name: Some(organizer.name.clone()),
            published_at: None,
            created_at: now,
            updated_at: now,
        };

        let created = self.repo.create(event).await?;
        info!(event_id = created.id, "Event created");
        Ok(created)
    }

    async fn update(&self, id: i64, changes: EventChanges) -> AppResult<Event> {
        let mut event = self.find(id).await?;
        changes.apply_to(&mut event)?;
        event.updated_at = Utc::now();
        self.repo.update(event).await
    }

    async fn publish(&self, id: i64) -> AppResult<Event> {
        let mut event = self.find(id).await?;
        event.publish(Utc::now());
        let event = self.repo.update(event).await?;
        info!(event_id = id, "Event published");
        Ok(event)
    }

    async fn unpublish(&self, id: i64) -> AppResult<Event> {
        let mut event = self.find(id).await?;
        event.unpublish(Utc::now());
        self.repo.update(event).await
    }

    async fn delete(&self, id: i64) -> AppResult<()> {
        if !self.repo.delete(id).await? {
            return Err(AppError::NotFound);
        }
        info!(event_id = id, "Event deleted");
        Ok(())
    }

    async fn get(&self, id: i64) -> AppResult<Event> {
        self.find(id).await
    }

    async fn get_published(&self, id: i64) -> AppResult<Event> {
        self.repo
            .find_by_id(id)
            .await?
            .filter(|e| e.status == ContentStatus::Published)
            .ok_or(AppError::NotFound)
    }

    async fn list_all(&self, page: PageRequest) -> AppResult<PageResponse<Event>> {
        self.paged(EventListing::All, page).await
    }

    async fn upcoming(
        &self,
        from: Option<DateTime<Utc>>,
        page: PageRequest,
    ) -> AppResult<PageResponse<Event>> {
        let from = from.unwrap_or_else(Utc::now);
        self.paged(EventListing::Upcoming { from }, page).await
    }

    async fn past(&self, page: PageRequest) -> AppResult<PageResponse<Event>> {
        self.paged(EventListing::Past { before: Utc::now() }, page)
            .await
    }

    async fn by_type(&self, event_type: EventType, page: PageRequest) -> AppResult<PageResponse<Event>> {
        self.paged(EventListing::ByType(event_type), page).await
    }

    async fn search(&self, keyword: String, page: PageRequest) -> AppResult<PageResponse<Event>> {
        if keyword.trim().is_empty() {
            return Err(AppError::validation("Search keyword is required"));
        }
        let listing = EventListing::Search {
            keyword,
            from: Utc::now(),
        };
        self.paged(listing, page).await
    }

    async fn next(&self) -> AppResult<Vec<Event>> {
        self.repo.next(Utc::now(), NEXT_EVENTS_LIMIT).await
    }

    async fn register(&self, id: i64) -> AppResult<Event> {
        let mut event = self.find(id).await?;
        event.register_participant(Utc::now())?;
        let event = self.repo.update(event).await?;
        info!(
            event_id = id,
            participants = event.current_participants,
            "Participant registered"
        );
        Ok(event)
    }

    async fn unregister(&self, id: i64) -> AppResult<Event> {
        let mut event = self.find(id).await?;
        event.unregister_participant(Utc::now());
        self.repo.update(event).await
    }
}
