//! Event repository implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect,
};

use common::db::contains_ci;
use common::{AppError, AppResult, PageRequest};
use domain::{ContentStatus, Event, EventType};

use super::entities::event::{self, write_fields, ActiveModel, Entity as EventEntity};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Which event rows a listing returns. Every variant but `All` is limited
/// to published events.
#[derive(Debug, Clone, PartialEq)]
pub enum EventListing {
    /// Every event, latest start first
    All,
    /// Starting at or after `from`, soonest first
    Upcoming { from: DateTime<Utc> },
    /// Started before `before`, most recent first
    Past { before: DateTime<Utc> },
    ByType(EventType),
    /// Upcoming events matching title, description or location
    Search { keyword: String, from: DateTime<Utc> },
}

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait EventRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Event>>;

    async fn create(&self, event: Event) -> AppResult<Event>;

    async fn update(&self, event: Event) -> AppResult<Event>;

    /// Returns false when no row matched.
    async fn delete(&self, id: i64) -> AppResult<bool>;

    async fn list(&self, listing: EventListing, page: PageRequest) -> AppResult<(Vec<Event>, u64)>;

    /// First `limit` published events starting at or after `from`.
    async fn next(&self, from: DateTime<Utc>, limit: u64) -> AppResult<Vec<Event>>;
}

/// SeaORM implementation of EventRepository
pub struct EventStore {
    db: DatabaseConnection,
}

impl EventStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn published() -> Condition {
    Condition::all().add(event::Column::Status.eq(ContentStatus::Published.as_str()))
}

#[async_trait]
impl EventRepository for EventStore {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Event>> {
        let result = EventEntity::find_by_id(id).one(&self.db).await?;
        Ok(result.map(Event::from))
    }

    async fn create(&self, event: Event) -> AppResult<Event> {
        let mut active = <ActiveModel as sea_orm::ActiveModelTrait>::default();
        write_fields(&mut active, event);
        let model = active.insert(&self.db).await?;
        Ok(Event::from(model))
    }

    async fn update(&self, event: Event) -> AppResult<Event> {
        let existing = EventEntity::find_by_id(event.id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: ActiveModel = existing.into();
        write_fields(&mut active, event);
        let model = active.update(&self.db).await?;
        Ok(Event::from(model))
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        let result = EventEntity::delete_by_id(id).exec(&self.db).await?;
        Ok(result.rows_affected > 0)
    }

    async fn list(&self, listing: EventListing, page: PageRequest) -> AppResult<(Vec<Event>, u64)> {
        let query = match listing {
            EventListing::All => EventEntity::find().order_by_desc(event::Column::StartDate),
            EventListing::Upcoming { from } => EventEntity::find()
                .filter(published().add(event::Column::StartDate.gte(from)))
                .order_by_asc(event::Column::StartDate),
            EventListing::Past { before } => EventEntity::find()
                .filter(published().add(event::Column::StartDate.lt(before)))
                .order_by_desc(event::Column::StartDate),
            EventListing::ByType(event_type) => EventEntity::find()
                .filter(published().add(event::Column::EventType.eq(event_type.as_str())))
                .order_by_asc(event::Column::StartDate),
            EventListing::Search { keyword, from } => {
                let keyword = keyword.trim();
                EventEntity::find()
                    .filter(
                        published().add(event::Column::StartDate.gte(from)).add(
                            Condition::any()
                                .add(contains_ci(event::Column::Title, keyword))
                                .add(contains_ci(event::Column::Description, keyword))
                                .add(contains_ci(event::Column::Location, keyword)),
                        ),
                    )
                    .order_by_asc(event::Column::StartDate)
            }
        };

        let paginator = query.paginate(&self.db, page.size);
        let total = paginator.num_items().await?;
        let models = paginator.fetch_page(page.index()).await?;

        Ok((models.into_iter().map(Event::from).collect(), total))
    }

    async fn next(&self, from: DateTime<Utc>, limit: u64) -> AppResult<Vec<Event>> {
        let models = EventEntity::find()
            .filter(published().add(event::Column::StartDate.gte(from)))
            .order_by_asc(event::Column::StartDate)
            .limit(limit)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(Event::from).collect())
    }
}
