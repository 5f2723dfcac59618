//! Event database entity for SeaORM.

use sea_orm::entity::prelude::*;
use sea_orm::Set;

use domain::{ContentStatus, Event, EventType};

use super::parse_code;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "events")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub title: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub start_date: DateTimeUtc,
    pub end_date: Option<DateTimeUtc>,
    pub location: Option<String>,
    pub image_url: Option<String>,
    pub event_type: String,
    pub status: String,
    pub max_participants: Option<i32>,
    pub current_participants: i32,
    pub registration_required: bool,
    pub registration_deadline: Option<DateTimeUtc>,
    pub organizer_id: Option<i64>,
    pub organizer_name: Option<String>,
    pub published_at: Option<DateTimeUtc>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Event {
    fn from(model: Model) -> Self {
        let status = parse_code(&model.status, ContentStatus::Draft);
        Event {
            id: model.id,
            title: model.title,
            description: model.description,
            start_date: model.start_date,
            end_date: model.end_date,
            location: model.location,
            image_url: model.image_url,
            event_type: parse_code(&model.event_type, EventType::Other),
            published: status == ContentStatus::Published,
            status,
            max_participants: model.max_participants,
            current_participants: model.current_participants,
            registration_required: model.registration_required,
            registration_deadline: model.registration_deadline,
            organizer_id: model.organizer_id,
            organizer_name: model.organizer_name,
            published_at: model.published_at,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

pub(crate) fn write_fields(active: &mut ActiveModel, event: Event) {
    active.title = Set(event.title);
    active.description = Set(event.description);
    active.start_date = Set(event.start_date);
    active.end_date = Set(event.end_date);
    active.location = Set(event.location);
    active.image_url = Set(event.image_url);
    active.event_type = Set(event.event_type.as_str().to_string());
    active.status = Set(event.status.as_str().to_string());
    active.max_participants = Set(event.max_participants);
    active.current_participants = Set(event.current_participants);
    active.registration_required = Set(event.registration_required);
    active.registration_deadline = Set(event.registration_deadline);
    active.organizer_id = Set(event.organizer_id);
    active.organizer_name = Set(event.organizer_name);
    active.published_at = Set(event.published_at);
    active.created_at = Set(event.created_at);
    active.updated_at = Set(event.updated_at);
}
