//! Event handlers: public agenda, registration and back-office editing.

use axum::{
    extract::{Extension, Path, Query, State},
    http::StatusCode,
    response::Json,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use common::{AppResult, CurrentUser, PageParams, PageResponse, ValidatedJson};
use domain::{Event, EventChanges, EventDraft, EventType, DEFAULT_ADMIN_PAGE_SIZE, DEFAULT_PAGE_SIZE};

use super::KeywordQuery;
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventRequest {
    #[validate(length(min = 1, max = 255, message = "Title must be between 1 and 255 characters"))]
    #[schema(example = "Annual charity gala")]
    pub title: String,
    pub description: Option<String>,
    pub start_date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
    #[validate(length(max = 255, message = "Location must be at most 255 characters"))]
    pub location: Option<String>,
    #[validate(length(max = 500, message = "Image URL must be at most 500 characters"))]
    pub image_url: Option<String>,
    /// Defaults to OTHER
    pub event_type: Option<EventType>,
    #[validate(range(min = 1, message = "Maximum participants must be at least 1"))]
    pub max_participants: Option<i32>,
    #[serde(default)]
    pub registration_required: bool,
    pub registration_deadline: Option<DateTime<Utc>>,
}

impl From<CreateEventRequest> for EventDraft {
    fn from(req: CreateEventRequest) -> Self {
        Self {
            title: req.title.trim().to_string(),
            description: req.description,
            start_date: req.start_date,
            end_date: req.end_date,
            location: req.location,
            image_url: req.image_url,
            event_type: req.event_type.unwrap_or(EventType::Other),
            max_participants: req.max_participants,
            registration_required: req.registration_required,
            registration_deadline: req.registration_deadline,
        }
    }
}

/// Partial event update. Absent fields are left unchanged.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEventRequest {
    #[validate(length(min = 1, max = 255, message = "Title must be between 1 and 255 characters"))]
    pub title: Option<String>,
    pub description: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    #[validate(length(max = 255, message = "Location must be at most 255 characters"))]
    pub location: Option<String>,
    #[validate(length(max = 500, message = "Image URL must be at most 500 characters"))]
    pub image_url: Option<String>,
    pub event_type: Option<EventType>,
    #[validate(range(min = 1, message = "Maximum participants must be at least 1"))]
    pub max_participants: Option<i32>,
    pub registration_required: Option<bool>,
    pub registration_deadline: Option<DateTime<Utc>>,
}

impl From<UpdateEventRequest> for EventChanges {
    fn from(req: UpdateEventRequest) -> Self {
        Self {
            title: req.title,
            description: req.description,
            start_date: req.start_date,
            end_date: req.end_date,
            location: req.location,
            image_url: req.image_url,
            event_type: req.event_type,
            max_participants: req.max_participants,
            registration_required: req.registration_required,
            registration_deadline: req.registration_deadline,
        }
    }
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct UpcomingQuery {
    /// Lower bound on the start date, RFC 3339 (defaults to now)
    pub from: Option<DateTime<Utc>>,
}

/// Upcoming published events
#[utoipa::path(
    get,
    path = "/api/public/events",
    tag = "Public",
    params(UpcomingQuery, PageParams),
    responses((status = 200, description = "Page of events starting at or after `from`"))
)]
pub async fn list_public(
    State(state): State<AppState>,
    Query(query): Query<UpcomingQuery>,
    Query(page): Query<PageParams>,
) -> AppResult<Json<PageResponse<Event>>> {
    let page = state
        .event_service
        .upcoming(query.from, page.resolve(DEFAULT_PAGE_SIZE))
        .await?;
    Ok(Json(page))
}

/// Upcoming published events from now
#[utoipa::path(
    get,
    path = "/api/events/upcoming",
    tag = "Events",
    params(PageParams),
    responses((status = 200, description = "Page of upcoming events, soonest first"))
)]
pub async fn upcoming(
    State(state): State<AppState>,
    Query(page): Query<PageParams>,
) -> AppResult<Json<PageResponse<Event>>> {
    Ok(Json(
        state
            .event_service
            .upcoming(None, page.resolve(DEFAULT_PAGE_SIZE))
            .await?,
    ))
}

/// Past published events
#[utoipa::path(
    get,
    path = "/api/events/past",
    tag = "Events",
    params(PageParams),
    responses((status = 200, description = "Page of past events, most recent first"))
)]
pub async fn past(
    State(state): State<AppState>,
    Query(page): Query<PageParams>,
) -> AppResult<Json<PageResponse<Event>>> {
    Ok(Json(
        state
            .event_service
            .past(page.resolve(DEFAULT_PAGE_SIZE))
            .await?,
    ))
}

/// Published events of one type
#[utoipa::path(
    get,
    path = "/api/events/type/{type}",
    tag = "Events",
    params(("type" = String, Path, description = "Event type code"), PageParams),
    responses(
        (status = 200, description = "Page of events"),
        (status = 400, description = "Unknown event type")
    )
)]
pub async fn by_type(
    State(state): State<AppState>,
    Path(event_type): Path<String>,
    Query(page): Query<PageParams>,
) -> AppResult<Json<PageResponse<Event>>> {
    let event_type: EventType = event_type.parse()?;
    Ok(Json(
        state
            .event_service
            .by_type(event_type, page.resolve(DEFAULT_PAGE_SIZE))
            .await?,
    ))
}

/// Search upcoming events
#[utoipa::path(
    get,
    path = "/api/events/search",
    tag = "Events",
    params(KeywordQuery, PageParams),
    responses(
        (status = 200, description = "Matching upcoming events"),
        (status = 400, description = "Missing keyword")
    )
)]
pub async fn search(
    State(state): State<AppState>,
    Query(query): Query<KeywordQuery>,
    Query(page): Query<PageParams>,
) -> AppResult<Json<PageResponse<Event>>> {
    Ok(Json(
        state
            .event_service
            .search(query.keyword, page.resolve(DEFAULT_PAGE_SIZE))
            .await?,
    ))
}

/// Next five events
#[utoipa::path(
    get,
    path = "/api/events/next",
    tag = "Events",
    responses((status = 200, description = "Next published events", body = [Event]))
)]
pub async fn next(State(state): State<AppState>) -> AppResult<Json<Vec<Event>>> {
    Ok(Json(state.event_service.next().await?))
}

/// Published event by ID
#[utoipa::path(
    get,
    path = "/api/events/{id}",
    tag = "Events",
    params(("id" = i64, Path, description = "Event ID")),
    responses(
        (status = 200, description = "Event", body = Event),
        (status = 404, description = "Event not found")
    )
)]
pub async fn get_public(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Event>> {
    Ok(Json(state.event_service.get_published(id).await?))
}

/// Register for an event
#[utoipa::path(
    post,
    path = "/api/events/{id}/register",
    tag = "Events",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Event ID")),
    responses(
        (status = 200, description = "Registered", body = Event),
        (status = 400, description = "Not published, deadline passed or full"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Event not found")
    )
)]
pub async fn register(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Event>> {
    Ok(Json(state.event_service.register(id).await?))
}

/// Cancel a registration
#[utoipa::path(
    post,
    path = "/api/events/{id}/unregister",
    tag = "Events",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Event ID")),
    responses(
        (status = 200, description = "Unregistered", body = Event),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Event not found")
    )
)]
pub async fn unregister(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Event>> {
    Ok(Json(state.event_service.unregister(id).await?))
}

/// List all events (any status)
#[utoipa::path(
    get,
    path = "/api/admin/events",
    tag = "Admin Events",
    security(("bearer_auth" = [])),
    params(PageParams),
    responses(
        (status = 200, description = "Page of events"),
        (status = 403, description = "Forbidden - Admin only")
    )
)]
pub async fn list_all(
    State(state): State<AppState>,
    Query(page): Query<PageParams>,
) -> AppResult<Json<PageResponse<Event>>> {
    Ok(Json(
        state
            .event_service
            .list_all(page.resolve(DEFAULT_ADMIN_PAGE_SIZE))
            .await?,
    ))
}

/// Create event
#[utoipa::path(
    post,
    path = "/api/admin/events",
    tag = "Admin Events",
    security(("bearer_auth" = [])),
    request_body = CreateEventRequest,
    responses(
        (status = 201, description = "Event created", body = Event),
        (status = 400, description = "Validation error")
    )
)]
pub async fn create(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateEventRequest>,
) -> AppResult<(StatusCode, Json<Event>)> {
    let event = state
        .event_service
        .create(payload.into(), &current_user)
        .await?;
    Ok((StatusCode::CREATED, Json(event)))
}

/// Get event by ID (any status)
#[utoipa::path(
    get,
    path = "/api/admin/events/{id}",
    tag = "Admin Events",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Event ID")),
    responses(
        (status = 200, description = "Event", body = Event),
        (status = 404, description = "Event not found")
    )
)]
pub async fn get(State(state): State<AppState>, Path(id): Path<i64>) -> AppResult<Json<Event>> {
    Ok(Json(state.event_service.get(id).await?))
}

/// Update event
#[utoipa::path(
    put,
    path = "/api/admin/events/{id}",
    tag = "Admin Events",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Event ID")),
    request_body = UpdateEventRequest,
    responses(
        (status = 200, description = "Event updated", body = Event),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Event not found")
    )
)]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ValidatedJson(payload): ValidatedJson<UpdateEventRequest>,
) -> AppResult<Json<Event>> {
    Ok(Json(state.event_service.update(id, payload.into()).await?))
}

/// Publish event
#[utoipa::path(
    put,
    path = "/api/admin/events/{id}/publish",
    tag = "Admin Events",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Event ID")),
    responses(
        (status = 200, description = "Event published", body = Event),
        (status = 404, description = "Event not found")
    )
)]
pub async fn publish(State(state): State<AppState>, Path(id): Path<i64>) -> AppResult<Json<Event>> {
    Ok(Json(state.event_service.publish(id).await?))
}

/// Unpublish event
#[utoipa::path(
    put,
    path = "/api/admin/events/{id}/unpublish",
    tag = "Admin Events",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Event ID")),
    responses(
        (status = 200, description = "Event back to draft", body = Event),
        (status = 404, description = "Event not found")
    )
)]
pub async fn unpublish(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Event>> {
    Ok(Json(state.event_service.unpublish(id).await?))
}

/// Delete event
#[utoipa::path(
    delete,
    path = "/api/admin/events/{id}",
    tag = "Admin Events",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Event ID")),
    responses(
        (status = 204, description = "Event deleted"),
        (status = 404, description = "Event not found")
    )
)]
pub async fn delete(State(state): State<AppState>, Path(id): Path<i64>) -> AppResult<StatusCode> {
    state.event_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
