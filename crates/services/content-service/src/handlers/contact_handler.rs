//! Contact form and administrator inbox handlers.

use axum::{
    extract::{Extension, Path, Query, State},
    http::StatusCode,
    response::Json,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use common::extract::not_blank;
use common::patterns::PHONE_REGEX;
use common::{AppResult, CurrentUser, PageParams, PageResponse, ValidatedJson};
use domain::{ContactMessage, ContactStatus, NewContactMessage, DEFAULT_ADMIN_PAGE_SIZE};

use super::KeywordQuery;
use crate::repository::ContactFilter;
use crate::state::AppState;

/// Public contact form
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContactRequest {
    #[validate(
        custom(function = "not_blank", message = "Full name is required"),
        length(max = 255, message = "Full name must be at most 255 characters")
    )]
    #[schema(example = "Jean Martin")]
    pub full_name: String,
    #[validate(email(message = "Email must be valid"))]
    pub email: String,
    #[validate(regex(path = *PHONE_REGEX, message = "Phone must contain 10 digits"))]
    pub phone: Option<String>,
    #[validate(
        custom(function = "not_blank", message = "Subject is required"),
        length(max = 255, message = "Subject must be at most 255 characters")
    )]
    pub subject: String,
    #[validate(
        custom(function = "not_blank", message = "Message is required"),
        length(max = 5000, message = "Message must be at most 5000 characters")
    )]
    pub message: String,
}

impl From<ContactRequest> for NewContactMessage {
    fn from(req: ContactRequest) -> Self {
        Self {
            full_name: req.full_name.trim().to_string(),
            email: req.email.trim().to_lowercase(),
            phone: req.phone,
            subject: req.subject.trim().to_string(),
            message: req.message,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct StatusRequest {
    pub status: ContactStatus,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RespondRequest {
    #[validate(custom(function = "not_blank", message = "Response message is required"))]
    pub response_message: String,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct HandledQuery {
    pub handled: Option<bool>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct DateRangeQuery {
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub status: Option<ContactStatus>,
}

/// Send a contact message
#[utoipa::path(
    post,
    path = "/api/public/contact",
    tag = "Public",
    request_body = ContactRequest,
    responses(
        (status = 201, description = "Message received", body = ContactMessage),
        (status = 400, description = "Validation error")
    )
)]
pub async fn submit(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<ContactRequest>,
) -> AppResult<(StatusCode, Json<ContactMessage>)> {
    let message = state.contact_service.submit(payload.into()).await?;
    Ok((StatusCode::CREATED, Json(message)))
}

async fn page_of(
    state: &AppState,
    filter: ContactFilter,
    page: PageParams,
) -> AppResult<Json<PageResponse<ContactMessage>>> {
    let page = state
        .contact_service
        .search(filter, page.resolve(DEFAULT_ADMIN_PAGE_SIZE))
        .await?;
    Ok(Json(page))
}

/// List contact messages
#[utoipa::path(
    get,
    path = "/api/admin/contact-messages",
    tag = "Admin Contact",
    security(("bearer_auth" = [])),
    params(HandledQuery, PageParams),
    responses(
        (status = 200, description = "Page of messages, newest first"),
        (status = 403, description = "Forbidden - Admin only")
    )
)]
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<HandledQuery>,
    Query(page): Query<PageParams>,
) -> AppResult<Json<PageResponse<ContactMessage>>> {
    let filter = ContactFilter {
        handled: query.handled,
        ..Default::default()
    };
    page_of(&state, filter, page).await
}

/// Search contact messages
#[utoipa::path(
    get,
    path = "/api/admin/contact-messages/search",
    tag = "Admin Contact",
    security(("bearer_auth" = [])),
    params(KeywordQuery, PageParams),
    responses((status = 200, description = "Messages matching name, email or subject"))
)]
pub async fn search(
    State(state): State<AppState>,
    Query(query): Query<KeywordQuery>,
    Query(page): Query<PageParams>,
) -> AppResult<Json<PageResponse<ContactMessage>>> {
    let filter = ContactFilter {
        keyword: Some(query.keyword),
        ..Default::default()
    };
    page_of(&state, filter, page).await
}

/// Filter contact messages by date range and status
#[utoipa::path(
    get,
    path = "/api/admin/contact-messages/filter",
    tag = "Admin Contact",
    security(("bearer_auth" = [])),
    params(DateRangeQuery, PageParams),
    responses(
        (status = 200, description = "Messages received in the range"),
        (status = 400, description = "End date before start date")
    )
)]
pub async fn filter(
    State(state): State<AppState>,
    Query(query): Query<DateRangeQuery>,
    Query(page): Query<PageParams>,
) -> AppResult<Json<PageResponse<ContactMessage>>> {
    let filter = ContactFilter {
        status: query.status,
        start: query.start_date,
        end: query.end_date,
        ..Default::default()
    };
    page_of(&state, filter, page).await
}

/// Contact messages with a status
#[utoipa::path(
    get,
    path = "/api/admin/contact-messages/status/{status}",
    tag = "Admin Contact",
    security(("bearer_auth" = [])),
    params(("status" = String, Path, description = "Contact status code"), PageParams),
    responses(
        (status = 200, description = "Messages with the status"),
        (status = 400, description = "Unknown status")
    )
)]
pub async fn by_status(
    State(state): State<AppState>,
    Path(status): Path<String>,
    Query(page): Query<PageParams>,
) -> AppResult<Json<PageResponse<ContactMessage>>> {
    let filter = ContactFilter {
        status: Some(status.parse()?),
        ..Default::default()
    };
    page_of(&state, filter, page).await
}

/// Get contact message
#[utoipa::path(
    get,
    path = "/api/admin/contact-messages/{id}",
    tag = "Admin Contact",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Message ID")),
    responses(
        (status = 200, description = "Message", body = ContactMessage),
        (status = 404, description = "Message not found")
    )
)]
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ContactMessage>> {
    Ok(Json(state.contact_service.get(id).await?))
}

/// Mark message handled
#[utoipa::path(
    put,
    path = "/api/admin/contact-messages/{id}/handle",
    tag = "Admin Contact",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Message ID")),
    responses(
        (status = 200, description = "Message handled", body = ContactMessage),
        (status = 404, description = "Message not found")
    )
)]
pub async fn mark_handled(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ContactMessage>> {
    Ok(Json(state.contact_service.mark_handled(id).await?))
}

/// Set message status
#[utoipa::path(
    put,
    path = "/api/admin/contact-messages/{id}/status",
    tag = "Admin Contact",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Message ID")),
    request_body = StatusRequest,
    responses(
        (status = 200, description = "Status updated", body = ContactMessage),
        (status = 404, description = "Message not found")
    )
)]
pub async fn set_status(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<StatusRequest>,
) -> AppResult<Json<ContactMessage>> {
    Ok(Json(
        state.contact_service.set_status(id, payload.status).await?,
    ))
}

/// Respond to a message
#[utoipa::path(
    post,
    path = "/api/admin/contact-messages/{id}/respond",
    tag = "Admin Contact",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Message ID")),
    request_body = RespondRequest,
    responses(
        (status = 200, description = "Response recorded", body = ContactMessage),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Message not found")
    )
)]
pub async fn respond(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ValidatedJson(payload): ValidatedJson<RespondRequest>,
) -> AppResult<Json<ContactMessage>> {
    Ok(Json(
        state
            .contact_service
            .respond(id, payload.response_message, &current_user)
            .await?,
    ))
}

/// Delete message
#[utoipa::path(
    delete,
    path = "/api/admin/contact-messages/{id}",
    tag = "Admin Contact",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Message ID")),
    responses(
        (status = 204, description = "Message deleted"),
        (status = 404, description = "Message not found")
    )
)]
pub async fn delete(State(state): State<AppState>, Path(id): Path<i64>) -> AppResult<StatusCode> {
    state.contact_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
