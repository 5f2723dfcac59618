//! Email notification endpoints called by the other services.

use axum::{extract::State, http::StatusCode, response::Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidateEmail, ValidationError};

use common::extract::not_blank;
use common::{AppError, AppResult, ValidatedJson};
use crate::service::templates::is_web_link;
use crate::service::{
    Broadcast, ContactNotice, DemandeStatusNotice, EmailMessage, EventNotice, NewsNotice,
};
use crate::state::AppState;

/// Outcome envelope of every notify endpoint.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NotifyResponse {
    pub message: String,
    /// Set when a single email was queued
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification_id: Option<i64>,
    /// Set when several emails were queued
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub notification_ids: Vec<i64>,
    /// Broadcast recipients that could not be queued
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub failed_recipients: Vec<String>,
    pub success: bool,
}

impl NotifyResponse {
    fn queued(broadcast: Broadcast) -> Self {
        let Broadcast { queued, failed } = broadcast;
        let mut message = match queued.as_slice() {
            [_] => "Email queued for delivery".to_string(),
            many => format!("{} emails queued for delivery", many.len()),
        };
        if !failed.is_empty() {
            message.push_str(&format!(", {} could not be queued", failed.len()));
        }

        let (notification_id, notification_ids) = match (queued.as_slice(), failed.is_empty()) {
            ([single], true) => (Some(single.id), Vec::new()),
            (many, _) => (None, many.iter().map(|n| n.id).collect()),
        };
        Self {
            message,
            notification_id,
            notification_ids,
            failed_recipients: failed,
            success: true,
        }
    }

    fn failed(err: &AppError) -> Self {
        Self {
            message: format!("Failed to send email: {}", err.user_message()),
            notification_id: None,
            notification_ids: Vec::new(),
            failed_recipients: Vec::new(),
            success: false,
        }
    }
}

type NotifyResult = AppResult<(StatusCode, Json<NotifyResponse>)>;

/// 201 when at least one email is queued. Client errors keep their usual
/// status, anything else becomes a 500 with `success: false`.
fn respond(result: AppResult<Broadcast>) -> NotifyResult {
    match result {
        Ok(broadcast) => Ok((StatusCode::CREATED, Json(NotifyResponse::queued(broadcast)))),
        Err(e @ (AppError::Validation(_) | AppError::BadRequest(_))) => Err(e),
        Err(e) => Ok((StatusCode::INTERNAL_SERVER_ERROR, Json(NotifyResponse::failed(&e)))),
    }
}

fn web_link(link: &str) -> Result<(), ValidationError> {
    if is_web_link(link) {
        Ok(())
    } else {
        Err(ValidationError::new("web_link"))
    }
}

fn valid_recipients(recipients: &[String]) -> Result<(), ValidationError> {
    if recipients.iter().all(|r| r.trim().validate_email()) {
        Ok(())
    } else {
        Err(ValidationError::new("email"))
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SendEmailRequest {
    #[validate(email(message = "Recipient email must be valid"))]
    #[schema(example = "jane.doe@foundation.com")]
    pub to: String,
    #[validate(custom(function = "not_blank", message = "Subject is required"))]
    pub subject: String,
    #[validate(custom(function = "not_blank", message = "HTML content is required"))]
    pub html: String,
    #[validate(email(message = "Sender email must be valid"))]
    pub from: Option<String>,
    #[validate(email(message = "Reply-to email must be valid"))]
    pub reply_to: Option<String>,
}

impl From<SendEmailRequest> for EmailMessage {
    fn from(req: SendEmailRequest) -> Self {
        Self {
            to: req.to,
            subject: req.subject.trim().to_string(),
            html: req.html,
            from: req.from,
            reply_to: req.reply_to,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContactNotificationRequest {
    #[validate(custom(function = "not_blank", message = "Full name is required"))]
    pub full_name: String,
    #[validate(email(message = "Email must be valid"))]
    pub email: String,
    #[validate(custom(function = "not_blank", message = "Subject is required"))]
    pub subject: String,
    #[validate(custom(function = "not_blank", message = "Message is required"))]
    pub message: String,
}

impl From<ContactNotificationRequest> for ContactNotice {
    fn from(req: ContactNotificationRequest) -> Self {
        Self {
            full_name: req.full_name.trim().to_string(),
            email: req.email.trim().to_string(),
            subject: req.subject.trim().to_string(),
            message: req.message,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DemandeStatusRequest {
    #[validate(email(message = "Recipient email must be valid"))]
    pub to: String,
    #[validate(custom(function = "not_blank", message = "User name is required"))]
    pub user_name: String,
    pub demande_id: i64,
    #[validate(custom(function = "not_blank", message = "Prestation title is required"))]
    pub prestation_title: String,
    #[validate(custom(function = "not_blank", message = "Status is required"))]
    #[schema(example = "APPROVED")]
    pub status: String,
    pub admin_comment: Option<String>,
}

impl From<DemandeStatusRequest> for DemandeStatusNotice {
    fn from(req: DemandeStatusRequest) -> Self {
        Self {
            to: req.to,
            user_name: req.user_name,
            demande_id: req.demande_id,
            prestation_title: req.prestation_title,
            status: req.status.trim().to_string(),
            admin_comment: req.admin_comment,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewsPublishedRequest {
    #[validate(
        length(min = 1, message = "At least one recipient is required"),
        custom(function = "valid_recipients", message = "Every recipient must be a valid email")
    )]
    pub recipients: Vec<String>,
    #[validate(custom(function = "not_blank", message = "Title is required"))]
    pub title: String,
    pub summary: Option<String>,
    #[validate(custom(function = "web_link", message = "Link must be an http or https URL"))]
    pub link: Option<String>,
}

impl From<NewsPublishedRequest> for NewsNotice {
    fn from(req: NewsPublishedRequest) -> Self {
        Self {
            recipients: req.recipients,
            title: req.title.trim().to_string(),
            summary: req.summary,
            link: req.link,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EventPublishedRequest {
    #[validate(
        length(min = 1, message = "At least one recipient is required"),
        custom(function = "valid_recipients", message = "Every recipient must be a valid email")
    )]
    pub recipients: Vec<String>,
    #[validate(custom(function = "not_blank", message = "Title is required"))]
    pub title: String,
    pub start_date: DateTime<Utc>,
    pub location: Option<String>,
    #[validate(custom(function = "web_link", message = "Link must be an http or https URL"))]
    pub link: Option<String>,
}

impl From<EventPublishedRequest> for EventNotice {
    fn from(req: EventPublishedRequest) -> Self {
        Self {
            recipients: req.recipients,
            title: req.title.trim().to_string(),
            start_date: req.start_date,
            location: req.location,
            link: req.link,
        }
    }
}

/// Send an email
#[utoipa::path(
    post,
    path = "/api/notify/email",
    tag = "Notify",
    request_body = SendEmailRequest,
    responses(
        (status = 201, description = "Email queued", body = NotifyResponse),
        (status = 400, description = "Validation error"),
        (status = 500, description = "Email could not be recorded or queued", body = NotifyResponse)
    )
)]
pub async fn send_email(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<SendEmailRequest>,
) -> NotifyResult {
    tracing::info!(to = %payload.to, "Email notification requested");
    let result = state.notification_service.send_email(payload.into()).await;
    respond(result.map(Broadcast::single))
}

/// Forward a contact form submission to support
#[utoipa::path(
    post,
    path = "/api/notify/contact",
    tag = "Notify",
    request_body = ContactNotificationRequest,
    responses(
        (status = 201, description = "Email queued", body = NotifyResponse),
        (status = 400, description = "Validation error"),
        (status = 500, description = "Email could not be recorded or queued", body = NotifyResponse)
    )
)]
pub async fn contact(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<ContactNotificationRequest>,
) -> NotifyResult {
    let result = state.notification_service.notify_contact(payload.into()).await;
    respond(result.map(Broadcast::single))
}

/// Tell an applicant their demande changed status
#[utoipa::path(
    post,
    path = "/api/notify/demande-status",
    tag = "Notify",
    request_body = DemandeStatusRequest,
    responses(
        (status = 201, description = "Email queued", body = NotifyResponse),
        (status = 400, description = "Validation error"),
        (status = 500, description = "Email could not be recorded or queued", body = NotifyResponse)
    )
)]
pub async fn demande_status(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<DemandeStatusRequest>,
) -> NotifyResult {
    let result = state
        .notification_service
        .notify_demande_status(payload.into())
        .await;
    respond(result.map(Broadcast::single))
}

/// Announce a published article
#[utoipa::path(
    post,
    path = "/api/notify/news-published",
    tag = "Notify",
    request_body = NewsPublishedRequest,
    responses(
        (status = 201, description = "One email queued per recipient", body = NotifyResponse),
        (status = 400, description = "Validation error"),
        (status = 500, description = "Emails could not be recorded or queued", body = NotifyResponse)
    )
)]
pub async fn news_published(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<NewsPublishedRequest>,
) -> NotifyResult {
    respond(state.notification_service.notify_news(payload.into()).await)
}

/// Announce a published event
#[utoipa::path(
    post,
    path = "/api/notify/event-published",
    tag = "Notify",
    request_body = EventPublishedRequest,
    responses(
        (status = 201, description = "One email queued per recipient", body = NotifyResponse),
        (status = 400, description = "Validation error"),
        (status = 500, description = "Emails could not be recorded or queued", body = NotifyResponse)
    )
)]
pub async fn event_published(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<EventPublishedRequest>,
) -> NotifyResult {
    respond(state.notification_service.notify_event(payload.into()).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::{Notification, NotificationStatus, NotificationType};

    fn notification(id: i64) -> Notification {
        Notification {
            id,
            recipient_email: "jane@foundation.com".to_string(),
            subject: "Hello".to_string(),
            content: "<p>Hi</p>".to_string(),
            notification_type: NotificationType::Email,
            status: NotificationStatus::Queued,
            sent_at: None,
            is_read: false,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_single_email_reports_notification_id() {
        let (status, Json(body)) = respond(Ok(Broadcast::single(notification(5)))).unwrap();
        assert_eq!(status, StatusCode::CREATED);
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["notificationId"], 5);
        assert_eq!(json["success"], true);
        assert!(json.get("notificationIds").is_none());
    }

    #[test]
    fn test_partial_broadcast_lists_failed_recipients() {
        let broadcast = Broadcast {
            queued: vec![notification(5), notification(6)],
            failed: vec!["jean@foundation.com".to_string()],
        };
        let (status, Json(body)) = respond(Ok(broadcast)).unwrap();
        assert_eq!(status, StatusCode::CREATED);
        assert!(body.success);
        assert_eq!(body.message, "2 emails queued for delivery, 1 could not be queued");
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["notificationIds"], serde_json::json!([5, 6]));
        assert_eq!(json["failedRecipients"], serde_json::json!(["jean@foundation.com"]));
    }

    #[test]
    fn test_queue_failure_is_500_envelope() {
        let (status, Json(body)) =
            respond(Err(AppError::internal("queue down"))).unwrap();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!body.success);
        assert!(body.message.starts_with("Failed to send email"));
    }

    #[test]
    fn test_validation_error_is_not_wrapped() {
        let err = respond(Err(AppError::validation("At least one recipient is required")))
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_link_must_be_http() {
        let request = EventPublishedRequest {
            recipients: vec!["jane@foundation.com".to_string()],
            title: "Gala".to_string(),
            start_date: Utc::now(),
            location: None,
            link: Some("javascript:alert(1)".to_string()),
        };
        assert!(request.validate().is_err());

        let request = EventPublishedRequest {
            link: Some("https://foundation.org/events/gala".to_string()),
            ..request
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_recipients_must_be_emails() {
        let request = NewsPublishedRequest {
            recipients: vec!["jane@foundation.com".to_string(), "nope".to_string()],
            title: "Annual report".to_string(),
            summary: None,
            link: None,
        };
        assert!(request.validate().is_err());
    }
}
