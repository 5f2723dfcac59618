//! OpenAPI documentation.

use utoipa::OpenApi;

use common::openapi::SecurityAddon;
use domain::{Notification, NotificationStatus, NotificationType};

use crate::handlers::inbox_handler::UnreadCountResponse;
use crate::handlers::notify_handler::{
    ContactNotificationRequest, DemandeStatusRequest, EventPublishedRequest, NewsPublishedRequest,
    NotifyResponse, SendEmailRequest,
};

/// API documentation struct.
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::notify_handler::send_email,
        crate::handlers::notify_handler::contact,
        crate::handlers::notify_handler::demande_status,
        crate::handlers::notify_handler::news_published,
        crate::handlers::notify_handler::event_published,
        crate::handlers::inbox_handler::my_notifications,
        crate::handlers::inbox_handler::unread_count,
        crate::handlers::inbox_handler::mark_read,
    ),
    components(schemas(
        Notification, NotificationType, NotificationStatus,
        SendEmailRequest, ContactNotificationRequest, DemandeStatusRequest,
        NewsPublishedRequest, EventPublishedRequest, NotifyResponse, UnreadCountResponse,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "Notify", description = "Email notifications sent on behalf of other services"),
        (name = "Inbox", description = "Notifications of the signed-in user"),
    )
)]
pub struct ApiDoc;
