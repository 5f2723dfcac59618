//! Inbox of the authenticated user.

use axum::{
    extract::{Extension, Path, Query, State},
    response::Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use common::{AppResult, CurrentUser, PageParams, PageResponse};
use domain::{Notification, DEFAULT_PAGE_SIZE};

use crate::state::AppState;

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UnreadCountResponse {
    pub unread_count: u64,
}

/// Notifications addressed to the caller
#[utoipa::path(
    get,
    path = "/api/notifications/my",
    tag = "Inbox",
    security(("bearer_auth" = [])),
    params(PageParams),
    responses(
        (status = 200, description = "Page of notifications, newest first"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn my_notifications(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Query(page): Query<PageParams>,
) -> AppResult<Json<PageResponse<Notification>>> {
    let page = state
        .notification_service
        .my_notifications(&current_user, page.resolve(DEFAULT_PAGE_SIZE))
        .await?;
    Ok(Json(page))
}

/// Number of unread notifications
#[utoipa::path(
    get,
    path = "/api/notifications/my/unread-count",
    tag = "Inbox",
    security(("bearer_auth" = [])),
    responses((status = 200, description = "Unread count", body = UnreadCountResponse))
)]
pub async fn unread_count(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
) -> AppResult<Json<UnreadCountResponse>> {
    let unread_count = state.notification_service.unread_count(&current_user).await?;
    Ok(Json(UnreadCountResponse { unread_count }))
}

/// Mark a notification as read
#[utoipa::path(
    put,
    path = "/api/notifications/{id}/read",
    tag = "Inbox",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Notification ID")),
    responses(
        (status = 200, description = "Notification marked as read", body = Notification),
        (status = 403, description = "Not the recipient"),
        (status = 404, description = "Notification not found")
    )
)]
pub async fn mark_read(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Notification>> {
    Ok(Json(
        state
            .notification_service
            .mark_read(id, &current_user)
            .await?,
    ))
}
