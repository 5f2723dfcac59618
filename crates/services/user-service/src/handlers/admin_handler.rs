//! Administrator user management handlers.

use axum::{
    extract::{Extension, Path, Query, State},
    http::StatusCode,
    response::Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use common::{AppResult, CurrentUser, PageParams, PageResponse, ValidatedJson};
use domain::{UserProfile, DEFAULT_ADMIN_PAGE_SIZE};

use super::profile_handler::UpdateProfileRequest;
use crate::repository::ProfileFilter;
use crate::state::AppState;

/// Listing filters
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct UserSearchQuery {
    /// Matches first name, last name, email or matricule
    pub search: Option<String>,
    /// Service code
    pub service: Option<String>,
}

/// List users (paginated)
#[utoipa::path(
    get,
    path = "/api/admin/users",
    tag = "Admin Users",
    security(("bearer_auth" = [])),
    params(UserSearchQuery, PageParams),
    responses(
        (status = 200, description = "Page of active profiles"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Admin only")
    )
)]
pub async fn list_users(
    State(state): State<AppState>,
    Query(filter): Query<UserSearchQuery>,
    Query(page): Query<PageParams>,
) -> AppResult<Json<PageResponse<UserProfile>>> {
    let filter = ProfileFilter {
        search: filter.search,
        service: filter.service,
    };
    let page = state
        .user_service
        .list_users(filter, page.resolve(DEFAULT_ADMIN_PAGE_SIZE))
        .await?;
    Ok(Json(page))
}

/// Get user by ID
#[utoipa::path(
    get,
    path = "/api/admin/users/{id}",
    tag = "Admin Users",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Profile ID")),
    responses(
        (status = 200, description = "Profile", body = UserProfile),
        (status = 403, description = "Forbidden - Admin only"),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<UserProfile>> {
    Ok(Json(state.user_service.get_user(id).await?))
}

/// Update user profile
#[utoipa::path(
    put,
    path = "/api/admin/users/{id}",
    tag = "Admin Users",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Profile ID")),
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Profile updated", body = UserProfile),
        (status = 400, description = "Validation error"),
        (status = 404, description = "User not found"),
        (status = 409, description = "Matricule already in use")
    )
)]
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ValidatedJson(payload): ValidatedJson<UpdateProfileRequest>,
) -> AppResult<Json<UserProfile>> {
    Ok(Json(state.user_service.update_user(id, payload.into()).await?))
}

/// Replace user roles
#[utoipa::path(
    put,
    path = "/api/admin/users/{id}/roles",
    tag = "Admin Users",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Profile ID")),
    request_body(content = Vec<String>, example = json!(["USER", "ADMIN"])),
    responses(
        (status = 200, description = "Roles updated", body = UserProfile),
        (status = 400, description = "Unknown role or empty list"),
        (status = 404, description = "User not found")
    )
)]
pub async fn set_roles(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(roles): Json<Vec<String>>,
) -> AppResult<Json<UserProfile>> {
    Ok(Json(state.user_service.set_roles(id, roles).await?))
}

/// Soft delete user (cannot delete self)
#[utoipa::path(
    delete,
    path = "/api/admin/users/{id}",
    tag = "Admin Users",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Profile ID")),
    responses(
        (status = 204, description = "User deleted"),
        (status = 400, description = "Cannot delete your own account"),
        (status = 404, description = "User not found")
    )
)]
pub async fn delete_user(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    state.user_service.delete_user(id, &current_user).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Restore soft-deleted user
#[utoipa::path(
    post,
    path = "/api/admin/users/{id}/restore",
    tag = "Admin Users",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Profile ID")),
    responses(
        (status = 200, description = "User restored", body = UserProfile),
        (status = 400, description = "User is not deleted"),
        (status = 404, description = "User not found")
    )
)]
pub async fn restore_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<UserProfile>> {
    Ok(Json(state.user_service.restore_user(id).await?))
}
