//! Foundation info handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use common::extract::not_blank;
use common::{AppResult, ValidatedJson};
use domain::{FoundationInfo, FoundationInfoChanges, FoundationInfoDraft, InfoType};

use crate::state::AppState;

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateFoundationInfoRequest {
    #[validate(length(min = 1, max = 255, message = "Title must be between 1 and 255 characters"))]
    #[schema(example = "Our mission")]
    pub title: String,
    #[validate(custom(function = "not_blank", message = "Content is required"))]
    pub content: String,
    pub info_type: InfoType,
    /// Defaults to after the last block of the same type
    #[validate(range(min = 0, message = "Display order must not be negative"))]
    pub display_order: Option<i32>,
    /// Defaults to true
    pub is_active: Option<bool>,
}

impl From<CreateFoundationInfoRequest> for FoundationInfoDraft {
    fn from(req: CreateFoundationInfoRequest) -> Self {
        Self {
            title: req.title.trim().to_string(),
            content: req.content,
            info_type: req.info_type,
            display_order: req.display_order,
            is_active: req.is_active,
        }
    }
}

/// Partial update. Absent fields are left unchanged.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFoundationInfoRequest {
    #[validate(length(min = 1, max = 255, message = "Title must be between 1 and 255 characters"))]
    pub title: Option<String>,
    #[validate(custom(function = "not_blank", message = "Content must not be blank"))]
    pub content: Option<String>,
    pub info_type: Option<InfoType>,
    #[validate(range(min = 0, message = "Display order must not be negative"))]
    pub display_order: Option<i32>,
    pub is_active: Option<bool>,
}

impl From<UpdateFoundationInfoRequest> for FoundationInfoChanges {
    fn from(req: UpdateFoundationInfoRequest) -> Self {
        Self {
            title: req.title,
            content: req.content,
            info_type: req.info_type,
            display_order: req.display_order,
            is_active: req.is_active,
        }
    }
}

/// Active foundation info blocks
#[utoipa::path(
    get,
    path = "/api/foundation-info/active",
    tag = "Foundation Info",
    responses((status = 200, description = "Active blocks by display order", body = [FoundationInfo]))
)]
pub async fn list_active(State(state): State<AppState>) -> AppResult<Json<Vec<FoundationInfo>>> {
    Ok(Json(state.foundation_info_service.list_active().await?))
}

/// First active block of a type
#[utoipa::path(
    get,
    path = "/api/foundation-info/type/{type}",
    tag = "Foundation Info",
    params(("type" = String, Path, description = "Info type code")),
    responses(
        (status = 200, description = "Block", body = FoundationInfo),
        (status = 400, description = "Unknown info type"),
        (status = 404, description = "No active block of this type")
    )
)]
pub async fn get_by_type(
    State(state): State<AppState>,
    Path(info_type): Path<String>,
) -> AppResult<Json<FoundationInfo>> {
    let info_type: InfoType = info_type.parse()?;
    Ok(Json(
        state.foundation_info_service.first_of_type(info_type).await?,
    ))
}

/// Active blocks of several types
#[utoipa::path(
    post,
    path = "/api/foundation-info/types",
    tag = "Foundation Info",
    request_body(content = Vec<InfoType>, example = json!(["MISSION", "VISION"])),
    responses((status = 200, description = "Active blocks of the listed types", body = [FoundationInfo]))
)]
pub async fn get_by_types(
    State(state): State<AppState>,
    Json(types): Json<Vec<InfoType>>,
) -> AppResult<Json<Vec<FoundationInfo>>> {
    Ok(Json(
        state.foundation_info_service.active_of_types(types).await?,
    ))
}

/// All blocks
#[utoipa::path(
    get,
    path = "/api/admin/foundation-info",
    tag = "Admin Foundation Info",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Every block by type then order", body = [FoundationInfo]),
        (status = 403, description = "Forbidden - Admin only")
    )
)]
pub async fn list_all(State(state): State<AppState>) -> AppResult<Json<Vec<FoundationInfo>>> {
    Ok(Json(state.foundation_info_service.list_all().await?))
}

/// Get block by ID
#[utoipa::path(
    get,
    path = "/api/admin/foundation-info/{id}",
    tag = "Admin Foundation Info",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Block ID")),
    responses(
        (status = 200, description = "Block", body = FoundationInfo),
        (status = 404, description = "Block not found")
    )
)]
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<FoundationInfo>> {
    Ok(Json(state.foundation_info_service.get(id).await?))
}

/// Create block
#[utoipa::path(
    post,
    path = "/api/admin/foundation-info",
    tag = "Admin Foundation Info",
    security(("bearer_auth" = [])),
    request_body = CreateFoundationInfoRequest,
    responses(
        (status = 201, description = "Block created", body = FoundationInfo),
        (status = 400, description = "Validation error")
    )
)]
pub async fn create(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateFoundationInfoRequest>,
) -> AppResult<(StatusCode, Json<FoundationInfo>)> {
    let info = state.foundation_info_service.create(payload.into()).await?;
    Ok((StatusCode::CREATED, Json(info)))
}

/// Update block
#[utoipa::path(
    put,
    path = "/api/admin/foundation-info/{id}",
    tag = "Admin Foundation Info",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Block ID")),
    request_body = UpdateFoundationInfoRequest,
    responses(
        (status = 200, description = "Block updated", body = FoundationInfo),
        (status = 404, description = "Block not found")
    )
)]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ValidatedJson(payload): ValidatedJson<UpdateFoundationInfoRequest>,
) -> AppResult<Json<FoundationInfo>> {
    Ok(Json(
        state
            .foundation_info_service
            .update(id, payload.into())
            .await?,
    ))
}

/// Activate block
#[utoipa::path(
    put,
    path = "/api/admin/foundation-info/{id}/activate",
    tag = "Admin Foundation Info",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Block ID")),
    responses(
        (status = 200, description = "Block activated", body = FoundationInfo),
        (status = 404, description = "Block not found")
    )
)]
pub async fn activate(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<FoundationInfo>> {
    Ok(Json(state.foundation_info_service.set_active(id, true).await?))
}

/// Deactivate block
#[utoipa::path(
    put,
    path = "/api/admin/foundation-info/{id}/deactivate",
    tag = "Admin Foundation Info",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Block ID")),
    responses(
        (status = 200, description = "Block deactivated", body = FoundationInfo),
        (status = 404, description = "Block not found")
    )
)]
pub async fn deactivate(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<FoundationInfo>> {
    Ok(Json(
        state.foundation_info_service.set_active(id, false).await?,
    ))
}

/// Reorder blocks
#[utoipa::path(
    put,
    path = "/api/admin/foundation-info/reorder",
    tag = "Admin Foundation Info",
    security(("bearer_auth" = [])),
    request_body(content = Vec<i64>, example = json!([3, 1, 2])),
    responses(
        (status = 204, description = "Display orders set to 1..n in list order"),
        (status = 400, description = "Duplicate ID in list")
    )
)]
pub async fn reorder(
    State(state): State<AppState>,
    Json(ids): Json<Vec<i64>>,
) -> AppResult<StatusCode> {
    state.foundation_info_service.reorder(ids).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Delete block
#[utoipa::path(
    delete,
    path = "/api/admin/foundation-info/{id}",
    tag = "Admin Foundation Info",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Block ID")),
    responses(
        (status = 204, description = "Block deleted"),
        (status = 404, description = "Block not found")
    )
)]
pub async fn delete(State(state): State<AppState>, Path(id): Path<i64>) -> AppResult<StatusCode> {
    state.foundation_info_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
