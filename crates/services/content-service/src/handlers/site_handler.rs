//! Home page handlers.

use axum::{extract::State, response::Json};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use common::extract::not_blank;
use common::{AppResult, ValidatedJson};
use domain::{HomeContent, SiteInfo, SiteStats};

use crate::service::SiteUpdate;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SiteInfoRequest {
    #[validate(custom(function = "not_blank", message = "Mission must not be blank"))]
    pub mission: Option<String>,
    pub stats: Option<SiteStats>,
    #[validate(custom(function = "not_blank", message = "Ministry content must not be blank"))]
    pub ministry_content: Option<String>,
}

/// Home page content
#[utoipa::path(
    get,
    path = "/api/public/home",
    tag = "Public",
    responses((status = 200, description = "Mission and headline figures", body = HomeContent))
)]
pub async fn home(State(state): State<AppState>) -> AppResult<Json<HomeContent>> {
    Ok(Json(state.site_service.home().await?))
}

/// Current site info
#[utoipa::path(
    get,
    path = "/api/admin/site-info",
    tag = "Admin Site",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Site info", body = SiteInfo),
        (status = 403, description = "Forbidden - Admin only")
    )
)]
pub async fn get_site_info(State(state): State<AppState>) -> AppResult<Json<SiteInfo>> {
    Ok(Json(state.site_service.site_info().await?))
}

/// Update site info
#[utoipa::path(
    put,
    path = "/api/admin/site-info",
    tag = "Admin Site",
    security(("bearer_auth" = [])),
    request_body = SiteInfoRequest,
    responses(
        (status = 200, description = "Site info updated", body = SiteInfo),
        (status = 400, description = "Validation error")
    )
)]
pub async fn update_site_info(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<SiteInfoRequest>,
) -> AppResult<Json<SiteInfo>> {
    let update = SiteUpdate {
        mission: payload.mission,
        stats: payload.stats,
        ministry_content: payload.ministry_content,
    };
    Ok(Json(state.site_service.update(update).await?))
}
