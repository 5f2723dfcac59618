//! Partner handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use common::extract::not_blank;
use common::{AppResult, ValidatedJson};
use domain::{Partner, PartnerDraft};

use crate::state::AppState;

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PartnerRequest {
    #[validate(
        custom(function = "not_blank", message = "Name is required"),
        length(max = 255, message = "Name must be at most 255 characters")
    )]
    #[schema(example = "Banque Populaire")]
    pub name: String,
    #[validate(length(max = 500, message = "Logo URL must be at most 500 characters"))]
    pub logo_url: Option<String>,
    #[validate(length(max = 500, message = "Website must be at most 500 characters"))]
    pub website: Option<String>,
    #[validate(
        custom(function = "not_blank", message = "Sector is required"),
        length(max = 100, message = "Sector must be at most 100 characters")
    )]
    #[schema(example = "Banking")]
    pub sector: String,
    #[validate(
        custom(function = "not_blank", message = "Phone is required"),
        length(max = 30, message = "Phone must be at most 30 characters")
    )]
    pub phone: String,
    #[validate(email(message = "Email must be valid"))]
    pub email: String,
}

impl From<PartnerRequest> for PartnerDraft {
    fn from(req: PartnerRequest) -> Self {
        Self {
            name: req.name.trim().to_string(),
            logo_url: req.logo_url,
            website: req.website,
            sector: req.sector.trim().to_string(),
            phone: req.phone.trim().to_string(),
            email: req.email.trim().to_lowercase(),
        }
    }
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SectorQuery {
    pub sector: Option<String>,
}

/// List partners
#[utoipa::path(
    get,
    path = "/api/public/partners",
    tag = "Public",
    params(SectorQuery),
    responses((status = 200, description = "Partners ordered by name", body = [Partner]))
)]
pub async fn list_partners(
    State(state): State<AppState>,
    Query(query): Query<SectorQuery>,
) -> AppResult<Json<Vec<Partner>>> {
    Ok(Json(state.partner_service.list(query.sector).await?))
}

/// Get partner by ID
#[utoipa::path(
    get,
    path = "/api/admin/partners/{id}",
    tag = "Admin Partners",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Partner ID")),
    responses(
        (status = 200, description = "Partner", body = Partner),
        (status = 404, description = "Partner not found")
    )
)]
pub async fn get_partner(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Partner>> {
    Ok(Json(state.partner_service.get(id).await?))
}

/// Create partner
#[utoipa::path(
    post,
    path = "/api/admin/partners",
    tag = "Admin Partners",
    security(("bearer_auth" = [])),
    request_body = PartnerRequest,
    responses(
        (status = 201, description = "Partner created", body = Partner),
        (status = 400, description = "Validation error")
    )
)]
pub async fn create_partner(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<PartnerRequest>,
) -> AppResult<(StatusCode, Json<Partner>)> {
    let partner = state.partner_service.create(payload.into()).await?;
    Ok((StatusCode::CREATED, Json(partner)))
}

/// Update partner
#[utoipa::path(
    put,
    path = "/api/admin/partners/{id}",
    tag = "Admin Partners",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Partner ID")),
    request_body = PartnerRequest,
    responses(
        (status = 200, description = "Partner updated", body = Partner),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Partner not found")
    )
)]
pub async fn update_partner(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ValidatedJson(payload): ValidatedJson<PartnerRequest>,
) -> AppResult<Json<Partner>> {
    Ok(Json(state.partner_service.update(id, payload.into()).await?))
}

/// Delete partner
#[utoipa::path(
    delete,
    path = "/api/admin/partners/{id}",
    tag = "Admin Partners",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Partner ID")),
    responses(
        (status = 204, description = "Partner deleted"),
        (status = 404, description = "Partner not found")
    )
)]
pub async fn delete_partner(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    state.partner_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
