//! Prestation handlers: public catalog and back-office administration.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use common::{AppResult, ValidatedJson};
use domain::{
    Prestation, PrestationCategory, PrestationChanges, PrestationDraft, PrestationType,
};

use super::KeywordQuery;
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePrestationRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be between 1 and 200 characters"))]
    #[schema(example = "Aide au logement")]
    pub title: String,
    #[validate(length(max = 500, message = "Short description must be at most 500 characters"))]
    pub short_description: Option<String>,
    pub description: Option<String>,
    pub prestation_type: Option<PrestationType>,
    pub category: PrestationCategory,
    pub min_amount: Option<Decimal>,
    pub max_amount: Option<Decimal>,
    #[validate(length(max = 100, message = "Duration label must be at most 100 characters"))]
    pub duration_label: Option<String>,
    pub conditions: Option<String>,
    /// Defaults to true
    pub is_active: Option<bool>,
    #[serde(default)]
    pub requires_documents: bool,
    pub required_documents: Option<String>,
    pub eligibility_criteria: Option<String>,
    #[validate(range(
        min = 0,
        max = 3650,
        message = "Processing time must be between 0 and 3650 days"
    ))]
    pub processing_time_days: Option<i32>,
    #[validate(range(min = 1, message = "Maximum requests per year must be at least 1"))]
    pub max_requests_per_year: Option<i32>,
    #[validate(length(max = 500, message = "Image URL must be at most 500 characters"))]
    pub image_url: Option<String>,
    /// Defaults to after the last prestation
    #[validate(range(min = 0, message = "Display order must not be negative"))]
    pub display_order: Option<i32>,
}

impl From<CreatePrestationRequest> for PrestationDraft {
    fn from(req: CreatePrestationRequest) -> Self {
        Self {
            title: req.title.trim().to_string(),
            short_description: req.short_description,
            description: req.description,
            prestation_type: req.prestation_type,
            category: req.category,
            min_amount: req.min_amount,
            max_amount: req.max_amount,
            duration_label: req.duration_label,
            conditions: req.conditions,
            is_active: req.is_active.unwrap_or(true),
            requires_documents: req.requires_documents,
            required_documents: req.required_documents,
            eligibility_criteria: req.eligibility_criteria,
            processing_time_days: req.processing_time_days,
            max_requests_per_year: req.max_requests_per_year,
            image_url: req.image_url,
            display_order: req.display_order,
        }
    }
}

/// Partial update. Absent fields are left unchanged.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePrestationRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be between 1 and 200 characters"))]
    pub title: Option<String>,
    #[validate(length(max = 500, message = "Short description must be at most 500 characters"))]
    pub short_description: Option<String>,
    pub description: Option<String>,
    pub prestation_type: Option<PrestationType>,
    pub category: Option<PrestationCategory>,
    pub min_amount: Option<Decimal>,
    pub max_amount: Option<Decimal>,
    #[validate(length(max = 100, message = "Duration label must be at most 100 characters"))]
    pub duration_label: Option<String>,
    pub conditions: Option<String>,
    pub is_active: Option<bool>,
    pub requires_documents: Option<bool>,
    pub required_documents: Option<String>,
    pub eligibility_criteria: Option<String>,
    #[validate(range(
        min = 0,
        max = 3650,
        message = "Processing time must be between 0 and 3650 days"
    ))]
    pub processing_time_days: Option<i32>,
    #[validate(range(min = 1, message = "Maximum requests per year must be at least 1"))]
    pub max_requests_per_year: Option<i32>,
    #[validate(length(max = 500, message = "Image URL must be at most 500 characters"))]
    pub image_url: Option<String>,
    #[validate(range(min = 0, message = "Display order must not be negative"))]
    pub display_order: Option<i32>,
}

impl From<UpdatePrestationRequest> for PrestationChanges {
    fn from(req: UpdatePrestationRequest) -> Self {
        Self {
            title: req.title.map(|t| t.trim().to_string()),
            short_description: req.short_description,
            description: req.description,
            prestation_type: req.prestation_type,
            category: req.category,
            min_amount: req.min_amount,
            max_amount: req.max_amount,
            duration_label: req.duration_label,
            conditions: req.conditions,
            is_active: req.is_active,
            requires_documents: req.requires_documents,
            required_documents: req.required_documents,
            eligibility_criteria: req.eligibility_criteria,
            processing_time_days: req.processing_time_days,
            max_requests_per_year: req.max_requests_per_year,
            image_url: req.image_url,
            display_order: req.display_order,
        }
    }
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CatalogQuery {
    pub category: Option<PrestationCategory>,
    /// Matches title or description
    pub search: Option<String>,
}

/// Active prestations
#[utoipa::path(
    get,
    path = "/api/social/prestations",
    tag = "Prestations",
    params(CatalogQuery),
    responses((status = 200, description = "Active prestations by display order", body = [Prestation]))
)]
pub async fn list_active(
    State(state): State<AppState>,
    Query(query): Query<CatalogQuery>,
) -> AppResult<Json<Vec<Prestation>>> {
    Ok(Json(
        state
            .prestation_service
            .list_active(query.category, query.search)
            .await?,
    ))
}

/// Active prestations of one category
#[utoipa::path(
    get,
    path = "/api/social/prestations/category/{category}",
    tag = "Prestations",
    params(("category" = String, Path, description = "Prestation category code")),
    responses(
        (status = 200, description = "Prestations", body = [Prestation]),
        (status = 400, description = "Unknown category")
    )
)]
pub async fn by_category(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> AppResult<Json<Vec<Prestation>>> {
    let category: PrestationCategory = category.parse()?;
    Ok(Json(state.prestation_service.by_category(category).await?))
}

/// Active prestations of one type
#[utoipa::path(
    get,
    path = "/api/social/prestations/type/{type}",
    tag = "Prestations",
    params(("type" = String, Path, description = "Prestation type code")),
    responses(
        (status = 200, description = "Prestations", body = [Prestation]),
        (status = 400, description = "Unknown type")
    )
)]
pub async fn by_type(
    State(state): State<AppState>,
    Path(prestation_type): Path<String>,
) -> AppResult<Json<Vec<Prestation>>> {
    let prestation_type: PrestationType = prestation_type.parse()?;
    Ok(Json(state.prestation_service.by_type(prestation_type).await?))
}

/// Search active prestations
#[utoipa::path(
    get,
    path = "/api/social/prestations/search",
    tag = "Prestations",
    params(KeywordQuery),
    responses(
        (status = 200, description = "Matching prestations", body = [Prestation]),
        (status = 400, description = "Missing keyword")
    )
)]
pub async fn search(
    State(state): State<AppState>,
    Query(query): Query<KeywordQuery>,
) -> AppResult<Json<Vec<Prestation>>> {
    Ok(Json(state.prestation_service.search(query.keyword).await?))
}

/// Most requested prestations
#[utoipa::path(
    get,
    path = "/api/social/prestations/popular",
    tag = "Prestations",
    responses((status = 200, description = "Top active prestations by demande count", body = [Prestation]))
)]
pub async fn most_requested(State(state): State<AppState>) -> AppResult<Json<Vec<Prestation>>> {
    Ok(Json(state.prestation_service.most_requested().await?))
}

/// Active prestation by ID
#[utoipa::path(
    get,
    path = "/api/social/prestations/{id}",
    tag = "Prestations",
    params(("id" = i64, Path, description = "Prestation ID")),
    responses(
        (status = 200, description = "Prestation", body = Prestation),
        (status = 404, description = "Prestation not found or inactive")
    )
)]
pub async fn get_active(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Prestation>> {
    Ok(Json(state.prestation_service.get_active(id).await?))
}

/// List every prestation
#[utoipa::path(
    get,
    path = "/api/admin/social/prestations",
    tag = "Admin Prestations",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All prestations", body = [Prestation]),
        (status = 403, description = "Forbidden - Admin only")
    )
)]
pub async fn list_all(State(state): State<AppState>) -> AppResult<Json<Vec<Prestation>>> {
    Ok(Json(state.prestation_service.list_all().await?))
}

/// Create prestation
#[utoipa::path(
    post,
    path = "/api/admin/social/prestations",
    tag = "Admin Prestations",
    security(("bearer_auth" = [])),
    request_body = CreatePrestationRequest,
    responses(
        (status = 201, description = "Prestation created", body = Prestation),
        (status = 400, description = "Validation error")
    )
)]
pub async fn create(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreatePrestationRequest>,
) -> AppResult<(StatusCode, Json<Prestation>)> {
    let prestation = state.prestation_service.create(payload.into()).await?;
    Ok((StatusCode::CREATED, Json(prestation)))
}

/// Get prestation by ID (active or not)
#[utoipa::path(
    get,
    path = "/api/admin/social/prestations/{id}",
    tag = "Admin Prestations",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Prestation ID")),
    responses(
        (status = 200, description = "Prestation", body = Prestation),
        (status = 404, description = "Prestation not found")
    )
)]
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Prestation>> {
    Ok(Json(state.prestation_service.get(id).await?))
}

/// Update prestation
#[utoipa::path(
    put,
    path = "/api/admin/social/prestations/{id}",
    tag = "Admin Prestations",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Prestation ID")),
    request_body = UpdatePrestationRequest,
    responses(
        (status = 200, description = "Prestation updated", body = Prestation),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Prestation not found")
    )
)]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ValidatedJson(payload): ValidatedJson<UpdatePrestationRequest>,
) -> AppResult<Json<Prestation>> {
    Ok(Json(
        state.prestation_service.update(id, payload.into()).await?,
    ))
}

/// Make a prestation available
#[utoipa::path(
    put,
    path = "/api/admin/social/prestations/{id}/activate",
    tag = "Admin Prestations",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Prestation ID")),
    responses(
        (status = 200, description = "Prestation activated", body = Prestation),
        (status = 404, description = "Prestation not found")
    )
)]
pub async fn activate(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Prestation>> {
    Ok(Json(state.prestation_service.set_active(id, true).await?))
}

/// Withdraw a prestation from the catalog
#[utoipa::path(
    put,
    path = "/api/admin/social/prestations/{id}/deactivate",
    tag = "Admin Prestations",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Prestation ID")),
    responses(
        (status = 200, description = "Prestation deactivated", body = Prestation),
        (status = 404, description = "Prestation not found")
    )
)]
pub async fn deactivate(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Prestation>> {
    Ok(Json(state.prestation_service.set_active(id, false).await?))
}

/// Reorder prestations
#[utoipa::path(
    put,
    path = "/api/admin/social/prestations/reorder",
    tag = "Admin Prestations",
    security(("bearer_auth" = [])),
    request_body(content = Vec<i64>, example = json!([3, 1, 2])),
    responses(
        (status = 204, description = "Display order updated"),
        (status = 400, description = "Duplicate ID")
    )
)]
pub async fn reorder(
    State(state): State<AppState>,
    Json(ids): Json<Vec<i64>>,
) -> AppResult<StatusCode> {
    state.prestation_service.reorder(ids).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Delete prestation
#[utoipa::path(
    delete,
    path = "/api/admin/social/prestations/{id}",
    tag = "Admin Prestations",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Prestation ID")),
    responses(
        (status = 204, description = "Prestation deleted"),
        (status = 404, description = "Prestation not found"),
        (status = 409, description = "Prestation has demandes")
    )
)]
pub async fn delete(State(state): State<AppState>, Path(id): Path<i64>) -> AppResult<StatusCode> {
    state.prestation_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
