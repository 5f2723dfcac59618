//! Avis handlers: posting reviews, public listings and moderation.

use axum::{
    extract::{Extension, Path, Query, State},
    http::StatusCode,
    response::Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use common::extract::not_blank;
use common::{AppResult, CurrentUser, PageParams, PageResponse, ValidatedJson};
use domain::{Avis, AvisDraft, AvisType, DEFAULT_ADMIN_PAGE_SIZE, DEFAULT_PAGE_SIZE};

use super::KeywordQuery;
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateAvisRequest {
    pub prestation_id: i64,
    pub demande_id: Option<i64>,
    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    #[schema(example = 5)]
    pub rating: i32,
    #[validate(length(max = 1000, message = "Comment must be at most 1000 characters"))]
    pub comment: Option<String>,
    /// Defaults to GENERAL
    pub avis_type: Option<AvisType>,
    #[serde(default)]
    pub is_anonymous: bool,
}

impl From<CreateAvisRequest> for AvisDraft {
    fn from(req: CreateAvisRequest) -> Self {
        Self {
            prestation_id: req.prestation_id,
            demande_id: req.demande_id,
            rating: req.rating,
            comment: req.comment.map(|c| c.trim().to_string()).filter(|c| !c.is_empty()),
            avis_type: req.avis_type.unwrap_or(AvisType::General),
            is_anonymous: req.is_anonymous,
        }
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RejectRequest {
    /// Optional explanation shown to the author
    pub admin_response: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RespondRequest {
    #[validate(custom(function = "not_blank", message = "Response cannot be empty"))]
    pub response: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RatingResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prestation_id: Option<i64>,
    /// 0.0 when there is no approved avis
    pub average_rating: f64,
}

/// Post an avis
#[utoipa::path(
    post,
    path = "/api/social/avis",
    tag = "Avis",
    security(("bearer_auth" = [])),
    request_body = CreateAvisRequest,
    responses(
        (status = 201, description = "Avis waiting for moderation", body = Avis),
        (status = 400, description = "Validation error or unknown prestation"),
        (status = 403, description = "Demande belongs to someone else"),
        (status = 409, description = "Avis already submitted")
    )
)]
pub async fn create(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateAvisRequest>,
) -> AppResult<(StatusCode, Json<Avis>)> {
    let avis = state
        .avis_service
        .create(&current_user, payload.into())
        .await?;
    Ok((StatusCode::CREATED, Json(avis)))
}

/// Avis written by the caller
#[utoipa::path(
    get,
    path = "/api/social/avis/my",
    tag = "Avis",
    security(("bearer_auth" = [])),
    responses((status = 200, description = "The caller's avis, newest first", body = [Avis]))
)]
pub async fn my_avis(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<Avis>>> {
    Ok(Json(state.avis_service.my_avis(&current_user).await?))
}

/// Approved avis
#[utoipa::path(
    get,
    path = "/api/social/avis",
    tag = "Avis",
    params(PageParams),
    responses((status = 200, description = "Page of approved avis, newest first"))
)]
pub async fn list_approved(
    State(state): State<AppState>,
    Query(page): Query<PageParams>,
) -> AppResult<Json<PageResponse<Avis>>> {
    Ok(Json(
        state
            .avis_service
            .approved(page.resolve(DEFAULT_PAGE_SIZE))
            .await?,
    ))
}

/// Featured avis
#[utoipa::path(
    get,
    path = "/api/social/avis/featured",
    tag = "Avis",
    responses((status = 200, description = "Approved and featured avis", body = [Avis]))
)]
pub async fn featured(State(state): State<AppState>) -> AppResult<Json<Vec<Avis>>> {
    Ok(Json(state.avis_service.featured().await?))
}

/// Approved avis of one prestation
#[utoipa::path(
    get,
    path = "/api/social/avis/prestation/{id}",
    tag = "Avis",
    params(("id" = i64, Path, description = "Prestation ID"), PageParams),
    responses((status = 200, description = "Page of approved avis"))
)]
pub async fn by_prestation(
    State(state): State<AppState>,
    Path(prestation_id): Path<i64>,
    Query(page): Query<PageParams>,
) -> AppResult<Json<PageResponse<Avis>>> {
    Ok(Json(
        state
            .avis_service
            .by_prestation(prestation_id, page.resolve(DEFAULT_PAGE_SIZE))
            .await?,
    ))
}

/// Overall average rating
#[utoipa::path(
    get,
    path = "/api/social/avis/rating",
    tag = "Avis",
    responses((status = 200, description = "Mean rating of approved avis", body = RatingResponse))
)]
pub async fn average_rating(State(state): State<AppState>) -> AppResult<Json<RatingResponse>> {
    Ok(Json(RatingResponse {
        prestation_id: None,
        average_rating: state.avis_service.average_rating(None).await?,
    }))
}

/// Average rating of one prestation
#[utoipa::path(
    get,
    path = "/api/social/avis/prestation/{id}/rating",
    tag = "Avis",
    params(("id" = i64, Path, description = "Prestation ID")),
    responses((status = 200, description = "Mean rating of the prestation's approved avis", body = RatingResponse))
)]
pub async fn prestation_rating(
    State(state): State<AppState>,
    Path(prestation_id): Path<i64>,
) -> AppResult<Json<RatingResponse>> {
    Ok(Json(RatingResponse {
        prestation_id: Some(prestation_id),
        average_rating: state
            .avis_service
            .average_rating(Some(prestation_id))
            .await?,
    }))
}

/// Avis waiting for moderation
#[utoipa::path(
    get,
    path = "/api/admin/social/avis",
    tag = "Admin Avis",
    security(("bearer_auth" = [])),
    params(PageParams),
    responses(
        (status = 200, description = "Page of pending avis"),
        (status = 403, description = "Forbidden - Admin only")
    )
)]
pub async fn pending(
    State(state): State<AppState>,
    Query(page): Query<PageParams>,
) -> AppResult<Json<PageResponse<Avis>>> {
    Ok(Json(
        state
            .avis_service
            .pending(page.resolve(DEFAULT_ADMIN_PAGE_SIZE))
            .await?,
    ))
}

/// Approve an avis
#[utoipa::path(
    put,
    path = "/api/admin/social/avis/{id}/approve",
    tag = "Admin Avis",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Avis ID")),
    responses(
        (status = 200, description = "Avis published", body = Avis),
        (status = 404, description = "Avis not found")
    )
)]
pub async fn approve(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Avis>> {
    Ok(Json(state.avis_service.approve(id, &current_user).await?))
}

/// Reject an avis
#[utoipa::path(
    put,
    path = "/api/admin/social/avis/{id}/reject",
    tag = "Admin Avis",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Avis ID")),
    request_body(content = RejectRequest, description = "Optional response to the author"),
    responses(
        (status = 200, description = "Avis rejected", body = Avis),
        (status = 404, description = "Avis not found")
    )
)]
pub async fn reject(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    payload: Option<Json<RejectRequest>>,
) -> AppResult<Json<Avis>> {
    let response = payload.and_then(|Json(req)| req.admin_response);
    Ok(Json(state.avis_service.reject(id, response).await?))
}

/// Respond to an avis
#[utoipa::path(
    put,
    path = "/api/admin/social/avis/{id}/respond",
    tag = "Admin Avis",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Avis ID")),
    request_body = RespondRequest,
    responses(
        (status = 200, description = "Response saved", body = Avis),
        (status = 400, description = "Empty response"),
        (status = 404, description = "Avis not found")
    )
)]
pub async fn respond(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ValidatedJson(payload): ValidatedJson<RespondRequest>,
) -> AppResult<Json<Avis>> {
    Ok(Json(
        state
            .avis_service
            .respond(id, payload.response.trim().to_string())
            .await?,
    ))
}

/// Toggle the featured flag
#[utoipa::path(
    put,
    path = "/api/admin/social/avis/{id}/feature",
    tag = "Admin Avis",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Avis ID")),
    responses(
        (status = 200, description = "Featured flag toggled", body = Avis),
        (status = 400, description = "Avis is not approved"),
        (status = 404, description = "Avis not found")
    )
)]
pub async fn toggle_featured(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Avis>> {
    Ok(Json(state.avis_service.toggle_featured(id).await?))
}

/// Approved avis of one type
#[utoipa::path(
    get,
    path = "/api/admin/social/avis/type/{type}",
    tag = "Admin Avis",
    security(("bearer_auth" = [])),
    params(("type" = String, Path, description = "Avis type code"), PageParams),
    responses(
        (status = 200, description = "Page of avis"),
        (status = 400, description = "Unknown avis type")
    )
)]
pub async fn by_type(
    State(state): State<AppState>,
    Path(avis_type): Path<String>,
    Query(page): Query<PageParams>,
) -> AppResult<Json<PageResponse<Avis>>> {
    let avis_type: AvisType = avis_type.parse()?;
    Ok(Json(
        state
            .avis_service
            .by_type(avis_type, page.resolve(DEFAULT_ADMIN_PAGE_SIZE))
            .await?,
    ))
}

/// Approved avis with one rating
#[utoipa::path(
    get,
    path = "/api/admin/social/avis/rating/{rating}",
    tag = "Admin Avis",
    security(("bearer_auth" = [])),
    params(("rating" = i32, Path, description = "Rating from 1 to 5"), PageParams),
    responses(
        (status = 200, description = "Page of avis"),
        (status = 400, description = "Rating out of range")
    )
)]
pub async fn by_rating(
    State(state): State<AppState>,
    Path(rating): Path<i32>,
    Query(page): Query<PageParams>,
) -> AppResult<Json<PageResponse<Avis>>> {
    Ok(Json(
        state
            .avis_service
            .by_rating(rating, page.resolve(DEFAULT_ADMIN_PAGE_SIZE))
            .await?,
    ))
}

/// Approved avis rated 4 or more
#[utoipa::path(
    get,
    path = "/api/admin/social/avis/positive",
    tag = "Admin Avis",
    security(("bearer_auth" = [])),
    params(PageParams),
    responses((status = 200, description = "Page of positive avis"))
)]
pub async fn positive(
    State(state): State<AppState>,
    Query(page): Query<PageParams>,
) -> AppResult<Json<PageResponse<Avis>>> {
    Ok(Json(
        state
            .avis_service
            .positive(page.resolve(DEFAULT_ADMIN_PAGE_SIZE))
            .await?,
    ))
}

/// Approved avis rated 2 or less
#[utoipa::path(
    get,
    path = "/api/admin/social/avis/negative",
    tag = "Admin Avis",
    security(("bearer_auth" = [])),
    params(PageParams),
    responses((status = 200, description = "Page of negative avis"))
)]
pub async fn negative(
    State(state): State<AppState>,
    Query(page): Query<PageParams>,
) -> AppResult<Json<PageResponse<Avis>>> {
    Ok(Json(
        state
            .avis_service
            .negative(page.resolve(DEFAULT_ADMIN_PAGE_SIZE))
            .await?,
    ))
}

/// Search approved avis by comment or author
#[utoipa::path(
    get,
    path = "/api/admin/social/avis/search",
    tag = "Admin Avis",
    security(("bearer_auth" = [])),
    params(KeywordQuery, PageParams),
    responses(
        (status = 200, description = "Matching avis"),
        (status = 400, description = "Missing keyword")
    )
)]
pub async fn search(
    State(state): State<AppState>,
    Query(query): Query<KeywordQuery>,
    Query(page): Query<PageParams>,
) -> AppResult<Json<PageResponse<Avis>>> {
    Ok(Json(
        state
            .avis_service
            .search(query.keyword, page.resolve(DEFAULT_ADMIN_PAGE_SIZE))
            .await?,
    ))
}

/// Approved avis without an administrator response
#[utoipa::path(
    get,
    path = "/api/admin/social/avis/needing-response",
    tag = "Admin Avis",
    security(("bearer_auth" = [])),
    params(PageParams),
    responses((status = 200, description = "Page of avis awaiting a response"))
)]
pub async fn needing_response(
    State(state): State<AppState>,
    Query(page): Query<PageParams>,
) -> AppResult<Json<PageResponse<Avis>>> {
    Ok(Json(
        state
            .avis_service
            .needing_response(page.resolve(DEFAULT_ADMIN_PAGE_SIZE))
            .await?,
    ))
}

/// Delete avis
#[utoipa::path(
    delete,
    path = "/api/admin/social/avis/{id}",
    tag = "Admin Avis",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Avis ID")),
    responses(
        (status = 204, description = "Avis deleted"),
        (status = 404, description = "Avis not found")
    )
)]
pub async fn delete(State(state): State<AppState>, Path(id): Path<i64>) -> AppResult<StatusCode> {
    state.avis_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rating_range_validated() {
        let req: CreateAvisRequest =
            serde_json::from_str(r#"{"prestationId": 1, "rating": 6}"#).unwrap();
        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("rating"));

        let req: CreateAvisRequest = serde_json::from_str(
            r#"{"prestationId": 1, "rating": 4, "comment": "   ", "isAnonymous": true}"#,
        )
        .unwrap();
        assert!(req.validate().is_ok());
        let draft = AvisDraft::from(req);
        assert_eq!(draft.comment, None);
        assert_eq!(draft.avis_type, AvisType::General);
        assert!(draft.is_anonymous);
    }
}
