//! Demande handlers: self-service filing and back-office processing.

use axum::{
    extract::{Extension, Path, Query, State},
    http::StatusCode,
    response::Json,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use common::extract::not_blank;
use common::{AppResult, CurrentUser, PageParams, PageResponse, ValidatedJson};
use domain::{
    Demande, DemandeDraft, DemandeStatus, PriorityLevel, StatusChange, DEFAULT_ADMIN_PAGE_SIZE,
    DEFAULT_PAGE_SIZE,
};

use super::KeywordQuery;
use crate::service::{DemandeFilter, DraftUpdate};
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateDemandeRequest {
    pub prestation_id: i64,
    pub requested_amount: Option<Decimal>,
    #[validate(
        custom(function = "not_blank", message = "Justification is required"),
        length(max = 2000, message = "Justification must be at most 2000 characters")
    )]
    pub justification: String,
    /// Names of the uploaded supporting documents
    #[serde(default)]
    pub documents: Vec<String>,
    /// Defaults to NORMAL
    pub priority_level: Option<PriorityLevel>,
    /// Submit right away instead of keeping a draft
    #[serde(default)]
    pub submit: bool,
}

impl CreateDemandeRequest {
    fn into_parts(self) -> (DemandeDraft, bool) {
        let draft = DemandeDraft {
            prestation_id: self.prestation_id,
            requested_amount: self.requested_amount,
            justification: self.justification.trim().to_string(),
            documents: self.documents,
            priority_level: self.priority_level,
        };
        (draft, self.submit)
    }
}

/// Draft edits. Absent fields are left unchanged.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDemandeRequest {
    pub requested_amount: Option<Decimal>,
    #[validate(
        custom(function = "not_blank", message = "Justification must not be blank"),
        length(max = 2000, message = "Justification must be at most 2000 characters")
    )]
    pub justification: Option<String>,
    pub documents: Option<Vec<String>>,
}

impl From<UpdateDemandeRequest> for DraftUpdate {
    fn from(req: UpdateDemandeRequest) -> Self {
        Self {
            requested_amount: req.requested_amount,
            justification: req.justification.map(|j| j.trim().to_string()),
            documents: req.documents,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatusRequest {
    pub status: DemandeStatus,
    pub approved_amount: Option<Decimal>,
    #[validate(length(max = 2000, message = "Comment must be at most 2000 characters"))]
    pub admin_comment: Option<String>,
    #[validate(length(max = 2000, message = "Rejection reason must be at most 2000 characters"))]
    pub rejection_reason: Option<String>,
    #[validate(length(max = 100, message = "Payment reference must be at most 100 characters"))]
    pub payment_reference: Option<String>,
}

impl From<StatusRequest> for StatusChange {
    fn from(req: StatusRequest) -> Self {
        Self {
            status: req.status,
            approved_amount: req.approved_amount,
            admin_comment: req.admin_comment,
            rejection_reason: req.rejection_reason,
            payment_reference: req.payment_reference,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PriorityRequest {
    pub priority_level: PriorityLevel,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct StatusQuery {
    pub status: Option<DemandeStatus>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AdminDemandeQuery {
    pub status: Option<DemandeStatus>,
    /// Part of the applicant's email
    pub email: Option<String>,
    /// Prestation ID
    pub prestation: Option<i64>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DueSoonQuery {
    /// Window in days (defaults to 7)
    pub days: Option<i64>,
}

/// File a demande
#[utoipa::path(
    post,
    path = "/api/social/demandes",
    tag = "Demandes",
    security(("bearer_auth" = [])),
    request_body = CreateDemandeRequest,
    responses(
        (status = 201, description = "Demande created", body = Demande),
        (status = 400, description = "Validation error, unavailable prestation, quota or amount rule"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn create(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateDemandeRequest>,
) -> AppResult<(StatusCode, Json<Demande>)> {
    let (draft, submit) = payload.into_parts();
    let demande = state
        .demande_service
        .create(&current_user, draft, submit)
        .await?;
    Ok((StatusCode::CREATED, Json(demande)))
}

/// Demandes of the caller
#[utoipa::path(
    get,
    path = "/api/social/demandes/my",
    tag = "Demandes",
    security(("bearer_auth" = [])),
    params(StatusQuery, PageParams),
    responses(
        (status = 200, description = "Page of the caller's demandes, newest first"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn my_demandes(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Query(query): Query<StatusQuery>,
    Query(page): Query<PageParams>,
) -> AppResult<Json<PageResponse<Demande>>> {
    Ok(Json(
        state
            .demande_service
            .my_demandes(&current_user, query.status, page.resolve(DEFAULT_PAGE_SIZE))
            .await?,
    ))
}

/// Demande by ID
#[utoipa::path(
    get,
    path = "/api/social/demandes/{id}",
    tag = "Demandes",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Demande ID")),
    responses(
        (status = 200, description = "Demande", body = Demande),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Demande not found")
    )
)]
pub async fn get(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Demande>> {
    Ok(Json(state.demande_service.get(id, &current_user).await?))
}

/// Edit a draft demande
#[utoipa::path(
    put,
    path = "/api/social/demandes/{id}",
    tag = "Demandes",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Demande ID")),
    request_body = UpdateDemandeRequest,
    responses(
        (status = 200, description = "Draft updated", body = Demande),
        (status = 403, description = "Not the owner"),
        (status = 409, description = "Demande is no longer a draft")
    )
)]
pub async fn update_draft(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ValidatedJson(payload): ValidatedJson<UpdateDemandeRequest>,
) -> AppResult<Json<Demande>> {
    Ok(Json(
        state
            .demande_service
            .update_draft(id, &current_user, payload.into())
            .await?,
    ))
}

/// Submit a draft demande
#[utoipa::path(
    put,
    path = "/api/social/demandes/{id}/submit",
    tag = "Demandes",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Demande ID")),
    responses(
        (status = 200, description = "Demande submitted", body = Demande),
        (status = 400, description = "Required documents missing"),
        (status = 403, description = "Not the owner"),
        (status = 409, description = "Demande is not a draft")
    )
)]
pub async fn submit(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Demande>> {
    Ok(Json(state.demande_service.submit(id, &current_user).await?))
}

/// Cancel a demande
#[utoipa::path(
    put,
    path = "/api/social/demandes/{id}/cancel",
    tag = "Demandes",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Demande ID")),
    responses(
        (status = 200, description = "Demande cancelled", body = Demande),
        (status = 403, description = "Not the owner"),
        (status = 409, description = "Demande cannot be cancelled")
    )
)]
pub async fn cancel(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Demande>> {
    Ok(Json(state.demande_service.cancel(id, &current_user).await?))
}

/// List demandes
#[utoipa::path(
    get,
    path = "/api/admin/social/demandes",
    tag = "Admin Demandes",
    security(("bearer_auth" = [])),
    params(AdminDemandeQuery, PageParams),
    responses(
        (status = 200, description = "Page of demandes, newest first"),
        (status = 403, description = "Forbidden - Admin only")
    )
)]
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<AdminDemandeQuery>,
    Query(page): Query<PageParams>,
) -> AppResult<Json<PageResponse<Demande>>> {
    let filter = DemandeFilter {
        status: query.status,
        email: query.email,
        prestation_id: query.prestation,
    };
    Ok(Json(
        state
            .demande_service
            .list(filter, page.resolve(DEFAULT_ADMIN_PAGE_SIZE))
            .await?,
    ))
}

/// Demandes waiting for a decision
#[utoipa::path(
    get,
    path = "/api/admin/social/demandes/pending",
    tag = "Admin Demandes",
    security(("bearer_auth" = [])),
    params(PageParams),
    responses((status = 200, description = "Submitted and in-review demandes, oldest first"))
)]
pub async fn pending(
    State(state): State<AppState>,
    Query(page): Query<PageParams>,
) -> AppResult<Json<PageResponse<Demande>>> {
    Ok(Json(
        state
            .demande_service
            .pending(page.resolve(DEFAULT_ADMIN_PAGE_SIZE))
            .await?,
    ))
}

/// Demandes for one prestation
#[utoipa::path(
    get,
    path = "/api/admin/social/demandes/prestation/{id}",
    tag = "Admin Demandes",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Prestation ID"), PageParams),
    responses((status = 200, description = "Page of demandes"))
)]
pub async fn by_prestation(
    State(state): State<AppState>,
    Path(prestation_id): Path<i64>,
    Query(page): Query<PageParams>,
) -> AppResult<Json<PageResponse<Demande>>> {
    Ok(Json(
        state
            .demande_service
            .by_prestation(prestation_id, page.resolve(DEFAULT_ADMIN_PAGE_SIZE))
            .await?,
    ))
}

/// Search demandes by applicant or justification
#[utoipa::path(
    get,
    path = "/api/admin/social/demandes/search",
    tag = "Admin Demandes",
    security(("bearer_auth" = [])),
    params(KeywordQuery, PageParams),
    responses(
        (status = 200, description = "Matching demandes"),
        (status = 400, description = "Missing keyword")
    )
)]
pub async fn search(
    State(state): State<AppState>,
    Query(query): Query<KeywordQuery>,
    Query(page): Query<PageParams>,
) -> AppResult<Json<PageResponse<Demande>>> {
    Ok(Json(
        state
            .demande_service
            .search(query.keyword, page.resolve(DEFAULT_ADMIN_PAGE_SIZE))
            .await?,
    ))
}

/// Pending demandes past their expected processing date
#[utoipa::path(
    get,
    path = "/api/admin/social/demandes/overdue",
    tag = "Admin Demandes",
    security(("bearer_auth" = [])),
    params(PageParams),
    responses((status = 200, description = "Overdue demandes, most late first"))
)]
pub async fn overdue(
    State(state): State<AppState>,
    Query(page): Query<PageParams>,
) -> AppResult<Json<PageResponse<Demande>>> {
    Ok(Json(
        state
            .demande_service
            .overdue(page.resolve(DEFAULT_ADMIN_PAGE_SIZE))
            .await?,
    ))
}

/// Pending demandes due within a few days
#[utoipa::path(
    get,
    path = "/api/admin/social/demandes/due-soon",
    tag = "Admin Demandes",
    security(("bearer_auth" = [])),
    params(DueSoonQuery, PageParams),
    responses((status = 200, description = "Demandes expected within the window"))
)]
pub async fn due_soon(
    State(state): State<AppState>,
    Query(query): Query<DueSoonQuery>,
    Query(page): Query<PageParams>,
) -> AppResult<Json<PageResponse<Demande>>> {
    Ok(Json(
        state
            .demande_service
            .due_soon(query.days, page.resolve(DEFAULT_ADMIN_PAGE_SIZE))
            .await?,
    ))
}

/// Move a demande through its workflow
#[utoipa::path(
    put,
    path = "/api/admin/social/demandes/{id}/status",
    tag = "Admin Demandes",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Demande ID")),
    request_body = StatusRequest,
    responses(
        (status = 200, description = "Status updated", body = Demande),
        (status = 400, description = "Missing amount, reason or payment reference"),
        (status = 404, description = "Demande not found"),
        (status = 409, description = "Transition not allowed")
    )
)]
pub async fn update_status(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ValidatedJson(payload): ValidatedJson<StatusRequest>,
) -> AppResult<Json<Demande>> {
    Ok(Json(
        state
            .demande_service
            .update_status(id, payload.into(), &current_user)
            .await?,
    ))
}

/// Set demande priority
#[utoipa::path(
    put,
    path = "/api/admin/social/demandes/{id}/priority",
    tag = "Admin Demandes",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Demande ID")),
    request_body = PriorityRequest,
    responses(
        (status = 200, description = "Priority updated", body = Demande),
        (status = 404, description = "Demande not found")
    )
)]
pub async fn set_priority(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<PriorityRequest>,
) -> AppResult<Json<Demande>> {
    Ok(Json(
        state
            .demande_service
            .set_priority(id, payload.priority_level)
            .await?,
    ))
}

/// Delete demande
#[utoipa::path(
    delete,
    path = "/api/admin/social/demandes/{id}",
    tag = "Admin Demandes",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Demande ID")),
    responses(
        (status = 204, description = "Demande deleted"),
        (status = 404, description = "Demande not found")
    )
)]
pub async fn delete(State(state): State<AppState>, Path(id): Path<i64>) -> AppResult<StatusCode> {
    state.demande_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_defaults() {
        let req: CreateDemandeRequest = serde_json::from_str(
            r#"{"prestationId": 3, "requestedAmount": "250.50", "justification": "  Rent arrears  "}"#,
        )
        .unwrap();
        assert!(req.validate().is_ok());

        let (draft, submit) = req.into_parts();
        assert!(!submit);
        assert_eq!(draft.justification, "Rent arrears");
        assert_eq!(draft.requested_amount, Some(Decimal::new(25050, 2)));
        assert!(draft.documents.is_empty());
        assert_eq!(draft.priority_level, None);
    }

    #[test]
    fn test_blank_justification_rejected() {
        let req: CreateDemandeRequest =
            serde_json::from_str(r#"{"prestationId": 3, "justification": "   "}"#).unwrap();
        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("justification"));
    }
}
