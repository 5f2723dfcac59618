//! Authentication handlers.

use axum::{
    extract::{Extension, State},
    http::StatusCode,
    response::Json,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use common::extract::not_blank;
use common::patterns::{MATRICULE_REGEX, PHONE_REGEX};
use common::{AppResult, CurrentUser, ValidatedJson};

use crate::service::{AccountSummary, AuthResponse, Registration};
use crate::state::AppState;

/// Registration request with validation
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[validate(
        custom(function = "not_blank", message = "First name is required"),
        length(max = 50, message = "First name must be at most 50 characters")
    )]
    #[schema(example = "Awa")]
    pub first_name: String,
    #[validate(
        custom(function = "not_blank", message = "Last name is required"),
        length(max = 50, message = "Last name must be at most 50 characters")
    )]
    #[schema(example = "Diallo")]
    pub last_name: String,
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "awa.diallo@foundation.com")]
    pub work_email: String,
    #[validate(regex(
        path = *MATRICULE_REGEX,
        message = "Matricule must be 6 to 10 uppercase letters or digits"
    ))]
    #[schema(example = "EMP12345")]
    pub matricule: String,
    #[validate(custom(function = "not_blank", message = "Service is required"))]
    #[schema(example = "Finance")]
    pub service: String,
    #[validate(regex(path = *PHONE_REGEX, message = "Phone must contain 10 digits"))]
    #[schema(example = "0612345678")]
    pub phone: Option<String>,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    #[schema(example = "securepassword123")]
    pub password: String,
}

impl From<RegisterRequest> for Registration {
    fn from(req: RegisterRequest) -> Self {
        Self {
            first_name: req.first_name,
            last_name: req.last_name,
            work_email: req.work_email,
            matricule: req.matricule,
            service: req.service,
            phone: req.phone,
            password: req.password,
        }
    }
}

/// Login request with validation
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "awa.diallo@foundation.com")]
    pub work_email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    #[schema(example = "securepassword123")]
    pub password: String,
}

/// Registration acknowledgement.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    #[schema(example = "User registered successfully")]
    pub message: String,
    pub user_id: i64,
}

/// Register a new account
#[utoipa::path(
    post,
    path = "/api/auth/register",
    tag = "Authentication",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = RegisterResponse),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Email or matricule already in use"),
        (status = 429, description = "Too many requests")
    )
)]
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<RegisterRequest>,
) -> AppResult<(StatusCode, Json<RegisterResponse>)> {
    let account = state.auth_service.register(payload.into()).await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "User registered successfully".to_string(),
            user_id: account.id,
        }),
    ))
}

/// Login and get a JWT token
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = AuthResponse),
        (status = 401, description = "Invalid credentials"),
        (status = 403, description = "Account is not active"),
        (status = 429, description = "Too many requests")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let response = state
        .auth_service
        .login(&payload.work_email, &payload.password)
        .await?;
    Ok(Json(response))
}

/// Check whether a bearer token is valid
#[utoipa::path(
    post,
    path = "/api/auth/validate",
    tag = "Authentication",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "true when the token is valid", body = bool)
    )
)]
pub async fn validate(
    State(state): State<AppState>,
    bearer: Option<TypedHeader<Authorization<Bearer>>>,
) -> Json<bool> {
    let valid = bearer
        .map(|TypedHeader(Authorization(bearer))| state.auth_service.validate_token(bearer.token()))
        .unwrap_or(false);
    Json(valid)
}

/// Issue a fresh token for the authenticated user
#[utoipa::path(
    post,
    path = "/api/auth/refresh",
    tag = "Authentication",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "New token", body = AuthResponse),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn refresh(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
) -> AppResult<Json<AuthResponse>> {
    Ok(Json(state.auth_service.refresh(&current_user).await?))
}

/// Get the authenticated account
#[utoipa::path(
    get,
    path = "/api/auth/me",
    tag = "Authentication",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current account", body = AccountSummary),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Account not found")
    )
)]
pub async fn me(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
) -> AppResult<Json<AccountSummary>> {
    Ok(Json(state.auth_service.me(&current_user).await?))
}
