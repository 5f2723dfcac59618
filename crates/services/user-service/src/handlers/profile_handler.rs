//! Self-service profile handlers.

use axum::{
    extract::{Extension, Multipart, State},
    response::Json,
};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use common::patterns::{MATRICULE_REGEX, PHONE_REGEX};
use common::{AppError, AppResult, CurrentUser, ValidatedJson};
use domain::{ProfileChanges, UserProfile};

use crate::state::AppState;

/// Partial profile update with validation. Absent fields are left unchanged.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    #[validate(length(min = 2, max = 50, message = "First name must be between 2 and 50 characters"))]
    #[schema(example = "Awa")]
    pub first_name: Option<String>,
    #[validate(length(min = 2, max = 50, message = "Last name must be between 2 and 50 characters"))]
    #[schema(example = "Diallo")]
    pub last_name: Option<String>,
    #[validate(regex(path = *PHONE_REGEX, message = "Phone must contain 10 digits"))]
    #[schema(example = "0612345678")]
    pub phone: Option<String>,
    #[validate(regex(
        path = *MATRICULE_REGEX,
        message = "Matricule must be 6 to 10 uppercase letters or digits"
    ))]
    #[schema(example = "EMP12345")]
    pub matricule: Option<String>,
    #[validate(length(max = 100, message = "Service code must be at most 100 characters"))]
    pub service_code: Option<String>,
    #[validate(length(max = 500, message = "Address must be at most 500 characters"))]
    pub address: Option<String>,
    #[validate(custom(function = "past_date", message = "Birth date must be in the past"))]
    pub birth_date: Option<NaiveDate>,
    #[validate(length(max = 50, message = "Family status must be at most 50 characters"))]
    pub family_status: Option<String>,
    #[validate(range(min = 0, max = 20, message = "Children count must be between 0 and 20"))]
    pub children_count: Option<i32>,
    pub notif_email: Option<bool>,
    pub notif_news: Option<bool>,
    pub notif_events: Option<bool>,
}

/// Multipart body of the avatar upload.
#[derive(ToSchema)]
#[allow(dead_code)]
pub struct AvatarUpload {
    #[schema(value_type = String, format = Binary)]
    file: Vec<u8>,
}

fn past_date(date: &NaiveDate) -> Result<(), ValidationError> {
    if *date >= Utc::now().date_naive() {
        return Err(ValidationError::new("past"));
    }
    Ok(())
}

impl From<UpdateProfileRequest> for ProfileChanges {
    fn from(req: UpdateProfileRequest) -> Self {
        Self {
            first_name: req.first_name,
            last_name: req.last_name,
            phone: req.phone,
            matricule: req.matricule,
            service_code: req.service_code,
            address: req.address,
            birth_date: req.birth_date,
            family_status: req.family_status,
            children_count: req.children_count,
            notif_email: req.notif_email,
            notif_news: req.notif_news,
            notif_events: req.notif_events,
        }
    }
}

/// Get my profile
#[utoipa::path(
    get,
    path = "/api/users/me",
    tag = "Profile",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current user profile", body = UserProfile),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn get_me(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
) -> AppResult<Json<UserProfile>> {
    Ok(Json(state.user_service.get_me(&current_user).await?))
}

/// Update my profile
#[utoipa::path(
    put,
    path = "/api/users/me",
    tag = "Profile",
    security(("bearer_auth" = [])),
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Profile updated", body = UserProfile),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 409, description = "Matricule already in use")
    )
)]
pub async fn update_me(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<UpdateProfileRequest>,
) -> AppResult<Json<UserProfile>> {
    let profile = state
        .user_service
        .update_me(&current_user, payload.into())
        .await?;
    Ok(Json(profile))
}

/// Upload my avatar (multipart field `file`)
#[utoipa::path(
    post,
    path = "/api/users/me/avatar",
    tag = "Profile",
    security(("bearer_auth" = [])),
    request_body(content = AvatarUpload, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Profile with the new avatar URL", body = UserProfile),
        (status = 400, description = "Empty, oversized or unsupported file"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn upload_avatar(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<Json<UserProfile>> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::bad_request(e.body_text()))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let file_name = field.file_name().unwrap_or_default().to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::bad_request(e.body_text()))?;

        let profile = state
            .user_service
            .upload_avatar(&current_user, &file_name, data.to_vec())
            .await?;
        return Ok(Json(profile));
    }

    Err(AppError::bad_request("Avatar file cannot be empty"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_request_validation() {
        let valid = UpdateProfileRequest {
            first_name: Some("Awa".to_string()),
            phone: Some("0612345678".to_string()),
            children_count: Some(2),
            birth_date: NaiveDate::from_ymd_opt(1990, 5, 1),
            ..Default::default()
        };
        assert!(valid.validate().is_ok());

        let invalid = UpdateProfileRequest {
            first_name: Some("A".to_string()),
            phone: Some("12345".to_string()),
            matricule: Some("emp1".to_string()),
            children_count: Some(21),
            birth_date: Some(Utc::now().date_naive()),
            ..Default::default()
        };
        let errors = invalid.validate().unwrap_err();
        let fields = errors.field_errors();
        for field in ["first_name", "phone", "matricule", "children_count", "birth_date"] {
            assert!(fields.contains_key(field), "missing error for {}", field);
        }
    }
}
