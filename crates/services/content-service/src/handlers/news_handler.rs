//! News handlers: public reading and back-office editing.

use axum::{
    extract::{Extension, Path, Query, State},
    http::StatusCode,
    response::Json,
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use common::extract::not_blank;
use common::{AppResult, CurrentUser, PageParams, PageResponse, ValidatedJson};
use domain::{News, NewsDraft, DEFAULT_ADMIN_PAGE_SIZE, DEFAULT_PAGE_SIZE};

use crate::state::AppState;

/// News creation or full replacement.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewsRequest {
    #[validate(length(min = 1, max = 255, message = "Title must be between 1 and 255 characters"))]
    #[schema(example = "New scholarship programme")]
    pub title: String,
    /// Derived from the title when absent
    #[validate(length(max = 255, message = "Slug must be at most 255 characters"))]
    pub slug: Option<String>,
    #[validate(custom(function = "not_blank", message = "Body is required"))]
    pub body: String,
    #[validate(length(max = 500, message = "Image URL must be at most 500 characters"))]
    pub image_url: Option<String>,
    #[validate(
        custom(function = "not_blank", message = "Category is required"),
        length(max = 100, message = "Category must be at most 100 characters")
    )]
    #[schema(example = "Education")]
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Publish immediately (creation only)
    #[serde(default)]
    pub published: bool,
}

impl From<NewsRequest> for NewsDraft {
    fn from(req: NewsRequest) -> Self {
        Self {
            title: req.title.trim().to_string(),
            slug: req.slug,
            body: req.body,
            image_url: req.image_url,
            category: req.category.trim().to_string(),
            tags: req.tags,
        }
    }
}

/// Public listing filters
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct NewsSearchQuery {
    /// Matches title or body
    pub query: Option<String>,
    pub category: Option<String>,
}

/// List published news
#[utoipa::path(
    get,
    path = "/api/public/news",
    tag = "Public",
    params(NewsSearchQuery, PageParams),
    responses((status = 200, description = "Page of published news, newest first"))
)]
pub async fn list_published(
    State(state): State<AppState>,
    Query(filter): Query<NewsSearchQuery>,
    Query(page): Query<PageParams>,
) -> AppResult<Json<PageResponse<News>>> {
    let page = state
        .news_service
        .list_published(filter.query, filter.category, page.resolve(DEFAULT_PAGE_SIZE))
        .await?;
    Ok(Json(page))
}

/// Read a published article
#[utoipa::path(
    get,
    path = "/api/public/news/{slug}",
    tag = "Public",
    params(("slug" = String, Path, description = "Article slug")),
    responses(
        (status = 200, description = "Article", body = News),
        (status = 404, description = "No published article with this slug")
    )
)]
pub async fn get_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<Json<News>> {
    Ok(Json(state.news_service.read_by_slug(&slug).await?))
}

/// Featured news
#[utoipa::path(
    get,
    path = "/api/news/featured",
    tag = "News",
    params(PageParams),
    responses((status = 200, description = "Page of featured published news"))
)]
pub async fn featured(
    State(state): State<AppState>,
    Query(page): Query<PageParams>,
) -> AppResult<Json<PageResponse<News>>> {
    Ok(Json(
        state
            .news_service
            .featured(page.resolve(DEFAULT_PAGE_SIZE))
            .await?,
    ))
}

/// Most viewed news
#[utoipa::path(
    get,
    path = "/api/news/popular",
    tag = "News",
    responses((status = 200, description = "Top five published news by views", body = [News]))
)]
pub async fn popular(State(state): State<AppState>) -> AppResult<Json<Vec<News>>> {
    Ok(Json(state.news_service.popular().await?))
}

/// List all news (any status)
#[utoipa::path(
    get,
    path = "/api/admin/news",
    tag = "Admin News",
    security(("bearer_auth" = [])),
    params(PageParams),
    responses(
        (status = 200, description = "Page of news"),
        (status = 403, description = "Forbidden - Admin only")
    )
)]
pub async fn list_all(
    State(state): State<AppState>,
    Query(page): Query<PageParams>,
) -> AppResult<Json<PageResponse<News>>> {
    Ok(Json(
        state
            .news_service
            .list_all(page.resolve(DEFAULT_ADMIN_PAGE_SIZE))
            .await?,
    ))
}

/// Create news
#[utoipa::path(
    post,
    path = "/api/admin/news",
    tag = "Admin News",
    security(("bearer_auth" = [])),
    request_body = NewsRequest,
    responses(
        (status = 201, description = "News created", body = News),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Slug already in use")
    )
)]
pub async fn create(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<NewsRequest>,
) -> AppResult<(StatusCode, Json<News>)> {
    let publish = payload.published;
    let news = state
        .news_service
        .create(payload.into(), publish, &current_user)
        .await?;
    Ok((StatusCode::CREATED, Json(news)))
}

/// Get news by ID
#[utoipa::path(
    get,
    path = "/api/admin/news/{id}",
    tag = "Admin News",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "News ID")),
    responses(
        (status = 200, description = "News", body = News),
        (status = 404, description = "News not found")
    )
)]
pub async fn get(State(state): State<AppState>, Path(id): Path<i64>) -> AppResult<Json<News>> {
    Ok(Json(state.news_service.get(id).await?))
}

/// Replace news
#[utoipa::path(
    put,
    path = "/api/admin/news/{id}",
    tag = "Admin News",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "News ID")),
    request_body = NewsRequest,
    responses(
        (status = 200, description = "News updated", body = News),
        (status = 404, description = "News not found"),
        (status = 409, description = "Slug already in use")
    )
)]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ValidatedJson(payload): ValidatedJson<NewsRequest>,
) -> AppResult<Json<News>> {
    Ok(Json(state.news_service.update(id, payload.into()).await?))
}

/// Publish news
#[utoipa::path(
    put,
    path = "/api/admin/news/{id}/publish",
    tag = "Admin News",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "News ID")),
    responses(
        (status = 200, description = "News published", body = News),
        (status = 404, description = "News not found")
    )
)]
pub async fn publish(State(state): State<AppState>, Path(id): Path<i64>) -> AppResult<Json<News>> {
    Ok(Json(state.news_service.publish(id).await?))
}

/// Unpublish news
#[utoipa::path(
    put,
    path = "/api/admin/news/{id}/unpublish",
    tag = "Admin News",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "News ID")),
    responses(
        (status = 200, description = "News back to draft", body = News),
        (status = 404, description = "News not found")
    )
)]
pub async fn unpublish(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<News>> {
    Ok(Json(state.news_service.unpublish(id).await?))
}

/// Toggle the featured flag
#[utoipa::path(
    put,
    path = "/api/admin/news/{id}/feature",
    tag = "Admin News",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "News ID")),
    responses(
        (status = 200, description = "Featured flag toggled", body = News),
        (status = 404, description = "News not found")
    )
)]
pub async fn toggle_featured(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<News>> {
    Ok(Json(state.news_service.toggle_featured(id).await?))
}

/// Delete news
#[utoipa::path(
    delete,
    path = "/api/admin/news/{id}",
    tag = "Admin News",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "News ID")),
    responses(
        (status = 204, description = "News deleted"),
        (status = 404, description = "News not found")
    )
)]
pub async fn delete(State(state): State<AppState>, Path(id): Path<i64>) -> AppResult<StatusCode> {
    state.news_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_news_request_defaults_and_validation() {
        let req: NewsRequest = serde_json::from_str(
            r#"{"title": "Hello", "body": "Text", "category": "General"}"#,
        )
        .unwrap();
        assert!(req.validate().is_ok());
        assert!(req.tags.is_empty());
        assert!(!req.published);

        let blank: NewsRequest =
            serde_json::from_str(r#"{"title": "Hello", "body": "  ", "category": "General"}"#)
                .unwrap();
        assert!(blank.validate().is_err());
    }
}
