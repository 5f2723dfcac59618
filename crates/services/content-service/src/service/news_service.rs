//! News service - editorial workflow and public reading.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tracing::info;

use common::{AppError, AppResult, CurrentUser, OptionExt, PageRequest, PageResponse};
use domain::{ContentStatus, News, NewsDraft};

use crate::repository::{NewsListing, NewsRepository};

/// Size of the "popular" list.
pub const POPULAR_NEWS_LIMIT: u64 = 5;

#[async_trait]
pub trait NewsService: Send + Sync {
    /// Create an article, published immediately when `publish` is set.
    async fn create(&self, draft: NewsDraft, publish: bool, author: &CurrentUser) -> AppResult<News>;

    /// Replace the editable fields.
    async fn update(&self, id: i64, draft: NewsDraft) -> AppResult<News>;

    async fn publish(&self, id: i64) -> AppResult<News>;

    async fn unpublish(&self, id: i64) -> AppResult<News>;

    async fn toggle_featured(&self, id: i64) -> AppResult<News>;

    async fn delete(&self, id: i64) -> AppResult<()>;

    /// Any status, for the back office.
    async fn get(&self, id: i64) -> AppResult<News>;

    /// Published article by slug; counts one view.
    async fn read_by_slug(&self, slug: &str) -> AppResult<News>;

    async fn list_all(&self, page: PageRequest) -> AppResult<PageResponse<News>>;

    async fn list_published(
        &self,
        query: Option<String>,
        category: Option<String>,
        page: PageRequest,
    ) -> AppResult<PageResponse<News>>;

    async fn featured(&self, page: PageRequest) -> AppResult<PageResponse<News>>;

    async fn popular(&self) -> AppResult<Vec<News>>;
}

pub struct NewsManager {
    repo: Arc<dyn NewsRepository>,
}

impl NewsManager {
    pub fn new(repo: Arc<dyn NewsRepository>) -> Self {
        Self { repo }
    }

    async fn find(&self, id: i64) -> AppResult<News> {
        self.repo.find_by_id(id).await?.ok_or_not_found()
    }

    async fn ensure_slug_free(&self, slug: &str, exclude_id: Option<i64>) -> AppResult<()> {
        if self.repo.slug_taken(slug, exclude_id).await? {
            return Err(AppError::conflict(format!(
                "News with slug '{}' already exists",
                slug
            )));
        }
        Ok(())
    }

    async fn paged(&self, listing: NewsListing, page: PageRequest) -> AppResult<PageResponse<News>> {
        let (items, total) = self.repo.list(listing, page).await?;
        Ok(PageResponse::new(items, page, total))
    }
}

#[async_trait]
impl NewsService for NewsManager {
    async fn create(&self, draft: NewsDraft, publish: bool, author: &CurrentUser) -> AppResult<News> {
        let slug = draft.resolved_slug()?;
        self.ensure_slug_free(&slug, None).await?;

        let now = Utc::now();
        let mut news = News {
            id: 0,
            title: draft.title,
            slug,
            body: draft.body,
            image_url: draft.image_url,
            category: draft.category,
            tags: draft.tags,
            author_id: Some(author.id),
            author_name: Some(author.name.clone()),
            status: ContentStatus::Draft,
            published: false,
            featured: false,
            view_count: 0,
            published_at: None,
            created_at: now,
            updated_at: now,
        };
        if publish {
            news.publish(now);
        }

        let created = self.repo.create(news).await?;
        info!(news_id = created.id, slug = %created.slug, "News created");
        Ok(created)
    }

    async fn update(&self, id: i64, draft: NewsDraft) -> AppResult<News> {
        let mut news = self.find(id).await?;
        let slug = draft.resolved_slug()?;
        if slug != news.slug {
            self.ensure_slug_free(&slug, Some(id)).await?;
        }

        news.title = draft.title;
        news.slug = slug;
        news.body = draft.body;
        news.image_url = draft.image_url;
        news.category = draft.category;
        news.tags = draft.tags;
        news.updated_at = Utc::now();

        self.repo.update(news).await
    }

    async fn publish(&self, id: i64) -> AppResult<News> {
        let mut news = self.find(id).await?;
        news.publish(Utc::now());
        let news = self.repo.update(news).await?;
        info!(news_id = id, "News published");
        Ok(news)
    }

    async fn unpublish(&self, id: i64) -> AppResult<News> {
        let mut news = self.find(id).await?;
        news.unpublish(Utc::now());
        self.repo.update(news).await
    }

    async fn toggle_featured(&self, id: i64) -> AppResult<News> {
        let mut news = self.find(id).await?;
        news.featured = !news.featured;
        news.updated_at = Utc::now();
        self.repo.update(news).await
    }

    async fn delete(&self, id: i64) -> AppResult<()> {
        if !self.repo.delete(id).await? {
            return Err(AppError::NotFound);
        }
        info!(news_id = id, "News deleted");
        Ok(())
    }

    async fn get(&self, id: i64) -> AppResult<News> {
        self.find(id).await
    }

    async fn read_by_slug(&self, slug: &str) -> AppResult<News> {
        let mut news = self
            .repo
            .find_by_slug(slug)
            .await?
            .filter(News::is_published)
            .ok_or(AppError::NotFound)?;

        self.repo.increment_views(news.id).await?;
        news.view_count += 1;
        Ok(news)
    }

    async fn list_all(&self, page: PageRequest) -> AppResult<PageResponse<News>> {
        self.paged(NewsListing::All, page).await
    }

    async fn list_published(
        &self,
        query: Option<String>,
        category: Option<String>,
        page: PageRequest,
    ) -> AppResult<PageResponse<News>> {
        self.paged(NewsListing::Published { query, category }, page)
            .await
    }

    async fn featured(&self, page: PageRequest) -> AppResult<PageResponse<News>> {
        self.paged(NewsListing::Featured, page).await
    }

    async fn popular(&self) -> AppResult<Vec<News>> {
        self.repo.most_viewed(POPULAR_NEWS_LIMIT).await
    }
}
