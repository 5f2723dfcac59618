//! News repository implementation.

use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect,
};

use common::db::contains_ci;
use common::{AppError, AppResult, PageRequest};
use domain::{ContentStatus, News};

use super::entities::news::{self, write_fields, ActiveModel, Entity as NewsEntity};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Which news rows a listing returns.
#[derive(Debug, Clone, PartialEq)]
pub enum NewsListing {
    /// Every article, newest first
    All,
    /// Published articles, newest publication first
    Published {
        /// Case-insensitive match on title or body
        query: Option<String>,
        category: Option<String>,
    },
    /// Published and featured, newest publication first
    Featured,
}

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait NewsRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<News>>;

    async fn find_by_slug(&self, slug: &str) -> AppResult<Option<News>>;

    /// Whether a row other than `exclude_id` already uses `slug`.
    async fn slug_taken(&self, slug: &str, exclude_id: Option<i64>) -> AppResult<bool>;

    async fn create(&self, news: News) -> AppResult<News>;

    async fn update(&self, news: News) -> AppResult<News>;

    /// Returns false when no row matched.
    async fn delete(&self, id: i64) -> AppResult<bool>;

    async fn increment_views(&self, id: i64) -> AppResult<()>;

    async fn list(&self, listing: NewsListing, page: PageRequest) -> AppResult<(Vec<News>, u64)>;

    /// Published articles with the highest view counts.
    async fn most_viewed(&self, limit: u64) -> AppResult<Vec<News>>;
}

/// SeaORM implementation of NewsRepository
pub struct NewsStore {
    db: DatabaseConnection,
}

impl NewsStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn published() -> Condition {
    Condition::all().add(news::Column::Status.eq(ContentStatus::Published.as_str()))
}

#[async_trait]
impl NewsRepository for NewsStore {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<News>> {
        let result = NewsEntity::find_by_id(id).one(&self.db).await?;
        Ok(result.map(News::from))
    }

    async fn find_by_slug(&self, slug: &str) -> AppResult<Option<News>> {
        let result = NewsEntity::find()
            .filter(news::Column::Slug.eq(slug))
            .one(&self.db)
            .await?;
        Ok(result.map(News::from))
    }

    async fn slug_taken(&self, slug: &str, exclude_id: Option<i64>) -> AppResult<bool> {
        let mut query = NewsEntity::find().filter(news::Column::Slug.eq(slug));
        if let Some(id) = exclude_id {
            query = query.filter(news::Column::Id.ne(id));
        }
        Ok(query.count(&self.db).await? > 0)
    }

    async fn create(&self, news: News) -> AppResult<News> {
        let mut active = <ActiveModel as sea_orm::ActiveModelTrait>::default();
        write_fields(&mut active, news);
        let model = active.insert(&self.db).await?;
        Ok(News::from(model))
    }

    async fn update(&self, news: News) -> AppResult<News> {
        let existing = NewsEntity::find_by_id(news.id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: ActiveModel = existing.into();
        write_fields(&mut active, news);
        let model = active.update(&self.db).await?;
        Ok(News::from(model))
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        let result = NewsEntity::delete_by_id(id).exec(&self.db).await?;
        Ok(result.rows_affected > 0)
    }

    async fn increment_views(&self, id: i64) -> AppResult<()> {
        NewsEntity::update_many()
            .col_expr(
                news::Column::ViewCount,
                Expr::col(news::Column::ViewCount).add(1),
            )
            .filter(news::Column::Id.eq(id))
            .exec(&self.db)
            .await?;
        Ok(())
    }

    async fn list(&self, listing: NewsListing, page: PageRequest) -> AppResult<(Vec<News>, u64)> {
        let query = match listing {
            NewsListing::All => NewsEntity::find().order_by_desc(news::Column::CreatedAt),
            NewsListing::Published { query, category } => {
                let mut condition = published();
                if let Some(term) = query.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
                    condition = condition.add(
                        Condition::any()
                            .add(contains_ci(news::Column::Title, term))
                            .add(contains_ci(news::Column::Body, term)),
                    );
                }
                if let Some(category) = category.as_deref().map(str::trim).filter(|c| !c.is_empty()) {
                    condition = condition.add(news::Column::Category.eq(category));
                }
                NewsEntity::find()
                    .filter(condition)
                    .order_by_desc(news::Column::PublishedAt)
            }
            NewsListing::Featured => NewsEntity::find()
                .filter(published().add(news::Column::Featured.eq(true)))
                .order_by_desc(news::Column::PublishedAt),
        };

        let paginator = query.paginate(&self.db, page.size);
        let total = paginator.num_items().await?;
        let models = paginator.fetch_page(page.index()).await?;

        Ok((models.into_iter().map(News::from).collect(), total))
    }

    async fn most_viewed(&self, limit: u64) -> AppResult<Vec<News>> {
        let models = NewsEntity::find()
            .filter(published())
            .order_by_desc(news::Column::ViewCount)
            .limit(limit)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(News::from).collect())
    }
}
