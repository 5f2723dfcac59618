//! News database entity for SeaORM.

use sea_orm::entity::prelude::*;
use sea_orm::Set;

use domain::{ContentStatus, News};

use super::parse_code;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "news")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub title: String,
    #[sea_orm(unique)]
    pub slug: String,
    #[sea_orm(column_type = "Text")]
    pub body: String,
    pub image_url: Option<String>,
    pub category: String,
    /// JSON array of tag strings
    #[sea_orm(column_type = "Text")]
    pub tags_json: String,
    pub author_id: Option<i64>,
    pub author_name: Option<String>,
    pub status: String,
    pub featured: bool,
    pub view_count: i64,
    pub published_at: Option<DateTimeUtc>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for News {
    fn from(model: Model) -> Self {
        let status = parse_code(&model.status, ContentStatus::Draft);
        News {
            id: model.id,
            title: model.title,
            slug: model.slug,
            body: model.body,
            image_url: model.image_url,
            category: model.category,
            tags: serde_json::from_str(&model.tags_json).unwrap_or_default(),
            author_id: model.author_id,
            author_name: model.author_name,
            published: status == ContentStatus::Published,
            status,
            featured: model.featured,
            view_count: model.view_count,
            published_at: model.published_at,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// Every persisted column except the key, used for insert and update.
pub(crate) fn write_fields(active: &mut ActiveModel, news: News) {
    active.title = Set(news.title);
    active.slug = Set(news.slug);
    active.body = Set(news.body);
    active.image_url = Set(news.image_url);
    active.category = Set(news.category);
    active.tags_json = Set(serde_json::to_string(&news.tags).unwrap_or_else(|_| "[]".to_string()));
    active.author_id = Set(news.author_id);
    active.author_name = Set(news.author_name);
    active.status = Set(news.status.as_str().to_string());
    active.featured = Set(news.featured);
    active.view_count = Set(news.view_count);
    active.published_at = Set(news.published_at);
    active.created_at = Set(news.created_at);
    active.updated_at = Set(news.updated_at);
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_malformed_tags_become_empty() {
        let now = Utc::now();
        let model = Model {
            id: 1,
            title: "t".to_string(),
            slug: "t".to_string(),
            body: "b".to_string(),
            image_url: None,
            category: "General".to_string(),
            tags_json: "not json".to_string(),
            author_id: None,
            author_name: None,
            status: "PUBLISHED".to_string(),
            featured: false,
            view_count: 0,
            published_at: Some(now),
            created_at: now,
            updated_at: now,
        };

        let news = News::from(model);
        assert!(news.tags.is_empty());
        assert!(news.published);
    }
}
