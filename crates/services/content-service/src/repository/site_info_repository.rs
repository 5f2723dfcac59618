//! Site info repository implementation.

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};

use common::{AppError, AppResult};
use domain::SiteInfo;

use super::entities::site_info::{self, ActiveModel, Entity as SiteInfoEntity};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// The home page texts live in a single row.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait SiteInfoRepository: Send + Sync {
    /// Lowest-id row, if any.
    async fn first(&self) -> AppResult<Option<SiteInfo>>;

    async fn create(&self, info: SiteInfo) -> AppResult<SiteInfo>;

    async fn update(&self, info: SiteInfo) -> AppResult<SiteInfo>;
}

/// SeaORM implementation of SiteInfoRepository
pub struct SiteInfoStore {
    db: DatabaseConnection,
}

impl SiteInfoStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl SiteInfoRepository for SiteInfoStore {
    async fn first(&self) -> AppResult<Option<SiteInfo>> {
        let result = SiteInfoEntity::find()
            .order_by_asc(site_info::Column::Id)
            .one(&self.db)
            .await?;
        Ok(result.map(SiteInfo::from))
    }

    async fn create(&self, info: SiteInfo) -> AppResult<SiteInfo> {
        let active_model = ActiveModel {
            mission: Set(info.mission),
            stats_json: Set(info.stats.to_json()),
            ministry_content: Set(info.ministry_content),
            updated_at: Set(info.updated_at),
            ..Default::default()
        };

        let model = active_model.insert(&self.db).await?;
        Ok(SiteInfo::from(model))
    }

    async fn update(&self, info: SiteInfo) -> AppResult<SiteInfo> {
        let existing = SiteInfoEntity::find_by_id(info.id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: ActiveModel = existing.into();
        active.mission = Set(info.mission);
        active.stats_json = Set(info.stats.to_json());
        active.ministry_content = Set(info.ministry_content);
        active.updated_at = Set(info.updated_at);

        let model = active.update(&self.db).await?;
        Ok(SiteInfo::from(model))
    }
}
