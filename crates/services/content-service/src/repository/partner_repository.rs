//! Partner repository implementation.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use common::{AppError, AppResult};
use domain::{Partner, PartnerDraft};

use super::entities::partner::{self, ActiveModel, Entity as PartnerEntity};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait PartnerRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Partner>>;

    async fn create(&self, draft: PartnerDraft) -> AppResult<Partner>;

    /// Replace the editable fields of partner `id`.
    async fn update(&self, id: i64, draft: PartnerDraft) -> AppResult<Partner>;

    /// Returns false when no row matched.
    async fn delete(&self, id: i64) -> AppResult<bool>;

    /// Ordered by name, optionally limited to one sector.
    async fn list(&self, sector: Option<String>) -> AppResult<Vec<Partner>>;
}

/// SeaORM implementation of PartnerRepository
pub struct PartnerStore {
    db: DatabaseConnection,
}

impl PartnerStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PartnerRepository for PartnerStore {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Partner>> {
        let result = PartnerEntity::find_by_id(id).one(&self.db).await?;
        Ok(result.map(Partner::from))
    }

    async fn create(&self, draft: PartnerDraft) -> AppResult<Partner> {
        let now = Utc::now();
        let active_model = ActiveModel {
            name: Set(draft.name),
            logo_url: Set(draft.logo_url),
            website: Set(draft.website),
            sector: Set(draft.sector),
            phone: Set(draft.phone),
            email: Set(draft.email),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let model = active_model.insert(&self.db).await?;
        Ok(Partner::from(model))
    }

    async fn update(&self, id: i64, draft: PartnerDraft) -> AppResult<Partner> {
        let existing = PartnerEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: ActiveModel = existing.into();
        active.name = Set(draft.name);
        active.logo_url = Set(draft.logo_url);
        active.website = Set(draft.website);
        active.sector = Set(draft.sector);
        active.phone = Set(draft.phone);
        active.email = Set(draft.email);
        active.updated_at = Set(Utc::now());

        let model = active.update(&self.db).await?;
        Ok(Partner::from(model))
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        let result = PartnerEntity::delete_by_id(id).exec(&self.db).await?;
        Ok(result.rows_affected > 0)
    }

    async fn list(&self, sector: Option<String>) -> AppResult<Vec<Partner>> {
        let mut query = PartnerEntity::find();
        if let Some(sector) = sector {
            query = query.filter(partner::Column::Sector.eq(sector));
        }

        let models = query
            .order_by_asc(partner::Column::Name)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(Partner::from).collect())
    }
}
