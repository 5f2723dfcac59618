//! Foundation info repository implementation.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, TransactionTrait,
};

use common::{AppError, AppResult};
use domain::{FoundationInfo, InfoType};

use super::entities::foundation_info::{self, ActiveModel, Entity as InfoEntity};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait FoundationInfoRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<FoundationInfo>>;

    async fn create(&self, info: FoundationInfo) -> AppResult<FoundationInfo>;

    async fn update(&self, info: FoundationInfo) -> AppResult<FoundationInfo>;

    /// Returns false when no row matched.
    async fn delete(&self, id: i64) -> AppResult<bool>;

    /// Highest display order used by blocks of `info_type`.
    async fn max_order(&self, info_type: InfoType) -> AppResult<Option<i32>>;

    /// Every block ordered by type then display order.
    async fn list_all(&self) -> AppResult<Vec<FoundationInfo>>;

    /// Active blocks ordered by display order, optionally limited to `types`.
    async fn list_active(&self, types: Option<Vec<InfoType>>) -> AppResult<Vec<FoundationInfo>>;

    /// Set the display order of each listed block to its 1-based position.
    async fn reorder(&self, ids: Vec<i64>) -> AppResult<()>;
}

/// SeaORM implementation of FoundationInfoRepository
pub struct FoundationInfoStore {
    db: DatabaseConnection,
}

impl FoundationInfoStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl FoundationInfoRepository for FoundationInfoStore {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<FoundationInfo>> {
        let result = InfoEntity::find_by_id(id).one(&self.db).await?;
        Ok(result.map(FoundationInfo::from))
    }

    async fn create(&self, info: FoundationInfo) -> AppResult<FoundationInfo> {
        let active_model = ActiveModel {
            title: Set(info.title),
            content: Set(info.content),
            info_type: Set(info.info_type.as_str().to_string()),
            display_order: Set(info.display_order),
            is_active: Set(info.is_active),
            created_at: Set(info.created_at),
            updated_at: Set(info.updated_at),
            ..Default::default()
        };

        let model = active_model.insert(&self.db).await?;
        Ok(FoundationInfo::from(model))
    }

    async fn update(&self, info: FoundationInfo) -> AppResult<FoundationInfo> {
        let existing = InfoEntity::find_by_id(info.id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: ActiveModel = existing.into();
        active.title = Set(info.title);
        active.content = Set(info.content);
        active.info_type = Set(info.info_type.as_str().to_string());
        active.display_order = Set(info.display_order);
        active.is_active = Set(info.is_active);
        active.updated_at = Set(Utc::now());

        let model = active.update(&self.db).await?;
        Ok(FoundationInfo::from(model))
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        let result = InfoEntity::delete_by_id(id).exec(&self.db).await?;
        Ok(result.rows_affected > 0)
    }

    async fn max_order(&self, info_type: InfoType) -> AppResult<Option<i32>> {
        let max: Option<Option<i32>> = InfoEntity::find()
            .select_only()
            .column_as(foundation_info::Column::DisplayOrder.max(), "max_order")
            .filter(foundation_info::Column::InfoType.eq(info_type.as_str()))
            .into_tuple()
            .one(&self.db)
            .await?;
        Ok(max.flatten())
    }

    async fn list_all(&self) -> AppResult<Vec<FoundationInfo>> {
        let models = InfoEntity::find()
            .order_by_asc(foundation_info::Column::InfoType)
            .order_by_asc(foundation_info::Column::DisplayOrder)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(FoundationInfo::from).collect())
    }

    async fn list_active(&self, types: Option<Vec<InfoType>>) -> AppResult<Vec<FoundationInfo>> {
        let mut query = InfoEntity::find().filter(foundation_info::Column::IsActive.eq(true));
        if let Some(types) = types {
            query = query.filter(
                foundation_info::Column::InfoType.is_in(types.iter().map(InfoType::as_str)),
            );
        }

        let models = query
            .order_by_asc(foundation_info::Column::DisplayOrder)
            .order_by_asc(foundation_info::Column::Id)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(FoundationInfo::from).collect())
    }

    async fn reorder(&self, ids: Vec<i64>) -> AppResult<()> {
        let txn = self.db.begin().await?;
        let now = Utc::now();

        for (position, id) in ids.into_iter().enumerate() {
            InfoEntity::update_many()
                .col_expr(
                    foundation_info::Column::DisplayOrder,
                    Expr::value(position as i32 + 1),
                )
                .col_expr(foundation_info::Column::UpdatedAt, Expr::value(now))
                .filter(foundation_info::Column::Id.eq(id))
                .exec(&txn)
                .await?;
        }

        txn.commit().await?;
        Ok(())
    }
}
