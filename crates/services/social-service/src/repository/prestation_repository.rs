//! Prestation repository implementation.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, TransactionTrait,
};

use common::db::contains_ci;
use common::{AppError, AppResult};
use domain::{Prestation, PrestationCategory, PrestationType};

use super::entities::demande::{self, Entity as DemandeEntity};
use super::entities::prestation::{self, write_fields, ActiveModel, Entity as PrestationEntity};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Catalog filter. Every field is optional and combined with AND.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PrestationFilter {
    pub active_only: bool,
    pub category: Option<PrestationCategory>,
    pub prestation_type: Option<PrestationType>,
    /// Matches title or description
    pub search: Option<String>,
    /// Matches title, description or short description
    pub keyword: Option<String>,
}

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait PrestationRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Prestation>>;

    async fn create(&self, prestation: Prestation) -> AppResult<Prestation>;

    async fn update(&self, prestation: Prestation) -> AppResult<Prestation>;

    /// Returns false when no row matched.
    async fn delete(&self, id: i64) -> AppResult<bool>;

    /// Highest display order in the catalog.
    async fn max_order(&self) -> AppResult<Option<i32>>;

    /// Matching prestations by display order.
    async fn list(&self, filter: PrestationFilter) -> AppResult<Vec<Prestation>>;

    /// Set the display order of each listed prestation to its 1-based position.
    async fn reorder(&self, ids: Vec<i64>) -> AppResult<()>;

    /// Number of demandes filed against the prestation.
    async fn demande_count(&self, id: i64) -> AppResult<u64>;

    /// Active prestations with the most demandes first.
    async fn most_requested(&self, limit: u64) -> AppResult<Vec<Prestation>>;

    async fn count(&self, active_only: bool) -> AppResult<u64>;
}

/// SeaORM implementation of PrestationRepository
pub struct PrestationStore {
    db: DatabaseConnection,
}

impl PrestationStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn filter_condition(filter: PrestationFilter) -> Condition {
    let mut condition = Condition::all();
    if filter.active_only {
        condition = condition.add(prestation::Column::IsActive.eq(true));
    }
    if let Some(category) = filter.category {
        condition = condition.add(prestation::Column::Category.eq(category.as_str()));
    }
    if let Some(prestation_type) = filter.prestation_type {
        condition = condition.add(prestation::Column::PrestationType.eq(prestation_type.as_str()));
    }
    if let Some(search) = filter.search.as_deref().filter(|s| !s.trim().is_empty()) {
        condition = condition.add(
            Condition::any()
                .add(contains_ci(prestation::Column::Title, search))
                .add(contains_ci(prestation::Column::Description, search)),
        );
    }
    if let Some(keyword) = filter.keyword.as_deref().filter(|s| !s.trim().is_empty()) {
        condition = condition.add(
            Condition::any()
                .add(contains_ci(prestation::Column::Title, keyword))
                .add(contains_ci(prestation::Column::Description, keyword))
                .add(contains_ci(prestation::Column::ShortDescription, keyword)),
        );
    }
    condition
}

#[async_trait]
impl PrestationRepository for PrestationStore {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Prestation>> {
        let result = PrestationEntity::find_by_id(id).one(&self.db).await?;
        Ok(result.map(Prestation::from))
    }

    async fn create(&self, prestation: Prestation) -> AppResult<Prestation> {
        let mut active = <ActiveModel as sea_orm::ActiveModelTrait>::default();
        write_fields(&mut active, prestation);
        let model = active.insert(&self.db).await?;
        Ok(Prestation::from(model))
    }

    async fn update(&self, prestation: Prestation) -> AppResult<Prestation> {
        let existing = PrestationEntity::find_by_id(prestation.id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: ActiveModel = existing.into();
        write_fields(&mut active, prestation);
        let model = active.update(&self.db).await?;
        Ok(Prestation::from(model))
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        let result = PrestationEntity::delete_by_id(id).exec(&self.db).await?;
        Ok(result.rows_affected > 0)
    }

    async fn max_order(&self) -> AppResult<Option<i32>> {
        let max: Option<Option<i32>> = PrestationEntity::find()
            .select_only()
            .column_as(prestation::Column::DisplayOrder.max(), "max_order")
            .into_tuple()
            .one(&self.db)
            .await?;
        Ok(max.flatten())
    }

    async fn list(&self, filter: PrestationFilter) -> AppResult<Vec<Prestation>> {
        let models = PrestationEntity::find()
            .filter(filter_condition(filter))
            .order_by_asc(prestation::Column::DisplayOrder)
            .order_by_asc(prestation::Column::Title)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(Prestation::from).collect())
    }

    async fn reorder(&self, ids: Vec<i64>) -> AppResult<()> {
        let txn = self.db.begin().await?;
        let now = Utc::now();

        for (position, id) in ids.into_iter().enumerate() {
            PrestationEntity::update_many()
                .col_expr(prestation::Column::DisplayOrder, Expr::value(position as i32 + 1))
                .col_expr(prestation::Column::UpdatedAt, Expr::value(now))
                .filter(prestation::Column::Id.eq(id))
                .exec(&txn)
                .await?;
        }

        txn.commit().await?;
        Ok(())
    }

    async fn demande_count(&self, id: i64) -> AppResult<u64> {
        let count = DemandeEntity::find()
            .filter(demande::Column::PrestationId.eq(id))
            .count(&self.db)
            .await?;
        Ok(count)
    }

    async fn most_requested(&self, limit: u64) -> AppResult<Vec<Prestation>> {
        let counts: HashMap<i64, i64> = DemandeEntity::find()
            .select_only()
            .column(demande::Column::PrestationId)
            .column_as(demande::Column::Id.count(), "demande_count")
            .group_by(demande::Column::PrestationId)
            .into_tuple::<(i64, i64)>()
            .all(&self.db)
            .await?
            .into_iter()
            .collect();

        let mut prestations: Vec<Prestation> = PrestationEntity::find()
            .filter(prestation::Column::IsActive.eq(true))
            .order_by_asc(prestation::Column::DisplayOrder)
            .all(&self.db)
            .await?
            .into_iter()
            .map(Prestation::from)
            .collect();

        // Stable sort keeps display order among equal counts.
        prestations.sort_by_key(|p| std::cmp::Reverse(counts.get(&p.id).copied().unwrap_or(0)));
        prestations.truncate(limit as usize);
        Ok(prestations)
    }

    async fn count(&self, active_only: bool) -> AppResult<u64> {
        let mut query = PrestationEntity::find();
        if active_only {
            query = query.filter(prestation::Column::IsActive.eq(true));
        }
        Ok(query.count(&self.db).await?)
    }
}
