//! Avis repository implementation.

use async_trait::async_trait;
use sea_orm::sea_query::{Alias, Expr, Func, SimpleExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect,
};

use common::db::contains_ci;
use common::{AppError, AppResult, PageRequest};
use domain::{
    Avis, AvisStatus, AvisType, NEGATIVE_RATING_THRESHOLD, POSITIVE_RATING_THRESHOLD,
};

use super::entities::avis::{self, write_fields, ActiveModel, Entity as AvisEntity};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Which avis a listing returns, newest first. Every variant but `Pending`
/// is limited to approved avis.
#[derive(Debug, Clone, PartialEq)]
pub enum AvisListing {
    Approved,
    /// Waiting for moderation
    Pending,
    ByPrestation(i64),
    ByType(AvisType),
    ByRating(i32),
    Positive,
    Negative,
    /// Matches comment or user name
    Search(String),
    /// Approved with no administrator response yet
    NeedingResponse,
}

/// Aggregates over the avis table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AvisStats {
    pub total: u64,
    /// Mean rating of approved avis, 0 when there are none
    pub average_rating: f64,
    pub positive: u64,
    pub negative: u64,
}

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait AvisRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Avis>>;

    async fn create(&self, avis: Avis) -> AppResult<Avis>;

    async fn update(&self, avis: Avis) -> AppResult<Avis>;

    /// Returns false when no row matched.
    async fn delete(&self, id: i64) -> AppResult<bool>;

    async fn exists_for_prestation(&self, user_id: i64, prestation_id: i64) -> AppResult<bool>;

    async fn exists_for_demande(&self, user_id: i64, demande_id: i64) -> AppResult<bool>;

    /// Every avis written by the user, newest first.
    async fn by_user(&self, user_id: i64) -> AppResult<Vec<Avis>>;

    /// Approved and featured avis, newest first.
    async fn featured(&self) -> AppResult<Vec<Avis>>;

    async fn list(&self, listing: AvisListing, page: PageRequest) -> AppResult<(Vec<Avis>, u64)>;

    /// Mean rating of approved avis, for one prestation or overall.
    async fn average_rating(&self, prestation_id: Option<i64>) -> AppResult<Option<f64>>;

    async fn stats(&self) -> AppResult<AvisStats>;
}

/// SeaORM implementation of AvisRepository
pub struct AvisStore {
    db: DatabaseConnection,
}

impl AvisStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn count_approved(&self, condition: Condition) -> AppResult<u64> {
        let count = AvisEntity::find()
            .filter(approved().add(condition))
            .count(&self.db)
            .await?;
        Ok(count)
    }
}

fn approved() -> Condition {
    Condition::all().add(avis::Column::IsApproved.eq(true))
}

fn listing_condition(listing: AvisListing) -> Condition {
    match listing {
        AvisListing::Approved => approved(),
        AvisListing::Pending => {
            Condition::all().add(avis::Column::Status.eq(AvisStatus::Pending.as_str()))
        }
        AvisListing::ByPrestation(prestation_id) => {
            approved().add(avis::Column::PrestationId.eq(prestation_id))
        }
        AvisListing::ByType(avis_type) => approved().add(avis::Column::AvisType.eq(avis_type.as_str())),
        AvisListing::ByRating(rating) => approved().add(avis::Column::Rating.eq(rating)),
        AvisListing::Positive => approved().add(avis::Column::Rating.gte(POSITIVE_RATING_THRESHOLD)),
        AvisListing::Negative => approved().add(avis::Column::Rating.lte(NEGATIVE_RATING_THRESHOLD)),
        AvisListing::Search(keyword) => approved().add(
            Condition::any()
                .add(contains_ci(avis::Column::Comment, &keyword))
                .add(contains_ci(avis::Column::UserName, &keyword)),
        ),
        AvisListing::NeedingResponse => approved().add(avis::Column::AdminResponse.is_null()),
    }
}

/// `CAST(AVG(rating) AS float8)`; Postgres averages integers as numeric.
fn average_rating_expr() -> SimpleExpr {
    Func::cast_as(Func::avg(Expr::col(avis::Column::Rating)), Alias::new("float8")).into()
}

#[async_trait]
impl AvisRepository for AvisStore {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Avis>> {
        let result = AvisEntity::find_by_id(id).one(&self.db).await?;
        Ok(result.map(Avis::from))
    }

    async fn create(&self, avis: Avis) -> AppResult<Avis> {
        let mut active = <ActiveModel as sea_orm::ActiveModelTrait>::default();
        write_fields(&mut active, avis);
        let model = active.insert(&self.db).await?;
        Ok(Avis::from(model))
    }

    async fn update(&self, avis: Avis) -> AppResult<Avis> {
        let existing = AvisEntity::find_by_id(avis.id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: ActiveModel = existing.into();
        write_fields(&mut active, avis);
        let model = active.update(&self.db).await?;
        Ok(Avis::from(model))
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        let result = AvisEntity::delete_by_id(id).exec(&self.db).await?;
        Ok(result.rows_affected > 0)
    }

    async fn exists_for_prestation(&self, user_id: i64, prestation_id: i64) -> AppResult<bool> {
        let count = AvisEntity::find()
            .filter(avis::Column::UserId.eq(user_id))
            .filter(avis::Column::PrestationId.eq(prestation_id))
            .count(&self.db)
            .await?;
        Ok(count > 0)
    }

    async fn exists_for_demande(&self, user_id: i64, demande_id: i64) -> AppResult<bool> {
        let count = AvisEntity::find()
            .filter(avis::Column::UserId.eq(user_id))
            .filter(avis::Column::DemandeId.eq(demande_id))
            .count(&self.db)
            .await?;
        Ok(count > 0)
    }

    async fn by_user(&self, user_id: i64) -> AppResult<Vec<Avis>> {
        let models = AvisEntity::find()
            .filter(avis::Column::UserId.eq(user_id))
            .order_by_desc(avis::Column::CreatedAt)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(Avis::from).collect())
    }

    async fn featured(&self) -> AppResult<Vec<Avis>> {
        let models = AvisEntity::find()
            .filter(approved().add(avis::Column::IsFeatured.eq(true)))
            .order_by_desc(avis::Column::CreatedAt)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(Avis::from).collect())
    }

    async fn list(&self, listing: AvisListing, page: PageRequest) -> AppResult<(Vec<Avis>, u64)> {
        let paginator = AvisEntity::find()
            .filter(listing_condition(listing))
            .order_by_desc(avis::Column::CreatedAt)
            .paginate(&self.db, page.size);
        let total = paginator.num_items().await?;
        let models = paginator.fetch_page(page.index()).await?;

        Ok((models.into_iter().map(Avis::from).collect(), total))
    }

    async fn average_rating(&self, prestation_id: Option<i64>) -> AppResult<Option<f64>> {
        let mut condition = approved();
        if let Some(prestation_id) = prestation_id {
            condition = condition.add(avis::Column::PrestationId.eq(prestation_id));
        }

        let average: Option<Option<f64>> = AvisEntity::find()
            .select_only()
            .column_as(average_rating_expr(), "average_rating")
            .filter(condition)
            .into_tuple()
            .one(&self.db)
            .await?;
        Ok(average.flatten())
    }

    async fn stats(&self) -> AppResult<AvisStats> {
        Ok(AvisStats {
            total: AvisEntity::find().count(&self.db).await?,
            average_rating: self.average_rating(None).await?.unwrap_or(0.0),
            positive: self
                .count_approved(
                    Condition::all().add(avis::Column::Rating.gte(POSITIVE_RATING_THRESHOLD)),
                )
                .await?,
            negative: self
                .count_approved(
                    Condition::all().add(avis::Column::Rating.lte(NEGATIVE_RATING_THRESHOLD)),
                )
                .await?,
        })
    }
}
