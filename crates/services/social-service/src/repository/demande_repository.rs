//! Demande repository implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Select,
};

use common::db::contains_ci;
use common::{AppError, AppResult, PageRequest};
use domain::{Demande, DemandeStatus};

use super::entities::demande::{self, write_fields, ActiveModel, Entity as DemandeEntity};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Which demandes a listing returns.
#[derive(Debug, Clone, PartialEq)]
pub enum DemandeListing {
    /// Demandes filed by one user, newest first
    Mine {
        user_id: i64,
        status: Option<DemandeStatus>,
    },
    /// Back-office listing, newest first
    Filtered {
        status: Option<DemandeStatus>,
        email: Option<String>,
        prestation_id: Option<i64>,
    },
    /// Submitted or in review, oldest submission first
    Pending,
    ByPrestation(i64),
    /// Matches user name, email or justification
    Search(String),
    /// Pending with an expected processing date before `now`
    Overdue { now: DateTime<Utc> },
    /// Pending with an expected processing date in `[now, until]`
    DueBetween {
        now: DateTime<Utc>,
        until: DateTime<Utc>,
    },
}

/// Aggregates over every demande.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DemandeStats {
    pub total: u64,
    pub pending: u64,
    pub approved: u64,
    pub rejected: u64,
    pub paid: u64,
    pub total_requested_amount: Decimal,
    /// Approved amounts of approved and paid demandes
    pub total_approved_amount: Decimal,
    pub total_paid_amount: Decimal,
    /// Mean whole days from submission to decision, 0 when nothing was processed
    pub average_processing_days: f64,
}

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait DemandeRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Demande>>;

    async fn create(&self, demande: Demande) -> AppResult<Demande>;

    async fn update(&self, demande: Demande) -> AppResult<Demande>;

    /// Returns false when no row matched.
    async fn delete(&self, id: i64) -> AppResult<bool>;

    /// Non-cancelled demandes of a user for a prestation created at or after `since`.
    async fn count_since(
        &self,
        user_id: i64,
        prestation_id: i64,
        since: DateTime<Utc>,
    ) -> AppResult<u64>;

    async fn list(&self, listing: DemandeListing, page: PageRequest)
        -> AppResult<(Vec<Demande>, u64)>;

    async fn stats(&self) -> AppResult<DemandeStats>;
}

/// SeaORM implementation of DemandeRepository
pub struct DemandeStore {
    db: DatabaseConnection,
}

impl DemandeStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn sum_where(
        &self,
        column: demande::Column,
        statuses: &[DemandeStatus],
    ) -> AppResult<Decimal> {
        let mut query = DemandeEntity::find()
            .select_only()
            .column_as(column.sum(), "total");
        if !statuses.is_empty() {
            query = query.filter(demande::Column::Status.is_in(statuses.iter().map(|s| s.as_str())));
        }
        let total: Option<Option<Decimal>> = query.into_tuple().one(&self.db).await?;
        Ok(total.flatten().unwrap_or(Decimal::ZERO))
    }
}

fn pending() -> Condition {
    Condition::all().add(demande::Column::Status.is_in([
        DemandeStatus::Submitted.as_str(),
        DemandeStatus::InReview.as_str(),
    ]))
}

fn listing_query(listing: DemandeListing) -> Select<DemandeEntity> {
    let newest_first = |query: Select<DemandeEntity>| query.order_by_desc(demande::Column::CreatedAt);

    match listing {
        DemandeListing::Mine { user_id, status } => {
            let mut query = DemandeEntity::find().filter(demande::Column::UserId.eq(user_id));
            if let Some(status) = status {
                query = query.filter(demande::Column::Status.eq(status.as_str()));
            }
            newest_first(query)
        }
        DemandeListing::Filtered {
            status,
            email,
            prestation_id,
        } => {
            let mut query = DemandeEntity::find();
            if let Some(status) = status {
                query = query.filter(demande::Column::Status.eq(status.as_str()));
            }
            if let Some(email) = email.as_deref().filter(|e| !e.trim().is_empty()) {
                query = query.filter(contains_ci(demande::Column::UserEmail, email));
            }
            if let Some(prestation_id) = prestation_id {
                query = query.filter(demande::Column::PrestationId.eq(prestation_id));
            }
            newest_first(query)
        }
        DemandeListing::Pending => DemandeEntity::find()
            .filter(pending())
            .order_by_asc(demande::Column::SubmittedAt),
        DemandeListing::ByPrestation(prestation_id) => newest_first(
            DemandeEntity::find().filter(demande::Column::PrestationId.eq(prestation_id)),
        ),
        DemandeListing::Search(keyword) => newest_first(
            DemandeEntity::find().filter(
                Condition::any()
                    .add(contains_ci(demande::Column::UserName, &keyword))
                    .add(contains_ci(demande::Column::UserEmail, &keyword))
                    .add(contains_ci(demande::Column::Justification, &keyword)),
            ),
        ),
        DemandeListing::Overdue { now } => DemandeEntity::find()
            .filter(pending().add(demande::Column::ExpectedProcessingDate.lt(now)))
            .order_by_asc(demande::Column::ExpectedProcessingDate),
        DemandeListing::DueBetween { now, until } => DemandeEntity::find()
            .filter(
                pending().add(demande::Column::ExpectedProcessingDate.between(now, until)),
            )
            .order_by_asc(demande::Column::ExpectedProcessingDate),
    }
}

#[async_trait]
impl DemandeRepository for DemandeStore {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Demande>> {
        let result = DemandeEntity::find_by_id(id).one(&self.db).await?;
        Ok(result.map(Demande::from))
    }

    async fn create(&self, demande: Demande) -> AppResult<Demande> {
        let mut active = <ActiveModel as sea_orm::ActiveModelTrait>::default();
        write_fields(&mut active, demande);
        let model = active.insert(&self.db).await?;
        Ok(Demande::from(model))
    }

    async fn update(&self, demande: Demande) -> AppResult<Demande> {
        let existing = DemandeEntity::find_by_id(demande.id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: ActiveModel = existing.into();
        write_fields(&mut active, demande);
        let model = active.update(&self.db).await?;
        Ok(Demande::from(model))
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        let result = DemandeEntity::delete_by_id(id).exec(&self.db).await?;
        Ok(result.rows_affected > 0)
    }

    async fn count_since(
        &self,
        user_id: i64,
        prestation_id: i64,
        since: DateTime<Utc>,
    ) -> AppResult<u64> {
        let count = DemandeEntity::find()
            .filter(demande::Column::UserId.eq(user_id))
            .filter(demande::Column::PrestationId.eq(prestation_id))
            .filter(demande::Column::Status.ne(DemandeStatus::Cancelled.as_str()))
            .filter(demande::Column::CreatedAt.gte(since))
            .count(&self.db)
            .await?;
        Ok(count)
    }

    async fn list(
        &self,
        listing: DemandeListing,
        page: PageRequest,
    ) -> AppResult<(Vec<Demande>, u64)> {
        let paginator = listing_query(listing).paginate(&self.db, page.size);
        let total = paginator.num_items().await?;
        let models = paginator.fetch_page(page.index()).await?;

        Ok((models.into_iter().map(Demande::from).collect(), total))
    }

    async fn stats(&self) -> AppResult<DemandeStats> {
        let by_status: Vec<(String, i64)> = DemandeEntity::find()
            .select_only()
            .column(demande::Column::Status)
            .column_as(demande::Column::Id.count(), "total")
            .group_by(demande::Column::Status)
            .into_tuple()
            .all(&self.db)
            .await?;

        let mut stats = DemandeStats::default();
        for (code, count) in by_status {
            let count = count.max(0) as u64;
            stats.total += count;
            match code.parse::<DemandeStatus>() {
                Ok(status) if status.is_pending() => stats.pending += count,
                Ok(DemandeStatus::Approved) => stats.approved += count,
                Ok(DemandeStatus::Rejected) => stats.rejected += count,
                Ok(DemandeStatus::Paid) => stats.paid += count,
                _ => {}
            }
        }

        stats.total_requested_amount = self.sum_where(demande::Column::RequestedAmount, &[]).await?;
        stats.total_approved_amount = self
            .sum_where(
                demande::Column::ApprovedAmount,
                &[DemandeStatus::Approved, DemandeStatus::Paid],
            )
            .await?;
        stats.total_paid_amount = self
            .sum_where(demande::Column::ApprovedAmount, &[DemandeStatus::Paid])
            .await?;

        let processed: Vec<(DateTime<Utc>, DateTime<Utc>)> = DemandeEntity::find()
            .select_only()
            .column(demande::Column::SubmittedAt)
            .column(demande::Column::ProcessedAt)
            .filter(demande::Column::SubmittedAt.is_not_null())
            .filter(demande::Column::ProcessedAt.is_not_null())
            .into_tuple()
            .all(&self.db)
            .await?;
        stats.average_processing_days = average_days(&processed);

        Ok(stats)
    }
}

fn average_days(spans: &[(DateTime<Utc>, DateTime<Utc>)]) -> f64 {
    if spans.is_empty() {
        return 0.0;
    }
    let total: i64 = spans
        .iter()
        .map(|(submitted, processed)| (*processed - *submitted).num_days())
        .sum();
    total as f64 / spans.len() as f64
}
