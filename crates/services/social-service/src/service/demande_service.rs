//! Demande service - filing, submission and back-office processing of aid requests.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use rust_decimal::Decimal;
use tracing::info;

use common::{AppError, AppResult, CurrentUser, OptionExt, PageRequest, PageResponse};
use domain::{Demande, DemandeDraft, DemandeStatus, Prestation, PriorityLevel, StatusChange};

use crate::repository::{DemandeListing, DemandeRepository, PrestationRepository};

/// Window of the "due soon" listing when none is given.
pub const DEFAULT_DUE_SOON_DAYS: i64 = 7;

/// Widest accepted "due soon" window.
pub const MAX_DUE_SOON_DAYS: i64 = 365;

/// Shown when the prestation of a demande no longer exists.
pub const UNKNOWN_PRESTATION_TITLE: &str = "Unknown";

/// Owner edits to a draft demande. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DraftUpdate {
    pub requested_amount: Option<Decimal>,
    pub justification: Option<String>,
    pub documents: Option<Vec<String>>,
}

/// Back-office listing filter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DemandeFilter {
    pub status: Option<DemandeStatus>,
    pub email: Option<String>,
    pub prestation_id: Option<i64>,
}

#[async_trait]
pub trait DemandeService: Send + Sync {
    /// File a demande as a draft, submitting it right away when `submit` is set.
    async fn create(&self, user: &CurrentUser, draft: DemandeDraft, submit: bool)
        -> AppResult<Demande>;

    async fn update_draft(&self, id: i64, user: &CurrentUser, update: DraftUpdate)
        -> AppResult<Demande>;

    async fn submit(&self, id: i64, user: &CurrentUser) -> AppResult<Demande>;

    async fn cancel(&self, id: i64, user: &CurrentUser) -> AppResult<Demande>;

    async fn my_demandes(
        &self,
        user: &CurrentUser,
        status: Option<DemandeStatus>,
        page: PageRequest,
    ) -> AppResult<PageResponse<Demande>>;

    /// Visible to its owner and to administrators.
    async fn get(&self, id: i64, user: &CurrentUser) -> AppResult<Demande>;

    async fn list(&self, filter: DemandeFilter, page: PageRequest) -> AppResult<PageResponse<Demande>>;

    async fn pending(&self, page: PageRequest) -> AppResult<PageResponse<Demande>>;

    async fn by_prestation(&self, prestation_id: i64, page: PageRequest)
        -> AppResult<PageResponse<Demande>>;

    async fn search(&self, keyword: String, page: PageRequest) -> AppResult<PageResponse<Demande>>;

    async fn overdue(&self, page: PageRequest) -> AppResult<PageResponse<Demande>>;

    /// Pending demandes expected within `days` (defaults to a week).
    async fn due_soon(&self, days: Option<i64>, page: PageRequest)
        -> AppResult<PageResponse<Demande>>;

    async fn update_status(&self, id: i64, change: StatusChange, admin: &CurrentUser)
        -> AppResult<Demande>;

    async fn set_priority(&self, id: i64, priority: PriorityLevel) -> AppResult<Demande>;

    async fn delete(&self, id: i64) -> AppResult<()>;
}

pub struct DemandeManager {
    repo: Arc<dyn DemandeRepository>,
    prestations: Arc<dyn PrestationRepository>,
}

impl DemandeManager {
    pub fn new(repo: Arc<dyn DemandeRepository>, prestations: Arc<dyn PrestationRepository>) -> Self {
        Self { repo, prestations }
    }

    async fn find(&self, id: i64) -> AppResult<Demande> {
        self.repo.find_by_id(id).await?.ok_or_not_found()
    }

    async fn prestation(&self, id: i64) -> AppResult<Prestation> {
        self.prestations
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::bad_request("Prestation not found"))
    }

    async fn paged(&self, listing: DemandeListing, page: PageRequest) -> AppResult<PageResponse<Demande>> {
        let (items, total) = self.repo.list(listing, page).await?;
        Ok(PageResponse::new(items, page, total))
    }

    async fn check_quota(&self, user_id: i64, prestation: &Prestation, now: DateTime<Utc>) -> AppResult<()> {
        if prestation.max_requests_per_year.is_none() {
            return Ok(());
        }
        let count = self
            .repo
            .count_since(user_id, prestation.id, start_of_year(now)?)
            .await?;
        if prestation.yearly_quota_reached(count) {
            return Err(AppError::bad_request(
                "Maximum number of requests per year exceeded for this prestation",
            ));
        }
        Ok(())
    }
}

/// Midnight UTC on January 1st of `now`'s year.
fn start_of_year(now: DateTime<Utc>) -> AppResult<DateTime<Utc>> {
    NaiveDate::from_ymd_opt(now.year(), 1, 1)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|start| start.and_utc())
        .ok_or_else(|| AppError::internal("Invalid calendar year"))
}

fn check_justification(justification: &str) -> AppResult<()> {
    if justification.trim().is_empty() {
        return Err(AppError::validation("Justification is required"));
    }
    Ok(())
}

#[async_trait]
impl DemandeService for DemandeManager {
    async fn create(
        &self,
        user: &CurrentUser,
        draft: DemandeDraft,
        submit: bool,
    ) -> AppResult<Demande> {
        let prestation = self.prestation(draft.prestation_id).await?;
        if !prestation.is_active {
            return Err(AppError::bad_request("This prestation is not available"));
        }
        check_justification(&draft.justification)?;

        let now = Utc::now();
        self.check_quota(user.id, &prestation, now).await?;
        if let Some(amount) = draft.requested_amount {
            prestation.check_amount(amount)?;
        }

        let applicant = user.as_applicant();
        let mut demande = Demande {
            id: 0,
            user_id: applicant.user_id,
            user_email: applicant.email,
            user_name: applicant.name,
            employee_id: applicant.employee_id,
            prestation_id: prestation.id,
            prestation_title: Some(prestation.title.clone()),
            status: DemandeStatus::Draft,
            requested_amount: draft.requested_amount,
            approved_amount: None,
            justification: draft.justification,
            rejection_reason: None,
            documents_uploaded: draft.documents,
            priority_level: draft.priority_level.unwrap_or_default(),
            submitted_at: None,
            processed_at: None,
            processed_by: None,
            processed_by_name: None,
            expected_processing_date: None,
            payment_reference: None,
            payment_date: None,
            admin_comment: None,
            created_at: now,
            updated_at: now,
        };

        if submit {
            demande.submit(user.id, &prestation, now)?;
        }

        let created = self.repo.create(demande).await?;
        info!(
            demande_id = created.id,
            user_id = user.id,
            status = %created.status,
            "Demande created"
        );
        Ok(created)
    }

    async fn update_draft(
        &self,
        id: i64,
        user: &CurrentUser,
        update: DraftUpdate,
    ) -> AppResult<Demande> {
        let mut demande = self.find(id).await?;
        if !demande.is_owned_by(user.id) {
            return Err(AppError::forbidden("You can only update your own demandes"));
        }
        if demande.status != DemandeStatus::Draft {
            return Err(AppError::conflict("Only draft demandes can be updated"));
        }

        if let Some(amount) = update.requested_amount {
            self.prestation(demande.prestation_id)
                .await?
                .check_amount(amount)?;
            demande.requested_amount = Some(amount);
        }
        if let Some(justification) = update.justification {
            check_justification(&justification)?;
            demande.justification = justification;
        }
        if let Some(documents) = update.documents {
            demande.documents_uploaded = documents;
        }

        demande.updated_at = Utc::now();
        self.repo.update(demande).await
    }

    async fn submit(&self, id: i64, user: &CurrentUser) -> AppResult<Demande> {
        let mut demande = self.find(id).await?;
        let prestation = self.prestation(demande.prestation_id).await?;
        demande.submit(user.id, &prestation, Utc::now())?;

        let demande = self.repo.update(demande).await?;
        info!(demande_id = id, "Demande submitted");
        Ok(demande)
    }

    async fn cancel(&self, id: i64, user: &CurrentUser) -> AppResult<Demande> {
        let mut demande = self.find(id).await?;
        demande.cancel(user.id, Utc::now())?;

        let demande = self.repo.update(demande).await?;
        info!(demande_id = id, "Demande cancelled by owner");
        Ok(demande)
    }

    async fn my_demandes(
        &self,
        user: &CurrentUser,
        status: Option<DemandeStatus>,
        page: PageRequest,
    ) -> AppResult<PageResponse<Demande>> {
        let listing = DemandeListing::Mine {
            user_id: user.id,
            status,
        };
        self.paged(listing, page).await
    }

    async fn get(&self, id: i64, user: &CurrentUser) -> AppResult<Demande> {
        let mut demande = self.find(id).await?;
        if !demande.is_owned_by(user.id) && !user.is_admin() {
            return Err(AppError::forbidden("Access denied"));
        }

        if demande.prestation_title.is_none() {
            let title = self
                .prestations
                .find_by_id(demande.prestation_id)
                .await?
                .map(|p| p.title)
                .unwrap_or_else(|| UNKNOWN_PRESTATION_TITLE.to_string());
            demande.prestation_title = Some(title);
        }
        Ok(demande)
    }

    async fn list(&self, filter: DemandeFilter, page: PageRequest) -> AppResult<PageResponse<Demande>> {
        let listing = DemandeListing::Filtered {
            status: filter.status,
            email: filter.email,
            prestation_id: filter.prestation_id,
        };
        self.paged(listing, page).await
    }

    async fn pending(&self, page: PageRequest) -> AppResult<PageResponse<Demande>> {
        self.paged(DemandeListing::Pending, page).await
    }

    async fn by_prestation(
        &self,
        prestation_id: i64,
        page: PageRequest,
    ) -> AppResult<PageResponse<Demande>> {
        self.paged(DemandeListing::ByPrestation(prestation_id), page)
            .await
    }

    async fn search(&self, keyword: String, page: PageRequest) -> AppResult<PageResponse<Demande>> {
        if keyword.trim().is_empty() {
            return Err(AppError::validation("Search keyword is required"));
        }
        self.paged(DemandeListing::Search(keyword), page).await
    }

    async fn overdue(&self, page: PageRequest) -> AppResult<PageResponse<Demande>> {
        self.paged(DemandeListing::Overdue { now: Utc::now() }, page)
            .await
    }

    async fn due_soon(
        &self,
        days: Option<i64>,
        page: PageRequest,
    ) -> AppResult<PageResponse<Demande>> {
        let days = days.unwrap_or(DEFAULT_DUE_SOON_DAYS);
        if !(0..=MAX_DUE_SOON_DAYS).contains(&days) {
            return Err(AppError::validation(format!(
                "Days must be between 0 and {}",
                MAX_DUE_SOON_DAYS
            )));
        }
        let now = Utc::now();
        let until = Duration::try_days(days)
            .and_then(|window| now.checked_add_signed(window))
            .ok_or_else(|| AppError::validation("Days is out of range"))?;
        let listing = DemandeListing::DueBetween { now, until };
        self.paged(listing, page).await
    }

    async fn update_status(
        &self,
        id: i64,
        change: StatusChange,
        admin: &CurrentUser,
    ) -> AppResult<Demande> {
        let mut demande = self.find(id).await?;
        let from = demande.status;
        demande.apply_status_change(change, &admin.as_actor(), Utc::now())?;

        let demande = self.repo.update(demande).await?;
        info!(
            demande_id = id,
            from = %from,
            to = %demande.status,
            admin_id = admin.id,
            "Demande status changed"
        );
        Ok(demande)
    }

    async fn set_priority(&self, id: i64, priority: PriorityLevel) -> AppResult<Demande> {
        let mut demande = self.find(id).await?;
        demande.priority_level = priority;
        demande.updated_at = Utc::now();
        self.repo.update(demande).await
    }

    async fn delete(&self, id: i64) -> AppResult<()> {
        if !self.repo.delete(id).await? {
            return Err(AppError::NotFound);
        }
        info!(demande_id = id, "Demande deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_start_of_year() {
        let now = Utc.with_ymd_and_hms(2024, 8, 15, 13, 45, 0).unwrap();
        let start = start_of_year(now).unwrap();
        assert_eq!(start, Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
    }
}
