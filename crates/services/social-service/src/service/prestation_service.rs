//! Prestation service - catalog administration and public browsing.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tracing::info;

use common::{AppError, AppResult, OptionExt};
use domain::{Prestation, PrestationCategory, PrestationChanges, PrestationDraft, PrestationType};

use crate::repository::{PrestationFilter, PrestationRepository};

/// Size of the "most requested" list.
pub const MOST_REQUESTED_LIMIT: u64 = 5;

#[async_trait]
pub trait PrestationService: Send + Sync {
    async fn create(&self, draft: PrestationDraft) -> AppResult<Prestation>;

    /// Apply only the provided fields.
    async fn update(&self, id: i64, changes: PrestationChanges) -> AppResult<Prestation>;

    async fn set_active(&self, id: i64, active: bool) -> AppResult<Prestation>;

    /// Give each listed prestation its 1-based position as display order.
    async fn reorder(&self, ids: Vec<i64>) -> AppResult<()>;

    async fn delete(&self, id: i64) -> AppResult<()>;

    /// Any state, for the back office.
    async fn get(&self, id: i64) -> AppResult<Prestation>;

    async fn list_all(&self) -> AppResult<Vec<Prestation>>;

    async fn get_active(&self, id: i64) -> AppResult<Prestation>;

    /// Active catalog, optionally narrowed by category and a title or description search.
    async fn list_active(
        &self,
        category: Option<PrestationCategory>,
        search: Option<String>,
    ) -> AppResult<Vec<Prestation>>;

    async fn by_category(&self, category: PrestationCategory) -> AppResult<Vec<Prestation>>;

    async fn by_type(&self, prestation_type: PrestationType) -> AppResult<Vec<Prestation>>;

    async fn search(&self, keyword: String) -> AppResult<Vec<Prestation>>;

    async fn most_requested(&self) -> AppResult<Vec<Prestation>>;
}

pub struct PrestationManager {
    repo: Arc<dyn PrestationRepository>,
}

impl PrestationManager {
    pub fn new(repo: Arc<dyn PrestationRepository>) -> Self {
        Self { repo }
    }

    async fn find(&self, id: i64) -> AppResult<Prestation> {
        self.repo.find_by_id(id).await?.ok_or_not_found()
    }

    async fn active(&self, filter: PrestationFilter) -> AppResult<Vec<Prestation>> {
        self.repo
            .list(PrestationFilter {
                active_only: true,
                ..filter
            })
            .await
    }
}

#[async_trait]
impl PrestationService for PrestationManager {
    async fn create(&self, draft: PrestationDraft) -> AppResult<Prestation> {
        draft.validate()?;

        let display_order = match draft.display_order {
            Some(order) => order,
            None => self.repo.max_order().await?.map_or(1, |max| max + 1),
        };

        let now = Utc::now();
        let prestation = Prestation {
            id: 0,
            title: draft.title,
            short_description: draft.short_description,
            description: draft.description,
            prestation_type: draft.prestation_type,
            category: draft.category,
            min_amount: draft.min_amount,
            max_amount: draft.max_amount,
            duration_label: draft.duration_label,
            conditions: draft.conditions,
            is_active: draft.is_active,
            requires_documents: draft.requires_documents,
            required_documents: draft.required_documents,
            eligibility_criteria: draft.eligibility_criteria,
            processing_time_days: draft.processing_time_days,
            max_requests_per_year: draft.max_requests_per_year,
            image_url: draft.image_url,
            display_order,
            created_at: now,
            updated_at: now,
        };

        let created = self.repo.create(prestation).await?;
        info!(prestation_id = created.id, "Prestation created");
        Ok(created)
    }

    async fn update(&self, id: i64, changes: PrestationChanges) -> AppResult<Prestation> {
        let mut prestation = self.find(id).await?;
        changes.apply_to(&mut prestation)?;
        prestation.updated_at = Utc::now();
        self.repo.update(prestation).await
    }

    async fn set_active(&self, id: i64, active: bool) -> AppResult<Prestation> {
        let mut prestation = self.find(id).await?;
        prestation.is_active = active;
        prestation.updated_at = Utc::now();
        let prestation = self.repo.update(prestation).await?;
        info!(prestation_id = id, active, "Prestation availability changed");
        Ok(prestation)
    }

    async fn reorder(&self, ids: Vec<i64>) -> AppResult<()> {
        let mut seen = HashSet::new();
        if let Some(duplicate) = ids.iter().find(|id| !seen.insert(**id)) {
            return Err(AppError::bad_request(format!(
                "Prestation {} appears more than once",
                duplicate
            )));
        }
        self.repo.reorder(ids).await
    }

    async fn delete(&self, id: i64) -> AppResult<()> {
        if self.repo.demande_count(id).await? > 0 {
            return Err(AppError::conflict(
                "Prestation has demandes and cannot be deleted, deactivate it instead",
            ));
        }
        if !self.repo.delete(id).await? {
            return Err(AppError::NotFound);
        }
        info!(prestation_id = id, "Prestation deleted");
        Ok(())
    }

    async fn get(&self, id: i64) -> AppResult<Prestation> {
        self.find(id).await
    }

    async fn list_all(&self) -> AppResult<Vec<Prestation>> {
        self.repo.list(PrestationFilter::default()).await
    }

    async fn get_active(&self, id: i64) -> AppResult<Prestation> {
        self.repo
            .find_by_id(id)
            .await?
            .filter(|p| p.is_active)
            .ok_or(AppError::NotFound)
    }

    async fn list_active(
        &self,
        category: Option<PrestationCategory>,
        search: Option<String>,
    ) -> AppResult<Vec<Prestation>> {
        self.active(PrestationFilter {
            category,
            search,
            ..Default::default()
        })
        .await
    }

    async fn by_category(&self, category: PrestationCategory) -> AppResult<Vec<Prestation>> {
        self.active(PrestationFilter {
            category: Some(category),
            ..Default::default()
        })
        .await
    }

    async fn by_type(&self, prestation_type: PrestationType) -> AppResult<Vec<Prestation>> {
        self.active(PrestationFilter {
            prestation_type: Some(prestation_type),
            ..Default::default()
        })
        .await
    }

    async fn search(&self, keyword: String) -> AppResult<Vec<Prestation>> {
        if keyword.trim().is_empty() {
            return Err(AppError::validation("Search keyword is required"));
        }
        self.active(PrestationFilter {
            keyword: Some(keyword),
            ..Default::default()
        })
        .await
    }

    async fn most_requested(&self) -> AppResult<Vec<Prestation>> {
        self.repo.most_requested(MOST_REQUESTED_LIMIT).await
    }
}
