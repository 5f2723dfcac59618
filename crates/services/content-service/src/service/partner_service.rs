//! Partner directory.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use common::{AppError, AppResult, OptionExt};
use domain::{Partner, PartnerDraft};

use crate::repository::PartnerRepository;

#[async_trait]
pub trait PartnerService: Send + Sync {
    async fn create(&self, draft: PartnerDraft) -> AppResult<Partner>;

    async fn update(&self, id: i64, draft: PartnerDraft) -> AppResult<Partner>;

    async fn delete(&self, id: i64) -> AppResult<()>;

    async fn get(&self, id: i64) -> AppResult<Partner>;

    /// Ordered by name. A blank sector lists every partner.
    async fn list(&self, sector: Option<String>) -> AppResult<Vec<Partner>>;
}

pub struct PartnerManager {
    repo: Arc<dyn PartnerRepository>,
}

impl PartnerManager {
    pub fn new(repo: Arc<dyn PartnerRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl PartnerService for PartnerManager {
    async fn create(&self, draft: PartnerDraft) -> AppResult<Partner> {
        let partner = self.repo.create(draft).await?;
        info!(partner_id = partner.id, "Partner created");
        Ok(partner)
    }

    async fn update(&self, id: i64, draft: PartnerDraft) -> AppResult<Partner> {
        self.get(id).await?;
        self.repo.update(id, draft).await
    }

    async fn delete(&self, id: i64) -> AppResult<()> {
        if !self.repo.delete(id).await? {
            return Err(AppError::NotFound);
        }
        info!(partner_id = id, "Partner deleted");
        Ok(())
    }

    async fn get(&self, id: i64) -> AppResult<Partner> {
        self.repo.find_by_id(id).await?.ok_or_not_found()
    }

    async fn list(&self, sector: Option<String>) -> AppResult<Vec<Partner>> {
        let sector = sector
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());
        self.repo.list(sector).await
    }
}
