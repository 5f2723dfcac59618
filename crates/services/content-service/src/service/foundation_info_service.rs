//! Foundation info blocks: ordered static texts shown on the public site.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tracing::info;

use common::{AppError, AppResult, OptionExt};
use domain::{FoundationInfo, FoundationInfoChanges, FoundationInfoDraft, InfoType};

use crate::repository::FoundationInfoRepository;

#[async_trait]
pub trait FoundationInfoService: Send + Sync {
    /// Create a block; a missing display order goes after the last block of
    /// the same type.
    async fn create(&self, draft: FoundationInfoDraft) -> AppResult<FoundationInfo>;

    async fn update(&self, id: i64, changes: FoundationInfoChanges) -> AppResult<FoundationInfo>;

    async fn set_active(&self, id: i64, active: bool) -> AppResult<FoundationInfo>;

    async fn delete(&self, id: i64) -> AppResult<()>;

    async fn get(&self, id: i64) -> AppResult<FoundationInfo>;

    async fn list_all(&self) -> AppResult<Vec<FoundationInfo>>;

    async fn list_active(&self) -> AppResult<Vec<FoundationInfo>>;

    /// First active block of the type.
    async fn first_of_type(&self, info_type: InfoType) -> AppResult<FoundationInfo>;

    async fn active_of_types(&self, types: Vec<InfoType>) -> AppResult<Vec<FoundationInfo>>;

    /// Give the listed blocks display orders 1..n in list order.
    async fn reorder(&self, ids: Vec<i64>) -> AppResult<()>;
}

pub struct FoundationInfoManager {
    repo: Arc<dyn FoundationInfoRepository>,
}

impl FoundationInfoManager {
    pub fn new(repo: Arc<dyn FoundationInfoRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl FoundationInfoService for FoundationInfoManager {
    async fn create(&self, draft: FoundationInfoDraft) -> AppResult<FoundationInfo> {
        let display_order = match draft.display_order {
            Some(order) => order,
            None => self.repo.max_order(draft.info_type).await?.unwrap_or(0) + 1,
        };

        let now = Utc::now();
        let info = FoundationInfo {
            id: 0,
            title: draft.title,
            content: draft.content,
            info_type: draft.info_type,
            display_order,
            is_active: draft.is_active.unwrap_or(true),
            created_at: now,
            updated_at: now,
        };

        let created = self.repo.create(info).await?;
        info!(info_id = created.id, info_type = %created.info_type, "Foundation info created");
        Ok(created)
    }

    async fn update(&self, id: i64, changes: FoundationInfoChanges) -> AppResult<FoundationInfo> {
        let mut info = self.get(id).await?;
        changes.apply_to(&mut info);
        self.repo.update(info).await
    }

    async fn set_active(&self, id: i64, active: bool) -> AppResult<FoundationInfo> {
        let mut info = self.get(id).await?;
        info.is_active = active;
        self.repo.update(info).await
    }

    async fn delete(&self, id: i64) -> AppResult<()> {
        if !self.repo.delete(id).await? {
            return Err(AppError::NotFound);
        }
        Ok(())
    }

    async fn get(&self, id: i64) -> AppResult<FoundationInfo> {
        self.repo.find_by_id(id).await?.ok_or_not_found()
    }

    async fn list_all(&self) -> AppResult<Vec<FoundationInfo>> {
        self.repo.list_all().await
    }

    async fn list_active(&self) -> AppResult<Vec<FoundationInfo>> {
        self.repo.list_active(None).await
    }

    async fn first_of_type(&self, info_type: InfoType) -> AppResult<FoundationInfo> {
        self.repo
            .list_active(Some(vec![info_type]))
            .await?
            .into_iter()
            .next()
            .ok_or_not_found()
    }

    async fn active_of_types(&self, types: Vec<InfoType>) -> AppResult<Vec<FoundationInfo>> {
        if types.is_empty() {
            return Ok(Vec::new());
        }
        self.repo.list_active(Some(types)).await
    }

    async fn reorder(&self, ids: Vec<i64>) -> AppResult<()> {
        let mut seen = HashSet::with_capacity(ids.len());
        if let Some(dup) = ids.iter().find(|id| !seen.insert(**id)) {
            return Err(AppError::bad_request(format!(
                "Block {} appears more than once",
                dup
            )));
        }

        let count = ids.len();
        self.repo.reorder(ids).await?;
        info!(blocks = count, "Foundation info reordered");
        Ok(())
    }
}
