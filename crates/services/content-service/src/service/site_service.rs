//! Home page texts.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tracing::info;

use common::AppResult;
use domain::{HomeContent, SiteInfo, SiteStats, DEFAULT_MINISTRY_CONTENT, DEFAULT_MISSION};

use crate::repository::SiteInfoRepository;

/// Administrator edit of the home page; absent fields are kept.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SiteUpdate {
    pub mission: Option<String>,
    pub stats: Option<SiteStats>,
    pub ministry_content: Option<String>,
}

#[async_trait]
pub trait SiteService: Send + Sync {
    async fn home(&self) -> AppResult<HomeContent>;

    async fn site_info(&self) -> AppResult<SiteInfo>;

    async fn update(&self, update: SiteUpdate) -> AppResult<SiteInfo>;
}

pub struct SiteManager {
    repo: Arc<dyn SiteInfoRepository>,
}

impl SiteManager {
    pub fn new(repo: Arc<dyn SiteInfoRepository>) -> Self {
        Self { repo }
    }

    /// The stored row, created with default texts when the table is empty.
    async fn current(&self) -> AppResult<SiteInfo> {
        if let Some(info) = self.repo.first().await? {
            return Ok(info);
        }

        info!("Seeding default site info");
        self.repo
            .create(SiteInfo {
                id: 0,
                mission: DEFAULT_MISSION.to_string(),
                stats: SiteStats::default(),
                ministry_content: DEFAULT_MINISTRY_CONTENT.to_string(),
                updated_at: Utc::now(),
            })
            .await
    }
}

#[async_trait]
impl SiteService for SiteManager {
    async fn home(&self) -> AppResult<HomeContent> {
        Ok(self.current().await?.into())
    }

    async fn site_info(&self) -> AppResult<SiteInfo> {
        self.current().await
    }

    async fn update(&self, update: SiteUpdate) -> AppResult<SiteInfo> {
        let mut info = self.current().await?;
        if let Some(mission) = update.mission {
            info.mission = mission;
        }
        if let Some(stats) = update.stats {
            info.stats = stats;
        }
        if let Some(ministry) = update.ministry_content {
            info.ministry_content = ministry;
        }
        info.updated_at = Utc::now();
        self.repo.update(info).await
    }
}
