//! Avis service - reviews of prestations and their moderation.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tracing::info;

use common::{AppError, AppResult, CurrentUser, OptionExt, PageRequest, PageResponse};
use domain::{validate_rating, Avis, AvisDraft, AvisStatus, AvisType};

use crate::repository::{AvisListing, AvisRepository, DemandeRepository, PrestationRepository};

#[async_trait]
pub trait AvisService: Send + Sync {
    async fn create(&self, user: &CurrentUser, draft: AvisDraft) -> AppResult<Avis>;

    async fn my_avis(&self, user: &CurrentUser) -> AppResult<Vec<Avis>>;

    async fn approved(&self, page: PageRequest) -> AppResult<PageResponse<Avis>>;

    async fn featured(&self) -> AppResult<Vec<Avis>>;

    async fn by_prestation(&self, prestation_id: i64, page: PageRequest)
        -> AppResult<PageResponse<Avis>>;

    /// Mean approved rating, overall or for one prestation. 0.0 when there is none.
    async fn average_rating(&self, prestation_id: Option<i64>) -> AppResult<f64>;

    async fn pending(&self, page: PageRequest) -> AppResult<PageResponse<Avis>>;

    async fn approve(&self, id: i64, admin: &CurrentUser) -> AppResult<Avis>;

    async fn reject(&self, id: i64, response: Option<String>) -> AppResult<Avis>;

    async fn respond(&self, id: i64, response: String) -> AppResult<Avis>;

    async fn toggle_featured(&self, id: i64) -> AppResult<Avis>;

    async fn by_type(&self, avis_type: AvisType, page: PageRequest) -> AppResult<PageResponse<Avis>>;

    async fn by_rating(&self, rating: i32, page: PageRequest) -> AppResult<PageResponse<Avis>>;

    async fn positive(&self, page: PageRequest) -> AppResult<PageResponse<Avis>>;

    async fn negative(&self, page: PageRequest) -> AppResult<PageResponse<Avis>>;

    async fn search(&self, keyword: String, page: PageRequest) -> AppResult<PageResponse<Avis>>;

    async fn needing_response(&self, page: PageRequest) -> AppResult<PageResponse<Avis>>;

    async fn delete(&self, id: i64) -> AppResult<()>;
}

pub struct AvisManager {
    repo: Arc<dyn AvisRepository>,
    prestations: Arc<dyn PrestationRepository>,
    demandes: Arc<dyn DemandeRepository>,
}

impl AvisManager {
    pub fn new(
        repo: Arc<dyn AvisRepository>,
        prestations: Arc<dyn PrestationRepository>,
        demandes: Arc<dyn DemandeRepository>,
    ) -> Self {
        Self {
            repo,
            prestations,
            demandes,
        }
    }

    async fn find(&self, id: i64) -> AppResult<Avis> {
        self.repo.find_by_id(id).await?.ok_or_not_found()
    }

    async fn paged(&self, listing: AvisListing, page: PageRequest) -> AppResult<PageResponse<Avis>> {
        let (items, total) = self.repo.list(listing, page).await?;
        Ok(PageResponse::new(items, page, total))
    }

    /// Reject a second avis for the same demande, or one on somebody else's demande.
    async fn check_demande(&self, user: &CurrentUser, demande_id: i64) -> AppResult<()> {
        if self.repo.exists_for_demande(user.id, demande_id).await? {
            return Err(AppError::conflict(
                "You have already submitted an avis for this demande",
            ));
        }
        let demande = self
            .demandes
            .find_by_id(demande_id)
            .await?
            .ok_or_else(|| AppError::bad_request("Demande not found"))?;
        if !demande.is_owned_by(user.id) {
            return Err(AppError::forbidden("You can only review your own demandes"));
        }
        Ok(())
    }
}

#[async_trait]
impl AvisService for AvisManager {
    async fn create(&self, user: &CurrentUser, draft: AvisDraft) -> AppResult<Avis> {
        draft.validate()?;

        if self.prestations.find_by_id(draft.prestation_id).await?.is_none() {
            return Err(AppError::bad_request("Prestation not found"));
        }
        if self
            .repo
            .exists_for_prestation(user.id, draft.prestation_id)
            .await?
        {
            return Err(AppError::conflict(
                "You have already submitted an avis for this prestation",
            ));
        }
        if let Some(demande_id) = draft.demande_id {
            self.check_demande(user, demande_id).await?;
        }

        let now = Utc::now();
        let avis = Avis {
            id: 0,
            user_id: user.id,
            user_name: draft.display_name(&user.name),
            user_email: user.email.clone(),
            prestation_id: draft.prestation_id,
            demande_id: draft.demande_id,
            rating: draft.rating,
            comment: draft.comment,
            status: AvisStatus::Pending,
            is_approved: false,
            is_featured: false,
            moderated_at: None,
            approved_by: None,
            approved_at: None,
            admin_response: None,
            response_date: None,
            avis_type: draft.avis_type,
            is_anonymous: draft.is_anonymous,
            created_at: now,
            updated_at: now,
        };

        let created = self.repo.create(avis).await?;
        info!(avis_id = created.id, prestation_id = created.prestation_id, "Avis submitted");
        Ok(created)
    }

    async fn my_avis(&self, user: &CurrentUser) -> AppResult<Vec<Avis>> {
        self.repo.by_user(user.id).await
    }

    async fn approved(&self, page: PageRequest) -> AppResult<PageResponse<Avis>> {
        self.paged(AvisListing::Approved, page).await
    }

    async fn featured(&self) -> AppResult<Vec<Avis>> {
        self.repo.featured().await
    }

    async fn by_prestation(
        &self,
        prestation_id: i64,
        page: PageRequest,
    ) -> AppResult<PageResponse<Avis>> {
        self.paged(AvisListing::ByPrestation(prestation_id), page)
            .await
    }

    async fn average_rating(&self, prestation_id: Option<i64>) -> AppResult<f64> {
        Ok(self
            .repo
            .average_rating(prestation_id)
            .await?
            .unwrap_or(0.0))
    }

    async fn pending(&self, page: PageRequest) -> AppResult<PageResponse<Avis>> {
        self.paged(AvisListing::Pending, page).await
    }

    async fn approve(&self, id: i64, admin: &CurrentUser) -> AppResult<Avis> {
        let mut avis = self.find(id).await?;
        avis.approve(&admin.as_actor(), Utc::now());
        let avis = self.repo.update(avis).await?;
        info!(avis_id = id, admin_id = admin.id, "Avis approved");
        Ok(avis)
    }

    async fn reject(&self, id: i64, response: Option<String>) -> AppResult<Avis> {
        let mut avis = self.find(id).await?;
        let response = response.filter(|r| !r.trim().is_empty());
        avis.reject(response, Utc::now());
        let avis = self.repo.update(avis).await?;
        info!(avis_id = id, "Avis rejected");
        Ok(avis)
    }

    async fn respond(&self, id: i64, response: String) -> AppResult<Avis> {
        let mut avis = self.find(id).await?;
        avis.respond(response, Utc::now())?;
        self.repo.update(avis).await
    }

    async fn toggle_featured(&self, id: i64) -> AppResult<Avis> {
        let mut avis = self.find(id).await?;
        avis.toggle_featured(Utc::now())?;
        self.repo.update(avis).await
    }

    async fn by_type(&self, avis_type: AvisType, page: PageRequest) -> AppResult<PageResponse<Avis>> {
        self.paged(AvisListing::ByType(avis_type), page).await
    }

    async fn by_rating(&self, rating: i32, page: PageRequest) -> AppResult<PageResponse<Avis>> {
        validate_rating(rating)?;
        self.paged(AvisListing::ByRating(rating), page).await
    }

    async fn positive(&self, page: PageRequest) -> AppResult<PageResponse<Avis>> {
        self.paged(AvisListing::Positive, page).await
    }

    async fn negative(&self, page: PageRequest) -> AppResult<PageResponse<Avis>> {
        self.paged(AvisListing::Negative, page).await
    }

    async fn search(&self, keyword: String, page: PageRequest) -> AppResult<PageResponse<Avis>> {
        if keyword.trim().is_empty() {
            return Err(AppError::validation("Search keyword is required"));
        }
        self.paged(AvisListing::Search(keyword), page).await
    }

    async fn needing_response(&self, page: PageRequest) -> AppResult<PageResponse<Avis>> {
        self.paged(AvisListing::NeedingResponse, page).await
    }

    async fn delete(&self, id: i64) -> AppResult<()> {
        if !self.repo.delete(id).await? {
            return Err(AppError::NotFound);
        }
        info!(avis_id = id, "Avis deleted");
        Ok(())
    }
}
