//! Avis: moderated review of a prestation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::{MAX_RATING, MIN_RATING};
use crate::demande::Actor;
use crate::error::{DomainError, DomainResult};

/// Name shown instead of the author for anonymous reviews.
pub const ANONYMOUS_USER_NAME: &str = "Utilisateur anonyme";

string_enum! {
    pub enum AvisStatus ("avis status") {
        Pending => "PENDING",
        Published => "PUBLISHED",
        Rejected => "REJECTED",
    }
}

string_enum! {
    pub enum AvisType ("avis type") {
        General => "GENERAL",
        ServiceQuality => "SERVICE_QUALITY",
        ProcessingTime => "PROCESSING_TIME",
        Staff => "STAFF",
        Suggestion => "SUGGESTION",
        Complaint => "COMPLAINT",
    }
}

/// Avis domain entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Avis {
    pub id: i64,
    pub user_id: i64,
    pub user_name: String,
    pub user_email: String,
    pub prestation_id: i64,
    pub demande_id: Option<i64>,
    pub rating: i32,
    pub comment: Option<String>,
    pub status: AvisStatus,
    pub is_approved: bool,
    pub is_featured: bool,
    pub moderated_at: Option<DateTime<Utc>>,
    pub approved_by: Option<String>,
    pub approved_at: Option<DateTime<Utc>>,
    pub admin_response: Option<String>,
    pub response_date: Option<DateTime<Utc>>,
    pub avis_type: AvisType,
    pub is_anonymous: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields supplied when posting an avis.
#[derive(Debug, Clone, PartialEq)]
pub struct AvisDraft {
    pub prestation_id: i64,
    pub demande_id: Option<i64>,
    pub rating: i32,
    pub comment: Option<String>,
    pub avis_type: AvisType,
    pub is_anonymous: bool,
}

impl AvisDraft {
    pub fn validate(&self) -> DomainResult<()> {
        validate_rating(self.rating)
    }

    /// Name stored with the avis.
    pub fn display_name(&self, author: &str) -> String {
        if self.is_anonymous {
            ANONYMOUS_USER_NAME.to_string()
        } else {
            author.to_string()
        }
    }
}

pub fn validate_rating(rating: i32) -> DomainResult<()> {
    if (MIN_RATING..=MAX_RATING).contains(&rating) {
        Ok(())
    } else {
        Err(DomainError::validation(format!(
            "Rating must be between {} and {}",
            MIN_RATING, MAX_RATING
        )))
    }
}

impl Avis {
    pub fn approve(&mut self, actor: &Actor, now: DateTime<Utc>) {
        self.status = AvisStatus::Published;
        self.is_approved = true;
        self.approved_by = Some(actor.name.clone());
        self.approved_at = Some(now);
        self.moderated_at = Some(now);
        self.updated_at = now;
    }

    /// Reject the avis. A rejected avis can no longer be featured.
    pub fn reject(&mut self, response: Option<String>, now: DateTime<Utc>) {
        self.status = AvisStatus::Rejected;
        self.is_approved = false;
        self.is_featured = false;
        self.approved_by = None;
        self.approved_at = None;
        self.moderated_at = Some(now);
        if let Some(response) = response {
            self.admin_response = Some(response);
            self.response_date = Some(now);
        }
        self.updated_at = now;
    }

    pub fn respond(&mut self, response: String, now: DateTime<Utc>) -> DomainResult<()> {
        if response.trim().is_empty() {
            return Err(DomainError::validation("Response cannot be empty"));
        }
        self.admin_response = Some(response);
        self.response_date = Some(now);
        self.updated_at = now;
        Ok(())
    }

    pub fn toggle_featured(&mut self, now: DateTime<Utc>) -> DomainResult<()> {
        if !self.is_approved {
            return Err(DomainError::rule("Only approved avis can be featured"));
        }
        self.is_featured = !self.is_featured;
        self.updated_at = now;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn avis() -> Avis {
        let now = Utc::now();
        Avis {
            id: 1,
            user_id: 7,
            user_name: "Jane Doe".to_string(),
            user_email: "jane@foundation.com".to_string(),
            prestation_id: 3,
            demande_id: None,
            rating: 4,
            comment: Some("Quick and helpful".to_string()),
            status: AvisStatus::Pending,
            is_approved: false,
            is_featured: false,
            moderated_at: None,
            approved_by: None,
            approved_at: None,
            admin_response: None,
            response_date: None,
            avis_type: AvisType::General,
            is_anonymous: false,
            created_at: now,
            updated_at: now,
        }
    }

    fn moderator() -> Actor {
        Actor {
            id: 1,
            name: "Moderator".to_string(),
        }
    }

    #[test]
    fn test_rating_bounds() {
        assert!(validate_rating(1).is_ok());
        assert!(validate_rating(5).is_ok());
        assert!(validate_rating(0).is_err());
        assert!(validate_rating(6).is_err());
    }

    #[test]
    fn test_anonymous_display_name() {
        let draft = AvisDraft {
            prestation_id: 1,
            demande_id: None,
            rating: 5,
            comment: None,
            avis_type: AvisType::General,
            is_anonymous: true,
        };
        assert_eq!(draft.display_name("Jane Doe"), ANONYMOUS_USER_NAME);
    }

    #[test]
    fn test_feature_requires_approval() {
        let now = Utc::now();
        let mut a = avis();
        assert_eq!(
            a.toggle_featured(now),
            Err(DomainError::rule("Only approved avis can be featured"))
        );

        a.approve(&moderator(), now);
        assert_eq!(a.status, AvisStatus::Published);
        a.toggle_featured(now).unwrap();
        assert!(a.is_featured);
        a.toggle_featured(now).unwrap();
        assert!(!a.is_featured);
    }

    #[test]
    fn test_reject_clears_approval() {
        let now = Utc::now();
        let mut a = avis();
        a.approve(&moderator(), now);
        a.toggle_featured(now).unwrap();
        a.reject(Some("Off topic".to_string()), now);

        assert_eq!(a.status, AvisStatus::Rejected);
        assert!(!a.is_approved);
        assert!(!a.is_featured);
        assert_eq!(a.approved_by, None);
        assert_eq!(a.admin_response.as_deref(), Some("Off topic"));
    }
}
