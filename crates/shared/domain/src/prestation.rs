//! Prestation: catalog entry of an available social aid.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::MAX_PROCESSING_TIME_DAYS;
use crate::error::{DomainError, DomainResult};

string_enum! {
    pub enum PrestationCategory ("prestation category") {
        Logement => "LOGEMENT",
        Sante => "SANTE",
        Education => "EDUCATION",
        Emploi => "EMPLOI",
        Famille => "FAMILLE",
        Handicap => "HANDICAP",
        Seniors => "SENIORS",
        Jeunesse => "JEUNESSE",
        Culture => "CULTURE",
        Sport => "SPORT",
        Autre => "AUTRE",
    }
}

string_enum! {
    pub enum PrestationType ("prestation type") {
        AideFinanciere => "AIDE_FINANCIERE",
        AideMaterielle => "AIDE_MATERIELLE",
        AideService => "AIDE_SERVICE",
        Formation => "FORMATION",
        Accompagnement => "ACCOMPAGNEMENT",
        Conseil => "CONSEIL",
        Subvention => "SUBVENTION",
        Pret => "PRET",
        Bourse => "BOURSE",
        Autre => "AUTRE",
    }
}

/// Prestation domain entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Prestation {
    pub id: i64,
    pub title: String,
    pub short_description: Option<String>,
    pub description: Option<String>,
    pub prestation_type: Option<PrestationType>,
    pub category: PrestationCategory,
    pub min_amount: Option<Decimal>,
    pub max_amount: Option<Decimal>,
    pub duration_label: Option<String>,
    pub conditions: Option<String>,
    pub is_active: bool,
    pub requires_documents: bool,
    pub required_documents: Option<String>,
    pub eligibility_criteria: Option<String>,
    pub processing_time_days: Option<i32>,
    pub max_requests_per_year: Option<i32>,
    pub image_url: Option<String>,
    pub display_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Prestation {
    /// Check a requested amount against the configured bounds.
    pub fn check_amount(&self, amount: Decimal) -> DomainResult<()> {
        if amount <= Decimal::ZERO {
            return Err(DomainError::rule("Requested amount must be positive"));
        }
        if matches!(self.min_amount, Some(min) if amount < min) {
            return Err(DomainError::rule("Requested amount is below minimum allowed"));
        }
        if matches!(self.max_amount, Some(max) if amount > max) {
            return Err(DomainError::rule("Requested amount exceeds maximum allowed"));
        }
        Ok(())
    }

    /// Whether the yearly request quota is used up by `count` existing demandes.
    pub fn yearly_quota_reached(&self, count: u64) -> bool {
        matches!(self.max_requests_per_year, Some(max) if count >= max.max(0) as u64)
    }
}

/// Fields of a new prestation.
#[derive(Debug, Clone, PartialEq)]
pub struct PrestationDraft {
    pub title: String,
    pub short_description: Option<String>,
    pub description: Option<String>,
    pub prestation_type: Option<PrestationType>,
    pub category: PrestationCategory,
    pub min_amount: Option<Decimal>,
    pub max_amount: Option<Decimal>,
    pub duration_label: Option<String>,
    pub conditions: Option<String>,
    pub is_active: bool,
    pub requires_documents: bool,
    pub required_documents: Option<String>,
    pub eligibility_criteria: Option<String>,
    pub processing_time_days: Option<i32>,
    pub max_requests_per_year: Option<i32>,
    pub image_url: Option<String>,
    pub display_order: Option<i32>,
}

impl PrestationDraft {
    pub fn validate(&self) -> DomainResult<()> {
        check_bounds(self.min_amount, self.max_amount)?;
        check_processing_time(self.processing_time_days)
    }
}

/// Partial prestation update.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PrestationChanges {
    pub title: Option<String>,
    pub short_description: Option<String>,
    pub description: Option<String>,
    pub prestation_type: Option<PrestationType>,
    pub category: Option<PrestationCategory>,
    pub min_amount: Option<Decimal>,
    pub max_amount: Option<Decimal>,
    pub duration_label: Option<String>,
    pub conditions: Option<String>,
    pub is_active: Option<bool>,
    pub requires_documents: Option<bool>,
    pub required_documents: Option<String>,
    pub eligibility_criteria: Option<String>,
    pub processing_time_days: Option<i32>,
    pub max_requests_per_year: Option<i32>,
    pub image_url: Option<String>,
    pub display_order: Option<i32>,
}

impl PrestationChanges {
    pub fn apply_to(self, p: &mut Prestation) -> DomainResult<()> {
        if let Some(v) = self.title {
            p.title = v;
        }
        if let Some(v) = self.short_description {
            p.short_description = Some(v);
        }
        if let Some(v) = self.description {
            p.description = Some(v);
        }
        if let Some(v) = self.prestation_type {
            p.prestation_type = Some(v);
        }
        if let Some(v) = self.category {
            p.category = v;
        }
        if let Some(v) = self.min_amount {
            p.min_amount = Some(v);
        }
        if let Some(v) = self.max_amount {
            p.max_amount = Some(v);
        }
        if let Some(v) = self.duration_label {
            p.duration_label = Some(v);
        }
        if let Some(v) = self.conditions {
            p.conditions = Some(v);
        }
        if let Some(v) = self.is_active {
            p.is_active = v;
        }
        if let Some(v) = self.requires_documents {
            p.requires_documents = v;
        }
        if let Some(v) = self.required_documents {
            p.required_documents = Some(v);
        }
        if let Some(v) = self.eligibility_criteria {
            p.eligibility_criteria = Some(v);
        }
        if let Some(v) = self.processing_time_days {
            p.processing_time_days = Some(v);
        }
        if let Some(v) = self.max_requests_per_year {
            p.max_requests_per_year = Some(v);
        }
        if let Some(v) = self.image_url {
            p.image_url = Some(v);
        }
        if let Some(v) = self.display_order {
            p.display_order = v;
        }
        check_bounds(p.min_amount, p.max_amount)?;
        check_processing_time(p.processing_time_days)
    }
}

fn check_bounds(min: Option<Decimal>, max: Option<Decimal>) -> DomainResult<()> {
    match (min, max) {
        (Some(min), Some(max)) if min > max => Err(DomainError::validation(
            "Minimum amount must not exceed maximum amount",
        )),
        _ => Ok(()),
    }
}

fn check_processing_time(days: Option<i32>) -> DomainResult<()> {
    match days {
        Some(days) if !(0..=MAX_PROCESSING_TIME_DAYS).contains(&days) => Err(
            DomainError::validation(format!(
                "Processing time must be between 0 and {} days",
                MAX_PROCESSING_TIME_DAYS
            )),
        ),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prestation(min: Option<i64>, max: Option<i64>, per_year: Option<i32>) -> Prestation {
        let now = Utc::now();
        Prestation {
            id: 1,
            title: "Aide au logement".to_string(),
            short_description: None,
            description: None,
            prestation_type: Some(PrestationType::AideFinanciere),
            category: PrestationCategory::Logement,
            min_amount: min.map(Decimal::from),
            max_amount: max.map(Decimal::from),
            duration_label: None,
            conditions: None,
            is_active: true,
            requires_documents: false,
            required_documents: None,
            eligibility_criteria: None,
            processing_time_days: Some(15),
            max_requests_per_year: per_year,
            image_url: None,
            display_order: 1,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_amount_bounds() {
        let p = prestation(Some(100), Some(1000), None);
        assert!(p.check_amount(Decimal::from(500)).is_ok());
        assert!(p.check_amount(Decimal::from(100)).is_ok());
        assert!(p.check_amount(Decimal::from(1000)).is_ok());
        assert_eq!(
            p.check_amount(Decimal::from(99)),
            Err(DomainError::rule("Requested amount is below minimum allowed"))
        );
        assert_eq!(
            p.check_amount(Decimal::from(1001)),
            Err(DomainError::rule("Requested amount exceeds maximum allowed"))
        );
        assert!(p.check_amount(Decimal::ZERO).is_err());
    }

    #[test]
    fn test_unbounded_amounts() {
        let p = prestation(None, None, None);
        assert!(p.check_amount(Decimal::from(1_000_000)).is_ok());
    }

    #[test]
    fn test_yearly_quota() {
        assert!(!prestation(None, None, None).yearly_quota_reached(50));
        let p = prestation(None, None, Some(2));
        assert!(!p.yearly_quota_reached(1));
        assert!(p.yearly_quota_reached(2));
    }

    #[test]
    fn test_changes_keep_bounds_consistent() {
        let mut p = prestation(Some(100), Some(1000), None);
        let changes = PrestationChanges {
            min_amount: Some(Decimal::from(2000)),
            ..Default::default()
        };
        assert!(changes.apply_to(&mut p).is_err());
    }

    #[test]
    fn test_processing_time_is_bounded() {
        let mut p = prestation(None, None, None);
        let changes = PrestationChanges {
            processing_time_days: Some(i32::MAX),
            ..Default::default()
        };
        assert!(matches!(
            changes.apply_to(&mut p),
            Err(DomainError::Validation(_))
        ));

        let changes = PrestationChanges {
            processing_time_days: Some(MAX_PROCESSING_TIME_DAYS),
            ..Default::default()
        };
        assert!(changes.apply_to(&mut p).is_ok());
    }

    #[test]
    fn test_category_codes() {
        assert_eq!(PrestationType::AideFinanciere.as_str(), "AIDE_FINANCIERE");
        assert_eq!(
            "sante".parse::<PrestationCategory>().unwrap(),
            PrestationCategory::Sante
        );
    }
}
