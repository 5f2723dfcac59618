//! Demande: a staff member's request for a prestation, and its lifecycle.
//!
//! ```text
//! DRAFT      -> SUBMITTED | CANCELLED
//! SUBMITTED  -> IN_REVIEW | APPROVED | REJECTED | CANCELLED
//! IN_REVIEW  -> APPROVED | REJECTED | CANCELLED
//! APPROVED   -> PAID | CANCELLED
//! REJECTED, PAID, CANCELLED are terminal
//! ```

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};
use crate::prestation::Prestation;

string_enum! {
    pub enum DemandeStatus ("demande status") {
        Draft => "DRAFT",
        Submitted => "SUBMITTED",
        InReview => "IN_REVIEW",
        Approved => "APPROVED",
        Rejected => "REJECTED",
        Paid => "PAID",
        Cancelled => "CANCELLED",
    }
}

impl DemandeStatus {
    /// States reachable in one step.
    pub fn next_states(&self) -> &'static [DemandeStatus] {
        use DemandeStatus::*;
        match self {
            Draft => &[Submitted, Cancelled],
            Submitted => &[InReview, Approved, Rejected, Cancelled],
            InReview => &[Approved, Rejected, Cancelled],
            Approved => &[Paid, Cancelled],
            Rejected | Paid | Cancelled => &[],
        }
    }

    pub fn can_transition_to(&self, next: DemandeStatus) -> bool {
        self.next_states().contains(&next)
    }

    pub fn is_terminal(&self) -> bool {
        self.next_states().is_empty()
    }

    /// Waiting for a decision from the back office.
    pub fn is_pending(&self) -> bool {
        matches!(self, DemandeStatus::Submitted | DemandeStatus::InReview)
    }

    /// States an administrator may move a demande into.
    pub fn is_admin_target(&self) -> bool {
        !matches!(self, DemandeStatus::Draft | DemandeStatus::Submitted)
    }
}

string_enum! {
    pub enum PriorityLevel ("priority level") {
        Low => "LOW",
        Normal => "NORMAL",
        High => "HIGH",
        Urgent => "URGENT",
    }
}

impl Default for PriorityLevel {
    fn default() -> Self {
        PriorityLevel::Normal
    }
}

/// Demande domain entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Demande {
    pub id: i64,
    pub user_id: i64,
    pub user_email: String,
    pub user_name: String,
    pub employee_id: Option<String>,
    pub prestation_id: i64,
    pub prestation_title: Option<String>,
    pub status: DemandeStatus,
    pub requested_amount: Option<Decimal>,
    pub approved_amount: Option<Decimal>,
    pub justification: String,
    pub rejection_reason: Option<String>,
    pub documents_uploaded: Vec<String>,
    pub priority_level: PriorityLevel,
    pub submitted_at: Option<DateTime<Utc>>,
    pub processed_at: Option<DateTime<Utc>>,
    pub processed_by: Option<i64>,
    pub processed_by_name: Option<String>,
    pub expected_processing_date: Option<DateTime<Utc>>,
    pub payment_reference: Option<String>,
    pub payment_date: Option<DateTime<Utc>>,
    pub admin_comment: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Identity of the staff member filing a demande.
#[derive(Debug, Clone, PartialEq)]
pub struct Applicant {
    pub user_id: i64,
    pub email: String,
    pub name: String,
    pub employee_id: Option<String>,
}

/// Back-office user acting on a demande or avis.
#[derive(Debug, Clone, PartialEq)]
pub struct Actor {
    pub id: i64,
    pub name: String,
}

/// Fields supplied when creating a demande.
#[derive(Debug, Clone, PartialEq)]
pub struct DemandeDraft {
    pub prestation_id: i64,
    pub requested_amount: Option<Decimal>,
    pub justification: String,
    pub documents: Vec<String>,
    pub priority_level: Option<PriorityLevel>,
}

/// Administrative status update.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusChange {
    pub status: DemandeStatus,
    pub approved_amount: Option<Decimal>,
    pub admin_comment: Option<String>,
    pub rejection_reason: Option<String>,
    pub payment_reference: Option<String>,
}

impl StatusChange {
    pub fn to(status: DemandeStatus) -> Self {
        Self {
            status,
            approved_amount: None,
            admin_comment: None,
            rejection_reason: None,
            payment_reference: None,
        }
    }
}

impl Demande {
    pub fn is_owned_by(&self, user_id: i64) -> bool {
        self.user_id == user_id
    }

    /// Move a draft into the review queue.
    pub fn submit(
        &mut self,
        user_id: i64,
        prestation: &Prestation,
        now: DateTime<Utc>,
    ) -> DomainResult<()> {
        if !self.is_owned_by(user_id) {
            return Err(DomainError::forbidden("You can only submit your own demandes"));
        }
        if self.status != DemandeStatus::Draft {
            return Err(DomainError::invalid_state(
                "Only draft demandes can be submitted",
            ));
        }
        if prestation.requires_documents && self.documents_uploaded.is_empty() {
            return Err(DomainError::rule(
                "Required documents must be uploaded before submission",
            ));
        }

        let expected = match prestation.processing_time_days {
            Some(days) => Some(
                Duration::try_days(i64::from(days))
                    .and_then(|delay| now.checked_add_signed(delay))
                    .ok_or_else(|| {
                        DomainError::rule("Prestation processing time is out of range")
                    })?,
            ),
            None => None,
        };

        self.status = DemandeStatus::Submitted;
        self.submitted_at = Some(now);
        self.expected_processing_date = expected;
        self.updated_at = now;
        Ok(())
    }

    /// Withdraw a demande on behalf of its owner.
    pub fn cancel(&mut self, user_id: i64, now: DateTime<Utc>) -> DomainResult<()> {
        if !self.is_owned_by(user_id) {
            return Err(DomainError::forbidden("You can only cancel your own demandes"));
        }
        if !self.status.can_transition_to(DemandeStatus::Cancelled) {
            return Err(DomainError::invalid_state("This demande cannot be cancelled"));
        }

        self.status = DemandeStatus::Cancelled;
        self.updated_at = now;
        Ok(())
    }

    /// Apply a back-office decision.
    pub fn apply_status_change(
        &mut self,
        change: StatusChange,
        actor: &Actor,
        now: DateTime<Utc>,
    ) -> DomainResult<()> {
        let target = change.status;
        if !target.is_admin_target() || !self.status.can_transition_to(target) {
            return Err(DomainError::invalid_state(format!(
                "Cannot change demande status from {} to {}",
                self.status, target
            )));
        }

        match target {
            DemandeStatus::Approved => {
                let amount = change
                    .approved_amount
                    .or(self.requested_amount)
                    .ok_or_else(|| DomainError::rule("An approved amount is required"))?;
                if amount <= Decimal::ZERO {
                    return Err(DomainError::rule("Approved amount must be positive"));
                }
                self.approved_amount = Some(amount);
                self.mark_processed(actor, now);
            }
            DemandeStatus::Rejected => {
                let reason = change
                    .rejection_reason
                    .clone()
                    .or_else(|| change.admin_comment.clone())
                    .filter(|r| !r.trim().is_empty())
                    .ok_or_else(|| DomainError::rule("A rejection reason is required"))?;
                self.rejection_reason = Some(reason);
                self.mark_processed(actor, now);
            }
            DemandeStatus::Paid => {
                let reference = change
                    .payment_reference
                    .filter(|r| !r.trim().is_empty())
                    .ok_or_else(|| DomainError::rule("A payment reference is required"))?;
                self.payment_reference = Some(reference);
                self.payment_date = Some(now);
            }
            DemandeStatus::Cancelled => self.mark_processed(actor, now),
            DemandeStatus::InReview | DemandeStatus::Draft | DemandeStatus::Submitted => {}
        }

        if change.admin_comment.is_some() {
            self.admin_comment = change.admin_comment;
        }
        self.status = target;
        self.updated_at = now;
        Ok(())
    }

    fn mark_processed(&mut self, actor: &Actor, now: DateTime<Utc>) {
        self.processed_at = Some(now);
        self.processed_by = Some(actor.id);
        self.processed_by_name = Some(actor.name.clone());
    }

    /// Whole days between submission and decision, when both are known.
    pub fn processing_days(&self) -> Option<i64> {
        match (self.submitted_at, self.processed_at) {
            (Some(submitted), Some(processed)) => Some((processed - submitted).num_days()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prestation::PrestationCategory;
    use DemandeStatus::*;

    fn demande(status: DemandeStatus) -> Demande {
        let now = Utc::now();
        Demande {
            id: 10,
            user_id: 7,
            user_email: "jane@foundation.com".to_string(),
            user_name: "Jane Doe".to_string(),
            employee_id: Some("EMP001".to_string()),
            prestation_id: 1,
            prestation_title: Some("Aide".to_string()),
            status,
            requested_amount: Some(Decimal::from(500)),
            approved_amount: None,
            justification: "Need support".to_string(),
            rejection_reason: None,
            documents_uploaded: vec![],
            priority_level: PriorityLevel::Normal,
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
        }
    }

    fn prestation(requires_documents: bool) -> Prestation {
        let now = Utc::now();
        Prestation {
            id: 1,
            title: "Aide".to_string(),
            short_description: None,
            description: None,
            prestation_type: None,
            category: PrestationCategory::Famille,
            min_amount: None,
            max_amount: None,
            duration_label: None,
            conditions: None,
            is_active: true,
            requires_documents,
            required_documents: None,
            eligibility_criteria: None,
            processing_time_days: Some(10),
            max_requests_per_year: None,
            image_url: None,
            display_order: 1,
            created_at: now,
            updated_at: now,
        }
    }

    fn admin() -> Actor {
        Actor {
            id: 1,
            name: "Admin".to_string(),
        }
    }

    #[test]
    fn test_transition_table() {
        assert!(Draft.can_transition_to(Submitted));
        assert!(Submitted.can_transition_to(InReview));
        assert!(InReview.can_transition_to(Approved));
        assert!(InReview.can_transition_to(Rejected));
        assert!(Approved.can_transition_to(Paid));
        assert!(!Draft.can_transition_to(Approved));
        assert!(!Rejected.can_transition_to(Paid));
        assert!(!Paid.can_transition_to(Cancelled));
        for terminal in [Rejected, Paid, Cancelled] {
            assert!(terminal.is_terminal());
        }
        assert!(Submitted.is_pending() && InReview.is_pending());
        assert!(!Approved.is_pending());
    }

    #[test]
    fn test_submit_sets_dates() {
        let now = Utc::now();
        let mut d = demande(Draft);
        d.submit(7, &prestation(false), now).unwrap();

        assert_eq!(d.status, Submitted);
        assert_eq!(d.submitted_at, Some(now));
        assert_eq!(d.expected_processing_date, Some(now + Duration::days(10)));
    }

    #[test]
    fn test_submit_rules() {
        let now = Utc::now();
        assert!(matches!(
            demande(Draft).submit(8, &prestation(false), now),
            Err(DomainError::Forbidden(_))
        ));
        assert_eq!(
            demande(Submitted).submit(7, &prestation(false), now),
            Err(DomainError::invalid_state("Only draft demandes can be submitted"))
        );
        assert_eq!(
            demande(Draft).submit(7, &prestation(true), now),
            Err(DomainError::rule(
                "Required documents must be uploaded before submission"
            ))
        );

        let mut with_docs = demande(Draft);
        with_docs.documents_uploaded = vec!["payslip.pdf".to_string()];
        assert!(with_docs.submit(7, &prestation(true), now).is_ok());
    }

    #[test]
    fn test_submit_with_unreachable_processing_date() {
        let mut p = prestation(false);
        p.processing_time_days = Some(i32::MAX);
        let mut d = demande(Draft);

        assert_eq!(
            d.submit(7, &p, Utc::now()),
            Err(DomainError::rule("Prestation processing time is out of range"))
        );
        assert_eq!(d.status, Draft);
        assert_eq!(d.submitted_at, None);
    }

    #[test]
    fn test_cancel_rules() {
        let now = Utc::now();
        let mut d = demande(InReview);
        d.cancel(7, now).unwrap();
        assert_eq!(d.status, Cancelled);

        for status in [Paid, Cancelled, Rejected] {
            assert_eq!(
                demande(status).cancel(7, now),
                Err(DomainError::invalid_state("This demande cannot be cancelled"))
            );
        }
        assert!(matches!(
            demande(Draft).cancel(99, now),
            Err(DomainError::Forbidden(_))
        ));
    }

    #[test]
    fn test_approve_defaults_to_requested_amount() {
        let now = Utc::now();
        let mut d = demande(InReview);
        d.apply_status_change(StatusChange::to(Approved), &admin(), now)
            .unwrap();

        assert_eq!(d.status, Approved);
        assert_eq!(d.approved_amount, Some(Decimal::from(500)));
        assert_eq!(d.processed_by, Some(1));
        assert_eq!(d.processed_at, Some(now));
    }

    #[test]
    fn test_reject_needs_reason() {
        let now = Utc::now();
        let mut d = demande(Submitted);
        assert!(d
            .apply_status_change(StatusChange::to(Rejected), &admin(), now)
            .is_err());

        let change = StatusChange {
            admin_comment: Some("Incomplete file".to_string()),
            ..StatusChange::to(Rejected)
        };
        d.apply_status_change(change, &admin(), now).unwrap();
        assert_eq!(d.rejection_reason.as_deref(), Some("Incomplete file"));
        assert_eq!(d.admin_comment.as_deref(), Some("Incomplete file"));
    }

    #[test]
    fn test_payment_needs_reference() {
        let now = Utc::now();
        let mut d = demande(Approved);
        assert!(d
            .apply_status_change(StatusChange::to(Paid), &admin(), now)
            .is_err());

        let change = StatusChange {
            payment_reference: Some("VIR-2024-001".to_string()),
            ..StatusChange::to(Paid)
        };
        d.apply_status_change(change, &admin(), now).unwrap();
        assert_eq!(d.status, Paid);
        assert_eq!(d.payment_date, Some(now));
    }

    #[test]
    fn test_illegal_transition_message() {
        let mut d = demande(Draft);
        let err = d
            .apply_status_change(StatusChange::to(Approved), &admin(), Utc::now())
            .unwrap_err();
        assert_eq!(
            err,
            DomainError::invalid_state("Cannot change demande status from DRAFT to APPROVED")
        );

        let mut d = demande(Draft);
        assert!(d
            .apply_status_change(StatusChange::to(Submitted), &admin(), Utc::now())
            .is_err());
    }

    #[test]
    fn test_processing_days() {
        let now = Utc::now();
        let mut d = demande(Draft);
        d.submit(7, &prestation(false), now - Duration::days(4)).unwrap();
        d.apply_status_change(StatusChange::to(Approved), &admin(), now)
            .unwrap();
        assert_eq!(d.processing_days(), Some(4));
    }
}
