//! Staff member profile.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Profile domain entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: i64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub matricule: Option<String>,
    pub service_code: Option<String>,
    pub address: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub family_status: Option<String>,
    pub children_count: Option<i32>,
    pub avatar_url: Option<String>,
    pub notif_email: bool,
    pub notif_news: bool,
    pub notif_events: bool,
    pub roles: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Soft delete timestamp (None = active, Some = deleted)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl UserProfile {
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

/// Partial profile update. `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileChanges {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub matricule: Option<String>,
    pub service_code: Option<String>,
    pub address: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub family_status: Option<String>,
    pub children_count: Option<i32>,
    pub notif_email: Option<bool>,
    pub notif_news: Option<bool>,
    pub notif_events: Option<bool>,
}

impl ProfileChanges {
    /// Apply the provided fields onto a profile.
    pub fn apply_to(self, profile: &mut UserProfile) {
        if let Some(v) = self.first_name {
            profile.first_name = v;
        }
        if let Some(v) = self.last_name {
            profile.last_name = v;
        }
        if let Some(v) = self.phone {
            profile.phone = Some(v);
        }
        if let Some(v) = self.matricule {
            profile.matricule = Some(v);
        }
        if let Some(v) = self.service_code {
            profile.service_code = Some(v);
        }
        if let Some(v) = self.address {
            profile.address = Some(v);
        }
        if let Some(v) = self.birth_date {
            profile.birth_date = Some(v);
        }
        if let Some(v) = self.family_status {
            profile.family_status = Some(v);
        }
        if let Some(v) = self.children_count {
            profile.children_count = Some(v);
        }
        if let Some(v) = self.notif_email {
            profile.notif_email = v;
        }
        if let Some(v) = self.notif_news {
            profile.notif_news = v;
        }
        if let Some(v) = self.notif_events {
            profile.notif_events = v;
        }
    }
}
