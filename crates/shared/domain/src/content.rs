//! Public site content: news, events, partners, foundation info blocks,
//! contact messages and the home page summary.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

string_enum! {
    /// Publication state shared by news and events.
    pub enum ContentStatus ("content status") {
        Draft => "DRAFT",
        Published => "PUBLISHED",
        Archived => "ARCHIVED",
    }
}

string_enum! {
    pub enum EventType ("event type") {
        Conference => "CONFERENCE",
        Workshop => "WORKSHOP",
        Seminar => "SEMINAR",
        Celebration => "CELEBRATION",
        Fundraiser => "FUNDRAISER",
        Volunteering => "VOLUNTEERING",
        Training => "TRAINING",
        Meeting => "MEETING",
        Other => "OTHER",
    }
}

string_enum! {
    /// Kind of foundation info block.
    pub enum InfoType ("info type") {
        Mission => "MISSION",
        Vision => "VISION",
        Values => "VALUES",
        History => "HISTORY",
        Team => "TEAM",
        Contact => "CONTACT",
        Ministry => "MINISTRY",
        About => "ABOUT",
        Other => "OTHER",
    }
}

string_enum! {
    pub enum ContactStatus ("contact status") {
        New => "NEW",
        InProgress => "IN_PROGRESS",
        Responded => "RESPONDED",
        Closed => "CLOSED",
    }
}

/// Build a URL slug: lowercase ASCII alphanumerics joined by single dashes.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_dash = false;

    for c in text.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }

    slug
}

// =============================================================================
// News
// =============================================================================

/// News article
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct News {
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub body: String,
    pub image_url: Option<String>,
    pub category: String,
    pub tags: Vec<String>,
    pub author_id: Option<i64>,
    pub author_name: Option<String>,
    pub status: ContentStatus,
    pub published: bool,
    pub featured: bool,
    pub view_count: i64,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl News {
    pub fn publish(&mut self, now: DateTime<Utc>) {
        self.status = ContentStatus::Published;
        self.published = true;
        self.published_at = Some(now);
        self.updated_at = now;
    }

    pub fn unpublish(&mut self, now: DateTime<Utc>) {
        self.status = ContentStatus::Draft;
        self.published = false;
        self.published_at = None;
        self.updated_at = now;
    }

    pub fn is_published(&self) -> bool {
        self.status == ContentStatus::Published
    }
}

/// Editable news fields, used for both creation and replacement.
#[derive(Debug, Clone, PartialEq)]
pub struct NewsDraft {
    pub title: String,
    pub slug: Option<String>,
    pub body: String,
    pub image_url: Option<String>,
    pub category: String,
    pub tags: Vec<String>,
}

impl NewsDraft {
    /// Explicit slug if given, otherwise one derived from the title.
    pub fn resolved_slug(&self) -> DomainResult<String> {
        let slug = match self.slug.as_deref().map(str::trim) {
            Some(s) if !s.is_empty() => slugify(s),
            _ => slugify(&self.title),
        };

        if slug.is_empty() {
            return Err(DomainError::validation(
                "A slug could not be derived from the title",
            ));
        }
        Ok(slug)
    }
}

// =============================================================================
// Events
// =============================================================================

/// Foundation event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub start_date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
    pub location: Option<String>,
    pub image_url: Option<String>,
    pub event_type: EventType,
    pub status: ContentStatus,
    pub published: bool,
    pub max_participants: Option<i32>,
    pub current_participants: i32,
    pub registration_required: bool,
    pub registration_deadline: Option<DateTime<Utc>>,
    pub organizer_id: Option<i64>,
    pub organizer_name: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Event {
    pub fn is_full(&self) -> bool {
        matches!(self.max_participants, Some(max) if self.current_participants >= max)
    }

    pub fn publish(&mut self, now: DateTime<Utc>) {
        self.status = ContentStatus::Published;
        self.published = true;
        self.published_at = Some(now);
        self.updated_at = now;
    }

    pub fn unpublish(&mut self, now: DateTime<Utc>) {
        self.status = ContentStatus::Draft;
        self.published = false;
        self.published_at = None;
        self.updated_at = now;
    }

    /// Take one seat after checking the event accepts registrations.
    pub fn register_participant(&mut self, now: DateTime<Utc>) -> DomainResult<()> {
        self.check_registration(now)?;
        self.current_participants += 1;
        self.updated_at = now;
        Ok(())
    }

    /// Release one seat; never goes below zero.
    pub fn unregister_participant(&mut self, now: DateTime<Utc>) {
        if self.current_participants > 0 {
            self.current_participants -= 1;
            self.updated_at = now;
        }
    }

    /// Check that one more participant may register at `now`.
    pub fn check_registration(&self, now: DateTime<Utc>) -> DomainResult<()> {
        if self.status != ContentStatus::Published {
            return Err(DomainError::rule("Event is not open for registration"));
        }
        if matches!(self.registration_deadline, Some(deadline) if now > deadline) {
            return Err(DomainError::rule("Registration deadline has passed"));
        }
        if self.is_full() {
            return Err(DomainError::rule("Event is full"));
        }
        Ok(())
    }
}

/// Fields of a new event.
#[derive(Debug, Clone, PartialEq)]
pub struct EventDraft {
    pub title: String,
    pub description: Option<String>,
    pub start_date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
    pub location: Option<String>,
    pub image_url: Option<String>,
    pub event_type: EventType,
    pub max_participants: Option<i32>,
    pub registration_required: bool,
    pub registration_deadline: Option<DateTime<Utc>>,
}

impl EventDraft {
    pub fn validate(&self) -> DomainResult<()> {
        check_event_dates(self.start_date, self.end_date)
    }
}

/// Partial event update.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub location: Option<String>,
    pub image_url: Option<String>,
    pub event_type: Option<EventType>,
    pub max_participants: Option<i32>,
    pub registration_required: Option<bool>,
    pub registration_deadline: Option<DateTime<Utc>>,
}

impl EventChanges {
    /// Apply the provided fields and re-check the date range.
    pub fn apply_to(self, event: &mut Event) -> DomainResult<()> {
        if let Some(v) = self.title {
            event.title = v;
        }
        if let Some(v) = self.description {
            event.description = Some(v);
        }
        if let Some(v) = self.start_date {
            event.start_date = v;
        }
        if let Some(v) = self.end_date {
            event.end_date = Some(v);
        }
        if let Some(v) = self.location {
            event.location = Some(v);
        }
        if let Some(v) = self.image_url {
            event.image_url = Some(v);
        }
        if let Some(v) = self.event_type {
            event.event_type = v;
        }
        if let Some(v) = self.max_participants {
            event.max_participants = Some(v);
        }
        if let Some(v) = self.registration_required {
            event.registration_required = v;
        }
        if let Some(v) = self.registration_deadline {
            event.registration_deadline = Some(v);
        }
        check_event_dates(event.start_date, event.end_date)
    }
}

fn check_event_dates(start: DateTime<Utc>, end: Option<DateTime<Utc>>) -> DomainResult<()> {
    match end {
        Some(end) if end < start => Err(DomainError::validation(
            "End date must not be before start date",
        )),
        _ => Ok(()),
    }
}

// =============================================================================
// Partners
// =============================================================================

/// Partner organisation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Partner {
    pub id: i64,
    pub name: String,
    pub logo_url: Option<String>,
    pub website: Option<String>,
    pub sector: String,
    pub phone: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PartnerDraft {
    pub name: String,
    pub logo_url: Option<String>,
    pub website: Option<String>,
    pub sector: String,
    pub phone: String,
    pub email: String,
}

// =============================================================================
// Foundation info
// =============================================================================

/// Ordered static content block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct FoundationInfo {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub info_type: InfoType,
    pub display_order: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FoundationInfoDraft {
    pub title: String,
    pub content: String,
    pub info_type: InfoType,
    pub display_order: Option<i32>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FoundationInfoChanges {
    pub title: Option<String>,
    pub content: Option<String>,
    pub info_type: Option<InfoType>,
    pub display_order: Option<i32>,
    pub is_active: Option<bool>,
}

impl FoundationInfoChanges {
    pub fn apply_to(self, info: &mut FoundationInfo) {
        if let Some(v) = self.title {
            info.title = v;
        }
        if let Some(v) = self.content {
            info.content = v;
        }
        if let Some(v) = self.info_type {
            info.info_type = v;
        }
        if let Some(v) = self.display_order {
            info.display_order = v;
        }
        if let Some(v) = self.is_active {
            info.is_active = v;
        }
    }
}

// =============================================================================
// Contact messages
// =============================================================================

/// Message sent through the public contact form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct ContactMessage {
    pub id: i64,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: String,
    pub message: String,
    pub status: ContactStatus,
    pub handled: bool,
    pub response_message: Option<String>,
    pub responded_at: Option<DateTime<Utc>>,
    pub responded_by: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ContactMessage {
    pub fn mark_handled(&mut self, now: DateTime<Utc>) {
        self.handled = true;
        self.updated_at = now;
    }

    pub fn set_status(&mut self, status: ContactStatus, now: DateTime<Utc>) {
        self.status = status;
        if matches!(status, ContactStatus::Responded | ContactStatus::Closed) {
            self.handled = true;
        }
        self.updated_at = now;
    }

    /// Record the reply sent to the author.
    pub fn respond(&mut self, response: String, responder: String, now: DateTime<Utc>) {
        self.response_message = Some(response);
        self.responded_by = Some(responder);
        self.responded_at = Some(now);
        self.status = ContactStatus::Responded;
        self.handled = true;
        self.updated_at = now;
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewContactMessage {
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: String,
    pub message: String,
}

// =============================================================================
// Home page
// =============================================================================

/// Mission shown until an administrator writes one.
pub const DEFAULT_MISSION: &str =
    "Our mission is to serve and support our community through excellence and innovation.";

/// Ministry text shown until an administrator writes one.
pub const DEFAULT_MINISTRY_CONTENT: &str = "Ministry information will be updated soon.";

/// Headline figures shown on the home page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct SiteStats {
    pub total_users: i64,
    pub total_events: i64,
    pub total_partners: i64,
}

impl SiteStats {
    /// Parse stored JSON, falling back to zeroes on malformed input.
    pub fn from_json(raw: &str) -> Self {
        serde_json::from_str(raw).unwrap_or_default()
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }
}

/// Singleton row holding the home page texts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct SiteInfo {
    pub id: i64,
    pub mission: String,
    pub stats: SiteStats,
    pub ministry_content: String,
    pub updated_at: DateTime<Utc>,
}

/// Public home page payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct HomeContent {
    pub mission: String,
    pub stats: SiteStats,
}

impl From<SiteInfo> for HomeContent {
    fn from(info: SiteInfo) -> Self {
        Self {
            mission: info.mission,
            stats: info.stats,
        }
    }
}
