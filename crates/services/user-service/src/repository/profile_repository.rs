//! Profile repository implementation with soft delete support.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};

use common::db::contains_ci;
use common::{AppError, AppResult, PageRequest};
use domain::UserProfile;

use super::entities::user_profile::{self, ActiveModel, Entity as ProfileEntity};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Data for the blank profile created on first access.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProfile {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub matricule: Option<String>,
    pub roles: Vec<String>,
}

/// Admin listing filters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileFilter {
    /// Case-insensitive match on names, email and matricule
    pub search: Option<String>,
    /// Exact service code
    pub service: Option<String>,
}

/// Profile repository trait for dependency injection.
///
/// Lookups return soft-deleted rows too; listings exclude them.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<UserProfile>>;

    async fn find_by_email(&self, email: &str) -> AppResult<Option<UserProfile>>;

    /// Whether another profile already uses `matricule`.
    async fn matricule_taken(&self, matricule: &str, exclude_id: i64) -> AppResult<bool>;

    async fn create(&self, profile: NewProfile) -> AppResult<UserProfile>;

    /// Persist every mutable field of `profile`.
    async fn update(&self, profile: UserProfile) -> AppResult<UserProfile>;

    /// Active profiles ordered by last name then first name.
    async fn search(
        &self,
        filter: ProfileFilter,
        page: PageRequest,
    ) -> AppResult<(Vec<UserProfile>, u64)>;
}

/// SeaORM implementation of ProfileRepository
pub struct ProfileStore {
    db: DatabaseConnection,
}

impl ProfileStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProfileRepository for ProfileStore {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<UserProfile>> {
        let result = ProfileEntity::find_by_id(id).one(&self.db).await?;
        Ok(result.map(UserProfile::from))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<UserProfile>> {
        let result = ProfileEntity::find()
            .filter(user_profile::Column::Email.eq(email))
            .one(&self.db)
            .await?;
        Ok(result.map(UserProfile::from))
    }

    async fn matricule_taken(&self, matricule: &str, exclude_id: i64) -> AppResult<bool> {
        let count = ProfileEntity::find()
            .filter(user_profile::Column::Matricule.eq(matricule))
            .filter(user_profile::Column::Id.ne(exclude_id))
            .count(&self.db)
            .await?;
        Ok(count > 0)
    }

    async fn create(&self, profile: NewProfile) -> AppResult<UserProfile> {
        let now = chrono::Utc::now();
        let active_model = ActiveModel {
            email: Set(profile.email),
            first_name: Set(profile.first_name),
            last_name: Set(profile.last_name),
            phone: Set(None),
            matricule: Set(profile.matricule),
            service_code: Set(None),
            address: Set(None),
            birth_date: Set(None),
            family_status: Set(None),
            children_count: Set(None),
            avatar_url: Set(None),
            notif_email: Set(true),
            notif_news: Set(true),
            notif_events: Set(true),
            roles: Set(profile.roles.join(",")),
            created_at: Set(now),
            updated_at: Set(now),
            deleted_at: Set(None),
            ..Default::default()
        };

        let model = active_model.insert(&self.db).await?;
        Ok(UserProfile::from(model))
    }

    async fn update(&self, profile: UserProfile) -> AppResult<UserProfile> {
        let existing = ProfileEntity::find_by_id(profile.id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: ActiveModel = existing.into();
        active.first_name = Set(profile.first_name);
        active.last_name = Set(profile.last_name);
        active.phone = Set(profile.phone);
        active.matricule = Set(profile.matricule);
        active.service_code = Set(profile.service_code);
        active.address = Set(profile.address);
        active.birth_date = Set(profile.birth_date);
        active.family_status = Set(profile.family_status);
        active.children_count = Set(profile.children_count);
        active.avatar_url = Set(profile.avatar_url);
        active.notif_email = Set(profile.notif_email);
        active.notif_news = Set(profile.notif_news);
        active.notif_events = Set(profile.notif_events);
        active.roles = Set(profile.roles.join(","));
        active.deleted_at = Set(profile.deleted_at);
        active.updated_at = Set(chrono::Utc::now());

        let model = active.update(&self.db).await?;
        Ok(UserProfile::from(model))
    }

    async fn search(
        &self,
        filter: ProfileFilter,
        page: PageRequest,
    ) -> AppResult<(Vec<UserProfile>, u64)> {
        let mut query = ProfileEntity::find().filter(user_profile::Column::DeletedAt.is_null());

        if let Some(term) = filter.search.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
            query = query.filter(
                Condition::any()
                    .add(contains_ci(user_profile::Column::FirstName, term))
                    .add(contains_ci(user_profile::Column::LastName, term))
                    .add(contains_ci(user_profile::Column::Email, term))
                    .add(contains_ci(user_profile::Column::Matricule, term)),
            );
        }
        if let Some(service) = filter.service.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            query = query.filter(user_profile::Column::ServiceCode.eq(service));
        }

        let paginator = query
            .order_by_asc(user_profile::Column::LastName)
            .order_by_asc(user_profile::Column::FirstName)
            .paginate(&self.db, page.size);

        let total = paginator.num_items().await?;
        let models = paginator.fetch_page(page.index()).await?;

        Ok((models.into_iter().map(UserProfile::from).collect(), total))
    }
}
