//! User service - profile self-service and administration.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tracing::{info, warn};

use common::{AppError, AppResult, CurrentUser, PageRequest, PageResponse};
use domain::{ProfileChanges, UserProfile, UserRole};

use super::avatar::{avatar_extension, avatar_file_name, AVATAR_URL_PREFIX};
use crate::config::UploadConfig;
use crate::repository::{NewProfile, ProfileFilter, ProfileRepository};

/// User service trait for dependency injection.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Profile of the caller, created blank on first access.
    async fn get_me(&self, user: &CurrentUser) -> AppResult<UserProfile>;

    async fn update_me(&self, user: &CurrentUser, changes: ProfileChanges) -> AppResult<UserProfile>;

    async fn upload_avatar(
        &self,
        user: &CurrentUser,
        file_name: &str,
        data: Vec<u8>,
    ) -> AppResult<UserProfile>;

    async fn list_users(
        &self,
        filter: ProfileFilter,
        page: PageRequest,
    ) -> AppResult<PageResponse<UserProfile>>;

    /// Active profile by ID
    async fn get_user(&self, id: i64) -> AppResult<UserProfile>;

    async fn update_user(&self, id: i64, changes: ProfileChanges) -> AppResult<UserProfile>;

    async fn set_roles(&self, id: i64, roles: Vec<String>) -> AppResult<UserProfile>;

    /// Soft delete (sets deleted_at timestamp)
    async fn delete_user(&self, id: i64, admin: &CurrentUser) -> AppResult<()>;

    async fn restore_user(&self, id: i64) -> AppResult<UserProfile>;
}

/// Concrete implementation of UserService using repository.
pub struct UserManager {
    repo: Arc<dyn ProfileRepository>,
    upload: UploadConfig,
}

impl UserManager {
    pub fn new(repo: Arc<dyn ProfileRepository>, upload: UploadConfig) -> Self {
        Self { repo, upload }
    }

    async fn active_profile(&self, id: i64) -> AppResult<UserProfile> {
        self.repo
            .find_by_id(id)
            .await?
            .filter(|p| !p.is_deleted())
            .ok_or(AppError::NotFound)
    }

    async fn own_profile(&self, user: &CurrentUser) -> AppResult<UserProfile> {
        match self.repo.find_by_email(&user.email).await? {
            Some(profile) if profile.is_deleted() => {
                Err(AppError::forbidden("This profile has been deactivated"))
            }
            Some(profile) => Ok(profile),
            None => {
                info!(email = %user.email, "Creating blank profile");
                self.repo.create(blank_profile(user)).await
            }
        }
    }

    /// Apply changes after checking the matricule is not used elsewhere.
    async fn apply_changes(
        &self,
        mut profile: UserProfile,
        changes: ProfileChanges,
    ) -> AppResult<UserProfile> {
        if let Some(matricule) = changes.matricule.as_deref() {
            if profile.matricule.as_deref() != Some(matricule)
                && self.repo.matricule_taken(matricule, profile.id).await?
            {
                return Err(AppError::conflict("Matricule already in use"));
            }
        }

        changes.apply_to(&mut profile);
        self.repo.update(profile).await
    }

    async fn remove_avatar_file(&self, avatar_url: &str) {
        let Some(file_name) = avatar_url.strip_prefix(AVATAR_URL_PREFIX) else {
            return;
        };
        let path = self.upload.avatar_dir().join(file_name);
        if let Err(e) = tokio::fs::remove_file(&path).await {
            if e.kind() != std::io::ErrorKind::NotFound {
                warn!("Failed to remove old avatar {}: {}", path.display(), e);
            }
        }
    }
}

/// Blank profile seeded from the token identity.
fn blank_profile(user: &CurrentUser) -> NewProfile {
    let (first_name, last_name) = match user.name.trim().split_once(char::is_whitespace) {
        Some((first, last)) => (first.to_string(), last.trim().to_string()),
        None => (user.name.trim().to_string(), String::new()),
    };

    NewProfile {
        email: user.email.clone(),
        first_name,
        last_name,
        matricule: user.matricule.clone(),
        roles: user.roles.clone(),
    }
}

#[async_trait]
impl UserService for UserManager {
    async fn get_me(&self, user: &CurrentUser) -> AppResult<UserProfile> {
        self.own_profile(user).await
    }

    async fn update_me(&self, user: &CurrentUser, changes: ProfileChanges) -> AppResult<UserProfile> {
        let profile = self.own_profile(user).await?;
        let updated = self.apply_changes(profile, changes).await?;
        info!(profile_id = updated.id, "Profile updated by owner");
        Ok(updated)
    }

    async fn upload_avatar(
        &self,
        user: &CurrentUser,
        file_name: &str,
        data: Vec<u8>,
    ) -> AppResult<UserProfile> {
        let extension = avatar_extension(file_name, data.len(), self.upload.max_avatar_bytes)?;
        let mut profile = self.own_profile(user).await?;

        let stored_name = avatar_file_name(&user.email, &extension);
        let dir = self.upload.avatar_dir();
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|e| AppError::internal(format!("Failed to create avatar directory: {}", e)))?;
        tokio::fs::write(dir.join(&stored_name), &data)
            .await
            .map_err(|e| AppError::internal(format!("Failed to store avatar: {}", e)))?;

        let previous = profile
            .avatar_url
            .replace(format!("{}{}", AVATAR_URL_PREFIX, stored_name));
        let updated = self.repo.update(profile).await?;

        if let Some(old_url) = previous {
            self.remove_avatar_file(&old_url).await;
        }

        info!(profile_id = updated.id, "Avatar uploaded");
        Ok(updated)
    }

    async fn list_users(
        &self,
        filter: ProfileFilter,
        page: PageRequest,
    ) -> AppResult<PageResponse<UserProfile>> {
        let (profiles, total) = self.repo.search(filter, page).await?;
        Ok(PageResponse::new(profiles, page, total))
    }

    async fn get_user(&self, id: i64) -> AppResult<UserProfile> {
        self.active_profile(id).await
    }

    async fn update_user(&self, id: i64, changes: ProfileChanges) -> AppResult<UserProfile> {
        let profile = self.active_profile(id).await?;
        let updated = self.apply_changes(profile, changes).await?;
        info!(profile_id = id, "Profile updated by administrator");
        Ok(updated)
    }

    async fn set_roles(&self, id: i64, roles: Vec<String>) -> AppResult<UserProfile> {
        let mut codes: Vec<String> = Vec::new();
        for role in &roles {
            let code = role.parse::<UserRole>()?.as_str().to_string();
            if !codes.contains(&code) {
                codes.push(code);
            }
        }
        if codes.is_empty() {
            return Err(AppError::validation("At least one role is required"));
        }

        let mut profile = self.active_profile(id).await?;
        profile.roles = codes;
        let updated = self.repo.update(profile).await?;
        info!(profile_id = id, roles = ?updated.roles, "Roles updated");
        Ok(updated)
    }

    async fn delete_user(&self, id: i64, admin: &CurrentUser) -> AppResult<()> {
        let mut profile = self.active_profile(id).await?;
        if profile.email.eq_ignore_ascii_case(&admin.email) {
            return Err(AppError::validation("Cannot delete your own account"));
        }

        profile.deleted_at = Some(Utc::now());
        self.repo.update(profile).await?;
        info!(profile_id = id, "Profile soft deleted");
        Ok(())
    }

    async fn restore_user(&self, id: i64) -> AppResult<UserProfile> {
        let mut profile = self.repo.find_by_id(id).await?.ok_or(AppError::NotFound)?;
        if !profile.is_deleted() {
            return Err(AppError::validation("User is not deleted"));
        }

        profile.deleted_at = None;
        let restored = self.repo.update(profile).await?;
        info!(profile_id = id, "Profile restored");
        Ok(restored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_profile_splits_name() {
        let user = CurrentUser {
            id: 1,
            email: "awa.diallo@foundation.com".to_string(),
            name: "Awa Marie Diallo".to_string(),
            matricule: Some("EMP12345".to_string()),
            roles: vec!["USER".to_string()],
        };
        let profile = blank_profile(&user);
        assert_eq!(profile.first_name, "Awa");
        assert_eq!(profile.last_name, "Marie Diallo");
        assert_eq!(profile.matricule.as_deref(), Some("EMP12345"));
    }
}
