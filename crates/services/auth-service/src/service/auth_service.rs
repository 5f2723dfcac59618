//! Authentication service - registration, login and token lifecycle.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};
use utoipa::ToSchema;

use common::auth::TokenSubject;
use common::{AppError, AppResult, CurrentUser, JwtKeys};
use domain::{Account, AccountStatus, NewAccount, Password, UserRole, TOKEN_TYPE_BEARER};

use crate::repository::AccountRepository;

/// Registration data as received from the client.
#[derive(Debug, Clone)]
pub struct Registration {
    pub first_name: String,
    pub last_name: String,
    pub work_email: String,
    pub matricule: String,
    pub service: String,
    pub phone: Option<String>,
    pub password: String,
}

/// Public part of an account.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AccountSummary {
    pub id: i64,
    #[schema(example = "Awa")]
    pub first_name: String,
    #[schema(example = "Diallo")]
    pub last_name: String,
    #[schema(example = "awa.diallo@foundation.com")]
    pub work_email: String,
    pub service: String,
}

impl From<&Account> for AccountSummary {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id,
            first_name: account.first_name.clone(),
            last_name: account.last_name.clone(),
            work_email: account.work_email.clone(),
            service: account.service.clone(),
        }
    }
}

/// Token response returned after login or refresh.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub token: String,
    /// Always "Bearer"
    pub token_type: String,
    pub expires_at: DateTime<Utc>,
    pub roles: Vec<String>,
    pub user: AccountSummary,
}

/// Authentication service trait for dependency injection.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Create an active account with the `USER` role.
    async fn register(&self, registration: Registration) -> AppResult<Account>;

    /// Check credentials and issue a token.
    async fn login(&self, email: &str, password: &str) -> AppResult<AuthResponse>;

    /// Whether `token` has a valid signature and has not expired.
    fn validate_token(&self, token: &str) -> bool;

    /// Issue a new token from the current state of the account.
    async fn refresh(&self, user: &CurrentUser) -> AppResult<AuthResponse>;

    async fn me(&self, user: &CurrentUser) -> AppResult<AccountSummary>;
}

/// Concrete implementation of AuthService backed by the account repository.
pub struct Authenticator {
    repo: Arc<dyn AccountRepository>,
    keys: JwtKeys,
}

impl Authenticator {
    pub fn new(repo: Arc<dyn AccountRepository>, keys: JwtKeys) -> Self {
        Self { repo, keys }
    }

    fn issue_token(&self, account: &Account) -> AppResult<AuthResponse> {
        let roles = account.role_codes();
        let subject = TokenSubject {
            id: account.id,
            email: account.work_email.clone(),
            name: account.full_name(),
            matricule: Some(account.matricule.clone()),
            roles: roles.clone(),
        };
        let issued = self.keys.issue(subject, Utc::now())?;

        Ok(AuthResponse {
            token: issued.token,
            token_type: TOKEN_TYPE_BEARER.to_string(),
            expires_at: issued.expires_at,
            roles,
            user: AccountSummary::from(account),
        })
    }

    /// Load the account behind a token; it must still exist and be active.
    async fn active_account(&self, user: &CurrentUser) -> AppResult<Account> {
        let account = self
            .repo
            .find_by_id(user.id)
            .await?
            .ok_or(AppError::Unauthorized)?;

        if !account.is_active() {
            return Err(AppError::Unauthorized);
        }
        Ok(account)
    }
}

/// Emails are compared trimmed and lowercased.
pub(crate) fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[async_trait]
impl AuthService for Authenticator {
    async fn register(&self, registration: Registration) -> AppResult<Account> {
        let email = normalize_email(&registration.work_email);
        let matricule = registration.matricule.trim().to_string();

        if self.repo.exists_by_email(&email).await? {
            return Err(AppError::conflict("User with this email already exists"));
        }
        if self.repo.exists_by_matricule(&matricule).await? {
            return Err(AppError::conflict("User with this matricule already exists"));
        }

        let password_hash = Password::new(&registration.password)?.into_string();

        let account = self
            .repo
            .create(
                NewAccount {
                    first_name: registration.first_name.trim().to_string(),
                    last_name: registration.last_name.trim().to_string(),
                    work_email: email,
                    matricule,
                    service: registration.service.trim().to_string(),
                    phone: registration
                        .phone
                        .map(|p| p.trim().to_string())
                        .filter(|p| !p.is_empty()),
                    password_hash,
                },
                UserRole::User,
            )
            .await?;

        info!(user_id = account.id, "Account registered");
        Ok(account)
    }

    async fn login(&self, email: &str, password: &str) -> AppResult<AuthResponse> {
        let email = normalize_email(email);
        let found = self.repo.find_by_email(&email).await?;

        // Verify against a dummy hash for unknown accounts so both paths
        // cost one argon2 verification.
        let stored = match &found {
            Some(account) => Password::from_hash(account.password_hash.as_str()),
            None => Password::dummy(),
        };
        let password_valid = stored.verify(password);

        let account = match found {
            Some(account) if password_valid => account,
            _ => {
                warn!("Rejected login attempt");
                return Err(AppError::InvalidCredentials);
            }
        };

        if account.status != AccountStatus::Active {
            warn!(user_id = account.id, "Login attempt on inactive account");
            return Err(AppError::forbidden("Account is not active"));
        }

        info!(user_id = account.id, "User logged in");
        self.issue_token(&account)
    }

    fn validate_token(&self, token: &str) -> bool {
        self.keys.verify(token).is_ok()
    }

    async fn refresh(&self, user: &CurrentUser) -> AppResult<AuthResponse> {
        // Fresh data so role changes are picked up
        let account = self.active_account(user).await?;
        self.issue_token(&account)
    }

    async fn me(&self, user: &CurrentUser) -> AppResult<AccountSummary> {
        let account = self
            .repo
            .find_by_id(user.id)
            .await?
            .ok_or(AppError::NotFound)?;
        Ok(AccountSummary::from(&account))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email("  Awa.Diallo@Foundation.COM "), "awa.diallo@foundation.com");
    }
}
