//! Account repository: accounts plus their role assignments.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    Set, TransactionTrait,
};

use common::{AppError, AppResult};
use domain::{Account, AccountStatus, NewAccount, UserRole};

use super::entities::{account, account_role, role};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Account repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Find account by work email (already normalized)
    async fn find_by_email(&self, email: &str) -> AppResult<Option<Account>>;

    /// Find account by ID
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Account>>;

    async fn exists_by_email(&self, email: &str) -> AppResult<bool>;

    async fn exists_by_matricule(&self, matricule: &str) -> AppResult<bool>;

    /// Insert an active account holding `role`.
    async fn create(&self, account: NewAccount, role: UserRole) -> AppResult<Account>;
}

/// SeaORM implementation of AccountRepository
pub struct AccountStore {
    db: DatabaseConnection,
}

impl AccountStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn load_roles(&self, model: account::Model) -> AppResult<Account> {
        let role_ids: Vec<i64> = account_role::Entity::find()
            .filter(account_role::Column::UserId.eq(model.id))
            .all(&self.db)
            .await?
            .into_iter()
            .map(|link| link.role_id)
            .collect();

        let names: Vec<String> = if role_ids.is_empty() {
            Vec::new()
        } else {
            role::Entity::find()
                .filter(role::Column::Id.is_in(role_ids))
                .all(&self.db)
                .await?
                .into_iter()
                .map(|r| r.name)
                .collect()
        };

        Ok(model.into_account(&names))
    }
}

#[async_trait]
impl AccountRepository for AccountStore {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<Account>> {
        let found = account::Entity::find()
            .filter(account::Column::WorkEmail.eq(email))
            .one(&self.db)
            .await?;

        match found {
            Some(model) => Ok(Some(self.load_roles(model).await?)),
            None => Ok(None),
        }
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Account>> {
        match account::Entity::find_by_id(id).one(&self.db).await? {
            Some(model) => Ok(Some(self.load_roles(model).await?)),
            None => Ok(None),
        }
    }

    async fn exists_by_email(&self, email: &str) -> AppResult<bool> {
        let count = account::Entity::find()
            .filter(account::Column::WorkEmail.eq(email))
            .count(&self.db)
            .await?;
        Ok(count > 0)
    }

    async fn exists_by_matricule(&self, matricule: &str) -> AppResult<bool> {
        let count = account::Entity::find()
            .filter(account::Column::Matricule.eq(matricule))
            .count(&self.db)
            .await?;
        Ok(count > 0)
    }

    async fn create(&self, new: NewAccount, role_name: UserRole) -> AppResult<Account> {
        let role = role::Entity::find()
            .filter(role::Column::Name.eq(role_name.as_str()))
            .one(&self.db)
            .await?
            .ok_or_else(|| {
                AppError::internal(format!("Default role {} not found", role_name))
            })?;

        let txn = self.db.begin().await?;
        let now = chrono::Utc::now();

        let model = account::ActiveModel {
            first_name: Set(new.first_name),
            last_name: Set(new.last_name),
            work_email: Set(new.work_email),
            matricule: Set(new.matricule),
            service: Set(new.service),
            phone: Set(new.phone),
            password_hash: Set(new.password_hash),
            status: Set(AccountStatus::Active.as_str().to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        account_role::ActiveModel {
            user_id: Set(model.id),
            role_id: Set(role.id),
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;

        Ok(model.into_account(&[role.name]))
    }
}
