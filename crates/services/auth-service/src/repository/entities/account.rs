//! Account database entity for SeaORM.

use sea_orm::entity::prelude::*;

use domain::{Account, AccountStatus, UserRole};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    #[sea_orm(unique)]
    pub work_email: String,
    #[sea_orm(unique)]
    pub matricule: String,
    pub service: String,
    pub phone: Option<String>,
    pub password_hash: String,
    pub status: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::account_role::Entity")]
    AccountRole,
}

impl Related<super::account_role::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AccountRole.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Build the domain account with its resolved role names.
    ///
    /// Unknown stored values fall back to the least privileged option.
    pub fn into_account(self, role_names: &[String]) -> Account {
        let roles = role_names
            .iter()
            .filter_map(|name| name.parse::<UserRole>().ok())
            .collect();

        Account {
            id: self.id,
            first_name: self.first_name,
            last_name: self.last_name,
            work_email: self.work_email,
            matricule: self.matricule,
            service: self.service,
            phone: self.phone,
            password_hash: self.password_hash,
            status: self.status.parse().unwrap_or(AccountStatus::Suspended),
            roles,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}
