//! Profile database entity for SeaORM.

use sea_orm::entity::prelude::*;

use domain::UserProfile;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "user_profiles")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    #[sea_orm(unique)]
    pub matricule: Option<String>,
    pub service_code: Option<String>,
    pub address: Option<String>,
    pub birth_date: Option<Date>,
    pub family_status: Option<String>,
    pub children_count: Option<i32>,
    pub avatar_url: Option<String>,
    pub notif_email: bool,
    pub notif_news: bool,
    pub notif_events: bool,
    /// Comma-joined role codes
    pub roles: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
    /// Soft delete timestamp (NULL = active, set = deleted)
    pub deleted_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

pub(crate) fn split_roles(joined: &str) -> Vec<String> {
    joined
        .split(',')
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .map(str::to_string)
        .collect()
}

/// Convert database model to domain entity
impl From<Model> for UserProfile {
    fn from(model: Model) -> Self {
        UserProfile {
            id: model.id,
            email: model.email,
            first_name: model.first_name,
            last_name: model.last_name,
            phone: model.phone,
            matricule: model.matricule,
            service_code: model.service_code,
            address: model.address,
            birth_date: model.birth_date,
            family_status: model.family_status,
            children_count: model.children_count,
            avatar_url: model.avatar_url,
            notif_email: model.notif_email,
            notif_news: model.notif_news,
            notif_events: model.notif_events,
            roles: split_roles(&model.roles),
            created_at: model.created_at,
            updated_at: model.updated_at,
            deleted_at: model.deleted_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_roles_ignores_blanks() {
        assert_eq!(split_roles("USER, ADMIN,"), vec!["USER", "ADMIN"]);
        assert!(split_roles("").is_empty());
    }
}
