//! Avis database entity for SeaORM.

use sea_orm::entity::prelude::*;
use sea_orm::Set;

use domain::{Avis, AvisStatus, AvisType};

use super::parse_code;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "avis")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub user_id: i64,
    pub user_name: String,
    pub user_email: String,
    pub prestation_id: i64,
    pub demande_id: Option<i64>,
    pub rating: i32,
    pub comment: Option<String>,
    pub status: String,
    pub is_approved: bool,
    pub is_featured: bool,
    pub moderated_at: Option<DateTimeUtc>,
    pub approved_by: Option<String>,
    pub approved_at: Option<DateTimeUtc>,
    #[sea_orm(column_type = "Text", nullable)]
    pub admin_response: Option<String>,
    pub response_date: Option<DateTimeUtc>,
    pub avis_type: String,
    pub is_anonymous: bool,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Avis {
    fn from(model: Model) -> Self {
        Avis {
            id: model.id,
            user_id: model.user_id,
            user_name: model.user_name,
            user_email: model.user_email,
            prestation_id: model.prestation_id,
            demande_id: model.demande_id,
            rating: model.rating,
            comment: model.comment,
            status: parse_code(&model.status, AvisStatus::Pending),
            is_approved: model.is_approved,
            is_featured: model.is_featured,
            moderated_at: model.moderated_at,
            approved_by: model.approved_by,
            approved_at: model.approved_at,
            admin_response: model.admin_response,
            response_date: model.response_date,
            avis_type: parse_code(&model.avis_type, AvisType::General),
            is_anonymous: model.is_anonymous,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

pub(crate) fn write_fields(active: &mut ActiveModel, a: Avis) {
    active.user_id = Set(a.user_id);
    active.user_name = Set(a.user_name);
    active.user_email = Set(a.user_email);
    active.prestation_id = Set(a.prestation_id);
    active.demande_id = Set(a.demande_id);
    active.rating = Set(a.rating);
    active.comment = Set(a.comment);
    active.status = Set(a.status.as_str().to_string());
    active.is_approved = Set(a.is_approved);
    active.is_featured = Set(a.is_featured);
    active.moderated_at = Set(a.moderated_at);
    active.approved_by = Set(a.approved_by);
    active.approved_at = Set(a.approved_at);
    active.admin_response = Set(a.admin_response);
    active.response_date = Set(a.response_date);
    active.avis_type = Set(a.avis_type.as_str().to_string());
    active.is_anonymous = Set(a.is_anonymous);
    active.created_at = Set(a.created_at);
    active.updated_at = Set(a.updated_at);
}
