//! Contact message database entity for SeaORM.

use sea_orm::entity::prelude::*;

use domain::{ContactMessage, ContactStatus};

use super::parse_code;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "contact_messages")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: String,
    #[sea_orm(column_type = "Text")]
    pub message: String,
    pub status: String,
    pub handled: bool,
    #[sea_orm(column_type = "Text", nullable)]
    pub response_message: Option<String>,
    pub responded_at: Option<DateTimeUtc>,
    pub responded_by: Option<String>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for ContactMessage {
    fn from(model: Model) -> Self {
        ContactMessage {
            id: model.id,
            full_name: model.full_name,
            email: model.email,
            phone: model.phone,
            subject: model.subject,
            message: model.message,
            status: parse_code(&model.status, ContactStatus::New),
            handled: model.handled,
            response_message: model.response_message,
            responded_at: model.responded_at,
            responded_by: model.responded_by,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
