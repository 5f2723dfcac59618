//! Foundation info database entity for SeaORM.

use sea_orm::entity::prelude::*;

use domain::{FoundationInfo, InfoType};

use super::parse_code;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "foundation_info")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub info_type: String,
    pub display_order: i32,
    pub is_active: bool,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for FoundationInfo {
    fn from(model: Model) -> Self {
        FoundationInfo {
            id: model.id,
            title: model.title,
            content: model.content,
            info_type: parse_code(&model.info_type, InfoType::Other),
            display_order: model.display_order,
            is_active: model.is_active,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
