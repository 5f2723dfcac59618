//! Site info database entity for SeaORM.

use sea_orm::entity::prelude::*;

use domain::{SiteInfo, SiteStats};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "site_info")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(column_type = "Text")]
    pub mission: String,
    #[sea_orm(column_type = "Text")]
    pub stats_json: String,
    #[sea_orm(column_type = "Text")]
    pub ministry_content: String,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for SiteInfo {
    fn from(model: Model) -> Self {
        SiteInfo {
            id: model.id,
            mission: model.mission,
            stats: SiteStats::from_json(&model.stats_json),
            ministry_content: model.ministry_content,
            updated_at: model.updated_at,
        }
    }
}
