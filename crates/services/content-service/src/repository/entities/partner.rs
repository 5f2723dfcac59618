//! Partner database entity for SeaORM.

use sea_orm::entity::prelude::*;

use domain::Partner;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "partners")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub logo_url: Option<String>,
    pub website: Option<String>,
    pub sector: String,
    pub phone: String,
    pub email: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Partner {
    fn from(model: Model) -> Self {
        Partner {
            id: model.id,
            name: model.name,
            logo_url: model.logo_url,
            website: model.website,
            sector: model.sector,
            phone: model.phone,
            email: model.email,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
