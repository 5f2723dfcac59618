//! Prestation database entity for SeaORM.

use sea_orm::entity::prelude::*;
use sea_orm::Set;

use domain::{Prestation, PrestationCategory, PrestationType};

use super::parse_code;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "prestations")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub title: String,
    pub short_description: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub prestation_type: Option<String>,
    pub category: String,
    #[sea_orm(column_type = "Decimal(Some((12, 2)))", nullable)]
    pub min_amount: Option<Decimal>,
    #[sea_orm(column_type = "Decimal(Some((12, 2)))", nullable)]
    pub max_amount: Option<Decimal>,
    pub duration_label: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub conditions: Option<String>,
    pub is_active: bool,
    pub requires_documents: bool,
    #[sea_orm(column_type = "Text", nullable)]
    pub required_documents: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub eligibility_criteria: Option<String>,
    pub processing_time_days: Option<i32>,
    pub max_requests_per_year: Option<i32>,
    pub image_url: Option<String>,
    pub display_order: i32,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::demande::Entity")]
    Demande,
}

impl Related<super::demande::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Demande.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Prestation {
    fn from(model: Model) -> Self {
        Prestation {
            id: model.id,
            title: model.title,
            short_description: model.short_description,
            description: model.description,
            prestation_type: model
                .prestation_type
                .map(|code| parse_code(&code, PrestationType::Autre)),
            category: parse_code(&model.category, PrestationCategory::Autre),
            min_amount: model.min_amount,
            max_amount: model.max_amount,
            duration_label: model.duration_label,
            conditions: model.conditions,
            is_active: model.is_active,
            requires_documents: model.requires_documents,
            required_documents: model.required_documents,
            eligibility_criteria: model.eligibility_criteria,
            processing_time_days: model.processing_time_days,
            max_requests_per_year: model.max_requests_per_year,
            image_url: model.image_url,
            display_order: model.display_order,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

pub(crate) fn write_fields(active: &mut ActiveModel, p: Prestation) {
    active.title = Set(p.title);
    active.short_description = Set(p.short_description);
    active.description = Set(p.description);
    active.prestation_type = Set(p.prestation_type.map(|t| t.as_str().to_string()));
    active.category = Set(p.category.as_str().to_string());
    active.min_amount = Set(p.min_amount);
    active.max_amount = Set(p.max_amount);
    active.duration_label = Set(p.duration_label);
    active.conditions = Set(p.conditions);
    active.is_active = Set(p.is_active);
    active.requires_documents = Set(p.requires_documents);
    active.required_documents = Set(p.required_documents);
    active.eligibility_criteria = Set(p.eligibility_criteria);
    active.processing_time_days = Set(p.processing_time_days);
    active.max_requests_per_year = Set(p.max_requests_per_year);
    active.image_url = Set(p.image_url);
    active.display_order = Set(p.display_order);
    active.created_at = Set(p.created_at);
    active.updated_at = Set(p.updated_at);
}
