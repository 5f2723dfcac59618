//! Demande database entity for SeaORM.

use sea_orm::entity::prelude::*;
use sea_orm::Set;

use domain::{Demande, DemandeStatus, PriorityLevel};

use super::parse_code;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "demandes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub user_id: i64,
    pub user_email: String,
    pub user_name: String,
    pub employee_id: Option<String>,
    pub prestation_id: i64,
    pub prestation_title: Option<String>,
    pub status: String,
    #[sea_orm(column_type = "Decimal(Some((12, 2)))", nullable)]
    pub requested_amount: Option<Decimal>,
    #[sea_orm(column_type = "Decimal(Some((12, 2)))", nullable)]
    pub approved_amount: Option<Decimal>,
    #[sea_orm(column_type = "Text")]
    pub justification: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub rejection_reason: Option<String>,
    /// Comma-separated file names
    #[sea_orm(column_type = "Text", nullable)]
    pub documents_uploaded: Option<String>,
    pub priority_level: String,
    pub submitted_at: Option<DateTimeUtc>,
    pub processed_at: Option<DateTimeUtc>,
    pub processed_by: Option<i64>,
    pub processed_by_name: Option<String>,
    pub expected_processing_date: Option<DateTimeUtc>,
    pub payment_reference: Option<String>,
    pub payment_date: Option<DateTimeUtc>,
    #[sea_orm(column_type = "Text", nullable)]
    pub admin_comment: Option<String>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::prestation::Entity",
        from = "Column::PrestationId",
        to = "super::prestation::Column::Id"
    )]
    Prestation,
}

impl Related<super::prestation::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Prestation.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

fn split_documents(raw: Option<String>) -> Vec<String> {
    raw.map(|s| {
        s.split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(String::from)
            .collect()
    })
    .unwrap_or_default()
}

fn join_documents(documents: Vec<String>) -> Option<String> {
    if documents.is_empty() {
        None
    } else {
        Some(documents.join(","))
    }
}

impl From<Model> for Demande {
    fn from(model: Model) -> Self {
        Demande {
            id: model.id,
            user_id: model.user_id,
            user_email: model.user_email,
            user_name: model.user_name,
            employee_id: model.employee_id,
            prestation_id: model.prestation_id,
            prestation_title: model.prestation_title,
            status: parse_code(&model.status, DemandeStatus::Draft),
            requested_amount: model.requested_amount,
            approved_amount: model.approved_amount,
            justification: model.justification,
            rejection_reason: model.rejection_reason,
            documents_uploaded: split_documents(model.documents_uploaded),
            priority_level: parse_code(&model.priority_level, PriorityLevel::Normal),
            submitted_at: model.submitted_at,
            processed_at: model.processed_at,
            processed_by: model.processed_by,
            processed_by_name: model.processed_by_name,
            expected_processing_date: model.expected_processing_date,
            payment_reference: model.payment_reference,
            payment_date: model.payment_date,
            admin_comment: model.admin_comment,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

pub(crate) fn write_fields(active: &mut ActiveModel, d: Demande) {
    active.user_id = Set(d.user_id);
    active.user_email = Set(d.user_email);
    active.user_name = Set(d.user_name);
    active.employee_id = Set(d.employee_id);
    active.prestation_id = Set(d.prestation_id);
    active.prestation_title = Set(d.prestation_title);
    active.status = Set(d.status.as_str().to_string());
    active.requested_amount = Set(d.requested_amount);
    active.approved_amount = Set(d.approved_amount);
    active.justification = Set(d.justification);
    active.rejection_reason = Set(d.rejection_reason);
    active.documents_uploaded = Set(join_documents(d.documents_uploaded));
    active.priority_level = Set(d.priority_level.as_str().to_string());
    active.submitted_at = Set(d.submitted_at);
    active.processed_at = Set(d.processed_at);
    active.processed_by = Set(d.processed_by);
    active.processed_by_name = Set(d.processed_by_name);
    active.expected_processing_date = Set(d.expected_processing_date);
    active.payment_reference = Set(d.payment_reference);
    active.payment_date = Set(d.payment_date);
    active.admin_comment = Set(d.admin_comment);
    active.created_at = Set(d.created_at);
    active.updated_at = Set(d.updated_at);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_documents_column_round_trip() {
        let docs = vec!["payslip.pdf".to_string(), "id card.png".to_string()];
        let stored = join_documents(docs.clone());
        assert_eq!(stored.as_deref(), Some("payslip.pdf,id card.png"));
        assert_eq!(split_documents(stored), docs);
        assert!(split_documents(Some(" , ".to_string())).is_empty());
        assert_eq!(join_documents(vec![]), None);
    }
}
