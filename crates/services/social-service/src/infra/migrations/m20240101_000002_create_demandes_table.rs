//! Migration: Create demandes table.

use sea_orm_migration::prelude::*;

use super::{amount_column, id_column, timestamp_column};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Demandes::Table)
                    .if_not_exists()
                    .col(&mut id_column(Demandes::Id))
                    .col(ColumnDef::new(Demandes::UserId).big_integer().not_null())
                    .col(ColumnDef::new(Demandes::UserEmail).string_len(255).not_null())
                    .col(ColumnDef::new(Demandes::UserName).string_len(255).not_null())
                    .col(ColumnDef::new(Demandes::EmployeeId).string_len(50).null())
                    .col(ColumnDef::new(Demandes::PrestationId).big_integer().not_null())
                    .col(ColumnDef::new(Demandes::PrestationTitle).string_len(200).null())
                    .col(ColumnDef::new(Demandes::Status).string_len(20).not_null().default("DRAFT"))
                    .col(&mut amount_column(Demandes::RequestedAmount))
                    .col(&mut amount_column(Demandes::ApprovedAmount))
                    .col(ColumnDef::new(Demandes::Justification).text().not_null())
                    .col(ColumnDef::new(Demandes::RejectionReason).text().null())
                    .col(ColumnDef::new(Demandes::DocumentsUploaded).text().null())
                    .col(
                        ColumnDef::new(Demandes::PriorityLevel)
                            .string_len(20)
                            .not_null()
                            .default("NORMAL"),
                    )
                    .col(ColumnDef::new(Demandes::SubmittedAt).timestamp_with_time_zone().null())
                    .col(ColumnDef::new(Demandes::ProcessedAt).timestamp_with_time_zone().null())
                    .col(ColumnDef::new(Demandes::ProcessedBy).big_integer().null())
                    .col(ColumnDef::new(Demandes::ProcessedByName).string_len(255).null())
                    .col(
                        ColumnDef::new(Demandes::ExpectedProcessingDate)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(ColumnDef::new(Demandes::PaymentReference).string_len(100).null())
                    .col(ColumnDef::new(Demandes::PaymentDate).timestamp_with_time_zone().null())
                    .col(ColumnDef::new(Demandes::AdminComment).text().null())
                    .col(&mut timestamp_column(Demandes::CreatedAt))
                    .col(&mut timestamp_column(Demandes::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_demandes_prestation")
                            .from(Demandes::Table, Demandes::PrestationId)
                            .to(Prestations::Table, Prestations::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_demandes_user_id")
                    .table(Demandes::Table)
                    .col(Demandes::UserId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_demandes_status_submitted_at")
                    .table(Demandes::Table)
                    .col(Demandes::Status)
                    .col(Demandes::SubmittedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Demandes::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Prestations {
    Table,
    Id,
}

#[derive(Iden)]
enum Demandes {
    Table,
    Id,
    UserId,
    UserEmail,
    UserName,
    EmployeeId,
    PrestationId,
    PrestationTitle,
    Status,
    RequestedAmount,
    ApprovedAmount,
    Justification,
    RejectionReason,
    DocumentsUploaded,
    PriorityLevel,
    SubmittedAt,
    ProcessedAt,
    ProcessedBy,
    ProcessedByName,
    ExpectedProcessingDate,
    PaymentReference,
    PaymentDate,
    AdminComment,
    CreatedAt,
    UpdatedAt,
}
