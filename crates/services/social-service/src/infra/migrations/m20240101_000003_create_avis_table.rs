//! Migration: Create avis table.

use sea_orm_migration::prelude::*;

use super::{id_column, timestamp_column};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Avis::Table)
                    .if_not_exists()
                    .col(&mut id_column(Avis::Id))
                    .col(ColumnDef::new(Avis::UserId).big_integer().not_null())
                    .col(ColumnDef::new(Avis::UserName).string_len(255).not_null())
                    .col(ColumnDef::new(Avis::UserEmail).string_len(255).not_null())
                    .col(ColumnDef::new(Avis::PrestationId).big_integer().not_null())
                    .col(ColumnDef::new(Avis::DemandeId).big_integer().null())
                    .col(ColumnDef::new(Avis::Rating).integer().not_null())
                    .col(ColumnDef::new(Avis::Comment).string_len(1000).null())
                    .col(ColumnDef::new(Avis::Status).string_len(20).not_null().default("PENDING"))
                    .col(ColumnDef::new(Avis::IsApproved).boolean().not_null().default(false))
                    .col(ColumnDef::new(Avis::IsFeatured).boolean().not_null().default(false))
                    .col(ColumnDef::new(Avis::ModeratedAt).timestamp_with_time_zone().null())
                    .col(ColumnDef::new(Avis::ApprovedBy).string_len(255).null())
                    .col(ColumnDef::new(Avis::ApprovedAt).timestamp_with_time_zone().null())
                    .col(ColumnDef::new(Avis::AdminResponse).text().null())
                    .col(ColumnDef::new(Avis::ResponseDate).timestamp_with_time_zone().null())
                    .col(ColumnDef::new(Avis::AvisType).string_len(30).not_null().default("GENERAL"))
                    .col(ColumnDef::new(Avis::IsAnonymous).boolean().not_null().default(false))
                    .col(&mut timestamp_column(Avis::CreatedAt))
                    .col(&mut timestamp_column(Avis::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_avis_prestation_approved")
                    .table(Avis::Table)
                    .col(Avis::PrestationId)
                    .col(Avis::IsApproved)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Avis::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Avis {
    Table,
    Id,
    UserId,
    UserName,
    UserEmail,
    PrestationId,
    DemandeId,
    Rating,
    Comment,
    Status,
    IsApproved,
    IsFeatured,
    ModeratedAt,
    ApprovedBy,
    ApprovedAt,
    AdminResponse,
    ResponseDate,
    AvisType,
    IsAnonymous,
    CreatedAt,
    UpdatedAt,
}
