//! Migration: Create prestations table.

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
                    .table(Prestations::Table)
                    .if_not_exists()
                    .col(&mut id_column(Prestations::Id))
                    .col(ColumnDef::new(Prestations::Title).string_len(200).not_null())
                    .col(ColumnDef::new(Prestations::ShortDescription).string_len(500).null())
                    .col(ColumnDef::new(Prestations::Description).text().null())
                    .col(ColumnDef::new(Prestations::PrestationType).string_len(30).null())
                    .col(ColumnDef::new(Prestations::Category).string_len(30).not_null())
                    .col(&mut amount_column(Prestations::MinAmount))
                    .col(&mut amount_column(Prestations::MaxAmount))
                    .col(ColumnDef::new(Prestations::DurationLabel).string_len(100).null())
                    .col(ColumnDef::new(Prestations::Conditions).text().null())
                    .col(ColumnDef::new(Prestations::IsActive).boolean().not_null().default(true))
                    .col(
                        ColumnDef::new(Prestations::RequiresDocuments)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Prestations::RequiredDocuments).text().null())
                    .col(ColumnDef::new(Prestations::EligibilityCriteria).text().null())
                    .col(ColumnDef::new(Prestations::ProcessingTimeDays).integer().null())
                    .col(ColumnDef::new(Prestations::MaxRequestsPerYear).integer().null())
                    .col(ColumnDef::new(Prestations::ImageUrl).string_len(500).null())
                    .col(ColumnDef::new(Prestations::DisplayOrder).integer().not_null().default(0))
                    .col(&mut timestamp_column(Prestations::CreatedAt))
                    .col(&mut timestamp_column(Prestations::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_prestations_active_order")
                    .table(Prestations::Table)
                    .col(Prestations::IsActive)
                    .col(Prestations::DisplayOrder)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Prestations::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Prestations {
    Table,
    Id,
    Title,
    ShortDescription,
    Description,
    PrestationType,
    Category,
    MinAmount,
    MaxAmount,
    DurationLabel,
    Conditions,
    IsActive,
    RequiresDocuments,
    RequiredDocuments,
    EligibilityCriteria,
    ProcessingTimeDays,
    MaxRequestsPerYear,
    ImageUrl,
    DisplayOrder,
    CreatedAt,
    UpdatedAt,
}
