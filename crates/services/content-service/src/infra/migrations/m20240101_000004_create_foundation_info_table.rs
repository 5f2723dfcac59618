//! Migration: Create foundation_info table.

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
                    .table(FoundationInfo::Table)
                    .if_not_exists()
                    .col(&mut id_column(FoundationInfo::Id))
                    .col(ColumnDef::new(FoundationInfo::Title).string_len(255).not_null())
                    .col(ColumnDef::new(FoundationInfo::Content).text().not_null())
                    .col(ColumnDef::new(FoundationInfo::InfoType).string_len(30).not_null())
                    .col(ColumnDef::new(FoundationInfo::DisplayOrder).integer().not_null().default(0))
                    .col(ColumnDef::new(FoundationInfo::IsActive).boolean().not_null().default(true))
                    .col(&mut timestamp_column(FoundationInfo::CreatedAt))
                    .col(&mut timestamp_column(FoundationInfo::UpdatedAt))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(FoundationInfo::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum FoundationInfo {
    Table,
    Id,
    Title,
    Content,
    InfoType,
    DisplayOrder,
    IsActive,
    CreatedAt,
    UpdatedAt,
}
