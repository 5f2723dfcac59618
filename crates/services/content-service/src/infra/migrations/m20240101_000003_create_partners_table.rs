//! Migration: Create partners table.

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
                    .table(Partners::Table)
                    .if_not_exists()
                    .col(&mut id_column(Partners::Id))
                    .col(ColumnDef::new(Partners::Name).string_len(255).not_null())
                    .col(ColumnDef::new(Partners::LogoUrl).string_len(500).null())
                    .col(ColumnDef::new(Partners::Website).string_len(500).null())
                    .col(ColumnDef::new(Partners::Sector).string_len(100).not_null())
                    .col(ColumnDef::new(Partners::Phone).string_len(30).not_null())
                    .col(ColumnDef::new(Partners::Email).string_len(255).not_null())
                    .col(&mut timestamp_column(Partners::CreatedAt))
                    .col(&mut timestamp_column(Partners::UpdatedAt))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Partners::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Partners {
    Table,
    Id,
    Name,
    LogoUrl,
    Website,
    Sector,
    Phone,
    Email,
    CreatedAt,
    UpdatedAt,
}
