//! Migration: Create site_info table.

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
                    .table(SiteInfo::Table)
                    .if_not_exists()
                    .col(&mut id_column(SiteInfo::Id))
                    .col(ColumnDef::new(SiteInfo::Mission).text().not_null())
                    .col(ColumnDef::new(SiteInfo::StatsJson).text().not_null())
                    .col(ColumnDef::new(SiteInfo::MinistryContent).text().not_null())
                    .col(&mut timestamp_column(SiteInfo::UpdatedAt))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SiteInfo::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum SiteInfo {
    Table,
    Id,
    Mission,
    StatsJson,
    MinistryContent,
    UpdatedAt,
}
