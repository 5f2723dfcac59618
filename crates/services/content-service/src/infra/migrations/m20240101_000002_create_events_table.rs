//! Migration: Create events table.

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
                    .table(Events::Table)
                    .if_not_exists()
                    .col(&mut id_column(Events::Id))
                    .col(ColumnDef::new(Events::Title).string_len(255).not_null())
                    .col(ColumnDef::new(Events::Description).text().null())
                    .col(ColumnDef::new(Events::StartDate).timestamp_with_time_zone().not_null())
                    .col(ColumnDef::new(Events::EndDate).timestamp_with_time_zone().null())
                    .col(ColumnDef::new(Events::Location).string_len(255).null())
                    .col(ColumnDef::new(Events::ImageUrl).string_len(500).null())
                    .col(ColumnDef::new(Events::EventType).string_len(30).not_null().default("OTHER"))
                    .col(ColumnDef::new(Events::Status).string_len(20).not_null().default("DRAFT"))
                    .col(ColumnDef::new(Events::MaxParticipants).integer().null())
                    .col(ColumnDef::new(Events::CurrentParticipants).integer().not_null().default(0))
                    .col(
                        ColumnDef::new(Events::RegistrationRequired)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Events::RegistrationDeadline)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(ColumnDef::new(Events::OrganizerId).big_integer().null())
                    .col(ColumnDef::new(Events::OrganizerName).string_len(255).null())
                    .col(ColumnDef::new(Events::PublishedAt).timestamp_with_time_zone().null())
                    .col(&mut timestamp_column(Events::CreatedAt))
                    .col(&mut timestamp_column(Events::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_events_status_start_date")
                    .table(Events::Table)
                    .col(Events::Status)
                    .col(Events::StartDate)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Events::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Events {
    Table,
    Id,
    Title,
    Description,
    StartDate,
    EndDate,
    Location,
    ImageUrl,
    EventType,
    Status,
    MaxParticipants,
    CurrentParticipants,
    RegistrationRequired,
    RegistrationDeadline,
    OrganizerId,
    OrganizerName,
    PublishedAt,
    CreatedAt,
    UpdatedAt,
}
