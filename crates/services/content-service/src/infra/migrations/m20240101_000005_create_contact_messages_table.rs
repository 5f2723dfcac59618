//! Migration: Create contact_messages table.

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
                    .table(ContactMessages::Table)
                    .if_not_exists()
                    .col(&mut id_column(ContactMessages::Id))
                    .col(ColumnDef::new(ContactMessages::FullName).string_len(255).not_null())
                    .col(ColumnDef::new(ContactMessages::Email).string_len(255).not_null())
                    .col(ColumnDef::new(ContactMessages::Phone).string_len(30).null())
                    .col(ColumnDef::new(ContactMessages::Subject).string_len(255).not_null())
                    .col(ColumnDef::new(ContactMessages::Message).text().not_null())
                    .col(ColumnDef::new(ContactMessages::Status).string_len(20).not_null().default("NEW"))
                    .col(ColumnDef::new(ContactMessages::Handled).boolean().not_null().default(false))
                    .col(ColumnDef::new(ContactMessages::ResponseMessage).text().null())
                    .col(
                        ColumnDef::new(ContactMessages::RespondedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(ColumnDef::new(ContactMessages::RespondedBy).string_len(255).null())
                    .col(&mut timestamp_column(ContactMessages::CreatedAt))
                    .col(&mut timestamp_column(ContactMessages::UpdatedAt))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ContactMessages::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum ContactMessages {
    Table,
    Id,
    FullName,
    Email,
    Phone,
    Subject,
    Message,
    Status,
    Handled,
    ResponseMessage,
    RespondedAt,
    RespondedBy,
    CreatedAt,
    UpdatedAt,
}
