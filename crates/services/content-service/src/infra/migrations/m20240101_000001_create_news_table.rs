//! Migration: Create news table.

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
                    .table(News::Table)
                    .if_not_exists()
                    .col(&mut id_column(News::Id))
                    .col(ColumnDef::new(News::Title).string_len(255).not_null())
                    .col(ColumnDef::new(News::Slug).string_len(255).not_null().unique_key())
                    .col(ColumnDef::new(News::Body).text().not_null())
                    .col(ColumnDef::new(News::ImageUrl).string_len(500).null())
                    .col(ColumnDef::new(News::Category).string_len(100).not_null())
                    .col(ColumnDef::new(News::TagsJson).text().not_null().default("[]"))
                    .col(ColumnDef::new(News::AuthorId).big_integer().null())
                    .col(ColumnDef::new(News::AuthorName).string_len(255).null())
                    .col(ColumnDef::new(News::Status).string_len(20).not_null().default("DRAFT"))
                    .col(ColumnDef::new(News::Featured).boolean().not_null().default(false))
                    .col(ColumnDef::new(News::ViewCount).big_integer().not_null().default(0))
                    .col(ColumnDef::new(News::PublishedAt).timestamp_with_time_zone().null())
                    .col(&mut timestamp_column(News::CreatedAt))
                    .col(&mut timestamp_column(News::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_news_status_published_at")
                    .table(News::Table)
                    .col(News::Status)
                    .col(News::PublishedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(News::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum News {
    Table,
    Id,
    Title,
    Slug,
    Body,
    ImageUrl,
    Category,
    TagsJson,
    AuthorId,
    AuthorName,
    Status,
    Featured,
    ViewCount,
    PublishedAt,
    CreatedAt,
    UpdatedAt,
}
