//! Migration: Create user_profiles table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(UserProfiles::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(UserProfiles::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(UserProfiles::Email)
                            .string_len(255)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(UserProfiles::FirstName).string_len(50).not_null().default(""))
                    .col(ColumnDef::new(UserProfiles::LastName).string_len(50).not_null().default(""))
                    .col(ColumnDef::new(UserProfiles::Phone).string_len(20).null())
                    .col(ColumnDef::new(UserProfiles::Matricule).string_len(20).null().unique_key())
                    .col(ColumnDef::new(UserProfiles::ServiceCode).string_len(100).null())
                    .col(ColumnDef::new(UserProfiles::Address).string_len(500).null())
                    .col(ColumnDef::new(UserProfiles::BirthDate).date().null())
                    .col(ColumnDef::new(UserProfiles::FamilyStatus).string_len(50).null())
                    .col(ColumnDef::new(UserProfiles::ChildrenCount).integer().null())
                    .col(ColumnDef::new(UserProfiles::AvatarUrl).string_len(500).null())
                    .col(ColumnDef::new(UserProfiles::NotifEmail).boolean().not_null().default(true))
                    .col(ColumnDef::new(UserProfiles::NotifNews).boolean().not_null().default(true))
                    .col(ColumnDef::new(UserProfiles::NotifEvents).boolean().not_null().default(true))
                    .col(ColumnDef::new(UserProfiles::Roles).string_len(255).not_null().default(""))
                    .col(
                        ColumnDef::new(UserProfiles::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(UserProfiles::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(UserProfiles::DeletedAt).timestamp_with_time_zone().null())
                    .to_owned(),
            )
            .await?;

        // Admin listings filter on active rows
        manager
            .create_index(
                Index::create()
                    .name("idx_user_profiles_deleted_at")
                    .table(UserProfiles::Table)
                    .col(UserProfiles::DeletedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(UserProfiles::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum UserProfiles {
    Table,
    Id,
    Email,
    FirstName,
    LastName,
    Phone,
    Matricule,
    ServiceCode,
    Address,
    BirthDate,
    FamilyStatus,
    ChildrenCount,
    AvatarUrl,
    NotifEmail,
    NotifNews,
    NotifEvents,
    Roles,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}
