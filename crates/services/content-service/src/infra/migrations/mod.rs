//! Database migrations.
//!
//! Migration names follow the pattern: m{YYYYMMDD}_{NNNNNN}_{description}

use sea_orm_migration::prelude::*;

mod m20240101_000001_create_news_table;
mod m20240101_000002_create_events_table;
mod m20240101_000003_create_partners_table;
mod m20240101_000004_create_foundation_info_table;
mod m20240101_000005_create_contact_messages_table;
mod m20240101_000006_create_site_info_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_news_table::Migration),
            Box::new(m20240101_000002_create_events_table::Migration),
            Box::new(m20240101_000003_create_partners_table::Migration),
            Box::new(m20240101_000004_create_foundation_info_table::Migration),
            Box::new(m20240101_000005_create_contact_messages_table::Migration),
            Box::new(m20240101_000006_create_site_info_table::Migration),
        ]
    }
}

/// `BIGSERIAL` primary key column.
pub(crate) fn id_column<T: IntoIden>(name: T) -> ColumnDef {
    ColumnDef::new(name)
        .big_integer()
        .not_null()
        .auto_increment()
        .primary_key()
        .to_owned()
}

/// `timestamptz NOT NULL DEFAULT now()` column.
pub(crate) fn timestamp_column<T: IntoIden>(name: T) -> ColumnDef {
    ColumnDef::new(name)
        .timestamp_with_time_zone()
        .not_null()
        .default(Expr::current_timestamp())
        .to_owned()
}
