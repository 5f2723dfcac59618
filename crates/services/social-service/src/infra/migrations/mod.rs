//! Database migrations.
//!
//! Migration names follow the pattern: m{YYYYMMDD}_{NNNNNN}_{description}

use sea_orm_migration::prelude::*;

mod m20240101_000001_create_prestations_table;
mod m20240101_000002_create_demandes_table;
mod m20240101_000003_create_avis_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_prestations_table::Migration),
            Box::new(m20240101_000002_create_demandes_table::Migration),
            Box::new(m20240101_000003_create_avis_table::Migration),
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

/// `NUMERIC(12, 2)` money column, nullable.
pub(crate) fn amount_column<T: IntoIden>(name: T) -> ColumnDef {
    ColumnDef::new(name).decimal_len(12, 2).null().to_owned()
}
