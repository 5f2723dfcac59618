//! Infrastructure layer - database and migrations.

pub mod migrations;

pub use migrations::Migrator;

/// Database handle bound to this service's migrator.
pub type Database = common::Database<Migrator>;
