//! Common utilities shared across all microservices.
//!
//! This crate provides:
//! - Unified error handling for HTTP
//! - Configuration structures
//! - Pagination, validation and health check helpers
//! - JWT verification middleware (`jwt` feature)
//! - Database wrapper and migration commands (`database` feature)
//! - Redis cache and rate limiting (`cache` feature)

pub mod config;
pub mod error;
pub mod extract;
pub mod health;
pub mod openapi;
pub mod pagination;
pub mod patterns;
pub mod server;

#[cfg(feature = "jwt")]
pub mod auth;
#[cfg(feature = "cache")]
pub mod cache;
#[cfg(feature = "database")]
pub mod db;
#[cfg(feature = "cache")]
pub mod rate_limit;

pub use config::*;
pub use error::{AppError, AppResult, OptionExt};
pub use extract::ValidatedJson;
pub use pagination::{PageParams, PageRequest, PageResponse};

#[cfg(feature = "jwt")]
pub use auth::{require_admin, CurrentUser, JwtKeys};
#[cfg(feature = "cache")]
pub use cache::Cache;
#[cfg(feature = "database")]
pub use db::{Database, MigrateAction};
