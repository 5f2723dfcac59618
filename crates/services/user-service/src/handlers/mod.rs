//! HTTP handlers.

pub mod admin_handler;
pub mod health_handler;
pub mod profile_handler;
