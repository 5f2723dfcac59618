//! HTTP handlers.

pub mod auth_handler;
pub mod health_handler;
