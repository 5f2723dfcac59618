//! HTTP handlers.

pub mod health_handler;
pub mod inbox_handler;
pub mod notify_handler;
