//! Profile management business logic.

mod avatar;
mod user_service;

pub use avatar::{avatar_extension, avatar_file_name};
pub use user_service::{UserManager, UserService};
