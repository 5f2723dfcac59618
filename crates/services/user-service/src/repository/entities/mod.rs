//! SeaORM entities.

pub mod user_profile;
