//! Repository layer for data access.

pub mod entities;
mod profile_repository;

pub use profile_repository::{NewProfile, ProfileFilter, ProfileRepository, ProfileStore};

#[cfg(any(test, feature = "test-utils"))]
pub use profile_repository::MockProfileRepository;
