//! Repository layer for data access.

pub mod entities;
mod avis_repository;
mod demande_repository;
mod prestation_repository;

pub use avis_repository::{AvisListing, AvisRepository, AvisStats, AvisStore};
pub use demande_repository::{DemandeListing, DemandeRepository, DemandeStats, DemandeStore};
pub use prestation_repository::{PrestationFilter, PrestationRepository, PrestationStore};

#[cfg(any(test, feature = "test-utils"))]
pub use avis_repository::MockAvisRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use demande_repository::MockDemandeRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use prestation_repository::MockPrestationRepository;
