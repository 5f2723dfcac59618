//! SeaORM entities.

pub mod avis;
pub mod demande;
pub mod prestation;

use std::str::FromStr;

use tracing::warn;

/// Parse a stored code, falling back when the column holds an unknown value.
pub(crate) fn parse_code<T: FromStr>(raw: &str, fallback: T) -> T {
    raw.parse().unwrap_or_else(|_| {
        warn!("Unknown stored code '{}', using fallback", raw);
        fallback
    })
}
