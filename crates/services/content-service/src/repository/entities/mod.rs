//! SeaORM entities.

pub mod contact_message;
pub mod event;
pub mod foundation_info;
pub mod news;
pub mod partner;
pub mod site_info;

use std::str::FromStr;

use tracing::warn;

/// Parse a stored code, falling back when the column holds an unknown value.
pub(crate) fn parse_code<T: FromStr>(raw: &str, fallback: T) -> T {
    raw.parse().unwrap_or_else(|_| {
        warn!("Unknown stored code '{}', using fallback", raw);
        fallback
    })
}
