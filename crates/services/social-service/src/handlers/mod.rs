//! HTTP handlers.

pub mod avis_handler;
pub mod dashboard_handler;
pub mod demande_handler;
pub mod health_handler;
pub mod prestation_handler;

use serde::Deserialize;
use utoipa::IntoParams;

/// `?keyword=` search parameter
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct KeywordQuery {
    pub keyword: String,
}
