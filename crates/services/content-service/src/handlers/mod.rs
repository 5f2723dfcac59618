//! HTTP handlers.

pub mod contact_handler;
pub mod event_handler;
pub mod foundation_info_handler;
pub mod health_handler;
pub mod news_handler;
pub mod partner_handler;
pub mod site_handler;

use serde::Deserialize;
use utoipa::IntoParams;

/// `?keyword=` search parameter
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct KeywordQuery {
    pub keyword: String,
}
