//! OpenAPI documentation.

use utoipa::OpenApi;

use common::openapi::SecurityAddon;

use crate::handlers::auth_handler::{LoginRequest, RegisterRequest, RegisterResponse};
use crate::service::{AccountSummary, AuthResponse};

/// API documentation struct.
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::auth_handler::register,
        crate::handlers::auth_handler::login,
        crate::handlers::auth_handler::validate,
        crate::handlers::auth_handler::refresh,
        crate::handlers::auth_handler::me,
    ),
    components(schemas(
        RegisterRequest,
        RegisterResponse,
        LoginRequest,
        AuthResponse,
        AccountSummary,
    )),
    modifiers(&SecurityAddon),
    tags((name = "Authentication", description = "Registration, login and tokens"))
)]
pub struct ApiDoc;
