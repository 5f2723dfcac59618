//! OpenAPI documentation.

use utoipa::OpenApi;

use common::openapi::SecurityAddon;
use domain::UserProfile;

use crate::handlers::profile_handler::{AvatarUpload, UpdateProfileRequest};

/// API documentation struct.
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::profile_handler::get_me,
        crate::handlers::profile_handler::update_me,
        crate::handlers::profile_handler::upload_avatar,
        crate::handlers::admin_handler::list_users,
        crate::handlers::admin_handler::get_user,
        crate::handlers::admin_handler::update_user,
        crate::handlers::admin_handler::set_roles,
        crate::handlers::admin_handler::delete_user,
        crate::handlers::admin_handler::restore_user,
    ),
    components(schemas(UserProfile, UpdateProfileRequest, AvatarUpload)),
    modifiers(&SecurityAddon),
    tags(
        (name = "Profile", description = "Self-service profile endpoints"),
        (name = "Admin Users", description = "User administration endpoints"),
    )
)]
pub struct ApiDoc;
