//! Domain-level constants.
//!
//! These constants define business rules and validation requirements.

// =============================================================================
// Roles
// =============================================================================

/// Default role assigned to new accounts
pub const ROLE_USER: &str = "USER";

/// Administrator role with access to back-office routes
pub const ROLE_ADMIN: &str = "ADMIN";

/// All valid role values
pub const VALID_ROLES: &[&str] = &[ROLE_USER, ROLE_ADMIN];

/// Check if a role value is valid
pub fn is_valid_role(role: &str) -> bool {
    VALID_ROLES.contains(&role)
}

// =============================================================================
// Validation
// =============================================================================

/// Minimum password length requirement
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Pattern for staff registration numbers
pub const MATRICULE_PATTERN: &str = r"^[A-Z0-9]{6,10}$";

/// Pattern for phone numbers stored on profiles
pub const PHONE_PATTERN: &str = r"^[0-9]{10}$";

/// Lowest accepted avis rating
pub const MIN_RATING: i32 = 1;

/// Highest accepted avis rating
pub const MAX_RATING: i32 = 5;

/// Ratings at or above this value count as positive
pub const POSITIVE_RATING_THRESHOLD: i32 = 4;

/// Ratings at or below this value count as negative
pub const NEGATIVE_RATING_THRESHOLD: i32 = 2;

/// Longest processing time a prestation may announce, in days
pub const MAX_PROCESSING_TIME_DAYS: i32 = 3650;

// =============================================================================
// Authentication
// =============================================================================

/// Default JWT token expiration in hours
pub const DEFAULT_JWT_EXPIRATION_HOURS: i64 = 2;

/// Minimum JWT secret length (security requirement)
pub const MIN_JWT_SECRET_LENGTH: usize = 32;

/// Seconds per hour (for token expiration calculation)
pub const SECONDS_PER_HOUR: i64 = 3600;

/// Authorization header prefix for Bearer tokens
pub const BEARER_TOKEN_PREFIX: &str = "Bearer ";

/// JWT token type identifier
pub const TOKEN_TYPE_BEARER: &str = "Bearer";

// =============================================================================
// Pagination
// =============================================================================

/// Page size for public and self-service listings
pub const DEFAULT_PAGE_SIZE: u64 = 10;

/// Page size for back-office listings
pub const DEFAULT_ADMIN_PAGE_SIZE: u64 = 20;

/// Upper bound for any requested page size
pub const MAX_PAGE_SIZE: u64 = 100;
