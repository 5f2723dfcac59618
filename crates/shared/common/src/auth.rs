//! JWT claims, signing keys and the authentication middleware.
//!
//! Tokens are issued by the auth service and verified locally by every
//! service with the shared secret.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{header::AUTHORIZATION, HeaderMap, Request},
    middleware::Next,
    response::Response,
};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use domain::{Actor, Applicant, BEARER_TOKEN_PREFIX, ROLE_ADMIN};

use crate::config::JwtConfig;
use crate::error::{AppError, AppResult};

/// JWT claims payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Account id
    pub sub: i64,
    pub email: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matricule: Option<String>,
    pub roles: Vec<String>,
    pub exp: i64,
    pub iat: i64,
}

/// Identity data embedded in a new token.
#[derive(Debug, Clone)]
pub struct TokenSubject {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub matricule: Option<String>,
    pub roles: Vec<String>,
}

/// Signed token with its expiry.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// HS256 signing and verification keys.
#[derive(Clone)]
pub struct JwtKeys {
    inner: Arc<KeysInner>,
}

struct KeysInner {
    encoding: EncodingKey,
    decoding: DecodingKey,
    expiration: Duration,
}

impl JwtKeys {
    pub fn new(config: &JwtConfig) -> Self {
        Self {
            inner: Arc::new(KeysInner {
                encoding: EncodingKey::from_secret(config.secret.as_bytes()),
                decoding: DecodingKey::from_secret(config.secret.as_bytes()),
                expiration: Duration::hours(config.expiration_hours),
            }),
        }
    }

    /// Sign a token valid from `now` for the configured lifetime.
    pub fn issue(&self, subject: TokenSubject, now: DateTime<Utc>) -> AppResult<IssuedToken> {
        let expires_at = now + self.inner.expiration;
        let claims = Claims {
            sub: subject.id,
            email: subject.email,
            name: subject.name,
            matricule: subject.matricule,
            roles: subject.roles,
            exp: expires_at.timestamp(),
            iat: now.timestamp(),
        };

        let token = encode(&Header::default(), &claims, &self.inner.encoding)?;
        Ok(IssuedToken { token, expires_at })
    }

    /// Verify signature and expiry.
    pub fn verify(&self, token: &str) -> AppResult<Claims> {
        let data = decode::<Claims>(token, &self.inner.decoding, &Validation::default())?;
        Ok(data.claims)
    }
}

impl std::fmt::Debug for JwtKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtKeys").finish_non_exhaustive()
    }
}

/// Current authenticated user extracted from JWT.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentUser {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub matricule: Option<String>,
    pub roles: Vec<String>,
}

impl CurrentUser {
    /// Check if user has admin role.
    pub fn is_admin(&self) -> bool {
        self.roles.iter().any(|r| r == ROLE_ADMIN)
    }

    /// The user as the author of a back-office action.
    pub fn as_actor(&self) -> Actor {
        Actor {
            id: self.id,
            name: self.name.clone(),
        }
    }

    /// The user as the staff member filing a demande.
    pub fn as_applicant(&self) -> Applicant {
        Applicant {
            user_id: self.id,
            email: self.email.clone(),
            name: self.name.clone(),
            employee_id: self.matricule.clone(),
        }
    }
}

impl From<Claims> for CurrentUser {
    fn from(claims: Claims) -> Self {
        Self {
            id: claims.sub,
            email: claims.email,
            name: claims.name,
            matricule: claims.matricule,
            roles: claims.roles,
        }
    }
}

/// Check if user has admin privileges.
pub fn require_admin(user: &CurrentUser) -> AppResult<()> {
    if user.is_admin() {
        Ok(())
    } else {
        Err(AppError::forbidden("Administrator role required"))
    }
}

/// Authentication middleware that validates JWT tokens.
pub async fn auth_middleware(
    State(keys): State<JwtKeys>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let token = bearer_token(request.headers()).ok_or(AppError::Unauthorized)?;
    let claims = keys.verify(token)?;

    request.extensions_mut().insert(CurrentUser::from(claims));

    Ok(next.run(request).await)
}

/// Middleware for routes restricted to administrators.
///
/// Verifies the token like [`auth_middleware`] and then requires the
/// `ADMIN` role.
pub async fn admin_middleware(
    State(keys): State<JwtKeys>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let token = bearer_token(request.headers()).ok_or(AppError::Unauthorized)?;
    let user = CurrentUser::from(keys.verify(token)?);
    require_admin(&user)?;

    request.extensions_mut().insert(user);

    Ok(next.run(request).await)
}

/// Extract bearer token from Authorization header.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix(BEARER_TOKEN_PREFIX))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn keys() -> JwtKeys {
        JwtKeys::new(&JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hs256".to_string(),
            expiration_hours: 2,
        })
    }

    fn subject(roles: &[&str]) -> TokenSubject {
        TokenSubject {
            id: 42,
            email: "jane@foundation.com".to_string(),
            name: "Jane Doe".to_string(),
            matricule: Some("EMP0042".to_string()),
            roles: roles.iter().map(|r| r.to_string()).collect(),
        }
    }

    #[test]
    fn test_issue_and_verify() {
        let keys = keys();
        let now = Utc::now();
        let issued = keys.issue(subject(&["USER"]), now).unwrap();

        assert_eq!(issued.expires_at, now + Duration::hours(2));
        let claims = keys.verify(&issued.token).unwrap();
        assert_eq!(claims.sub, 42);
        assert_eq!(claims.email, "jane@foundation.com");
        assert_eq!(claims.roles, vec!["USER".to_string()]);
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let keys = keys();
        let issued = keys
            .issue(subject(&["USER"]), Utc::now() - Duration::hours(5))
            .unwrap();
        assert!(matches!(keys.verify(&issued.token), Err(AppError::Jwt(_))));
    }

    #[test]
    fn test_foreign_signature_is_rejected() {
        let other = JwtKeys::new(&JwtConfig {
            secret: "another-secret-that-is-long-enough-too".to_string(),
            expiration_hours: 2,
        });
        let issued = other.issue(subject(&["USER"]), Utc::now()).unwrap();
        assert!(keys().verify(&issued.token).is_err());
    }

    #[test]
    fn test_admin_check() {
        let claims = keys()
            .verify(&keys().issue(subject(&["USER", "ADMIN"]), Utc::now()).unwrap().token)
            .unwrap();
        let user = CurrentUser::from(claims);
        assert!(user.is_admin());
        assert!(require_admin(&user).is_ok());

        let plain = CurrentUser {
            roles: vec!["USER".to_string()],
            ..user
        };
        assert!(matches!(require_admin(&plain), Err(AppError::Forbidden(_))));
    }

    #[test]
    fn test_bearer_token_parsing() {
        let mut headers = HeaderMap::new();
        assert_eq!(bearer_token(&headers), None);

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Basic abc"));
        assert_eq!(bearer_token(&headers), None);

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer abc.def"));
        assert_eq!(bearer_token(&headers), Some("abc.def"));
    }
}
