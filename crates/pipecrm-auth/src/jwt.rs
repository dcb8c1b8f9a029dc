//! Token issue and verification.
//!
//! All verification failures are typed values: the caller decides how to
//! surface them (the API maps every variant to 401). Expiry is checked
//! manually with zero leeway so a token issued with `ttl = 0` is already
//! rejected on the next verification.

use std::fmt;

use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use jsonwebtoken::errors::ErrorKind;
use pipecrm_models::users::{Role, User};

use crate::claims::Claims;

/// Why a request failed authentication.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthError {
    /// No bearer credential in the `Authorization` header.
    MissingToken,
    /// The token could not be decoded at all.
    Malformed,
    /// The signature does not match the process key.
    InvalidSignature,
    /// The token was valid once, but its expiry has passed.
    Expired,
}

impl AuthError {
    pub fn message(&self) -> &'static str {
        match self {
            AuthError::MissingToken => "Access token required",
            AuthError::Malformed => "Malformed token",
            AuthError::InvalidSignature => "Invalid token signature",
            AuthError::Expired => "Token expired",
        }
    }
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for AuthError {}

/// Issue a signed access token for a user, valid for `ttl_seconds`.
pub fn issue_token(user: &User, secret: &str, ttl_seconds: i64) -> Result<String, AuthError> {
    issue_token_for(user.id, &user.username, user.role, secret, ttl_seconds)
}

/// Issue a token from raw identity parts. Split out so tests can mint tokens
/// without building a full user record.
pub fn issue_token_for(
    id: i64,
    username: &str,
    role: Role,
    secret: &str,
    ttl_seconds: i64,
) -> Result<String, AuthError> {
    let now = Utc::now().timestamp();
    let claims = Claims {
        sub: id,
        username: username.to_string(),
        role,
        iat: now,
        exp: now + ttl_seconds,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|_| AuthError::Malformed)
}

/// Verify signature and expiry, returning the embedded claims.
pub fn verify_token(token: &str, secret: &str) -> Result<Claims, AuthError> {
    // Expiry is checked below with zero leeway; jsonwebtoken's built-in
    // check allows exp == now, which would let a ttl=0 token through.
    let mut validation = Validation::default();
    validation.validate_exp = false;
    validation.required_spec_claims.clear();

    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|e| match e.kind() {
        ErrorKind::InvalidSignature => AuthError::InvalidSignature,
        ErrorKind::ExpiredSignature => AuthError::Expired,
        _ => AuthError::Malformed,
    })?;

    if data.claims.exp <= Utc::now().timestamp() {
        return Err(AuthError::Expired);
    }
    Ok(data.claims)
}
