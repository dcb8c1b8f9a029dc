use anyhow::anyhow;
use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use pipecrm_auth::{AuthError, Claims, verify_token};
use pipecrm_models::users::Role;

use crate::state::AppState;
use crate::utils::errors::AppError;

/// Extractor that validates the bearer token and exposes the caller's
/// identity. Every protected handler takes this as an argument; routes
/// without it are public.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    pub fn user_id(&self) -> i64 {
        self.0.sub
    }

    pub fn username(&self) -> &str {
        &self.0.username
    }

    pub fn role(&self) -> Role {
        self.0.role
    }
}

fn unauthorized(err: AuthError) -> AppError {
    AppError::unauthorized(anyhow!("{}", err.message()))
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| unauthorized(AuthError::MissingToken))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| unauthorized(AuthError::MissingToken))?;

        let claims =
            verify_token(token, &state.jwt_config.secret).map_err(unauthorized)?;

        Ok(AuthUser(claims))
    }
}
