//! Role policy enforcement at the handler boundary.

use anyhow::anyhow;
use pipecrm_auth::{Action, Resource, authorize};

use crate::middleware::auth::AuthUser;
use crate::utils::errors::AppError;

/// Checks the role policy table and rejects with 403 when the caller's
/// role does not permit `action` on `resource`.
pub fn require_access(user: &AuthUser, resource: Resource, action: Action) -> Result<(), AppError> {
    if authorize(user.role(), resource, action) {
        return Ok(());
    }
    Err(AppError::forbidden(anyhow!(
        "Access denied: insufficient role"
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use pipecrm_auth::Claims;
    use pipecrm_models::users::Role;

    fn user_with_role(role: Role) -> AuthUser {
        AuthUser(Claims {
            sub: 1,
            username: "someone".to_string(),
            role,
            iat: 0,
            exp: i64::MAX,
        })
    }

    #[test]
    fn reader_roles_pass_read_checks() {
        let user = user_with_role(Role::User);
        assert!(require_access(&user, Resource::Deals, Action::Read).is_ok());
    }

    #[test]
    fn write_denied_for_user_role_is_403() {
        let user = user_with_role(Role::User);
        let err = require_access(&user, Resource::Deals, Action::Create).unwrap_err();
        assert_eq!(err.status, StatusCode::FORBIDDEN);
    }

    #[test]
    fn sales_cannot_delete_customers() {
        let user = user_with_role(Role::Sales);
        assert!(require_access(&user, Resource::Customers, Action::Delete).is_err());
        assert!(require_access(&user, Resource::Contacts, Action::Delete).is_ok());
    }
}
