//! JWT claim structure for access tokens.

use pipecrm_models::users::Role;
use serde::{Deserialize, Serialize};

/// The signed token payload: who the caller is and for how long the
/// assertion holds. Produced at login, verified on every request, and
/// immutable for the life of a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// User id (subject claim).
    pub sub: i64,
    pub username: String,
    pub role: Role,
    /// Issued-at, Unix seconds.
    pub iat: i64,
    /// Expiry, Unix seconds. Always greater than `iat` for a usable token.
    pub exp: i64,
}

impl Claims {
    pub fn user_id(&self) -> i64 {
        self.sub
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn claims_round_trip() {
        let claims = Claims {
            sub: 42,
            username: "sales".to_string(),
            role: Role::Sales,
            iat: 1_700_000_000,
            exp: 1_700_086_400,
        };
        let json = serde_json::to_string(&claims).unwrap();
        assert!(json.contains(r#""sub":42"#));
        assert!(json.contains(r#""role":"sales""#));

        let back: Claims = serde_json::from_str(&json).unwrap();
        assert_eq!(back.user_id(), 42);
        assert_eq!(back.role, Role::Sales);
    }
}
