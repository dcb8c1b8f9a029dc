//! Authentication and authorization primitives for the PipeCRM API.
//!
//! - [`claims`]: the signed token payload
//! - [`jwt`]: token issue/verify with typed [`jwt::AuthError`] results
//! - [`password`]: bcrypt hashing, treated as an opaque capability
//! - [`policy`]: the declarative role policy table
//!
//! Nothing in this crate touches HTTP; the API layer maps [`jwt::AuthError`]
//! to 401 and policy denials to 403 at its boundary.

pub mod claims;
pub mod jwt;
pub mod password;
pub mod policy;

pub use claims::Claims;
pub use jwt::{AuthError, issue_token, issue_token_for, verify_token};
pub use password::{hash_password, verify_password};
pub use policy::{Action, Resource, allowed_roles, authorize};
