//! Request guards: token extraction and role policy enforcement.

pub mod auth;
pub mod role;
