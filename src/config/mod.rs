//! Application configuration, loaded from environment variables.
//!
//! - [`cors`]: allowed browser origins
//! - [`jwt`]: token signing secret and lifetime

pub mod cors;
pub mod jwt;
