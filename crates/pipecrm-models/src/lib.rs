//! Domain models and DTOs for the PipeCRM API.
//!
//! One module per entity, each holding the record struct, its request and
//! response DTOs, the list query parameters, and the entity's query field
//! table (its [`pipecrm_core::Queryable`] implementation). Wire format is
//! camelCase throughout, matching the public API.

pub mod activities;
pub mod contacts;
pub mod customers;
pub mod deals;
pub mod users;
