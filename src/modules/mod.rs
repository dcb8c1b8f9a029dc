//! Feature modules. Each follows the same layout: `router.rs` wires the
//! routes, `controller.rs` holds the HTTP handlers, `service.rs` the
//! business logic against the store.

pub mod activities;
pub mod auth;
pub mod contacts;
pub mod customers;
pub mod deals;
