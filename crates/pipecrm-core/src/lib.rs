//! Core primitives shared across the PipeCRM API.
//!
//! This crate is pure and framework-free: it knows nothing about HTTP or
//! storage. It provides the generic query engine used by every entity listing
//! endpoint ([`query`]) and the pagination parameter helpers ([`pagination`]).

pub mod pagination;
pub mod query;

pub use query::{FieldValue, QueryResult, QuerySpec, Queryable, SortOrder, run_query};
