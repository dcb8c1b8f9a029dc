//! Contact types, shared with the store and query engine via
//! `pipecrm-models`.

pub use pipecrm_models::contacts::*;
