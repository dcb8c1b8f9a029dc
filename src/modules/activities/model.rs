//! Activity types and the type catalog, shared with the store and query
//! engine via `pipecrm-models`.

pub use pipecrm_models::activities::*;
