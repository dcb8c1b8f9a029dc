//! Deal types and the pipeline stage machine, shared with the store and
//! query engine via `pipecrm-models`.

pub use pipecrm_models::deals::*;
