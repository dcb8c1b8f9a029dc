//! User account types. Defined in `pipecrm-models` because the store and
//! the auth crate share them; re-exported here so the module reads as one
//! unit.

pub use pipecrm_models::users::*;
