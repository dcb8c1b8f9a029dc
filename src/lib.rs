//! # PipeCRM API
//!
//! A CRM backend built with Rust and Axum. It manages customers, their
//! contacts, sales deals moving through a staged pipeline, and the
//! activities scheduled against them, all behind JWT bearer
//! authentication with a role policy.
//!
//! ## Architecture
//!
//! The workspace splits domain logic from HTTP plumbing:
//!
//! ```text
//! crates/
//! ├── pipecrm-core     # generic query engine (filter, search, sort, paginate)
//! ├── pipecrm-models   # entities, DTOs, and the deal stage machine
//! ├── pipecrm-auth     # token issue/verify, password hashing, role policy
//! └── pipecrm-store    # in-memory collections behind one store handle
//! src/
//! ├── config/          # environment-driven configuration (JWT, CORS)
//! ├── middleware/      # bearer token extractor and role checks
//! ├── modules/         # feature modules (auth, customers, contacts, deals, activities)
//! └── utils/           # shared error type
//! ```
//!
//! Each feature module follows the same layout:
//!
//! - `router.rs`: Axum route wiring
//! - `controller.rs`: HTTP handlers with OpenAPI annotations
//! - `service.rs`: business logic against the store
//! - `model.rs`: the module's entity and DTO types, re-exported from
//!   [`pipecrm_models`]
//!
//! ## Roles
//!
//! | Role | Permissions |
//! |------|-------------|
//! | `admin` | Everything, including deleting customers and deals |
//! | `sales` | Read and write; may delete contacts and activities only |
//! | `user`  | Read-only |
//!
//! ## Authentication
//!
//! `POST /api/auth/login` returns a bearer token (default lifetime 24
//! hours). Every other `/api` route except `/api/auth/register` requires
//! it. Expired, malformed, or missing tokens all yield 401.
//!
//! ## Environment Variables
//!
//! ```bash
//! JWT_SECRET=your-secure-secret-key
//! JWT_ACCESS_EXPIRY=86400
//! ALLOWED_ORIGINS=http://localhost:5173
//! PORT=3000
//! ```
//!
//! With the server running, interactive documentation is served at
//! `/swagger-ui`.

pub mod config;
pub mod docs;
pub mod logging;
pub mod middleware;
pub mod modules;
pub mod router;
pub mod state;
pub mod utils;
pub mod validator;

// Re-export workspace crates for convenience
pub use pipecrm_auth;
pub use pipecrm_core;
pub use pipecrm_models;
pub use pipecrm_store;
