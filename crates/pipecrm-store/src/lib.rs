//! In-memory persistence for the PipeCRM API.
//!
//! Each entity lives in its own [`Collection`]; the [`Store`] bundles them
//! behind one handle the application state shares via `Arc`.

pub mod collection;
pub mod seed;

pub use collection::{Collection, Record};

use pipecrm_models::activities::Activity;
use pipecrm_models::contacts::Contact;
use pipecrm_models::customers::Customer;
use pipecrm_models::deals::Deal;
use pipecrm_models::users::User;

impl Record for User {
    fn id(&self) -> i64 {
        self.id
    }
}

impl Record for Customer {
    fn id(&self) -> i64 {
        self.id
    }
}

impl Record for Contact {
    fn id(&self) -> i64 {
        self.id
    }
}

impl Record for Deal {
    fn id(&self) -> i64 {
        self.id
    }
}

impl Record for Activity {
    fn id(&self) -> i64 {
        self.id
    }
}

/// All entity collections behind one handle.
pub struct Store {
    pub users: Collection<User>,
    pub customers: Collection<Customer>,
    pub contacts: Collection<Contact>,
    pub deals: Collection<Deal>,
    pub activities: Collection<Activity>,
}

impl Store {
    /// An empty store. Tests start here and insert exactly what they need.
    pub fn new() -> Self {
        Self {
            users: Collection::new(),
            customers: Collection::new(),
            contacts: Collection::new(),
            deals: Collection::new(),
            activities: Collection::new(),
        }
    }

    /// The demo dataset: two users (`admin` / `sales`, password `admin123`),
    /// two customers with contacts, deals, and activities. The demo password
    /// is hashed here once, so the seed data never carries a stale digest.
    pub fn seeded() -> Self {
        let password_hash = pipecrm_auth::hash_password(seed::DEMO_PASSWORD)
            .expect("Failed to hash demo password");
        Self {
            users: Collection::with_records(seed::users(&password_hash)),
            customers: Collection::with_records(seed::customers()),
            contacts: Collection::with_records(seed::contacts()),
            deals: Collection::with_records(seed::deals()),
            activities: Collection::with_records(seed::activities()),
        }
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}
