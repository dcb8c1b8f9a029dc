//! Role policy.
//!
//! One declarative table answers "which roles may perform this action on
//! this resource". Handlers never compare role strings directly.

use pipecrm_models::users::Role;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Customers,
    Contacts,
    Deals,
    Activities,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Read,
    Create,
    Update,
    Delete,
}

/// Roles permitted to perform `action` on `resource`.
pub fn allowed_roles(resource: Resource, action: Action) -> &'static [Role] {
    use Action::*;
    use Resource::*;
    match (resource, action) {
        // Every authenticated role can read.
        (_, Read) => &[Role::Admin, Role::Sales, Role::User],
        // Destructive deletes on customers and deals are admin-only;
        // contacts and activities may also be deleted by sales.
        (Customers | Deals, Delete) => &[Role::Admin],
        (Contacts | Activities, Delete) => &[Role::Admin, Role::Sales],
        (_, Create | Update) => &[Role::Admin, Role::Sales],
    }
}

/// Whether `role` may perform `action` on `resource`.
pub fn authorize(role: Role, resource: Resource, action: Action) -> bool {
    allowed_roles(resource, action).contains(&role)
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESOURCES: [Resource; 4] = [
        Resource::Customers,
        Resource::Contacts,
        Resource::Deals,
        Resource::Activities,
    ];

    #[test]
    fn every_role_reads_everything() {
        for resource in RESOURCES {
            for role in [Role::Admin, Role::Sales, Role::User] {
                assert!(authorize(role, resource, Action::Read));
            }
        }
    }

    #[test]
    fn user_role_is_read_only() {
        for resource in RESOURCES {
            for action in [Action::Create, Action::Update, Action::Delete] {
                assert!(!authorize(Role::User, resource, action));
            }
        }
    }

    #[test]
    fn sales_writes_but_cannot_delete_customers_or_deals() {
        assert!(authorize(Role::Sales, Resource::Customers, Action::Create));
        assert!(authorize(Role::Sales, Resource::Deals, Action::Update));
        assert!(!authorize(Role::Sales, Resource::Customers, Action::Delete));
        assert!(!authorize(Role::Sales, Resource::Deals, Action::Delete));
        assert!(authorize(Role::Sales, Resource::Contacts, Action::Delete));
        assert!(authorize(Role::Sales, Resource::Activities, Action::Delete));
    }

    #[test]
    fn admin_may_do_anything() {
        for resource in RESOURCES {
            for action in [Action::Read, Action::Create, Action::Update, Action::Delete] {
                assert!(authorize(Role::Admin, resource, action));
            }
        }
    }
}
