use anyhow::anyhow;
use chrono::Utc;
use pipecrm_core::run_query;
use super::model::{
    Contact, ContactListParams, CreateContactDto, CustomerContactsResponse,
    PaginatedContactsResponse, UpdateContactDto,
};
use pipecrm_store::Store;
use tracing::{info, instrument, warn};

use crate::utils::errors::AppError;

fn not_found() -> AppError {
    AppError::not_found(anyhow!("Contact not found"))
}

pub struct ContactService;

impl ContactService {
    #[instrument(skip(store, params))]
    pub fn list(store: &Store, params: &ContactListParams) -> PaginatedContactsResponse {
        let rows = store.contacts.snapshot();
        let result = run_query(&rows, &params.to_spec());
        PaginatedContactsResponse {
            contacts: result.items,
            total: result.total,
            page: result.page,
            limit: result.limit,
            total_pages: result.total_pages,
        }
    }

    pub fn for_customer(store: &Store, customer_id: i64) -> CustomerContactsResponse {
        let contacts: Vec<Contact> = store
            .contacts
            .snapshot()
            .into_iter()
            .filter(|c| c.customer_id == customer_id)
            .collect();
        let total = contacts.len() as i64;
        CustomerContactsResponse { contacts, total }
    }

    pub fn get(store: &Store, id: i64) -> Result<Contact, AppError> {
        store.contacts.get(id).ok_or_else(not_found)
    }

    #[instrument(skip(store, dto), fields(contact.email = %dto.email))]
    pub fn create(store: &Store, dto: CreateContactDto) -> Result<Contact, AppError> {
        if store.contacts.any(|c| c.email == dto.email) {
            warn!(contact.email = %dto.email, "Duplicate contact email");
            return Err(AppError::conflict(anyhow!("Email already exists")));
        }

        // A customer has at most one primary contact.
        if dto.is_primary {
            store.contacts.update_where(
                |c| c.customer_id == dto.customer_id,
                |c| c.is_primary = false,
            );
        }

        let now = Utc::now();
        let contact = store.contacts.insert(|id| Contact {
            id,
            customer_id: dto.customer_id,
            first_name: dto.first_name.clone(),
            last_name: dto.last_name.clone(),
            email: dto.email.clone(),
            phone: dto.phone.clone().unwrap_or_default(),
            position: dto.position.clone().unwrap_or_default(),
            department: dto.department.clone().unwrap_or_default(),
            is_primary: dto.is_primary,
            notes: dto.notes.clone().unwrap_or_default(),
            created_at: now,
            updated_at: now,
        });

        info!(contact.id = %contact.id, "Contact created");
        Ok(contact)
    }

    #[instrument(skip(store, dto))]
    pub fn update(store: &Store, id: i64, dto: UpdateContactDto) -> Result<Contact, AppError> {
        let existing = store.contacts.get(id).ok_or_else(not_found)?;

        if let Some(email) = &dto.email
            && store.contacts.any(|c| &c.email == email && c.id != id)
        {
            return Err(AppError::conflict(anyhow!("Email already exists")));
        }

        if dto.is_primary == Some(true) && !existing.is_primary {
            store.contacts.update_where(
                |c| c.customer_id == existing.customer_id && c.id != id,
                |c| c.is_primary = false,
            );
        }

        let contact = store
            .contacts
            .update(id, |contact| {
                if let Some(first_name) = dto.first_name.clone() {
                    contact.first_name = first_name;
                }
                if let Some(last_name) = dto.last_name.clone() {
                    contact.last_name = last_name;
                }
                if let Some(email) = dto.email.clone() {
                    contact.email = email;
                }
                if let Some(phone) = dto.phone.clone() {
                    contact.phone = phone;
                }
                if let Some(position) = dto.position.clone() {
                    contact.position = position;
                }
                if let Some(department) = dto.department.clone() {
                    contact.department = department;
                }
                if let Some(is_primary) = dto.is_primary {
                    contact.is_primary = is_primary;
                }
                if let Some(notes) = dto.notes.clone() {
                    contact.notes = notes;
                }
                contact.updated_at = Utc::now();
            })
            .ok_or_else(not_found)?;

        info!(contact.id = %id, "Contact updated");
        Ok(contact)
    }

    #[instrument(skip(store))]
    pub fn delete(store: &Store, id: i64) -> Result<Contact, AppError> {
        let contact = store.contacts.remove(id).ok_or_else(not_found)?;
        info!(contact.id = %id, "Contact deleted");
        Ok(contact)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    fn create_dto(customer_id: i64, email: &str, is_primary: bool) -> CreateContactDto {
        CreateContactDto {
            customer_id,
            first_name: "First".to_string(),
            last_name: "Last".to_string(),
            email: email.to_string(),
            phone: None,
            position: Some("Manager".to_string()),
            department: None,
            is_primary,
            notes: None,
        }
    }

    #[test]
    fn new_primary_contact_demotes_the_previous_one() {
        let store = Store::new();
        let first = ContactService::create(&store, create_dto(1, "a@example.com", true)).unwrap();
        assert!(first.is_primary);

        let second = ContactService::create(&store, create_dto(1, "b@example.com", true)).unwrap();
        assert!(second.is_primary);
        assert!(!store.contacts.get(first.id).unwrap().is_primary);
    }

    #[test]
    fn primary_flag_is_scoped_per_customer() {
        let store = Store::new();
        let other = ContactService::create(&store, create_dto(2, "o@example.com", true)).unwrap();
        ContactService::create(&store, create_dto(1, "a@example.com", true)).unwrap();
        assert!(store.contacts.get(other.id).unwrap().is_primary);
    }

    #[test]
    fn promoting_via_update_demotes_siblings() {
        let store = Store::new();
        let first = ContactService::create(&store, create_dto(1, "a@example.com", true)).unwrap();
        let second = ContactService::create(&store, create_dto(1, "b@example.com", false)).unwrap();

        ContactService::update(
            &store,
            second.id,
            UpdateContactDto {
                is_primary: Some(true),
                ..Default::default()
            },
        )
        .unwrap();

        assert!(store.contacts.get(second.id).unwrap().is_primary);
        assert!(!store.contacts.get(first.id).unwrap().is_primary);
    }

    #[test]
    fn duplicate_email_is_conflict() {
        let store = Store::new();
        ContactService::create(&store, create_dto(1, "a@example.com", false)).unwrap();
        let err =
            ContactService::create(&store, create_dto(2, "a@example.com", false)).unwrap_err();
        assert_eq!(err.status, StatusCode::CONFLICT);
    }

    #[test]
    fn for_customer_returns_only_that_customers_contacts() {
        let store = Store::new();
        ContactService::create(&store, create_dto(1, "a@example.com", false)).unwrap();
        ContactService::create(&store, create_dto(1, "b@example.com", false)).unwrap();
        ContactService::create(&store, create_dto(2, "c@example.com", false)).unwrap();

        let response = ContactService::for_customer(&store, 1);
        assert_eq!(response.total, 2);
        assert!(response.contacts.iter().all(|c| c.customer_id == 1));

        let empty = ContactService::for_customer(&store, 99);
        assert_eq!(empty.total, 0);
    }
}
