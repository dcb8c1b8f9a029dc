use anyhow::anyhow;
use chrono::Utc;
use pipecrm_core::run_query;
use super::model::{
    CreateCustomerDto, Customer, CustomerListParams, CustomerStats, PaginatedCustomersResponse,
    UpdateCustomerDto,
};
use pipecrm_store::Store;
use tracing::{info, instrument, warn};

use crate::utils::errors::AppError;

fn not_found() -> AppError {
    AppError::not_found(anyhow!("Customer not found"))
}

pub struct CustomerService;

impl CustomerService {
    #[instrument(skip(store, params))]
    pub fn list(store: &Store, params: &CustomerListParams) -> PaginatedCustomersResponse {
        let rows = store.customers.snapshot();
        let result = run_query(&rows, &params.to_spec());
        PaginatedCustomersResponse {
            customers: result.items,
            total: result.total,
            page: result.page,
            limit: result.limit,
            total_pages: result.total_pages,
        }
    }

    pub fn get(store: &Store, id: i64) -> Result<Customer, AppError> {
        store.customers.get(id).ok_or_else(not_found)
    }

    #[instrument(skip(store, dto), fields(customer.company = %dto.company_name))]
    pub fn create(store: &Store, dto: CreateCustomerDto) -> Result<Customer, AppError> {
        if store.customers.any(|c| c.email == dto.email) {
            warn!(customer.email = %dto.email, "Duplicate customer email");
            return Err(AppError::conflict(anyhow!("Email already exists")));
        }

        let now = Utc::now();
        let customer = store.customers.insert(|id| Customer {
            id,
            company_name: dto.company_name.clone(),
            contact_person: dto.contact_person.clone(),
            email: dto.email.clone(),
            phone: dto.phone.clone().unwrap_or_default(),
            address: dto.address.clone().unwrap_or_default(),
            industry: dto.industry.clone().unwrap_or_default(),
            status: dto.status.clone().unwrap_or_else(|| "prospect".to_string()),
            revenue: dto.revenue.unwrap_or(0.0),
            notes: dto.notes.clone().unwrap_or_default(),
            created_at: now,
            updated_at: now,
        });

        info!(customer.id = %customer.id, "Customer created");
        Ok(customer)
    }

    #[instrument(skip(store, dto))]
    pub fn update(store: &Store, id: i64, dto: UpdateCustomerDto) -> Result<Customer, AppError> {
        store.customers.get(id).ok_or_else(not_found)?;

        if let Some(email) = &dto.email
            && store.customers.any(|c| &c.email == email && c.id != id)
        {
            return Err(AppError::conflict(anyhow!("Email already exists")));
        }

        let customer = store
            .customers
            .update(id, |customer| {
                if let Some(company_name) = dto.company_name.clone() {
                    customer.company_name = company_name;
                }
                if let Some(contact_person) = dto.contact_person.clone() {
                    customer.contact_person = contact_person;
                }
                if let Some(email) = dto.email.clone() {
                    customer.email = email;
                }
                if let Some(phone) = dto.phone.clone() {
                    customer.phone = phone;
                }
                if let Some(address) = dto.address.clone() {
                    customer.address = address;
                }
                if let Some(industry) = dto.industry.clone() {
                    customer.industry = industry;
                }
                if let Some(status) = dto.status.clone() {
                    customer.status = status;
                }
                if let Some(revenue) = dto.revenue {
                    customer.revenue = revenue;
                }
                if let Some(notes) = dto.notes.clone() {
                    customer.notes = notes;
                }
                customer.updated_at = Utc::now();
            })
            .ok_or_else(not_found)?;

        info!(customer.id = %id, "Customer updated");
        Ok(customer)
    }

    #[instrument(skip(store))]
    pub fn delete(store: &Store, id: i64) -> Result<Customer, AppError> {
        let customer = store.customers.remove(id).ok_or_else(not_found)?;
        info!(customer.id = %id, "Customer deleted");
        Ok(customer)
    }

    pub fn stats(store: &Store) -> CustomerStats {
        let rows = store.customers.snapshot();
        let total = rows.len() as i64;
        let total_revenue: f64 = rows.iter().map(|c| c.revenue).sum();
        let mut industries: Vec<String> = Vec::new();
        for customer in &rows {
            if !customer.industry.is_empty() && !industries.contains(&customer.industry) {
                industries.push(customer.industry.clone());
            }
        }

        CustomerStats {
            total,
            active: rows.iter().filter(|c| c.status == "active").count() as i64,
            prospect: rows.iter().filter(|c| c.status == "prospect").count() as i64,
            inactive: rows.iter().filter(|c| c.status == "inactive").count() as i64,
            total_revenue,
            average_revenue: if total > 0 {
                total_revenue / total as f64
            } else {
                0.0
            },
            industries,
        }
    }
}
