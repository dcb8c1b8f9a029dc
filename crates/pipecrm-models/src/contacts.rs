//! Contact models, DTOs, and query field table.
//!
//! Contacts belong to a customer and at most one contact per customer may be
//! flagged primary; the service layer enforces that rule on create/update.

use chrono::{DateTime, Utc};
use pipecrm_core::pagination::{lenient_i64, limit_or_default, page_or_default};
use pipecrm_core::{FieldValue, QuerySpec, Queryable, SortOrder};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// A person at a customer company.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: i64,
    pub customer_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub position: String,
    pub department: String,
    pub is_primary: bool,
    pub notes: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Contact {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

impl Queryable for Contact {
    // `name` is synthetic: the search matches against "first last" the way
    // the UI displays contacts.
    const SEARCH_FIELDS: &'static [&'static str] = &["name", "email", "position"];

    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "id" => Some(FieldValue::Int(self.id)),
            "customerId" => Some(FieldValue::Int(self.customer_id)),
            "name" => Some(FieldValue::Str(self.full_name())),
            "firstName" => Some(FieldValue::Str(self.first_name.clone())),
            "lastName" => Some(FieldValue::Str(self.last_name.clone())),
            "email" => Some(FieldValue::Str(self.email.clone())),
            "position" => Some(FieldValue::Str(self.position.clone())),
            "department" => Some(FieldValue::Str(self.department.clone())),
            "isPrimary" => Some(FieldValue::Bool(self.is_primary)),
            "createdAt" => Some(FieldValue::Date(self.created_at)),
            "updatedAt" => Some(FieldValue::Date(self.updated_at)),
            _ => None,
        }
    }
}

/// Query parameters accepted by `GET /api/contacts`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ContactListParams {
    pub customer_id: Option<String>,
    pub search: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub page: Option<i64>,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub limit: Option<i64>,
}

impl ContactListParams {
    pub fn to_spec(&self) -> QuerySpec {
        let mut spec = QuerySpec::new(page_or_default(self.page), limit_or_default(self.limit));
        if let Some(raw) = &self.customer_id {
            spec.push_filter("customerId", FieldValue::int_param(raw));
        }
        spec.search = self.search.clone();
        spec.sort_by = self.sort_by.clone();
        spec.sort_order = SortOrder::from_param(self.sort_order.as_deref());
        spec
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateContactDto {
    pub customer_id: i64,
    #[validate(length(min = 1, max = 100))]
    pub first_name: String,
    #[validate(length(min = 1, max = 100))]
    pub last_name: String,
    #[validate(email)]
    pub email: String,
    pub phone: Option<String>,
    pub position: Option<String>,
    pub department: Option<String>,
    #[serde(default)]
    pub is_primary: bool,
    pub notes: Option<String>,
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateContactDto {
    #[validate(length(min = 1, max = 100))]
    pub first_name: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub last_name: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    pub phone: Option<String>,
    pub position: Option<String>,
    pub department: Option<String>,
    pub is_primary: Option<bool>,
    pub notes: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedContactsResponse {
    pub contacts: Vec<Contact>,
    pub total: i64,
    pub page: i64,
    pub limit: i64,
    pub total_pages: i64,
}

/// Response for `GET /api/contacts/customer/:customerId` — unpaginated.
#[derive(Debug, Serialize, ToSchema)]
pub struct CustomerContactsResponse {
    pub contacts: Vec<Contact>,
    pub total: i64,
}
