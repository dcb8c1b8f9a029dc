//! Customer models, DTOs, and query field table.

use chrono::{DateTime, Utc};
use pipecrm_core::pagination::{lenient_i64, limit_or_default, page_or_default};
use pipecrm_core::{FieldValue, QuerySpec, Queryable, SortOrder};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// A customer (company) record.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: i64,
    pub company_name: String,
    pub contact_person: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub industry: String,
    /// `active`, `prospect`, or `inactive`.
    pub status: String,
    pub revenue: f64,
    pub notes: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Queryable for Customer {
    const SEARCH_FIELDS: &'static [&'static str] = &["companyName", "contactPerson", "email"];

    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "id" => Some(FieldValue::Int(self.id)),
            "companyName" => Some(FieldValue::Str(self.company_name.clone())),
            "contactPerson" => Some(FieldValue::Str(self.contact_person.clone())),
            "email" => Some(FieldValue::Str(self.email.clone())),
            "industry" => Some(FieldValue::Str(self.industry.clone())),
            "status" => Some(FieldValue::Str(self.status.clone())),
            "revenue" => Some(FieldValue::Float(self.revenue)),
            "createdAt" => Some(FieldValue::Date(self.created_at)),
            "updatedAt" => Some(FieldValue::Date(self.updated_at)),
            _ => None,
        }
    }
}

/// Query parameters accepted by `GET /api/customers`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct CustomerListParams {
    pub status: Option<String>,
    pub industry: Option<String>,
    pub search: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub page: Option<i64>,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub limit: Option<i64>,
}

impl CustomerListParams {
    pub fn to_spec(&self) -> QuerySpec {
        let mut spec = QuerySpec::new(page_or_default(self.page), limit_or_default(self.limit));
        if let Some(status) = &self.status {
            spec.push_filter("status", FieldValue::Str(status.clone()));
        }
        if let Some(industry) = &self.industry {
            spec.push_filter("industry", FieldValue::Str(industry.clone()));
        }
        spec.search = self.search.clone();
        spec.sort_by = self.sort_by.clone();
        spec.sort_order = SortOrder::from_param(self.sort_order.as_deref());
        spec
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCustomerDto {
    #[validate(length(min = 1, max = 200))]
    pub company_name: String,
    #[validate(length(min = 1, max = 200))]
    pub contact_person: String,
    #[validate(email)]
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub industry: Option<String>,
    /// Defaults to `prospect`.
    pub status: Option<String>,
    pub revenue: Option<f64>,
    pub notes: Option<String>,
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCustomerDto {
    #[validate(length(min = 1, max = 200))]
    pub company_name: Option<String>,
    #[validate(length(min = 1, max = 200))]
    pub contact_person: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub industry: Option<String>,
    pub status: Option<String>,
    pub revenue: Option<f64>,
    pub notes: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedCustomersResponse {
    pub customers: Vec<Customer>,
    pub total: i64,
    pub page: i64,
    pub limit: i64,
    pub total_pages: i64,
}

/// Aggregates for `GET /api/customers/stats/overview`.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CustomerStats {
    pub total: i64,
    pub active: i64,
    pub prospect: i64,
    pub inactive: i64,
    pub total_revenue: f64,
    pub average_revenue: f64,
    pub industries: Vec<String>,
}
