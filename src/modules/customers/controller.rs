use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use pipecrm_auth::{Action, Resource};
use serde::Serialize;
use tracing::instrument;
use utoipa::ToSchema;

use super::model::{
    CreateCustomerDto, Customer, CustomerListParams, CustomerStats, PaginatedCustomersResponse,
    UpdateCustomerDto,
};

use super::service::CustomerService;
use crate::middleware::auth::AuthUser;
use crate::middleware::role::require_access;
use crate::modules::auth::controller::ErrorResponse;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

#[derive(Serialize, ToSchema)]
pub struct CustomerResponse {
    pub message: String,
    pub customer: Customer,
}

/// Customer statistics overview
#[utoipa::path(
    get,
    path = "/api/customers/stats/overview",
    responses(
        (status = 200, description = "Aggregate customer statistics", body = CustomerStats),
        (status = 401, description = "Not authenticated", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Customers"
)]
#[instrument(skip(state, auth))]
pub async fn get_customer_stats(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<CustomerStats>, AppError> {
    require_access(&auth, Resource::Customers, Action::Read)?;
    Ok(Json(CustomerService::stats(&state.store)))
}

/// List customers with filtering, search, sorting and pagination
#[utoipa::path(
    get,
    path = "/api/customers",
    params(CustomerListParams),
    responses(
        (status = 200, description = "One page of customers", body = PaginatedCustomersResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Customers"
)]
#[instrument(skip(state, auth, params))]
pub async fn get_customers(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<CustomerListParams>,
) -> Result<Json<PaginatedCustomersResponse>, AppError> {
    require_access(&auth, Resource::Customers, Action::Read)?;
    Ok(Json(CustomerService::list(&state.store, &params)))
}

/// Fetch a single customer
#[utoipa::path(
    get,
    path = "/api/customers/{id}",
    params(("id" = i64, Path, description = "Customer id")),
    responses(
        (status = 200, description = "The customer", body = Customer),
        (status = 404, description = "Customer not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Customers"
)]
#[instrument(skip(state, auth))]
pub async fn get_customer(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<Customer>, AppError> {
    require_access(&auth, Resource::Customers, Action::Read)?;
    Ok(Json(CustomerService::get(&state.store, id)?))
}

/// Create a customer
#[utoipa::path(
    post,
    path = "/api/customers",
    request_body = CreateCustomerDto,
    responses(
        (status = 201, description = "Customer created", body = CustomerResponse),
        (status = 403, description = "Role not allowed to create customers", body = ErrorResponse),
        (status = 409, description = "Email already exists", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Customers"
)]
#[instrument(skip(state, auth, dto))]
pub async fn create_customer(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateCustomerDto>,
) -> Result<(StatusCode, Json<CustomerResponse>), AppError> {
    require_access(&auth, Resource::Customers, Action::Create)?;
    let customer = CustomerService::create(&state.store, dto)?;
    Ok((
        StatusCode::CREATED,
        Json(CustomerResponse {
            message: "Customer created successfully".to_string(),
            customer,
        }),
    ))
}

/// Update a customer
#[utoipa::path(
    put,
    path = "/api/customers/{id}",
    params(("id" = i64, Path, description = "Customer id")),
    request_body = UpdateCustomerDto,
    responses(
        (status = 200, description = "Customer updated", body = CustomerResponse),
        (status = 404, description = "Customer not found", body = ErrorResponse),
        (status = 409, description = "Email already exists", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Customers"
)]
#[instrument(skip(state, auth, dto))]
pub async fn update_customer(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i64>,
    ValidatedJson(dto): ValidatedJson<UpdateCustomerDto>,
) -> Result<Json<CustomerResponse>, AppError> {
    require_access(&auth, Resource::Customers, Action::Update)?;
    let customer = CustomerService::update(&state.store, id, dto)?;
    Ok(Json(CustomerResponse {
        message: "Customer updated successfully".to_string(),
        customer,
    }))
}

/// Delete a customer (admin only)
#[utoipa::path(
    delete,
    path = "/api/customers/{id}",
    params(("id" = i64, Path, description = "Customer id")),
    responses(
        (status = 200, description = "Customer deleted", body = CustomerResponse),
        (status = 403, description = "Only admins may delete customers", body = ErrorResponse),
        (status = 404, description = "Customer not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Customers"
)]
#[instrument(skip(state, auth))]
pub async fn delete_customer(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<CustomerResponse>, AppError> {
    require_access(&auth, Resource::Customers, Action::Delete)?;
    let customer = CustomerService::delete(&state.store, id)?;
    Ok(Json(CustomerResponse {
        message: "Customer deleted successfully".to_string(),
        customer,
    }))
}
