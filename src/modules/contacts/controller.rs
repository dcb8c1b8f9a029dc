use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use pipecrm_auth::{Action, Resource};
use serde::Serialize;
use tracing::instrument;
use utoipa::ToSchema;

use super::model::{
    Contact, ContactListParams, CreateContactDto, CustomerContactsResponse,
    PaginatedContactsResponse, UpdateContactDto,
};

use super::service::ContactService;
use crate::middleware::auth::AuthUser;
use crate::middleware::role::require_access;
use crate::modules::auth::controller::ErrorResponse;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

#[derive(Serialize, ToSchema)]
pub struct ContactResponse {
    pub message: String,
    pub contact: Contact,
}

/// All contacts for one customer
#[utoipa::path(
    get,
    path = "/api/contacts/customer/{customer_id}",
    params(("customer_id" = i64, Path, description = "Customer id")),
    responses(
        (status = 200, description = "Contacts for the customer", body = CustomerContactsResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Contacts"
)]
#[instrument(skip(state, auth))]
pub async fn get_customer_contacts(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(customer_id): Path<i64>,
) -> Result<Json<CustomerContactsResponse>, AppError> {
    require_access(&auth, Resource::Contacts, Action::Read)?;
    Ok(Json(ContactService::for_customer(&state.store, customer_id)))
}

/// List contacts with filtering, search, sorting and pagination
#[utoipa::path(
    get,
    path = "/api/contacts",
    params(ContactListParams),
    responses(
        (status = 200, description = "One page of contacts", body = PaginatedContactsResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Contacts"
)]
#[instrument(skip(state, auth, params))]
pub async fn get_contacts(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<ContactListParams>,
) -> Result<Json<PaginatedContactsResponse>, AppError> {
    require_access(&auth, Resource::Contacts, Action::Read)?;
    Ok(Json(ContactService::list(&state.store, &params)))
}

/// Fetch a single contact
#[utoipa::path(
    get,
    path = "/api/contacts/{id}",
    params(("id" = i64, Path, description = "Contact id")),
    responses(
        (status = 200, description = "The contact", body = Contact),
        (status = 404, description = "Contact not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Contacts"
)]
#[instrument(skip(state, auth))]
pub async fn get_contact(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<Contact>, AppError> {
    require_access(&auth, Resource::Contacts, Action::Read)?;
    Ok(Json(ContactService::get(&state.store, id)?))
}

/// Create a contact
#[utoipa::path(
    post,
    path = "/api/contacts",
    request_body = CreateContactDto,
    responses(
        (status = 201, description = "Contact created", body = ContactResponse),
        (status = 403, description = "Role not allowed to create contacts", body = ErrorResponse),
        (status = 409, description = "Email already exists", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Contacts"
)]
#[instrument(skip(state, auth, dto))]
pub async fn create_contact(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateContactDto>,
) -> Result<(StatusCode, Json<ContactResponse>), AppError> {
    require_access(&auth, Resource::Contacts, Action::Create)?;
    let contact = ContactService::create(&state.store, dto)?;
    Ok((
        StatusCode::CREATED,
        Json(ContactResponse {
            message: "Contact created successfully".to_string(),
            contact,
        }),
    ))
}

/// Update a contact
#[utoipa::path(
    put,
    path = "/api/contacts/{id}",
    params(("id" = i64, Path, description = "Contact id")),
    request_body = UpdateContactDto,
    responses(
        (status = 200, description = "Contact updated", body = ContactResponse),
        (status = 404, description = "Contact not found", body = ErrorResponse),
        (status = 409, description = "Email already exists", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Contacts"
)]
#[instrument(skip(state, auth, dto))]
pub async fn update_contact(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i64>,
    ValidatedJson(dto): ValidatedJson<UpdateContactDto>,
) -> Result<Json<ContactResponse>, AppError> {
    require_access(&auth, Resource::Contacts, Action::Update)?;
    let contact = ContactService::update(&state.store, id, dto)?;
    Ok(Json(ContactResponse {
        message: "Contact updated successfully".to_string(),
        contact,
    }))
}

/// Delete a contact
#[utoipa::path(
    delete,
    path = "/api/contacts/{id}",
    params(("id" = i64, Path, description = "Contact id")),
    responses(
        (status = 200, description = "Contact deleted", body = ContactResponse),
        (status = 403, description = "Role not allowed to delete contacts", body = ErrorResponse),
        (status = 404, description = "Contact not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Contacts"
)]
#[instrument(skip(state, auth))]
pub async fn delete_contact(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<ContactResponse>, AppError> {
    require_access(&auth, Resource::Contacts, Action::Delete)?;
    let contact = ContactService::delete(&state.store, id)?;
    Ok(Json(ContactResponse {
        message: "Contact deleted successfully".to_string(),
        contact,
    }))
}
