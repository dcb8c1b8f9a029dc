use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use pipecrm_auth::{Action, Resource};
use serde::Serialize;
use tracing::instrument;
use utoipa::ToSchema;

use super::model::{
    ChangeStageDto, CreateDealDto, Deal, DealListParams, DealStats, PaginatedDealsResponse,
    PipelineEntry, StageInfo, UpdateDealDto, stage_catalog,
};

use super::service::DealService;
use crate::middleware::auth::AuthUser;
use crate::middleware::role::require_access;
use crate::modules::auth::controller::ErrorResponse;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

#[derive(Serialize, ToSchema)]
pub struct DealResponse {
    pub message: String,
    pub deal: Deal,
}

/// Ordered pipeline stage catalog
#[utoipa::path(
    get,
    path = "/api/deals/stages",
    responses(
        (status = 200, description = "All pipeline stages in order", body = [StageInfo]),
        (status = 401, description = "Not authenticated", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Deals"
)]
#[instrument(skip(auth))]
pub async fn get_stages(auth: AuthUser) -> Result<Json<Vec<StageInfo>>, AppError> {
    require_access(&auth, Resource::Deals, Action::Read)?;
    Ok(Json(stage_catalog()))
}

/// Deal statistics overview
#[utoipa::path(
    get,
    path = "/api/deals/stats/overview",
    responses(
        (status = 200, description = "Aggregate deal statistics", body = DealStats),
        (status = 401, description = "Not authenticated", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Deals"
)]
#[instrument(skip(state, auth))]
pub async fn get_deal_stats(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<DealStats>, AppError> {
    require_access(&auth, Resource::Deals, Action::Read)?;
    Ok(Json(DealService::stats(&state.store)))
}

/// Pipeline view: every stage with its deals
#[utoipa::path(
    get,
    path = "/api/deals/stats/pipeline",
    responses(
        (status = 200, description = "Deals grouped by stage", body = [PipelineEntry]),
        (status = 401, description = "Not authenticated", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Deals"
)]
#[instrument(skip(state, auth))]
pub async fn get_pipeline(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Vec<PipelineEntry>>, AppError> {
    require_access(&auth, Resource::Deals, Action::Read)?;
    Ok(Json(DealService::pipeline(&state.store)))
}

/// List deals with filtering, search, sorting and pagination
#[utoipa::path(
    get,
    path = "/api/deals",
    params(DealListParams),
    responses(
        (status = 200, description = "One page of deals", body = PaginatedDealsResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Deals"
)]
#[instrument(skip(state, auth, params))]
pub async fn get_deals(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<DealListParams>,
) -> Result<Json<PaginatedDealsResponse>, AppError> {
    require_access(&auth, Resource::Deals, Action::Read)?;
    Ok(Json(DealService::list(&state.store, &params)))
}

/// Fetch a single deal
#[utoipa::path(
    get,
    path = "/api/deals/{id}",
    params(("id" = i64, Path, description = "Deal id")),
    responses(
        (status = 200, description = "The deal", body = Deal),
        (status = 404, description = "Deal not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Deals"
)]
#[instrument(skip(state, auth))]
pub async fn get_deal(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<Deal>, AppError> {
    require_access(&auth, Resource::Deals, Action::Read)?;
    Ok(Json(DealService::get(&state.store, id)?))
}

/// Create a deal
#[utoipa::path(
    post,
    path = "/api/deals",
    request_body = CreateDealDto,
    responses(
        (status = 201, description = "Deal created", body = DealResponse),
        (status = 400, description = "Unknown stage name", body = ErrorResponse),
        (status = 403, description = "Role not allowed to create deals", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Deals"
)]
#[instrument(skip(state, auth, dto))]
pub async fn create_deal(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateDealDto>,
) -> Result<(StatusCode, Json<DealResponse>), AppError> {
    require_access(&auth, Resource::Deals, Action::Create)?;
    let deal = DealService::create(&state.store, auth.user_id(), dto)?;
    Ok((
        StatusCode::CREATED,
        Json(DealResponse {
            message: "Deal created successfully".to_string(),
            deal,
        }),
    ))
}

/// Update a deal
#[utoipa::path(
    put,
    path = "/api/deals/{id}",
    params(("id" = i64, Path, description = "Deal id")),
    request_body = UpdateDealDto,
    responses(
        (status = 200, description = "Deal updated", body = DealResponse),
        (status = 400, description = "Unknown stage name", body = ErrorResponse),
        (status = 404, description = "Deal not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Deals"
)]
#[instrument(skip(state, auth, dto))]
pub async fn update_deal(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i64>,
    ValidatedJson(dto): ValidatedJson<UpdateDealDto>,
) -> Result<Json<DealResponse>, AppError> {
    require_access(&auth, Resource::Deals, Action::Update)?;
    let deal = DealService::update(&state.store, id, dto)?;
    Ok(Json(DealResponse {
        message: "Deal updated successfully".to_string(),
        deal,
    }))
}

/// Move a deal to another pipeline stage
#[utoipa::path(
    put,
    path = "/api/deals/{id}/stage",
    params(("id" = i64, Path, description = "Deal id")),
    request_body = ChangeStageDto,
    responses(
        (status = 200, description = "Stage changed; status and probability derived", body = DealResponse),
        (status = 400, description = "Missing or unknown stage name", body = ErrorResponse),
        (status = 404, description = "Deal not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Deals"
)]
#[instrument(skip(state, auth, dto))]
pub async fn change_deal_stage(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i64>,
    Json(dto): Json<ChangeStageDto>,
) -> Result<Json<DealResponse>, AppError> {
    require_access(&auth, Resource::Deals, Action::Update)?;
    let deal = DealService::change_stage(&state.store, id, dto)?;
    Ok(Json(DealResponse {
        message: "Stage updated successfully".to_string(),
        deal,
    }))
}

/// Delete a deal (admin only)
#[utoipa::path(
    delete,
    path = "/api/deals/{id}",
    params(("id" = i64, Path, description = "Deal id")),
    responses(
        (status = 200, description = "Deal deleted", body = DealResponse),
        (status = 403, description = "Only admins may delete deals", body = ErrorResponse),
        (status = 404, description = "Deal not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Deals"
)]
#[instrument(skip(state, auth))]
pub async fn delete_deal(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<DealResponse>, AppError> {
    require_access(&auth, Resource::Deals, Action::Delete)?;
    let deal = DealService::delete(&state.store, id)?;
    Ok(Json(DealResponse {
        message: "Deal deleted successfully".to_string(),
        deal,
    }))
}
