use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use chrono::Utc;
use pipecrm_auth::{Action, Resource};
use serde::Serialize;
use tracing::instrument;
use utoipa::ToSchema;

use super::model::{
    Activity, ActivityListParams, ActivityListResponse, ActivityStats, ActivityTypeInfo,
    CompleteActivityDto, CreateActivityDto, PaginatedActivitiesResponse, UpdateActivityDto,
    activity_type_catalog,
};

use super::service::ActivityService;
use crate::middleware::auth::AuthUser;
use crate::middleware::role::require_access;
use crate::modules::auth::controller::ErrorResponse;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

#[derive(Serialize, ToSchema)]
pub struct ActivityResponse {
    pub message: String,
    pub activity: Activity,
}

/// Known activity types
#[utoipa::path(
    get,
    path = "/api/activities/types",
    responses(
        (status = 200, description = "Activity type catalog", body = [ActivityTypeInfo]),
        (status = 401, description = "Not authenticated", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Activities"
)]
#[instrument(skip(auth))]
pub async fn get_activity_types(auth: AuthUser) -> Result<Json<Vec<ActivityTypeInfo>>, AppError> {
    require_access(&auth, Resource::Activities, Action::Read)?;
    Ok(Json(activity_type_catalog()))
}

/// The current user's activities due today
#[utoipa::path(
    get,
    path = "/api/activities/my/today",
    responses(
        (status = 200, description = "Activities due today", body = ActivityListResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Activities"
)]
#[instrument(skip(state, auth))]
pub async fn get_my_today(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ActivityListResponse>, AppError> {
    require_access(&auth, Resource::Activities, Action::Read)?;
    Ok(Json(ActivityService::my_today(
        &state.store,
        auth.user_id(),
        Utc::now(),
    )))
}

/// The current user's overdue activities
#[utoipa::path(
    get,
    path = "/api/activities/my/overdue",
    responses(
        (status = 200, description = "Overdue activities", body = ActivityListResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Activities"
)]
#[instrument(skip(state, auth))]
pub async fn get_my_overdue(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ActivityListResponse>, AppError> {
    require_access(&auth, Resource::Activities, Action::Read)?;
    Ok(Json(ActivityService::my_overdue(
        &state.store,
        auth.user_id(),
        Utc::now(),
    )))
}

/// Activity statistics overview
#[utoipa::path(
    get,
    path = "/api/activities/stats/overview",
    responses(
        (status = 200, description = "Aggregate activity statistics", body = ActivityStats),
        (status = 401, description = "Not authenticated", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Activities"
)]
#[instrument(skip(state, auth))]
pub async fn get_activity_stats(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ActivityStats>, AppError> {
    require_access(&auth, Resource::Activities, Action::Read)?;
    Ok(Json(ActivityService::stats(&state.store, Utc::now())))
}

/// List activities with filtering, search, sorting and pagination
#[utoipa::path(
    get,
    path = "/api/activities",
    params(ActivityListParams),
    responses(
        (status = 200, description = "One page of activities", body = PaginatedActivitiesResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Activities"
)]
#[instrument(skip(state, auth, params))]
pub async fn get_activities(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<ActivityListParams>,
) -> Result<Json<PaginatedActivitiesResponse>, AppError> {
    require_access(&auth, Resource::Activities, Action::Read)?;
    Ok(Json(ActivityService::list(&state.store, &params)))
}

/// Fetch a single activity
#[utoipa::path(
    get,
    path = "/api/activities/{id}",
    params(("id" = i64, Path, description = "Activity id")),
    responses(
        (status = 200, description = "The activity", body = Activity),
        (status = 404, description = "Activity not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Activities"
)]
#[instrument(skip(state, auth))]
pub async fn get_activity(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<Activity>, AppError> {
    require_access(&auth, Resource::Activities, Action::Read)?;
    Ok(Json(ActivityService::get(&state.store, id)?))
}

/// Create an activity
#[utoipa::path(
    post,
    path = "/api/activities",
    request_body = CreateActivityDto,
    responses(
        (status = 201, description = "Activity created", body = ActivityResponse),
        (status = 403, description = "Role not allowed to create activities", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Activities"
)]
#[instrument(skip(state, auth, dto))]
pub async fn create_activity(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateActivityDto>,
) -> Result<(StatusCode, Json<ActivityResponse>), AppError> {
    require_access(&auth, Resource::Activities, Action::Create)?;
    let activity = ActivityService::create(&state.store, auth.user_id(), dto)?;
    Ok((
        StatusCode::CREATED,
        Json(ActivityResponse {
            message: "Activity created successfully".to_string(),
            activity,
        }),
    ))
}

/// Update an activity
#[utoipa::path(
    put,
    path = "/api/activities/{id}",
    params(("id" = i64, Path, description = "Activity id")),
    request_body = UpdateActivityDto,
    responses(
        (status = 200, description = "Activity updated", body = ActivityResponse),
        (status = 404, description = "Activity not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Activities"
)]
#[instrument(skip(state, auth, dto))]
pub async fn update_activity(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i64>,
    ValidatedJson(dto): ValidatedJson<UpdateActivityDto>,
) -> Result<Json<ActivityResponse>, AppError> {
    require_access(&auth, Resource::Activities, Action::Update)?;
    let activity = ActivityService::update(&state.store, id, dto)?;
    Ok(Json(ActivityResponse {
        message: "Activity updated successfully".to_string(),
        activity,
    }))
}

/// Mark an activity as completed
#[utoipa::path(
    put,
    path = "/api/activities/{id}/complete",
    params(("id" = i64, Path, description = "Activity id")),
    request_body = CompleteActivityDto,
    responses(
        (status = 200, description = "Activity completed", body = ActivityResponse),
        (status = 404, description = "Activity not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Activities"
)]
#[instrument(skip(state, auth, dto))]
pub async fn complete_activity(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i64>,
    Json(dto): Json<CompleteActivityDto>,
) -> Result<Json<ActivityResponse>, AppError> {
    require_access(&auth, Resource::Activities, Action::Update)?;
    let activity = ActivityService::complete(&state.store, id, dto)?;
    Ok(Json(ActivityResponse {
        message: "Activity completed successfully".to_string(),
        activity,
    }))
}

/// Delete an activity
#[utoipa::path(
    delete,
    path = "/api/activities/{id}",
    params(("id" = i64, Path, description = "Activity id")),
    responses(
        (status = 200, description = "Activity deleted", body = ActivityResponse),
        (status = 403, description = "Role not allowed to delete activities", body = ErrorResponse),
        (status = 404, description = "Activity not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Activities"
)]
#[instrument(skip(state, auth))]
pub async fn delete_activity(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<ActivityResponse>, AppError> {
    require_access(&auth, Resource::Activities, Action::Delete)?;
    let activity = ActivityService::delete(&state.store, id)?;
    Ok(Json(ActivityResponse {
        message: "Activity deleted successfully".to_string(),
        activity,
    }))
}
