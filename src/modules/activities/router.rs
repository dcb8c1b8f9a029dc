use axum::{
    Router,
    routing::{get, put},
};

use super::controller::{
    complete_activity, create_activity, delete_activity, get_activities, get_activity,
    get_activity_stats, get_activity_types, get_my_overdue, get_my_today, update_activity,
};
use crate::state::AppState;

pub fn init_activities_router() -> Router<AppState> {
    Router::new()
        .route("/types", get(get_activity_types))
        .route("/my/today", get(get_my_today))
        .route("/my/overdue", get(get_my_overdue))
        .route("/stats/overview", get(get_activity_stats))
        .route("/", get(get_activities).post(create_activity))
        .route(
            "/{id}",
            get(get_activity).put(update_activity).delete(delete_activity),
        )
        .route("/{id}/complete", put(complete_activity))
}
