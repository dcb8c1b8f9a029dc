use axum::{
    Router,
    routing::{get, put},
};

use super::controller::{
    change_deal_stage, create_deal, delete_deal, get_deal, get_deal_stats, get_deals,
    get_pipeline, get_stages, update_deal,
};
use crate::state::AppState;

pub fn init_deals_router() -> Router<AppState> {
    Router::new()
        .route("/stages", get(get_stages))
        .route("/stats/overview", get(get_deal_stats))
        .route("/stats/pipeline", get(get_pipeline))
        .route("/", get(get_deals).post(create_deal))
        .route("/{id}", get(get_deal).put(update_deal).delete(delete_deal))
        .route("/{id}/stage", put(change_deal_stage))
}
