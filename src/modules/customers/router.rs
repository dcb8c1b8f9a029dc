use axum::{Router, routing::get};

use super::controller::{
    create_customer, delete_customer, get_customer, get_customer_stats, get_customers,
    update_customer,
};
use crate::state::AppState;

pub fn init_customers_router() -> Router<AppState> {
    Router::new()
        .route("/stats/overview", get(get_customer_stats))
        .route("/", get(get_customers).post(create_customer))
        .route(
            "/{id}",
            get(get_customer).put(update_customer).delete(delete_customer),
        )
}
