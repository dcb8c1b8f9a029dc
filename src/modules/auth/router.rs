use axum::{
    Router,
    routing::{get, post},
};

use super::controller::{get_profile, login, register, update_profile, verify};
use crate::state::AppState;

pub fn init_auth_router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/verify", get(verify))
        .route("/profile", get(get_profile).put(update_profile))
}
