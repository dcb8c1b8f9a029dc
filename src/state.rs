use std::sync::Arc;

use pipecrm_store::Store;

use crate::config::cors::CorsConfig;
use crate::config::jwt::JwtConfig;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<Store>,
    pub jwt_config: JwtConfig,
    pub cors_config: CorsConfig,
}

pub fn init_app_state() -> AppState {
    AppState {
        store: Arc::new(Store::seeded()),
        jwt_config: JwtConfig::from_env(),
        cors_config: CorsConfig::from_env(),
    }
}
