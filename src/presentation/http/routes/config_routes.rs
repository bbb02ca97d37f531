use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::presentation::http::handlers::ConfigHandler;

pub fn config_routes(config_handler: Arc<ConfigHandler>) -> Router {
    Router::new()
        .route("/config", get(ConfigHandler::get_config))
        .route("/config", post(ConfigHandler::update_config))
        .route("/stats", get(ConfigHandler::get_stats))
        .route("/health", get(ConfigHandler::health))
        .with_state(config_handler)
}
