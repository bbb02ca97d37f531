use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
};
use std::sync::Arc;

use crate::application::services::ConfigStore;
use crate::application::use_cases::GetStatsUseCase;
use crate::presentation::http::dto::{ApiResponse, ConfigUpdateDto, HealthResponseDto};

pub struct ConfigHandler {
    config_store: Arc<ConfigStore>,
    stats_use_case: Arc<GetStatsUseCase>,
}

impl ConfigHandler {
    pub fn new(config_store: Arc<ConfigStore>, stats_use_case: Arc<GetStatsUseCase>) -> Self {
        Self {
            config_store,
            stats_use_case,
        }
    }

    pub async fn get_config(
        State(handler): State<Arc<ConfigHandler>>,
    ) -> Result<impl IntoResponse, StatusCode> {
        let config = handler.config_store.get().await;
        Ok((StatusCode::OK, Json(ApiResponse::success(config))))
    }

    pub async fn update_config(
        State(handler): State<Arc<ConfigHandler>>,
        Json(update): Json<ConfigUpdateDto>,
    ) -> Result<impl IntoResponse, StatusCode> {
        match handler.config_store.update(update.into()).await {
            Ok(config) => Ok((StatusCode::OK, Json(ApiResponse::success(config)))),
            Err(e) => Ok((
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::error("INVALID_CONFIG", e.to_string())),
            )),
        }
    }

    pub async fn get_stats(
        State(handler): State<Arc<ConfigHandler>>,
    ) -> Result<impl IntoResponse, StatusCode> {
        match handler.stats_use_case.execute().await {
            Ok(stats) => Ok((StatusCode::OK, Json(ApiResponse::success(stats)))),
            Err(e) => Ok((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("STATS_FAILED", e.to_string())),
            )),
        }
    }

    /// Liveness probe; exercises the registry and index through the stats
    /// path so an unreachable store surfaces as unhealthy.
    pub async fn health(
        State(handler): State<Arc<ConfigHandler>>,
    ) -> Result<impl IntoResponse, StatusCode> {
        match handler.stats_use_case.execute().await {
            Ok(_) => Ok((
                StatusCode::OK,
                Json(ApiResponse::success(HealthResponseDto {
                    status: "healthy".to_string(),
                    service: "knowrag".to_string(),
                    version: env!("CARGO_PKG_VERSION").to_string(),
                })),
            )),
            Err(e) => Ok((
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ApiResponse::error("UNHEALTHY", e.to_string())),
            )),
        }
    }
}
