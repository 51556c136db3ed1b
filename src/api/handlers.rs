use axum::{http::Uri, response::Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::api::error::ApiError;

pub type AppState<S> = Arc<S>;

/// Simple health check endpoint
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
}

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

/// Fallback for paths no router claims, including `/api/brewerys/` without an id.
pub async fn route_not_found(uri: Uri) -> ApiError {
    log::info!("No route for {}", uri.path());
    ApiError::NotFound("route not found".to_string())
}
