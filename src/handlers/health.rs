use axum::{extract::State, Json};

use crate::api::{HealthResponse, ReadyResponse};
use crate::error::AppError;
use crate::handlers::AppState;

/// Health check endpoint
/// Returns 200 OK if the service is running
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        service: "rent-analyzer".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Readiness check endpoint
/// Returns 200 OK once the store answers queries
pub async fn readiness_check(State(state): State<AppState>) -> Result<Json<ReadyResponse>, AppError> {
    let tables = state.store.table_counts().await?;
    Ok(Json(ReadyResponse {
        status: "ready".to_string(),
        tables,
    }))
}
