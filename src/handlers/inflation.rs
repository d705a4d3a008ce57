use axum::{extract::State, Json};

use crate::api::InflationDataResponse;
use crate::engine::inflation::{self, InflationSummary};
use crate::error::AppError;
use crate::handlers::AppState;
use crate::metrics;

/// GET /inflation/data
pub async fn data(State(state): State<AppState>) -> Result<Json<InflationDataResponse>, AppError> {
    metrics::record_request("/inflation/data");

    let records = state.store.inflation_records().await?;
    Ok(Json(InflationDataResponse {
        months: inflation::group_by_month(&records),
    }))
}

/// GET /inflation/summary
pub async fn summary(State(state): State<AppState>) -> Result<Json<InflationSummary>, AppError> {
    metrics::record_request("/inflation/summary");

    let records = state.store.inflation_records().await?;
    let average = state.store.average_overall_inflation().await?;
    Ok(Json(inflation::summarize(&records, average)))
}
