use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use serde::Deserialize;

use crate::api::{HeatmapResponse, NearbyResponse};
use crate::engine::locality;
use crate::error::AppError;
use crate::handlers::{locality_param, query_params, AppState};
use crate::metrics;

/// Listings returned by a nearby search
const NEARBY_LIMIT: u32 = 10;

#[derive(Debug, Deserialize)]
pub struct NearbyQuery {
    pub locality: Option<String>,
}

/// GET /heatmap
pub async fn heatmap(State(state): State<AppState>) -> Result<Json<HeatmapResponse>, AppError> {
    metrics::record_request("/heatmap");

    let rents = state.store.locality_rents().await?;
    Ok(Json(HeatmapResponse {
        localities: locality::heatmap(&rents),
    }))
}

/// GET /nearby?locality=
///
/// Listings outside the given locality (exact name), closest first.
pub async fn nearby(
    State(state): State<AppState>,
    query: Result<Query<NearbyQuery>, QueryRejection>,
) -> Result<Json<NearbyResponse>, AppError> {
    metrics::record_request("/nearby");

    let center = locality_param(query_params(query)?.locality, "locality")?;
    let nearby = state.store.nearby_listings(&center, NEARBY_LIMIT).await?;

    Ok(Json(NearbyResponse { center, nearby }))
}
