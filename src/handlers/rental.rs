use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use serde::Deserialize;

use crate::api::BurdenResponse;
use crate::engine::locality::{self, Comparison};
use crate::engine::rent::{self, ClassificationCounts, RentSummary, DEFAULT_DISPLAY_LIMIT};
use crate::error::AppError;
use crate::handlers::{locality_param, query_params, AppState};
use crate::metrics;

/// Largest page `/listings` will return
const MAX_LISTINGS_LIMIT: usize = 100;

#[derive(Debug, Deserialize)]
pub struct ListingsQuery {
    pub limit: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct CompareQuery {
    pub loc1: Option<String>,
    pub loc2: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct BurdenQuery {
    pub income: Option<f64>,
}

/// GET /listings?limit=
///
/// Cheapest listings first, with classification counts over every listing.
pub async fn list_listings(
    State(state): State<AppState>,
    query: Result<Query<ListingsQuery>, QueryRejection>,
) -> Result<Json<RentSummary>, AppError> {
    metrics::record_request("/listings");

    let params = query_params(query)?;
    let limit = params
        .limit
        .unwrap_or(DEFAULT_DISPLAY_LIMIT)
        .min(MAX_LISTINGS_LIMIT);

    let listings = state.store.list_listings().await?;
    Ok(Json(rent::summarize(&listings, limit)))
}

/// GET /listings/summary
pub async fn listings_summary(
    State(state): State<AppState>,
) -> Result<Json<ClassificationCounts>, AppError> {
    metrics::record_request("/listings/summary");

    let listings = state.store.list_listings().await?;
    Ok(Json(rent::count_classifications(&listings)))
}

/// GET /compare?loc1=&loc2=
pub async fn compare(
    State(state): State<AppState>,
    query: Result<Query<CompareQuery>, QueryRejection>,
) -> Result<Json<Comparison>, AppError> {
    metrics::record_request("/compare");

    let params = query_params(query)?;
    let first = locality_param(params.loc1, "loc1")?;
    let second = locality_param(params.loc2, "loc2")?;

    let rent_a = state.store.average_rent_matching(&first).await?;
    let rent_b = if first == second {
        rent_a
    } else {
        state.store.average_rent_matching(&second).await?
    };

    let comparison = locality::compare(
        (first.as_str(), rent_a),
        (second.as_str(), rent_b),
        state.jitter.as_ref(),
    );
    tracing::debug!(
        first = %first,
        second = %second,
        cheaper = %comparison.cheaper,
        "Compared localities"
    );

    Ok(Json(comparison))
}

/// GET /cost-burden?income=
pub async fn cost_burden(
    State(state): State<AppState>,
    query: Result<Query<BurdenQuery>, QueryRejection>,
) -> Result<Json<BurdenResponse>, AppError> {
    metrics::record_request("/cost-burden");

    let income = query_params(query)?
        .income
        .ok_or_else(|| AppError::InvalidInput("income is required".to_string()))?;

    // Reject before touching the store
    let rents = if income.is_finite() && income > 0.0 {
        state.store.locality_rents().await?
    } else {
        Vec::new()
    };
    let localities = locality::burden_index(&rents, income)?;

    Ok(Json(BurdenResponse { income, localities }))
}
