//! JSON bodies exchanged between the service and the CLI client

use serde::{Deserialize, Serialize};

use crate::engine::basket::BasketEstimate;
use crate::engine::commute::IsochroneEntry;
use crate::engine::inflation::MonthlyInflation;
use crate::engine::locality::{BurdenRow, HeatmapCell};
use crate::models::GroceryItem;
use crate::store::{NearbyListing, TableCounts};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadyResponse {
    pub status: String,
    pub tables: TableCounts,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BurdenResponse {
    pub income: f64,
    pub localities: Vec<BurdenRow>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroceryResponse {
    pub items: Vec<GroceryItem>,
    #[serde(flatten)]
    pub estimate: BasketEstimate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IsochroneResponse {
    pub from: String,
    pub destinations: Vec<IsochroneEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InflationDataResponse {
    pub months: Vec<MonthlyInflation>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeatmapResponse {
    pub localities: Vec<HeatmapCell>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NearbyResponse {
    pub center: String,
    pub nearby: Vec<NearbyListing>,
}

/// `{"error": {"message", "type"}}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
    #[serde(rename = "type")]
    pub kind: String,
}
