//! Typed HTTP client for the rent analyzer service
//!
//! Used by the CLI; every method maps to one endpoint and returns the same
//! structures the handlers serialize.

use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::api::{
    BurdenResponse, ErrorResponse, GroceryResponse, HealthResponse, HeatmapResponse,
    InflationDataResponse, IsochroneResponse, NearbyResponse,
};
use crate::config::ClientConfig;
use crate::engine::commute::CommuteCost;
use crate::engine::inflation::InflationSummary;
use crate::engine::locality::Comparison;
use crate::engine::prediction::Prediction;
use crate::engine::rent::{ClassificationCounts, RentSummary};
use crate::error::AppError;
use crate::models::UserProfile;

pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a new client
    ///
    /// # Arguments
    /// * `base_url` - Service root, e.g. "http://127.0.0.1:8080"
    /// * `timeout` - Per-request timeout
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, AppError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self, AppError> {
        Self::new(&config.base_url, Duration::from_secs(config.timeout_seconds))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, AppError> {
        let response = request.send().await?;
        let status = response.status();

        if status.is_success() {
            return Ok(response.json::<T>().await?);
        }

        let text = response.text().await.unwrap_or_default();
        Err(error_from_response(status, &text))
    }

    pub async fn health(&self) -> Result<HealthResponse, AppError> {
        self.send(self.client.get(self.url("/health"))).await
    }

    /// Stored profile; [`AppError::ProfileNotFound`] when none exists
    pub async fn get_profile(&self) -> Result<UserProfile, AppError> {
        self.send(self.client.get(self.url("/profile"))).await
    }

    pub async fn save_profile(&self, profile: &UserProfile) -> Result<UserProfile, AppError> {
        self.send(self.client.post(self.url("/profile")).json(profile))
            .await
    }

    pub async fn listings(&self, limit: usize) -> Result<RentSummary, AppError> {
        self.send(
            self.client
                .get(self.url("/listings"))
                .query(&[("limit", limit)]),
        )
        .await
    }

    pub async fn listings_summary(&self) -> Result<ClassificationCounts, AppError> {
        self.send(self.client.get(self.url("/listings/summary")))
            .await
    }

    pub async fn compare(&self, first: &str, second: &str) -> Result<Comparison, AppError> {
        self.send(
            self.client
                .get(self.url("/compare"))
                .query(&[("loc1", first), ("loc2", second)]),
        )
        .await
    }

    pub async fn cost_burden(&self, income: f64) -> Result<BurdenResponse, AppError> {
        self.send(
            self.client
                .get(self.url("/cost-burden"))
                .query(&[("income", income)]),
        )
        .await
    }

    pub async fn groceries(&self) -> Result<GroceryResponse, AppError> {
        self.send(self.client.get(self.url("/items"))).await
    }

    pub async fn route(&self, from: &str, to: &str, distance: f64) -> Result<CommuteCost, AppError> {
        let distance = distance.to_string();
        self.send(
            self.client
                .get(self.url("/route"))
                .query(&[("from", from), ("to", to), ("distance", distance.as_str())]),
        )
        .await
    }

    pub async fn isochrone(&self, from: &str) -> Result<IsochroneResponse, AppError> {
        self.send(
            self.client
                .get(self.url("/isochrone"))
                .query(&[("from", from)]),
        )
        .await
    }

    pub async fn inflation_data(&self) -> Result<InflationDataResponse, AppError> {
        self.send(self.client.get(self.url("/inflation/data")))
            .await
    }

    pub async fn inflation_summary(&self) -> Result<InflationSummary, AppError> {
        self.send(self.client.get(self.url("/inflation/summary")))
            .await
    }

    pub async fn heatmap(&self) -> Result<HeatmapResponse, AppError> {
        self.send(self.client.get(self.url("/heatmap"))).await
    }

    pub async fn nearby(&self, locality: &str) -> Result<NearbyResponse, AppError> {
        self.send(
            self.client
                .get(self.url("/nearby"))
                .query(&[("locality", locality)]),
        )
        .await
    }

    pub async fn predict(&self, profile: &UserProfile) -> Result<Prediction, AppError> {
        self.send(self.client.post(self.url("/predict")).json(profile))
            .await
    }
}

/// Map an error response back onto the error the service raised
fn error_from_response(status: StatusCode, body: &str) -> AppError {
    let (message, kind) = match serde_json::from_str::<ErrorResponse>(body) {
        Ok(parsed) => (parsed.error.message, Some(parsed.error.kind)),
        Err(_) if body.is_empty() => (status.to_string(), None),
        Err(_) => (body.to_string(), None),
    };

    match (status, kind.as_deref()) {
        (StatusCode::NOT_FOUND, Some("not_found")) => AppError::ProfileNotFound,
        (StatusCode::BAD_REQUEST, _) => AppError::InvalidInput(message),
        _ => AppError::UpstreamError { status, message },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation_trims_slash() {
        let client = ApiClient::new("http://localhost:8080/", Duration::from_secs(5)).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8080");
        assert_eq!(client.url("/items"), "http://localhost:8080/items");
    }

    #[test]
    fn test_error_mapping() {
        let body = r#"{"error":{"message":"income must be greater than zero","type":"invalid_input"}}"#;
        assert!(matches!(
            error_from_response(StatusCode::BAD_REQUEST, body),
            AppError::InvalidInput(msg) if msg == "income must be greater than zero"
        ));

        let body = r#"{"error":{"message":"No user profile found. Create one first.","type":"not_found"}}"#;
        assert!(matches!(
            error_from_response(StatusCode::NOT_FOUND, body),
            AppError::ProfileNotFound
        ));

        assert!(matches!(
            error_from_response(StatusCode::INTERNAL_SERVER_ERROR, ""),
            AppError::UpstreamError { status, .. } if status == StatusCode::INTERNAL_SERVER_ERROR
        ));
    }

    mod against_mock {
        use super::*;
        use httpmock::prelude::*;
        use serde_json::json;

        fn client(server: &MockServer) -> ApiClient {
            ApiClient::new(server.base_url(), Duration::from_secs(5)).unwrap()
        }

        #[tokio::test]
        async fn test_route_sends_fallback_distance() {
            let server = MockServer::start_async().await;
            let mock = server
                .mock_async(|when, then| {
                    when.method(GET)
                        .path("/route")
                        .query_param("from", "Market Ward")
                        .query_param("to", "Gandhi Nagar")
                        .query_param("distance", "10");
                    then.status(200).json_body(json!({
                        "from": "Market Ward",
                        "to": "Gandhi Nagar",
                        "found": false,
                        "distance": 10.0,
                        "fare": 80.0,
                        "daily_cost": 160.0,
                        "monthly_cost": 4160.0,
                        "passes": {
                            "weekly_pass": 2912.0,
                            "weekly_savings_pct": 30.0,
                            "monthly_pass": 2496.0,
                            "monthly_savings_pct": 40.0
                        }
                    }));
                })
                .await;

            let cost = client(&server)
                .route("Market Ward", "Gandhi Nagar", 10.0)
                .await
                .unwrap();
            mock.assert_async().await;
            assert!(!cost.found);
            assert_eq!(cost.monthly_cost, 4160.0);
        }

        #[tokio::test]
        async fn test_compare_sends_both_localities() {
            let server = MockServer::start_async().await;
            let breakdown = json!({"rent": 5000.0, "groceries": 3250.0, "transport": 1750.0, "total": 10000.0});
            let mock = server
                .mock_async(|when, then| {
                    when.method(GET)
                        .path("/compare")
                        .query_param("loc1", "Market")
                        .query_param("loc2", "Market");
                    then.status(200).json_body(json!({
                        "first": {"locality": "Market", "analysis": breakdown},
                        "second": {"locality": "Market", "analysis": breakdown},
                        "cheaper": "Market",
                        "savings_amount": 0.0,
                        "savings_percent": 0.0
                    }));
                })
                .await;

            let comparison = client(&server).compare("Market", "Market").await.unwrap();
            mock.assert_async().await;
            assert_eq!(comparison.savings_amount, 0.0);
        }

        #[tokio::test]
        async fn test_server_error_is_upstream_error() {
            let server = MockServer::start_async().await;
            server
                .mock_async(|when, then| {
                    when.method(GET).path("/items");
                    then.status(500).json_body(json!({
                        "error": {"message": "internal error", "type": "internal_error"}
                    }));
                })
                .await;

            let err = client(&server).groceries().await.unwrap_err();
            assert!(matches!(
                err,
                AppError::UpstreamError { status, message }
                    if status == StatusCode::INTERNAL_SERVER_ERROR && message == "internal error"
            ));
        }
    }
}
