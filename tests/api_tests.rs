/// Integration tests for the HTTP API, driven through the full router
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use metrics_exporter_prometheus::PrometheusBuilder;
use rent_analyzer::engine::FixedJitter;
use rent_analyzer::handlers::AppState;
use rent_analyzer::models::{Classification, RentalListing, TransportRoute};
use rent_analyzer::server::create_router;
use rent_analyzer::store::seed::grocery_catalogue;
use rent_analyzer::store::SqliteStore;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

async fn store() -> Arc<SqliteStore> {
    Arc::new(SqliteStore::connect("sqlite::memory:", 1).await.unwrap())
}

fn router(store: Arc<SqliteStore>) -> Router {
    let state = AppState {
        store,
        jitter: Arc::new(FixedJitter(0.5)),
        prediction_delay: Duration::ZERO,
    };
    let handle = PrometheusBuilder::new().build_recorder().handle();
    create_router(state, Arc::new(handle))
}

fn listing(locality: &str, rent: f64) -> RentalListing {
    RentalListing {
        id: 0,
        locality: locality.to_string(),
        rent,
        bedrooms: 2,
        sqft: 900,
        classification: Classification::Fair,
        distance: 3.0,
        lat: None,
        lon: None,
    }
}

async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    read(response).await
}

async fn post(app: Router, uri: &str, body: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    read(response).await
}

async fn read(response: axum::response::Response) -> (StatusCode, Value) {
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

fn close(actual: &Value, expected: f64) -> bool {
    actual
        .as_f64()
        .is_some_and(|value| (value - expected).abs() < 1e-6)
}

#[tokio::test]
async fn test_profile_missing_then_saved() {
    let store = store().await;

    let (status, body) = get(router(store.clone()), "/profile").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["type"], "not_found");

    let profile = json!({
        "name": "Asha",
        "income": 32000.0,
        "family_size": 3,
        "preferred_locale": "Market Ward",
        "commute_distance": 4.5
    });
    let (status, _) = post(router(store.clone()), "/profile", &profile.to_string()).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = get(router(store), "/profile").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Asha");
    assert_eq!(body["family_size"], 3);
}

#[tokio::test]
async fn test_invalid_profile_is_400() {
    let profile = json!({
        "name": "Asha",
        "income": -1.0,
        "family_size": 3,
        "preferred_locale": "Market Ward",
        "commute_distance": 0.0
    });
    let (status, body) = post(router(store().await), "/profile", &profile.to_string()).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["type"], "invalid_input");
}

#[tokio::test]
async fn test_malformed_json_is_400() {
    let (status, body) = post(router(store().await), "/profile", "{not json").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"]["message"].is_string());
}

#[tokio::test]
async fn test_compare_same_locality_has_no_savings() {
    let store = store().await;
    store
        .insert_listings(&[listing("Market Ward", 6000.0), listing("Nehru Colony", 4000.0)])
        .await
        .unwrap();

    let (status, body) = get(router(store), "/compare?loc1=Market%20Ward&loc2=Market%20Ward").await;
    assert_eq!(status, StatusCode::OK);
    assert!(close(&body["savings_amount"], 0.0));
    assert!(close(&body["savings_percent"], 0.0));
    assert_eq!(body["first"]["analysis"], body["second"]["analysis"]);
}

#[tokio::test]
async fn test_compare_unknown_locality_uses_default_rent() {
    let store = store().await;
    store
        .insert_listings(&[listing("Market Ward", 6000.0)])
        .await
        .unwrap();

    let (status, body) = get(router(store), "/compare?loc1=Market&loc2=Nowhere").await;
    assert_eq!(status, StatusCode::OK);
    assert!(close(&body["first"]["analysis"]["rent"], 6000.0));
    assert!(close(&body["second"]["analysis"]["rent"], 5000.0));
    assert_eq!(body["cheaper"], "Nowhere");
    assert!(close(&body["savings_amount"], 1000.0));
}

#[tokio::test]
async fn test_compare_requires_both_localities() {
    let (status, body) = get(router(store().await), "/compare?loc1=Market").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["type"], "invalid_input");
}

#[tokio::test]
async fn test_cost_burden_rejects_zero_income() {
    let (status, body) = get(router(store().await), "/cost-burden?income=0").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["type"], "invalid_input");
}

#[tokio::test]
async fn test_cost_burden_levels() {
    let store = store().await;
    store
        .insert_listings(&[listing("Cheap Lane", 2000.0), listing("Posh Hill", 15000.0)])
        .await
        .unwrap();

    let (status, body) = get(router(store), "/cost-burden?income=20000").await;
    assert_eq!(status, StatusCode::OK);

    let rows = body["localities"].as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["locality"], "Cheap Lane");
    assert_eq!(rows[0]["level"], "affordable");
    assert_eq!(rows[1]["level"], "unaffordable");
}

#[tokio::test]
async fn test_reference_basket() {
    let store = store().await;
    store.insert_groceries(&grocery_catalogue()).await.unwrap();

    let (status, body) = get(router(store), "/items").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["items"].as_array().unwrap().len(), 8);
    assert!(close(&body["total_basket"], 832.0));
    assert!(close(&body["monthly_estimate"], 3577.6));
}

#[tokio::test]
async fn test_route_falls_back_to_given_distance() {
    let store = store().await;
    store
        .insert_routes(&[TransportRoute {
            id: 0,
            from_locality: "Railway Colony".to_string(),
            to_locality: "Market Ward".to_string(),
            distance: 5.0,
            fare: 40.0,
        }])
        .await
        .unwrap();

    let (status, body) = get(router(store), "/route?from=Railway&to=Gandhi&distance=10").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["found"], false);
    assert!(close(&body["fare"], 80.0));
    assert!(close(&body["monthly_cost"], 4160.0));
}

#[tokio::test]
async fn test_predict_without_profile_is_404() {
    let (status, body) = post(router(store().await), "/predict", "").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["type"], "not_found");
}

#[tokio::test]
async fn test_predict_with_body() {
    let profile = json!({
        "name": "Ravi",
        "income": 15000.0,
        "family_size": 2,
        "preferred_locale": "Market Ward",
        "commute_distance": 5.0
    });
    let (status, body) = post(router(store().await), "/predict", &profile.to_string()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"], "Ravi");
    assert!(close(&body["breakdown"]["rent"], 6000.0));
}

#[tokio::test]
async fn test_ready_reports_table_counts() {
    let store = store().await;
    store.insert_groceries(&grocery_catalogue()).await.unwrap();

    let (status, body) = get(router(store), "/ready").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["tables"]["groceries"], 8);
    assert_eq!(body["tables"]["listings"], 0);
}
