use anyhow::{Context, Result};
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::{net::SocketAddr, sync::Arc, time::Duration};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::{
    config::Config,
    engine::{JitterSource, RandomClassifier, SeededJitter, ThreadRngJitter},
    handlers::{self, AppState},
    metrics,
    signals::setup_signal_handlers,
    store::{seed_if_empty, SqliteStore},
};

/// Start the rent analyzer service
///
/// This function:
/// 1. Initializes metrics
/// 2. Opens the store and seeds empty tables
/// 3. Sets up signal handlers for graceful shutdown
/// 4. Binds to the configured address and serves until shutdown
pub async fn start_server(config: Config) -> Result<()> {
    info!("Initializing Prometheus metrics...");
    let metrics_handle = Arc::new(metrics::init_metrics()?);

    let store = Arc::new(
        SqliteStore::connect(&config.database.url, config.database.max_connections).await?,
    );
    info!(url = %config.database.url, "Database ready");

    let jitter: Arc<dyn JitterSource> = match config.seed.rng_seed {
        Some(seed) => Arc::new(SeededJitter::new(seed)),
        None => Arc::new(ThreadRngJitter),
    };

    if config.seed.enabled {
        let classifier = RandomClassifier::new(jitter.as_ref());
        seed_if_empty(&store, jitter.as_ref(), &classifier, config.seed.listing_count).await?;
    }

    let (shutdown_tx, signal_handle) = setup_signal_handlers();
    let mut shutdown_rx = shutdown_tx.subscribe();

    let app_state = AppState {
        store,
        jitter,
        prediction_delay: Duration::from_millis(config.prediction.delay_ms),
    };

    let app = create_router(app_state, metrics_handle);

    let addr = SocketAddr::from((
        config
            .server
            .host
            .parse::<std::net::IpAddr>()
            .with_context(|| format!("Invalid server host: {}", config.server.host))?,
        config.server.port,
    ));

    info!("Starting rent analyzer on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            let _ = shutdown_rx.recv().await;
            info!("Shutdown signal received, draining connections...");
        })
        .await?;

    signal_handle.await?;
    info!("Server stopped gracefully");

    Ok(())
}

/// Create the Axum router with all routes and middleware
pub fn create_router(app_state: AppState, metrics_handle: Arc<PrometheusHandle>) -> Router {
    let api_routes = Router::new()
        .route("/ready", get(handlers::health::readiness_check))
        .route(
            "/profile",
            get(handlers::profile::get_profile).post(handlers::profile::save_profile),
        )
        .route("/listings", get(handlers::rental::list_listings))
        .route("/listings/summary", get(handlers::rental::listings_summary))
        .route("/compare", get(handlers::rental::compare))
        .route("/cost-burden", get(handlers::rental::cost_burden))
        .route("/items", get(handlers::grocery::list_items))
        .route("/route", get(handlers::transport::route))
        .route("/isochrone", get(handlers::transport::isochrone))
        .route("/inflation/data", get(handlers::inflation::data))
        .route("/inflation/summary", get(handlers::inflation::summary))
        .route("/heatmap", get(handlers::geospatial::heatmap))
        .route("/nearby", get(handlers::geospatial::nearby))
        .route("/predict", post(handlers::prediction::predict))
        .with_state(app_state);

    Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/metrics", get(handlers::metrics_handler::metrics))
        .with_state(metrics_handle)
        .merge(api_routes)
        // Profiles are the only request bodies
        .layer(DefaultBodyLimit::max(64 * 1024))
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::test_support::empty_state;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    async fn test_router() -> Router {
        let handle = metrics_exporter_prometheus::PrometheusBuilder::new()
            .build_recorder()
            .handle();
        create_router(empty_state().await, Arc::new(handle))
    }

    #[tokio::test]
    async fn test_create_router() {
        let app = test_router().await;

        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_unknown_route_is_404() {
        let app = test_router().await;

        let response = app
            .oneshot(Request::builder().uri("/v1/models").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
