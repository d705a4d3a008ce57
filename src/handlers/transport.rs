use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use serde::Deserialize;

use crate::api::IsochroneResponse;
use crate::engine::commute::{self, CommuteCost};
use crate::error::AppError;
use crate::handlers::{locality_param, query_params, AppState};
use crate::metrics;

#[derive(Debug, Deserialize)]
pub struct RouteQuery {
    pub from: Option<String>,
    pub to: Option<String>,
    /// Straight-line km used when no stored route matches
    pub distance: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct IsochroneQuery {
    pub from: Option<String>,
}

/// GET /route?from=&to=&distance=
pub async fn route(
    State(state): State<AppState>,
    query: Result<Query<RouteQuery>, QueryRejection>,
) -> Result<Json<CommuteCost>, AppError> {
    metrics::record_request("/route");

    let params = query_params(query)?;
    let from = locality_param(params.from, "from")?;
    let to = locality_param(params.to, "to")?;
    let fallback = params.distance.unwrap_or(0.0);

    let routes = state.store.routes_from(&from).await?;
    let matched = commute::find_route(&routes, &from, &to);
    let cost = commute::commute_cost(&from, &to, matched, fallback)?;

    if !cost.found {
        tracing::debug!(from = %from, to = %to, distance = fallback, "No stored route, using fallback distance");
    }

    Ok(Json(cost))
}

/// GET /isochrone?from=
pub async fn isochrone(
    State(state): State<AppState>,
    query: Result<Query<IsochroneQuery>, QueryRejection>,
) -> Result<Json<IsochroneResponse>, AppError> {
    metrics::record_request("/isochrone");

    let from = locality_param(query_params(query)?.from, "from")?;
    let routes = state.store.routes_from(&from).await?;

    Ok(Json(IsochroneResponse {
        destinations: commute::isochrone(&routes),
        from,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::commute::TravelZone;
    use crate::handlers::test_support::empty_state;
    use crate::models::TransportRoute;

    async fn state_with_routes() -> AppState {
        let state = empty_state().await;
        let route = |to: &str, distance: f64| TransportRoute {
            id: 0,
            from_locality: "Railway Colony".to_string(),
            to_locality: to.to_string(),
            distance,
            fare: distance * 8.0,
        };
        state
            .store
            .insert_routes(&[route("Market Ward", 5.0), route("Industrial Area", 12.5)])
            .await
            .unwrap();
        state
    }

    fn route_query(from: &str, to: &str, distance: Option<f64>) -> RouteQuery {
        RouteQuery {
            from: Some(from.to_string()),
            to: Some(to.to_string()),
            distance,
        }
    }

    #[tokio::test]
    async fn test_stored_route() {
        let state = state_with_routes().await;
        let Json(cost) = route(State(state), Ok(Query(route_query("Railway", "Market", Some(3.0)))))
            .await
            .unwrap();

        assert!(cost.found);
        assert_eq!(cost.distance, 5.0);
        assert_eq!(cost.fare, 40.0);
        assert_eq!(cost.monthly_cost, 40.0 * 2.0 * 26.0);
    }

    #[tokio::test]
    async fn test_fallback_distance() {
        let state = state_with_routes().await;
        let Json(cost) = route(
            State(state),
            Ok(Query(route_query("Market Ward", "Railway Colony", Some(10.0)))),
        )
        .await
        .unwrap();

        assert!(!cost.found);
        assert_eq!(cost.fare, 80.0);
        assert_eq!(cost.daily_cost, 160.0);
        assert_eq!(cost.monthly_cost, 4160.0);
    }

    #[tokio::test]
    async fn test_negative_fallback_rejected() {
        let state = empty_state().await;
        let result = route(State(state), Ok(Query(route_query("A", "B", Some(-1.0))))).await;
        assert!(matches!(result, Err(AppError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_isochrone_zones() {
        let state = state_with_routes().await;
        let Json(body) = isochrone(
            State(state),
            Ok(Query(IsochroneQuery {
                from: Some("Railway Colony".to_string()),
            })),
        )
        .await
        .unwrap();

        assert_eq!(body.from, "Railway Colony");
        assert_eq!(body.destinations.len(), 2);
        assert_eq!(body.destinations[0].time_zone, TravelZone::Within15);
        // 12.5 km at 25 km/h is exactly 30 minutes
        assert_eq!(body.destinations[1].time_zone, TravelZone::Within30);
    }
}
