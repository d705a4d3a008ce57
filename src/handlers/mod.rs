//! HTTP handlers
//!
//! Each handler fetches rows from the store, hands them to the engine and
//! returns the result as JSON. Formatting belongs to the client.

pub mod geospatial;
pub mod grocery;
pub mod health;
pub mod inflation;
pub mod metrics_handler;
pub mod prediction;
pub mod profile;
pub mod rental;
pub mod transport;

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::Query;
use axum::Json;
use std::sync::Arc;
use std::time::Duration;

use crate::engine::locality::require_locality;
use crate::engine::JitterSource;
use crate::error::AppError;
use crate::store::SqliteStore;

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<SqliteStore>,
    pub jitter: Arc<dyn JitterSource>,
    /// Pause before answering a prediction
    pub prediction_delay: Duration,
}

/// Unwrap query parameters, turning extractor rejections into JSON 400s
pub(crate) fn query_params<T>(query: Result<Query<T>, QueryRejection>) -> Result<T, AppError> {
    query
        .map(|Query(params)| params)
        .map_err(|rejection| AppError::InvalidInput(rejection.body_text()))
}

pub(crate) fn json_body<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    body.map(|Json(value)| value)
        .map_err(|rejection| AppError::InvalidInput(rejection.body_text()))
}

/// A required, non-blank locality parameter
pub(crate) fn locality_param(value: Option<String>, name: &str) -> Result<String, AppError> {
    let raw = value.ok_or_else(|| AppError::InvalidInput(format!("{} is required", name)))?;
    let locality = require_locality(&raw)
        .map_err(|_| AppError::InvalidInput(format!("{} must not be empty", name)))?;
    Ok(locality.to_string())
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locality_param() {
        assert_eq!(locality_param(Some(" Market Ward ".to_string()), "loc1").unwrap(), "Market Ward");
        assert!(matches!(
            locality_param(None, "loc1"),
            Err(AppError::InvalidInput(msg)) if msg == "loc1 is required"
        ));
        assert!(locality_param(Some("  ".to_string()), "loc1").is_err());
    }
}
