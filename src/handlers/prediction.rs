use axum::{body::Bytes, extract::State, Json};
use std::time::Instant;

use crate::engine::prediction::{self, Prediction};
use crate::error::AppError;
use crate::handlers::AppState;
use crate::metrics;
use crate::models::UserProfile;

/// POST /predict
///
/// Predicts for the profile in the body, or for the stored profile when the
/// body is empty.
pub async fn predict(State(state): State<AppState>, body: Bytes) -> Result<Json<Prediction>, AppError> {
    let start = Instant::now();
    metrics::record_request("/predict");

    let profile: UserProfile = if body.iter().all(u8::is_ascii_whitespace) {
        state.store.get_profile().await?.ok_or(AppError::ProfileNotFound)?
    } else {
        serde_json::from_slice(&body)
            .map_err(|e| AppError::InvalidInput(format!("invalid profile body: {}", e)))?
    };

    let mut prediction = prediction::predict(&profile, state.jitter.as_ref())?;
    let inflation = state.store.average_overall_inflation().await?;
    prediction.breakdown = prediction.breakdown.with_inflation(inflation);

    if !state.prediction_delay.is_zero() {
        tokio::time::sleep(state.prediction_delay).await;
    }

    if prediction.exceeds_burden_warning() {
        tracing::warn!(
            user = %prediction.user,
            burden = prediction.breakdown.cost_burden.unwrap_or_default(),
            "Predicted cost burden above warning threshold"
        );
    }
    metrics::record_prediction_duration(start.elapsed());

    Ok(Json(prediction))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::test_support::empty_state;

    fn profile() -> UserProfile {
        UserProfile {
            name: "Ravi".to_string(),
            income: 40000.0,
            family_size: 1,
            preferred_locale: "Market Ward".to_string(),
            commute_distance: 4.0,
        }
    }

    #[tokio::test]
    async fn test_predict_from_body() {
        let state = empty_state().await;
        let body = Bytes::from(serde_json::to_vec(&profile()).unwrap());

        let Json(p) = predict(State(state), body).await.unwrap();
        assert_eq!(p.user, "Ravi");
        assert_eq!(p.breakdown.rent, 4500.0);
        assert!(p.breakdown.inflation_rate.is_none());
        assert!(!p.exceeds_burden_warning());
    }

    #[tokio::test]
    async fn test_predict_uses_stored_profile() {
        let state = empty_state().await;
        assert!(matches!(
            predict(State(state.clone()), Bytes::new()).await,
            Err(AppError::ProfileNotFound)
        ));

        state.store.save_profile(&profile()).await.unwrap();
        let Json(p) = predict(State(state), Bytes::new()).await.unwrap();
        assert_eq!(p.income, 40000.0);
    }

    #[tokio::test]
    async fn test_predict_rejects_unnamed_profile() {
        let state = empty_state().await;
        let mut unnamed = profile();
        unnamed.name = String::new();
        let body = Bytes::from(serde_json::to_vec(&unnamed).unwrap());

        let result = predict(State(state), body).await;
        assert!(matches!(result, Err(AppError::InvalidInput(_))));
    }
}
