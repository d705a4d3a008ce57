use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};

use crate::error::AppError;
use crate::handlers::{json_body, AppState};
use crate::metrics;
use crate::models::UserProfile;

/// GET /profile
pub async fn get_profile(State(state): State<AppState>) -> Result<Json<UserProfile>, AppError> {
    metrics::record_request("/profile");

    let profile = state.store.get_profile().await?.ok_or(AppError::ProfileNotFound)?;
    Ok(Json(profile))
}

/// POST /profile
///
/// Replaces any existing profile.
pub async fn save_profile(
    State(state): State<AppState>,
    body: Result<Json<UserProfile>, JsonRejection>,
) -> Result<Json<UserProfile>, AppError> {
    metrics::record_request("/profile");

    let mut profile = json_body(body)?;
    profile.name = profile.name.trim().to_string();
    profile.preferred_locale = profile.preferred_locale.trim().to_string();
    profile.validate()?;

    state.store.save_profile(&profile).await?;
    tracing::info!(name = %profile.name, family_size = profile.family_size, "Saved user profile");

    Ok(Json(profile))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::test_support::empty_state;

    fn profile() -> UserProfile {
        UserProfile {
            name: "  Asha ".to_string(),
            income: 32000.0,
            family_size: 3,
            preferred_locale: "Gandhi Nagar".to_string(),
            commute_distance: 6.5,
        }
    }

    #[tokio::test]
    async fn test_missing_profile_is_not_found() {
        let state = empty_state().await;
        let result = get_profile(State(state)).await;
        assert!(matches!(result, Err(AppError::ProfileNotFound)));
    }

    #[tokio::test]
    async fn test_save_then_get() {
        let state = empty_state().await;
        let Json(saved) = save_profile(State(state.clone()), Ok(Json(profile())))
            .await
            .unwrap();
        assert_eq!(saved.name, "Asha");

        let Json(loaded) = get_profile(State(state)).await.unwrap();
        assert_eq!(loaded, saved);
    }

    #[tokio::test]
    async fn test_rejects_negative_income() {
        let state = empty_state().await;
        let mut bad = profile();
        bad.income = -1.0;
        let result = save_profile(State(state), Ok(Json(bad))).await;
        assert!(matches!(result, Err(AppError::InvalidInput(_))));
    }
}
