use axum::{extract::State, Json};

use crate::api::GroceryResponse;
use crate::engine::basket;
use crate::error::AppError;
use crate::handlers::AppState;
use crate::metrics;

/// GET /items
pub async fn list_items(State(state): State<AppState>) -> Result<Json<GroceryResponse>, AppError> {
    metrics::record_request("/items");

    let items = state.store.grocery_items().await?;
    let estimate = basket::estimate(&items);

    Ok(Json(GroceryResponse { items, estimate }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::test_support::empty_state;
    use crate::store::seed::grocery_catalogue;

    #[tokio::test]
    async fn test_reference_basket() {
        let state = empty_state().await;
        state.store.insert_groceries(&grocery_catalogue()).await.unwrap();

        let Json(body) = list_items(State(state)).await.unwrap();
        assert_eq!(body.items.len(), 8);
        assert_eq!(body.items[0].item, "Vegetables (weekly)");
        assert_eq!(body.estimate.total_basket, 832.0);
        assert!((body.estimate.monthly_estimate - 3577.6).abs() < 1e-9);
        assert_eq!(body.estimate.average_price, Some(104.0));
    }

    #[tokio::test]
    async fn test_empty_basket_omits_average() {
        let state = empty_state().await;
        let Json(body) = list_items(State(state)).await.unwrap();
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["total_basket"], 0.0);
        assert!(json.get("average_price").is_none());
    }
}
