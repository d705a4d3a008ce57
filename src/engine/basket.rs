use serde::{Deserialize, Serialize};

use crate::models::GroceryItem;

/// Weeks-per-month approximation used for the monthly estimate
pub const WEEKS_PER_MONTH: f64 = 4.3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BasketEstimate {
    pub item_count: usize,
    pub total_basket: f64,
    pub monthly_estimate: f64,
    /// Omitted when there are no items
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average_price: Option<f64>,
}

pub fn estimate(items: &[GroceryItem]) -> BasketEstimate {
    let total: f64 = items.iter().map(|i| i.price).sum();
    let average_price = if items.is_empty() {
        None
    } else {
        Some(total / items.len() as f64)
    };

    BasketEstimate {
        item_count: items.len(),
        total_basket: total,
        monthly_estimate: total * WEEKS_PER_MONTH,
        average_price,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(prices: &[f64]) -> Vec<GroceryItem> {
        prices
            .iter()
            .enumerate()
            .map(|(i, p)| GroceryItem {
                item: format!("item-{}", i),
                price: *p,
                source: "BigBasket".to_string(),
            })
            .collect()
    }

    #[test]
    fn test_reference_basket() {
        let basket = estimate(&items(&[45.0, 40.0, 150.0, 55.0, 300.0, 80.0, 42.0, 120.0]));
        assert_eq!(basket.item_count, 8);
        assert_eq!(basket.total_basket, 832.0);
        assert!((basket.monthly_estimate - 3577.6).abs() < 1e-9);
        assert_eq!(basket.average_price, Some(104.0));
    }

    #[test]
    fn test_empty_basket_has_no_average() {
        let basket = estimate(&[]);
        assert_eq!(basket.total_basket, 0.0);
        assert_eq!(basket.monthly_estimate, 0.0);
        assert!(basket.average_price.is_none());

        let json = serde_json::to_value(&basket).unwrap();
        assert!(json.get("average_price").is_none());
    }
}
