//! Domain records shared by the engine, the store and the HTTP layer.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::engine::CostError;

/// The single user profile the analyzer works with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
    /// Monthly income in rupees
    pub income: f64,
    pub family_size: u32,
    pub preferred_locale: String,
    /// Commute distance to work in km
    pub commute_distance: f64,
}

impl UserProfile {
    /// Reject profiles the cost model cannot work with
    pub fn validate(&self) -> Result<(), CostError> {
        if self.name.trim().is_empty() {
            return Err(CostError::invalid("profile name is required"));
        }
        if !self.income.is_finite() || self.income < 0.0 {
            return Err(CostError::invalid("income must be a non-negative number"));
        }
        if !self.commute_distance.is_finite() || self.commute_distance < 0.0 {
            return Err(CostError::invalid(
                "commute distance must be a non-negative number",
            ));
        }
        Ok(())
    }
}

/// Opaque label attached to a listing when it is seeded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Classification {
    Fair,
    Overpriced,
}

impl Classification {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fair => "fair",
            Self::Overpriced => "overpriced",
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Classification {
    type Err = CostError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fair" => Ok(Self::Fair),
            "overpriced" => Ok(Self::Overpriced),
            other => Err(CostError::invalid(format!(
                "unknown classification '{}'",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RentalListing {
    pub id: i64,
    pub locality: String,
    pub rent: f64,
    pub bedrooms: u32,
    pub sqft: u32,
    pub classification: Classification,
    /// Distance to the town centre in km
    pub distance: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lon: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroceryItem {
    pub item: String,
    pub price: f64,
    pub source: String,
}

/// Directed route between two localities; the reverse route may not exist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransportRoute {
    pub id: i64,
    pub from_locality: String,
    pub to_locality: String,
    pub distance: f64,
    pub fare: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InflationCategory {
    Food,
    Housing,
    Transport,
    Overall,
}

impl InflationCategory {
    pub const ALL: [InflationCategory; 4] = [
        InflationCategory::Food,
        InflationCategory::Housing,
        InflationCategory::Transport,
        InflationCategory::Overall,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Food => "Food",
            Self::Housing => "Housing",
            Self::Transport => "Transport",
            Self::Overall => "Overall",
        }
    }
}

impl fmt::Display for InflationCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InflationCategory {
    type Err = CostError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| CostError::invalid(format!("unknown inflation category '{}'", s)))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InflationRecord {
    /// Month label in `YYYY-MM` form
    pub month: String,
    pub category: InflationCategory,
    /// Percentage
    pub rate: f64,
}

/// Monthly cost of living for one locality or profile.
///
/// Built fresh for every query and never persisted. `total` is always the sum
/// of the three components, so the fields are only settable through the
/// constructor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostBreakdown {
    pub rent: f64,
    pub groceries: f64,
    pub transport: f64,
    pub total: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost_burden: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inflation_rate: Option<f64>,
}

impl CostBreakdown {
    pub fn new(rent: f64, groceries: f64, transport: f64) -> Self {
        Self {
            rent,
            groceries,
            transport,
            total: rent + groceries + transport,
            cost_burden: None,
            inflation_rate: None,
        }
    }

    /// Attach the cost burden for `income`; left unset when income is not positive.
    pub fn with_burden(mut self, income: f64) -> Self {
        self.cost_burden = burden_pct(self.total, income);
        self
    }

    pub fn with_inflation(mut self, rate: Option<f64>) -> Self {
        self.inflation_rate = rate;
        self
    }
}

/// `total / income * 100`, undefined for non-positive income
pub fn burden_pct(total: f64, income: f64) -> Option<f64> {
    if income > 0.0 && income.is_finite() {
        Some(total / income * 100.0)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> UserProfile {
        UserProfile {
            name: "Asha".to_string(),
            income: 40000.0,
            family_size: 3,
            preferred_locale: "Gandhi Nagar".to_string(),
            commute_distance: 6.5,
        }
    }

    #[test]
    fn test_breakdown_total_is_sum() {
        let b = CostBreakdown::new(7123.45, 3210.5, 1733.3);
        assert_eq!(b.total, b.rent + b.groceries + b.transport);
        assert!(b.cost_burden.is_none());
    }

    #[test]
    fn test_burden_requires_positive_income() {
        let b = CostBreakdown::new(5000.0, 3000.0, 2000.0);
        assert_eq!(b.clone().with_burden(20000.0).cost_burden, Some(50.0));
        assert_eq!(b.clone().with_burden(0.0).cost_burden, None);
        assert_eq!(b.with_burden(-100.0).cost_burden, None);
    }

    #[test]
    fn test_profile_validation() {
        assert!(profile().validate().is_ok());

        let mut unnamed = profile();
        unnamed.name = "   ".to_string();
        assert!(unnamed.validate().is_err());

        let mut negative = profile();
        negative.commute_distance = -1.0;
        assert!(negative.validate().is_err());

        let mut nan_income = profile();
        nan_income.income = f64::NAN;
        assert!(nan_income.validate().is_err());
    }

    #[test]
    fn test_classification_round_trips_through_str() {
        assert_eq!("fair".parse::<Classification>().unwrap(), Classification::Fair);
        assert_eq!(Classification::Overpriced.to_string(), "overpriced");
        assert!("cheap".parse::<Classification>().is_err());
    }

    #[test]
    fn test_inflation_category_parse() {
        assert_eq!(
            "Overall".parse::<InflationCategory>().unwrap(),
            InflationCategory::Overall
        );
        assert!("overall".parse::<InflationCategory>().is_err());
    }

    #[test]
    fn test_listing_json_omits_missing_coordinates() {
        let listing = RentalListing {
            id: 1,
            locality: "Market Ward".to_string(),
            rent: 6000.0,
            bedrooms: 2,
            sqft: 800,
            classification: Classification::Fair,
            distance: 2.5,
            lat: None,
            lon: None,
        };
        let value = serde_json::to_value(&listing).unwrap();
        assert_eq!(value["classification"], "fair");
        assert!(value.get("lat").is_none());
    }
}
