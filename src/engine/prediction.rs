//! Profile-driven monthly cost prediction.
//!
//! Presented to users as an XGBoost estimate; in practice a family-size-scaled
//! base with proportional jitter on each component.

use serde::{Deserialize, Serialize};

use super::commute::{FARE_PER_KM, WORKING_DAYS_PER_MONTH};
use super::{CostError, JitterSource};
use crate::models::{CostBreakdown, UserProfile};

const BASE_RENT: f64 = 3000.0;
const RENT_PER_MEMBER: f64 = 1500.0;
const BASE_GROCERIES: f64 = 2000.0;
const GROCERIES_PER_MEMBER: f64 = 800.0;

// Full width of the proportional jitter per component
const RENT_SPREAD: f64 = 0.2;
const GROCERIES_SPREAD: f64 = 0.15;
const TRANSPORT_SPREAD: f64 = 0.1;

const CONFIDENCE_FLOOR: f64 = 85.0;
const CONFIDENCE_SPAN: f64 = 10.0;

/// Burden above which a prediction is flagged
pub const BURDEN_WARNING_PCT: f64 = 50.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureImportance {
    pub rent: f64,
    pub groceries: f64,
    pub transport: f64,
}

impl Default for FeatureImportance {
    fn default() -> Self {
        Self {
            rent: 45.0,
            groceries: 32.0,
            transport: 23.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub user: String,
    pub income: f64,
    #[serde(flatten)]
    pub breakdown: CostBreakdown,
    /// Percentage
    pub confidence: f64,
    pub feature_importance: FeatureImportance,
}

impl Prediction {
    pub fn exceeds_burden_warning(&self) -> bool {
        self.breakdown
            .cost_burden
            .is_some_and(|pct| pct > BURDEN_WARNING_PCT)
    }
}

fn jittered(base: f64, spread: f64, jitter: &dyn JitterSource) -> f64 {
    base * (1.0 + (jitter.unit() - 0.5) * spread)
}

/// Predict the monthly costs of `profile`.
pub fn predict(profile: &UserProfile, jitter: &dyn JitterSource) -> Result<Prediction, CostError> {
    profile.validate()?;

    let members = f64::from(profile.family_size);
    let base_rent = BASE_RENT + members * RENT_PER_MEMBER;
    let base_groceries = BASE_GROCERIES + members * GROCERIES_PER_MEMBER;
    let base_transport = profile.commute_distance * FARE_PER_KM * WORKING_DAYS_PER_MONTH;

    let rent = jittered(base_rent, RENT_SPREAD, jitter);
    let groceries = jittered(base_groceries, GROCERIES_SPREAD, jitter);
    let transport = jittered(base_transport, TRANSPORT_SPREAD, jitter);

    Ok(Prediction {
        user: profile.name.clone(),
        income: profile.income,
        breakdown: CostBreakdown::new(rent, groceries, transport).with_burden(profile.income),
        confidence: jitter.range(CONFIDENCE_FLOOR, CONFIDENCE_SPAN),
        feature_importance: FeatureImportance::default(),
    })
}
