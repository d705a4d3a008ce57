//! Cost aggregation engine
//!
//! Pure, synchronous calculators that turn fetched rows into the derived
//! figures every screen shows:
//! - `rent`: top listings and classification counts
//! - `basket`: grocery basket totals and monthly estimate
//! - `commute`: route/fallback commute cost, fare passes, isochrone zones
//! - `locality`: per-locality breakdowns, comparison, burden index, heatmap
//! - `prediction`: profile-driven monthly cost prediction
//! - `inflation`: month grouping, overall average and trend
//!
//! Randomness only enters through [`JitterSource`], so every calculator can be
//! driven deterministically.

pub mod basket;
pub mod commute;
pub mod inflation;
pub mod locality;
pub mod prediction;
pub mod rent;
pub mod source;

pub use source::{FixedJitter, JitterSource, ListingClassifier, RandomClassifier, SeededJitter, ThreadRngJitter};

use thiserror::Error;

/// Errors raised by the engine before any computation happens.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CostError {
    /// Input the cost model refuses to compute with
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// An operation needed the user profile but none exists
    #[error("no user profile found")]
    ProfileNotFound,
}

impl CostError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}
