//! Locality cost model
//!
//! Combines rent with grocery and transport figures into one
//! [`CostBreakdown`] per locality, and derives the comparison, burden index and
//! heatmap views across localities.
//!
//! The comparison path jitters groceries/transport while the burden index uses
//! the flat base figures. The profile prediction in `prediction` uses yet
//! another, family-size-scaled formula. These are kept as separate paths on
//! purpose; do not fold them together without a product decision.

use serde::{Deserialize, Serialize};

use super::{CostError, JitterSource};
use crate::models::{burden_pct, CostBreakdown};

/// Rent assumed when no listing matches a locality
pub const DEFAULT_RENT: f64 = 5000.0;
pub const GROCERY_BASE: f64 = 3000.0;
pub const TRANSPORT_BASE: f64 = 1500.0;
/// Width of the jitter added to the grocery and transport bases
pub const JITTER_SPAN: f64 = 500.0;

/// Single place where a stored locality is matched against a query.
///
/// Case-sensitive substring match. The store's SQL predicate mirrors this.
pub fn matches_locality(stored: &str, query: &str) -> bool {
    stored.contains(query)
}

/// Trimmed locality, or an error for blank input
pub fn require_locality(raw: &str) -> Result<&str, CostError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        Err(CostError::invalid("locality must not be empty"))
    } else {
        Ok(trimmed)
    }
}

/// Average rent and listing count for one locality, as aggregated by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocalityRent {
    pub locality: String,
    pub avg_rent: f64,
    pub count: u64,
}

/// Breakdown for a locality whose matching listings average `avg_rent`.
pub fn analyze(avg_rent: Option<f64>, jitter: &dyn JitterSource) -> CostBreakdown {
    let rent = avg_rent.unwrap_or(DEFAULT_RENT);
    let groceries = jitter.range(GROCERY_BASE, JITTER_SPAN);
    let transport = jitter.range(TRANSPORT_BASE, JITTER_SPAN);
    CostBreakdown::new(rent, groceries, transport)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocalityAnalysis {
    pub locality: String,
    pub analysis: CostBreakdown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comparison {
    pub first: LocalityAnalysis,
    pub second: LocalityAnalysis,
    pub cheaper: String,
    pub savings_amount: f64,
    pub savings_percent: f64,
}

/// Compare two localities given their average rents.
///
/// When both names are the same locality it is analyzed once, so comparing a
/// locality with itself always reports zero savings.
pub fn compare(
    first: (&str, Option<f64>),
    second: (&str, Option<f64>),
    jitter: &dyn JitterSource,
) -> Comparison {
    let (name_a, rent_a) = first;
    let (name_b, rent_b) = second;

    let a = analyze(rent_a, jitter);
    let b = if name_a == name_b {
        a.clone()
    } else {
        analyze(rent_b, jitter)
    };

    let savings_amount = (a.total - b.total).abs();
    let max_total = a.total.max(b.total);
    let savings_percent = if max_total > 0.0 {
        savings_amount / max_total * 100.0
    } else {
        0.0
    };
    let cheaper = if b.total < a.total { name_b } else { name_a };

    Comparison {
        cheaper: cheaper.to_string(),
        savings_amount,
        savings_percent,
        first: LocalityAnalysis {
            locality: name_a.to_string(),
            analysis: a,
        },
        second: LocalityAnalysis {
            locality: name_b.to_string(),
            analysis: b,
        },
    }
}

/// How heavy a cost burden is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BurdenLevel {
    Affordable,
    High,
    Unaffordable,
}

impl BurdenLevel {
    pub fn for_pct(pct: f64) -> Self {
        if pct > 70.0 {
            Self::Unaffordable
        } else if pct > 50.0 {
            Self::High
        } else {
            Self::Affordable
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BurdenRow {
    pub locality: String,
    pub avg_rent: f64,
    pub total: f64,
    pub burden_pct: f64,
    pub level: BurdenLevel,
}

/// Burden of living in each locality on `income`, cheapest first.
pub fn burden_index(rents: &[LocalityRent], income: f64) -> Result<Vec<BurdenRow>, CostError> {
    if !income.is_finite() || income <= 0.0 {
        return Err(CostError::invalid("income must be greater than zero"));
    }

    let mut rows: Vec<BurdenRow> = rents
        .iter()
        .map(|r| {
            let breakdown = CostBreakdown::new(r.avg_rent, GROCERY_BASE, TRANSPORT_BASE);
            // income > 0 was checked above
            let pct = burden_pct(breakdown.total, income).unwrap_or_default();
            BurdenRow {
                locality: r.locality.clone(),
                avg_rent: r.avg_rent,
                total: breakdown.total,
                burden_pct: pct,
                level: BurdenLevel::for_pct(pct),
            }
        })
        .collect();
    rows.sort_by(|a, b| a.avg_rent.total_cmp(&b.avg_rent));
    Ok(rows)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeatmapCell {
    pub locality: String,
    pub avg_rent: f64,
    pub count: u64,
    /// `avg_rent` relative to the most expensive locality, in `[0, 1]`
    pub intensity: f64,
}

/// Rent intensity per locality, most expensive first.
pub fn heatmap(rents: &[LocalityRent]) -> Vec<HeatmapCell> {
    let max_rent = rents.iter().map(|r| r.avg_rent).fold(0.0_f64, f64::max);

    let mut cells: Vec<HeatmapCell> = rents
        .iter()
        .map(|r| HeatmapCell {
            locality: r.locality.clone(),
            avg_rent: r.avg_rent,
            count: r.count,
            intensity: if max_rent > 0.0 {
                (r.avg_rent / max_rent).clamp(0.0, 1.0)
            } else {
                0.0
            },
        })
        .collect();
    cells.sort_by(|a, b| b.avg_rent.total_cmp(&a.avg_rent));
    cells
}
