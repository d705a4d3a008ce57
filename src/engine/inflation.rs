use serde::{Deserialize, Serialize};

use crate::models::{InflationCategory, InflationRecord};

/// Change in overall rate (percentage points) treated as movement
const TREND_THRESHOLD: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InflationTrend {
    Rising,
    Falling,
    Stable,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryRate {
    pub category: InflationCategory,
    pub rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyInflation {
    pub month: String,
    pub rates: Vec<CategoryRate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InflationSummary {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average_overall_inflation: Option<f64>,
    pub trend: InflationTrend,
    pub months_covered: usize,
}

/// Group records by month, newest month first, categories in a stable order.
pub fn group_by_month(records: &[InflationRecord]) -> Vec<MonthlyInflation> {
    let mut months: Vec<MonthlyInflation> = Vec::new();
    for record in records {
        let rate = CategoryRate {
            category: record.category,
            rate: record.rate,
        };
        match months.iter_mut().find(|m| m.month == record.month) {
            Some(month) => month.rates.push(rate),
            None => months.push(MonthlyInflation {
                month: record.month.clone(),
                rates: vec![rate],
            }),
        }
    }

    // YYYY-MM labels sort chronologically
    months.sort_by(|a, b| b.month.cmp(&a.month));
    for month in &mut months {
        month.rates.sort_by_key(|r| r.category.as_str());
    }
    months
}

/// Direction of the overall rate from the oldest to the newest month.
pub fn trend(records: &[InflationRecord]) -> InflationTrend {
    let mut overall: Vec<&InflationRecord> = records
        .iter()
        .filter(|r| r.category == InflationCategory::Overall)
        .collect();
    overall.sort_by(|a, b| a.month.cmp(&b.month));

    match (overall.first(), overall.last()) {
        (Some(oldest), Some(newest)) => {
            let delta = newest.rate - oldest.rate;
            if delta > TREND_THRESHOLD {
                InflationTrend::Rising
            } else if delta < -TREND_THRESHOLD {
                InflationTrend::Falling
            } else {
                InflationTrend::Stable
            }
        }
        _ => InflationTrend::Stable,
    }
}

pub fn average_overall(records: &[InflationRecord]) -> Option<f64> {
    let rates: Vec<f64> = records
        .iter()
        .filter(|r| r.category == InflationCategory::Overall)
        .map(|r| r.rate)
        .collect();
    if rates.is_empty() {
        None
    } else {
        Some(rates.iter().sum::<f64>() / rates.len() as f64)
    }
}

/// Summary using a store-computed overall average when one is supplied.
pub fn summarize(records: &[InflationRecord], stored_average: Option<f64>) -> InflationSummary {
    InflationSummary {
        average_overall_inflation: stored_average.or_else(|| average_overall(records)),
        trend: trend(records),
        months_covered: group_by_month(records).len(),
    }
}
