//! Commute cost calculator and isochrone zoning.

use serde::{Deserialize, Serialize};

use super::locality::matches_locality;
use super::CostError;
use crate::models::TransportRoute;

/// Fare charged per km when no route is known
pub const FARE_PER_KM: f64 = 8.0;
/// Round trip
pub const TRIPS_PER_DAY: f64 = 2.0;
pub const WORKING_DAYS_PER_MONTH: f64 = 26.0;
/// Assumed average travel speed for isochrones
pub const AVERAGE_SPEED_KMH: f64 = 25.0;

const WEEKLY_PASS_RATIO: f64 = 0.7;
const MONTHLY_PASS_RATIO: f64 = 0.6;
const WEEKS_PER_PASS_MONTH: f64 = 4.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FarePasses {
    pub weekly_pass: f64,
    pub weekly_savings_pct: f64,
    pub monthly_pass: f64,
    pub monthly_savings_pct: f64,
}

impl FarePasses {
    pub fn from_monthly_cost(monthly_cost: f64) -> Self {
        Self {
            weekly_pass: monthly_cost * WEEKLY_PASS_RATIO / WEEKS_PER_PASS_MONTH,
            weekly_savings_pct: (1.0 - WEEKLY_PASS_RATIO) * 100.0,
            monthly_pass: monthly_cost * MONTHLY_PASS_RATIO,
            monthly_savings_pct: (1.0 - MONTHLY_PASS_RATIO) * 100.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommuteCost {
    pub from: String,
    pub to: String,
    /// Whether a stored route was used instead of the fallback distance
    pub found: bool,
    pub distance: f64,
    pub fare: f64,
    pub daily_cost: f64,
    pub monthly_cost: f64,
    pub passes: FarePasses,
}

/// First route leaving `from` whose destination matches `to`.
pub fn find_route<'a>(
    routes: &'a [TransportRoute],
    from: &str,
    to: &str,
) -> Option<&'a TransportRoute> {
    routes.iter().find(|r| {
        matches_locality(&r.from_locality, from) && matches_locality(&r.to_locality, to)
    })
}

/// Commute cost using `route` when known, else `fallback_distance` at the flat per-km fare.
pub fn commute_cost(
    from: &str,
    to: &str,
    route: Option<&TransportRoute>,
    fallback_distance: f64,
) -> Result<CommuteCost, CostError> {
    let (found, distance, fare) = match route {
        Some(route) => (true, route.distance, route.fare),
        None => {
            if !fallback_distance.is_finite() || fallback_distance < 0.0 {
                return Err(CostError::invalid(
                    "commute distance must be a non-negative number",
                ));
            }
            (false, fallback_distance, fallback_distance * FARE_PER_KM)
        }
    };

    let daily_cost = fare * TRIPS_PER_DAY;
    let monthly_cost = daily_cost * WORKING_DAYS_PER_MONTH;

    Ok(CommuteCost {
        from: from.to_string(),
        to: to.to_string(),
        found,
        distance,
        fare,
        daily_cost,
        monthly_cost,
        passes: FarePasses::from_monthly_cost(monthly_cost),
    })
}

/// Coarse travel-time bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TravelZone {
    #[serde(rename = "15 min")]
    Within15,
    #[serde(rename = "30 min")]
    Within30,
    #[serde(rename = "45+ min")]
    Beyond30,
}

impl TravelZone {
    /// Bucket boundaries belong to the lower zone
    pub fn for_minutes(minutes: f64) -> Self {
        if minutes > 30.0 {
            Self::Beyond30
        } else if minutes > 15.0 {
            Self::Within30
        } else {
            Self::Within15
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Within15 => "15 min",
            Self::Within30 => "30 min",
            Self::Beyond30 => "45+ min",
        }
    }
}

pub fn travel_minutes(distance_km: f64) -> f64 {
    distance_km / AVERAGE_SPEED_KMH * 60.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IsochroneEntry {
    pub to_locality: String,
    pub distance_km: f64,
    pub fare: f64,
    pub travel_time_min: f64,
    pub time_zone: TravelZone,
}

/// Zone every outgoing route, preserving the given order.
pub fn isochrone(routes: &[TransportRoute]) -> Vec<IsochroneEntry> {
    routes
        .iter()
        .map(|route| {
            let minutes = travel_minutes(route.distance);
            IsochroneEntry {
                to_locality: route.to_locality.clone(),
                distance_km: route.distance,
                fare: route.fare,
                travel_time_min: minutes,
                time_zone: TravelZone::for_minutes(minutes),
            }
        })
        .collect()
}
