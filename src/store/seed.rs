//! First-run data for the demo town.

use anyhow::Result;
use serde::Serialize;

use super::SqliteStore;
use crate::engine::commute::FARE_PER_KM;
use crate::engine::{JitterSource, ListingClassifier};
use crate::models::{
    Classification, GroceryItem, InflationCategory, InflationRecord, RentalListing, TransportRoute,
};

pub const LOCALITIES: [&str; 6] = [
    "Ashta Central",
    "Railway Colony",
    "Industrial Area",
    "Market Ward",
    "Gandhi Nagar",
    "Nehru Colony",
];

/// Newest first
pub const MONTHS: [&str; 6] = ["2025-01", "2024-12", "2024-11", "2024-10", "2024-09", "2024-08"];

const GROCERIES: [(&str, f64, &str); 8] = [
    ("Rice (1kg)", 45.0, "BigBasket"),
    ("Wheat Flour (1kg)", 40.0, "Blinkit"),
    ("Cooking Oil (1L)", 150.0, "BigBasket"),
    ("Milk (1L)", 55.0, "Blinkit"),
    ("Vegetables (weekly)", 300.0, "BigBasket"),
    ("Lentils (1kg)", 80.0, "Blinkit"),
    ("Sugar (1kg)", 42.0, "BigBasket"),
    ("Tea/Coffee", 120.0, "Blinkit"),
];

const CENTER_LAT: f64 = 23.0198;
const CENTER_LON: f64 = 76.7224;
const COORD_SPREAD: f64 = 0.1;

const RENT_PER_BEDROOM: f64 = 2500.0;
const RENT_PER_SQFT: f64 = 0.5;
const OVERPRICED_MARKUP: f64 = 1.3;

/// Rows written by one seeding pass; zero for tables that already had data
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SeedReport {
    pub listings: usize,
    pub groceries: usize,
    pub routes: usize,
    pub inflation: usize,
}

impl SeedReport {
    pub fn is_empty(&self) -> bool {
        self.listings + self.groceries + self.routes + self.inflation == 0
    }
}

/// Uniform index in `0..n`
fn pick(jitter: &dyn JitterSource, n: usize) -> usize {
    ((jitter.unit() * n as f64) as usize).min(n.saturating_sub(1))
}

fn generate_listing(jitter: &dyn JitterSource, classifier: &dyn ListingClassifier) -> RentalListing {
    let locality = LOCALITIES[pick(jitter, LOCALITIES.len())];
    let bedrooms = 1 + pick(jitter, 3) as u32;
    let sqft = 400 + pick(jitter, 1200) as u32;

    let base = f64::from(bedrooms) * RENT_PER_BEDROOM + f64::from(sqft) * RENT_PER_SQFT;
    let mut rent = jitter.range(base - 500.0, 1000.0);

    let classification = classifier.classify(locality, bedrooms, sqft, rent);
    if classification == Classification::Overpriced {
        rent *= OVERPRICED_MARKUP;
    }

    RentalListing {
        id: 0,
        locality: locality.to_string(),
        rent,
        bedrooms,
        sqft,
        classification,
        distance: jitter.range(0.0, 10.0),
        lat: Some(CENTER_LAT + (jitter.unit() - 0.5) * COORD_SPREAD),
        lon: Some(CENTER_LON + (jitter.unit() - 0.5) * COORD_SPREAD),
    }
}

pub fn generate_listings(
    count: usize,
    jitter: &dyn JitterSource,
    classifier: &dyn ListingClassifier,
) -> Vec<RentalListing> {
    (0..count)
        .map(|_| generate_listing(jitter, classifier))
        .collect()
}

pub fn grocery_catalogue() -> Vec<GroceryItem> {
    GROCERIES
        .iter()
        .map(|(item, price, source)| GroceryItem {
            item: item.to_string(),
            price: *price,
            source: source.to_string(),
        })
        .collect()
}

/// One directed route per ordered pair of distinct localities
pub fn generate_routes(jitter: &dyn JitterSource) -> Vec<TransportRoute> {
    let mut routes = Vec::with_capacity(LOCALITIES.len() * (LOCALITIES.len() - 1));
    for from in LOCALITIES {
        for to in LOCALITIES {
            if from == to {
                continue;
            }
            let distance = jitter.range(2.0, 8.0);
            routes.push(TransportRoute {
                id: 0,
                from_locality: from.to_string(),
                to_locality: to.to_string(),
                distance,
                fare: distance * FARE_PER_KM,
            });
        }
    }
    routes
}

pub fn generate_inflation(jitter: &dyn JitterSource) -> Vec<InflationRecord> {
    MONTHS
        .iter()
        .flat_map(|month| {
            InflationCategory::ALL.iter().map(move |category| (month, category))
        })
        .map(|(month, category)| InflationRecord {
            month: month.to_string(),
            category: *category,
            rate: jitter.range(5.5, 2.5),
        })
        .collect()
}

/// Fill every empty table; tables that already hold rows are left alone.
pub async fn seed_if_empty(
    store: &SqliteStore,
    jitter: &dyn JitterSource,
    classifier: &dyn ListingClassifier,
    listing_count: usize,
) -> Result<SeedReport> {
    let counts = store.table_counts().await?;
    let mut report = SeedReport::default();

    if counts.listings == 0 {
        let listings = generate_listings(listing_count, jitter, classifier);
        store.insert_listings(&listings).await?;
        report.listings = listings.len();
    }

    if counts.groceries == 0 {
        let items = grocery_catalogue();
        store.insert_groceries(&items).await?;
        report.groceries = items.len();
    }

    if counts.routes == 0 {
        let routes = generate_routes(jitter);
        store.insert_routes(&routes).await?;
        report.routes = routes.len();
    }

    if counts.inflation == 0 {
        let records = generate_inflation(jitter);
        store.insert_inflation(&records).await?;
        report.inflation = records.len();
    }

    if report.is_empty() {
        tracing::debug!("Seed data already present");
    } else {
        tracing::info!(
            listings = report.listings,
            groceries = report.groceries,
            routes = report.routes,
            inflation = report.inflation,
            "Seeded empty tables"
        );
    }

    Ok(report)
}
