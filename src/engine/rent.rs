//! Rent summarizer: cheapest listings and classification counts.
//!
//! Classification is read from each listing as-is; nothing here decides
//! whether a listing is fair.

use serde::{Deserialize, Serialize};

use crate::models::{Classification, RentalListing};

/// Number of listings shown by default
pub const DEFAULT_DISPLAY_LIMIT: usize = 10;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationCounts {
    pub fair: u64,
    pub overpriced: u64,
}

impl ClassificationCounts {
    pub fn total(&self) -> u64 {
        self.fair + self.overpriced
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RentSummary {
    /// Cheapest listings first
    pub listings: Vec<RentalListing>,
    pub counts: ClassificationCounts,
}

pub fn count_classifications(listings: &[RentalListing]) -> ClassificationCounts {
    listings
        .iter()
        .fold(ClassificationCounts::default(), |mut acc, listing| {
            match listing.classification {
                Classification::Fair => acc.fair += 1,
                Classification::Overpriced => acc.overpriced += 1,
            }
            acc
        })
}

/// Top `limit` listings by ascending rent, plus counts over the whole set.
pub fn summarize(listings: &[RentalListing], limit: usize) -> RentSummary {
    let mut ordered = listings.to_vec();
    ordered.sort_by(|a, b| a.rent.total_cmp(&b.rent));
    ordered.truncate(limit);

    RentSummary {
        listings: ordered,
        counts: count_classifications(listings),
    }
}
