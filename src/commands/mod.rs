//! Command implementations for the CLI
//!
//! This module contains the implementation of all CLI commands:
//! - start: Start the HTTP service
//! - config: Configuration display and validation
//! - profile: Create and show the user profile
//! - rent: Listings, comparison, burden index, heatmap, nearby search
//! - costs: Prediction, groceries, transport, isochrone, inflation
//! - menu: Interactive numbered menu over the above

pub mod config;
pub mod costs;
pub mod menu;
pub mod profile;
pub mod rent;
pub mod start;

use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};

/// Table with the shared preset and cyan headers
pub(crate) fn new_table(headers: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(
        headers
            .iter()
            .map(|h| Cell::new(h).fg(Color::Cyan))
            .collect::<Vec<_>>(),
    );
    table
}

/// Amount in rupees with two decimals
pub(crate) fn rupees(amount: f64) -> String {
    format!("₹{:.2}", amount)
}

pub(crate) fn percent(value: f64) -> String {
    format!("{:.1}%", value)
}
