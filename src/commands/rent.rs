//! Rent-side views: listings, locality comparison, burden index, heatmap, nearby.

use anyhow::Result;
use colored::Colorize;
use comfy_table::{Cell, Color, Table};
use rent_analyzer::api::{BurdenResponse, HeatmapResponse, NearbyResponse};
use rent_analyzer::client::ApiClient;
use rent_analyzer::engine::locality::{BurdenLevel, Comparison};
use rent_analyzer::engine::rent::RentSummary;
use rent_analyzer::models::Classification;
use rent_analyzer::session::Session;

use super::{new_table, percent, rupees};

/// Width of the heatmap bar at full intensity
const HEAT_BAR_WIDTH: usize = 20;

pub async fn listings(client: &ApiClient, limit: usize) -> Result<()> {
    let summary = client.listings(limit).await?;
    if summary.listings.is_empty() {
        println!("{}", "No rental listings available".yellow());
        return Ok(());
    }

    println!("{}", render_listings(&summary));
    println!(
        "\nFair: {}  Overpriced: {}  (of {} listings)",
        summary.counts.fair.to_string().green(),
        summary.counts.overpriced.to_string().red(),
        summary.counts.total()
    );
    Ok(())
}

pub async fn compare(client: &ApiClient, first: &str, second: &str) -> Result<()> {
    let comparison = client.compare(first, second).await?;
    println!("{}", render_comparison(&comparison));
    println!(
        "\n{} {} is cheaper by {} ({})",
        "→".cyan(),
        comparison.cheaper.bold(),
        rupees(comparison.savings_amount),
        percent(comparison.savings_percent)
    );
    Ok(())
}

pub async fn burden(client: &ApiClient, session: &mut Session, income: Option<f64>) -> Result<()> {
    let income = match income {
        Some(income) => income,
        None => {
            session.load(client).await?;
            session.require_profile()?.income
        }
    };

    let response = client.cost_burden(income).await?;
    println!("Monthly cost burden on an income of {}:", rupees(response.income));
    println!("{}", render_burden(&response));
    Ok(())
}

pub async fn heatmap(client: &ApiClient) -> Result<()> {
    let response = client.heatmap().await?;
    if response.localities.is_empty() {
        println!("{}", "No rent data available".yellow());
        return Ok(());
    }
    println!("{}", render_heatmap(&response));
    Ok(())
}

pub async fn nearby(client: &ApiClient, locality: &str) -> Result<()> {
    let response = client.nearby(locality).await?;
    if response.nearby.is_empty() {
        println!("{}", format!("No listings found outside {}", response.center).yellow());
        return Ok(());
    }
    println!("Listings nearest the town centre outside {}:", response.center.bold());
    println!("{}", render_nearby(&response));
    Ok(())
}

pub(crate) fn render_listings(summary: &RentSummary) -> Table {
    let mut table = new_table(&["ID", "LOCALITY", "RENT", "BHK", "SQFT", "DISTANCE", "STATUS"]);
    for listing in &summary.listings {
        let status = match listing.classification {
            Classification::Fair => Cell::new("fair").fg(Color::Green),
            Classification::Overpriced => Cell::new("overpriced").fg(Color::Red),
        };
        table.add_row(vec![
            Cell::new(listing.id),
            Cell::new(&listing.locality),
            Cell::new(rupees(listing.rent)),
            Cell::new(listing.bedrooms),
            Cell::new(listing.sqft),
            Cell::new(format!("{:.1} km", listing.distance)),
            status,
        ]);
    }
    table
}

pub(crate) fn render_comparison(comparison: &Comparison) -> Table {
    let a = &comparison.first;
    let b = &comparison.second;
    let mut table = new_table(&["MONTHLY", a.locality.as_str(), b.locality.as_str()]);
    let rows = [
        ("Rent", a.analysis.rent, b.analysis.rent),
        ("Groceries", a.analysis.groceries, b.analysis.groceries),
        ("Transport", a.analysis.transport, b.analysis.transport),
        ("Total", a.analysis.total, b.analysis.total),
    ];
    for (label, left, right) in rows {
        table.add_row(vec![label.to_string(), rupees(left), rupees(right)]);
    }
    table
}

pub(crate) fn render_burden(response: &BurdenResponse) -> Table {
    let mut table = new_table(&["LOCALITY", "AVG RENT", "TOTAL", "BURDEN", "LEVEL"]);
    for row in &response.localities {
        let level = match row.level {
            BurdenLevel::Affordable => Cell::new("affordable").fg(Color::Green),
            BurdenLevel::High => Cell::new("high").fg(Color::Yellow),
            BurdenLevel::Unaffordable => Cell::new("unaffordable").fg(Color::Red),
        };
        table.add_row(vec![
            Cell::new(&row.locality),
            Cell::new(rupees(row.avg_rent)),
            Cell::new(rupees(row.total)),
            Cell::new(percent(row.burden_pct)),
            level,
        ]);
    }
    table
}

fn heat_bar(intensity: f64) -> String {
    let filled = (intensity.clamp(0.0, 1.0) * HEAT_BAR_WIDTH as f64).round() as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(HEAT_BAR_WIDTH - filled))
}

pub(crate) fn render_heatmap(response: &HeatmapResponse) -> Table {
    let mut table = new_table(&["LOCALITY", "AVG RENT", "LISTINGS", "INTENSITY"]);
    for cell in &response.localities {
        table.add_row(vec![
            cell.locality.clone(),
            rupees(cell.avg_rent),
            cell.count.to_string(),
            heat_bar(cell.intensity),
        ]);
    }
    table
}

pub(crate) fn render_nearby(response: &NearbyResponse) -> Table {
    let coord = |value: Option<f64>| value.map_or_else(|| "-".to_string(), |v| format!("{:.4}", v));

    let mut table = new_table(&["LOCALITY", "DISTANCE", "LAT", "LON"]);
    for listing in &response.nearby {
        table.add_row(vec![
            listing.locality.clone(),
            format!("{:.2} km", listing.distance_km),
            coord(listing.lat),
            coord(listing.lon),
        ]);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use rent_analyzer::engine::locality::{HeatmapCell, LocalityAnalysis};
    use rent_analyzer::models::CostBreakdown;

    #[test]
    fn test_heat_bar_bounds() {
        assert_eq!(heat_bar(1.0).chars().filter(|c| *c == '█').count(), HEAT_BAR_WIDTH);
        assert_eq!(heat_bar(0.0).chars().filter(|c| *c == '░').count(), HEAT_BAR_WIDTH);
        assert_eq!(heat_bar(0.5).chars().count(), HEAT_BAR_WIDTH);
    }

    #[test]
    fn test_render_comparison_rows() {
        let analysis = |rent: f64| CostBreakdown::new(rent, 3250.0, 1750.0);
        let comparison = Comparison {
            first: LocalityAnalysis {
                locality: "Market Ward".to_string(),
                analysis: analysis(6000.0),
            },
            second: LocalityAnalysis {
                locality: "Nehru Colony".to_string(),
                analysis: analysis(5000.0),
            },
            cheaper: "Nehru Colony".to_string(),
            savings_amount: 1000.0,
            savings_percent: 1000.0 / 11000.0 * 100.0,
        };

        let rendered = render_comparison(&comparison).to_string();
        assert!(rendered.contains("Nehru Colony"));
        assert!(rendered.contains("₹11000.00"));
        assert!(rendered.contains("₹10000.00"));
    }

    #[test]
    fn test_render_heatmap() {
        let response = HeatmapResponse {
            localities: vec![HeatmapCell {
                locality: "Ashta Central".to_string(),
                avg_rent: 8800.0,
                count: 3,
                intensity: 1.0,
            }],
        };
        let rendered = render_heatmap(&response).to_string();
        assert!(rendered.contains("Ashta Central"));
        assert!(rendered.contains("₹8800.00"));
    }
}
