//! Cost-side views: prediction, groceries, commute, isochrone and inflation.

use anyhow::Result;
use colored::Colorize;
use comfy_table::{Cell, Color, Table};
use rent_analyzer::api::{GroceryResponse, InflationDataResponse, IsochroneResponse};
use rent_analyzer::client::ApiClient;
use rent_analyzer::engine::commute::{CommuteCost, TravelZone};
use rent_analyzer::engine::inflation::{InflationSummary, InflationTrend};
use rent_analyzer::engine::prediction::Prediction;
use rent_analyzer::models::InflationCategory;
use rent_analyzer::session::Session;

use super::{new_table, percent, rupees};

pub async fn predict(client: &ApiClient, session: &mut Session) -> Result<()> {
    session.load(client).await?;
    let profile = session.require_profile()?;

    println!("{}", "Running cost prediction model...".yellow());
    let prediction = client.predict(profile).await?;

    println!("{}", render_prediction(&prediction));
    println!(
        "Confidence: {}   Feature importance: rent {:.0}%, groceries {:.0}%, transport {:.0}%",
        percent(prediction.confidence),
        prediction.feature_importance.rent,
        prediction.feature_importance.groceries,
        prediction.feature_importance.transport
    );
    if prediction.exceeds_burden_warning() {
        println!(
            "{}",
            "⚠ Predicted costs exceed half of your income. Consider a cheaper locality.".red()
        );
    }
    Ok(())
}

pub async fn groceries(client: &ApiClient) -> Result<()> {
    let response = client.groceries().await?;
    if response.items.is_empty() {
        println!("{}", "No grocery prices available".yellow());
        return Ok(());
    }

    println!("{}", render_groceries(&response));
    println!(
        "Basket total: {}   Monthly estimate: {}",
        rupees(response.estimate.total_basket),
        rupees(response.estimate.monthly_estimate).bold()
    );
    if let Some(average) = response.estimate.average_price {
        println!("Average item price: {}", rupees(average));
    }
    Ok(())
}

pub async fn transport(client: &ApiClient, session: &mut Session, destination: &str) -> Result<()> {
    session.load(client).await?;
    let profile = session.require_profile()?;

    let cost = client
        .route(&profile.preferred_locale, destination, profile.commute_distance)
        .await?;
    if !cost.found {
        println!(
            "{}",
            format!(
                "No stored route from {} to {}; using your commute distance of {:.1} km",
                cost.from, cost.to, cost.distance
            )
            .yellow()
        );
    }
    println!("{}", render_commute(&cost));
    Ok(())
}

pub async fn isochrone(client: &ApiClient, session: &mut Session, from: Option<String>) -> Result<()> {
    let from = match from {
        Some(from) => from,
        None => {
            session.load(client).await?;
            session.require_profile()?.preferred_locale.clone()
        }
    };

    let response = client.isochrone(&from).await?;
    if response.destinations.is_empty() {
        println!("{}", format!("No routes leave {}", response.from).yellow());
        return Ok(());
    }
    println!("Travel times from {} (at 25 km/h):", response.from.bold());
    println!("{}", render_isochrone(&response));
    Ok(())
}

pub async fn inflation(client: &ApiClient) -> Result<()> {
    let data = client.inflation_data().await?;
    let summary = client.inflation_summary().await?;

    if data.months.is_empty() {
        println!("{}", "No inflation data available".yellow());
        return Ok(());
    }
    println!("{}", render_inflation(&data));
    println!("{}", describe_summary(&summary));
    Ok(())
}

pub(crate) fn render_prediction(prediction: &Prediction) -> Table {
    let b = &prediction.breakdown;
    let mut table = new_table(&["PREDICTED", "MONTHLY"]);
    table.add_row(vec!["Rent".to_string(), rupees(b.rent)]);
    table.add_row(vec!["Groceries".to_string(), rupees(b.groceries)]);
    table.add_row(vec!["Transport".to_string(), rupees(b.transport)]);
    table.add_row(vec![
        Cell::new("Total").fg(Color::Cyan),
        Cell::new(rupees(b.total)).fg(Color::Cyan),
    ]);
    if let Some(burden) = b.cost_burden {
        table.add_row(vec!["Cost burden".to_string(), percent(burden)]);
    }
    if let Some(rate) = b.inflation_rate {
        table.add_row(vec!["Avg. inflation".to_string(), percent(rate)]);
    }
    table
}

pub(crate) fn render_groceries(response: &GroceryResponse) -> Table {
    let mut table = new_table(&["ITEM", "PRICE", "SOURCE"]);
    for item in &response.items {
        table.add_row(vec![item.item.clone(), rupees(item.price), item.source.clone()]);
    }
    table
}

pub(crate) fn render_commute(cost: &CommuteCost) -> Table {
    let title = format!("{} → {}", cost.from, cost.to);
    let mut table = new_table(&["COMMUTE", title.as_str()]);
    table.add_row(vec!["Distance".to_string(), format!("{:.1} km", cost.distance)]);
    table.add_row(vec!["Fare (one way)".to_string(), rupees(cost.fare)]);
    table.add_row(vec!["Daily (round trip)".to_string(), rupees(cost.daily_cost)]);
    table.add_row(vec!["Monthly (26 days)".to_string(), rupees(cost.monthly_cost)]);
    table.add_row(vec![
        "Weekly pass".to_string(),
        format!(
            "{} (save {})",
            rupees(cost.passes.weekly_pass),
            percent(cost.passes.weekly_savings_pct)
        ),
    ]);
    table.add_row(vec![
        "Monthly pass".to_string(),
        format!(
            "{} (save {})",
            rupees(cost.passes.monthly_pass),
            percent(cost.passes.monthly_savings_pct)
        ),
    ]);
    table
}

pub(crate) fn render_isochrone(response: &IsochroneResponse) -> Table {
    let mut table = new_table(&["DESTINATION", "DISTANCE", "FARE", "MINUTES", "ZONE"]);
    for entry in &response.destinations {
        let colour = match entry.time_zone {
            TravelZone::Within15 => Color::Green,
            TravelZone::Within30 => Color::Yellow,
            TravelZone::Beyond30 => Color::Red,
        };
        table.add_row(vec![
            Cell::new(&entry.to_locality),
            Cell::new(format!("{:.1} km", entry.distance_km)),
            Cell::new(rupees(entry.fare)),
            Cell::new(format!("{:.1}", entry.travel_time_min)),
            Cell::new(entry.time_zone.label()).fg(colour),
        ]);
    }
    table
}

pub(crate) fn render_inflation(data: &InflationDataResponse) -> Table {
    let mut headers = vec!["MONTH"];
    headers.extend(InflationCategory::ALL.iter().map(|c| c.as_str()));
    let mut table = new_table(&headers);

    for month in &data.months {
        let mut row = vec![month.month.clone()];
        for category in InflationCategory::ALL {
            let rate = month
                .rates
                .iter()
                .find(|r| r.category == category)
                .map_or_else(|| "-".to_string(), |r| percent(r.rate));
            row.push(rate);
        }
        table.add_row(row);
    }
    table
}

pub(crate) fn describe_summary(summary: &InflationSummary) -> String {
    let trend = match summary.trend {
        InflationTrend::Rising => "rising",
        InflationTrend::Falling => "falling",
        InflationTrend::Stable => "relatively stable",
    };
    match summary.average_overall_inflation {
        Some(avg) => format!(
            "Average overall inflation: {} over {} months; the trend is {}.",
            percent(avg),
            summary.months_covered,
            trend
        ),
        None => format!("No overall inflation figures; the trend is {}.", trend),
    }
}
