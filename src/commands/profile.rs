use anyhow::Result;
use colored::Colorize;
use comfy_table::Table;
use rent_analyzer::client::ApiClient;
use rent_analyzer::models::UserProfile;
use rent_analyzer::session::Session;

use super::{new_table, rupees};
use crate::cli::ProfileArgs;

impl From<ProfileArgs> for UserProfile {
    fn from(args: ProfileArgs) -> Self {
        UserProfile {
            name: args.name.trim().to_string(),
            income: args.income,
            family_size: args.family_size,
            preferred_locale: args.locality.trim().to_string(),
            commute_distance: args.commute,
        }
    }
}

pub async fn create(client: &ApiClient, session: &mut Session, profile: UserProfile) -> Result<()> {
    let saved = session.create(client, &profile).await?;
    println!("{}", "✓ Profile saved".green());
    println!("{}", render_profile(saved));
    Ok(())
}

pub async fn show(client: &ApiClient, session: &mut Session) -> Result<()> {
    match session.load(client).await? {
        Some(profile) => println!("{}", render_profile(profile)),
        None => println!(
            "{}",
            "No profile yet. Create one with `rent-analyzer profile create`.".yellow()
        ),
    }
    Ok(())
}

pub(crate) fn render_profile(profile: &UserProfile) -> Table {
    let mut table = new_table(&["FIELD", "VALUE"]);
    table.add_row(vec!["Name".to_string(), profile.name.clone()]);
    table.add_row(vec!["Monthly income".to_string(), rupees(profile.income)]);
    table.add_row(vec!["Family size".to_string(), profile.family_size.to_string()]);
    table.add_row(vec!["Preferred locality".to_string(), profile.preferred_locale.clone()]);
    table.add_row(vec![
        "Commute distance".to_string(),
        format!("{:.1} km", profile.commute_distance),
    ]);
    table
}
