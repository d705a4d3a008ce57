//! Interactive numbered menu
//!
//! Each action reuses the one-shot command implementations. A failing action
//! prints its error and returns to the menu.

use anyhow::{bail, Result};
use colored::Colorize;
use rent_analyzer::client::ApiClient;
use rent_analyzer::models::UserProfile;
use rent_analyzer::session::Session;
use std::io::{self, BufRead, Write};
use std::str::FromStr;

use super::{costs, profile, rent};

const LISTING_LIMIT: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MenuChoice {
    CreateProfile,
    Listings,
    Predict,
    Groceries,
    Transport,
    Inflation,
    Geospatial,
    Compare,
    Burden,
    Exit,
}

impl MenuChoice {
    const ENTRIES: [(MenuChoice, &'static str); 10] = [
        (MenuChoice::CreateProfile, "Create user profile"),
        (MenuChoice::Listings, "Rental listings"),
        (MenuChoice::Predict, "Cost prediction"),
        (MenuChoice::Groceries, "Grocery prices"),
        (MenuChoice::Transport, "Transport costs"),
        (MenuChoice::Inflation, "Inflation data"),
        (MenuChoice::Geospatial, "Geospatial analysis"),
        (MenuChoice::Compare, "Compare localities"),
        (MenuChoice::Burden, "Cost burden index"),
        (MenuChoice::Exit, "Exit"),
    ];

    pub(crate) fn parse(input: &str) -> Option<Self> {
        let index: usize = input.trim().parse().ok()?;
        Self::ENTRIES
            .get(index.checked_sub(1)?)
            .map(|(choice, _)| *choice)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum GeoChoice {
    Heatmap,
    Isochrone,
    Nearby,
}

impl GeoChoice {
    pub(crate) fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(GeoChoice::Heatmap),
            "2" => Some(GeoChoice::Isochrone),
            "3" => Some(GeoChoice::Nearby),
            _ => None,
        }
    }
}

/// Line-oriented prompts over any reader/writer pair
pub(crate) struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub(crate) fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// `None` once input is exhausted
    pub(crate) fn ask(&mut self, label: &str) -> Result<Option<String>> {
        write!(self.output, "{}", label)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Re-asks until the answer parses; blank answers take the default when one is given
    pub(crate) fn ask_parsed<T: FromStr>(&mut self, label: &str, mut default: Option<T>) -> Result<T> {
        loop {
            let Some(answer) = self.ask(label)? else {
                bail!("input closed");
            };
            if answer.is_empty() {
                if let Some(value) = default.take() {
                    return Ok(value);
                }
            }
            match answer.parse() {
                Ok(value) => return Ok(value),
                Err(_) => writeln!(self.output, "{}", "Please enter a valid number".red())?,
            }
        }
    }

    /// Re-asks until the answer is non-empty
    pub(crate) fn ask_text(&mut self, label: &str) -> Result<String> {
        loop {
            match self.ask(label)? {
                None => bail!("input closed"),
                Some(answer) if answer.is_empty() => {
                    writeln!(self.output, "{}", "A value is required".red())?
                }
                Some(answer) => return Ok(answer),
            }
        }
    }

    pub(crate) fn read_profile(&mut self) -> Result<UserProfile> {
        let name = self.ask_text("Enter your name: ")?;
        let income = self.ask_parsed("Enter monthly income (₹): ", None)?;
        let family_size = self.ask_parsed("Enter family size: ", Some(1))?;
        let preferred_locale = self.ask_text("Preferred locality: ")?;
        let commute_distance = self.ask_parsed("Commute distance to work (km): ", Some(0.0))?;

        Ok(UserProfile {
            name,
            income,
            family_size,
            preferred_locale,
            commute_distance,
        })
    }

    fn print_menu(&mut self) -> Result<()> {
        writeln!(self.output)?;
        writeln!(self.output, "{}", "RENT & COST OF LIVING ANALYZER".cyan().bold())?;
        for (index, (_, label)) in MenuChoice::ENTRIES.iter().enumerate() {
            writeln!(self.output, "{:>2}. {}", index + 1, label)?;
        }
        Ok(())
    }

    fn pause(&mut self) -> Result<()> {
        self.ask("\nPress Enter to continue...")?;
        Ok(())
    }
}

/// Run the menu on stdin/stdout until the user exits or input closes
pub async fn execute(client: &ApiClient, session: &mut Session) -> Result<()> {
    let stdin = io::stdin();
    let mut prompter = Prompter::new(stdin.lock(), io::stdout());

    if let Err(e) = session.load(client).await {
        println!("{}", format!("Could not load profile: {}", e).yellow());
    }

    loop {
        prompter.print_menu()?;
        let Some(answer) = prompter.ask("\nSelect option: ")? else {
            break;
        };
        let Some(choice) = MenuChoice::parse(&answer) else {
            println!("{}", "❌ Invalid choice".red());
            continue;
        };
        if choice == MenuChoice::Exit {
            break;
        }

        if let Err(e) = run_choice(choice, client, session, &mut prompter).await {
            println!("{} {:#}", "Error:".red().bold(), e);
        }
        prompter.pause()?;
    }

    println!("{}", "Goodbye!".green());
    Ok(())
}

async fn run_choice<R: BufRead, W: Write>(
    choice: MenuChoice,
    client: &ApiClient,
    session: &mut Session,
    prompter: &mut Prompter<R, W>,
) -> Result<()> {
    match choice {
        MenuChoice::CreateProfile => {
            let new_profile = prompter.read_profile()?;
            profile::create(client, session, new_profile).await
        }
        MenuChoice::Listings => rent::listings(client, LISTING_LIMIT).await,
        MenuChoice::Predict => costs::predict(client, session).await,
        MenuChoice::Groceries => costs::groceries(client).await,
        MenuChoice::Transport => {
            let destination = prompter.ask_text("Destination locality: ")?;
            costs::transport(client, session, &destination).await
        }
        MenuChoice::Inflation => costs::inflation(client).await,
        MenuChoice::Geospatial => {
            println!("\n1. Locality heatmap (rent intensity)");
            println!("2. Isochrone (travel-time zones)");
            println!("3. Nearby localities");
            let answer = prompter.ask("\nSelect analysis type: ")?.unwrap_or_default();
            match GeoChoice::parse(&answer) {
                Some(GeoChoice::Heatmap) => rent::heatmap(client).await,
                Some(GeoChoice::Isochrone) => costs::isochrone(client, session, None).await,
                Some(GeoChoice::Nearby) => {
                    let locality = prompter.ask_text("Locality to search around: ")?;
                    rent::nearby(client, &locality).await
                }
                None => {
                    println!("{}", "❌ Invalid choice".red());
                    Ok(())
                }
            }
        }
        MenuChoice::Compare => {
            let first = prompter.ask_text("First locality: ")?;
            let second = prompter.ask_text("Second locality: ")?;
            rent::compare(client, &first, &second).await
        }
        MenuChoice::Burden => rent::burden(client, session, None).await,
        MenuChoice::Exit => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn prompter(input: &str) -> Prompter<Cursor<Vec<u8>>, Vec<u8>> {
        Prompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn test_menu_choice_parse() {
        assert_eq!(MenuChoice::parse("1"), Some(MenuChoice::CreateProfile));
        assert_eq!(MenuChoice::parse(" 7 "), Some(MenuChoice::Geospatial));
        assert_eq!(MenuChoice::parse("10"), Some(MenuChoice::Exit));
        assert_eq!(MenuChoice::parse("0"), None);
        assert_eq!(MenuChoice::parse("11"), None);
        assert_eq!(MenuChoice::parse("rent"), None);
    }

    #[test]
    fn test_geo_choice_parse() {
        assert_eq!(GeoChoice::parse("2"), Some(GeoChoice::Isochrone));
        assert_eq!(GeoChoice::parse("4"), None);
    }

    #[test]
    fn test_ask_returns_none_on_eof() {
        let mut p = prompter("");
        assert_eq!(p.ask("> ").unwrap(), None);
    }

    #[test]
    fn test_ask_parsed_retries_until_valid() {
        let mut p = prompter("abc\n25000\n");
        let income: f64 = p.ask_parsed("Income: ", None).unwrap();
        assert!((income - 25000.0).abs() < f64::EPSILON);

        let output = String::from_utf8(p.output).unwrap();
        assert!(output.contains("valid number"));
    }

    #[test]
    fn test_read_profile_with_defaults() {
        let mut p = prompter("Asha\n32000\n\nMarket Ward\n\n");
        let profile = p.read_profile().unwrap();

        assert_eq!(profile.name, "Asha");
        assert_eq!(profile.family_size, 1);
        assert_eq!(profile.preferred_locale, "Market Ward");
        assert!(profile.commute_distance.abs() < f64::EPSILON);
    }

    #[test]
    fn test_read_profile_fails_when_input_closes() {
        let mut p = prompter("Asha\n");
        assert!(p.read_profile().is_err());
    }
}
