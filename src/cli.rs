use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "rent-analyzer", version, about = "Rent and cost of living analyzer")]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config.toml", global = true)]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Start the HTTP service (default)
    Serve,

    /// Create or show the user profile
    Profile {
        #[command(subcommand)]
        action: ProfileCommands,
    },

    /// Cheapest rental listings with fair/overpriced counts
    Listings {
        /// Number of listings to show
        #[arg(short, long, default_value = "10")]
        limit: usize,
    },

    /// Predict monthly costs for the stored profile
    Predict,

    /// Grocery prices and monthly basket estimate
    Groceries,

    /// Commute cost from the profile locality to a destination
    Transport {
        destination: String,
    },

    /// Monthly inflation by category
    Inflation,

    /// Average rent per locality
    Heatmap,

    /// Travel-time zones from a locality (defaults to the profile locality)
    Isochrone {
        from: Option<String>,
    },

    /// Listings closest to the town centre outside a locality
    Nearby {
        locality: String,
    },

    /// Compare the cost of living in two localities
    Compare {
        first: String,
        second: String,
    },

    /// Cost burden of every locality (defaults to the profile income)
    Burden {
        #[arg(short, long)]
        income: Option<f64>,
    },

    /// Interactive numbered menu
    Menu,

    /// Configuration management commands
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },

    /// Show version information
    Version,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ProfileCommands {
    /// Create (or replace) the profile
    Create(ProfileArgs),

    /// Show the stored profile
    Show,
}

#[derive(Args, Debug, Clone)]
pub struct ProfileArgs {
    #[arg(long)]
    pub name: String,

    /// Monthly income in rupees
    #[arg(long)]
    pub income: f64,

    #[arg(long, default_value = "1")]
    pub family_size: u32,

    #[arg(long)]
    pub locality: String,

    /// Commute distance in km
    #[arg(long, default_value = "0")]
    pub commute: f64,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommands {
    /// Display current configuration
    Show,

    /// Validate configuration file
    Validate,
}

impl Cli {
    /// Get the command to execute, defaulting to Serve if none provided
    pub fn get_command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Serve)
    }
}
