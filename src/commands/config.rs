use anyhow::Result;
use colored::Colorize;
use rent_analyzer::config::{self, Config};
use std::path::Path;
use tracing::info;

/// Execute the config show command
///
/// Displays the effective configuration (file, environment and defaults merged)
pub fn show(path: &Path) -> Result<()> {
    println!("{}", "Loading configuration...".yellow());
    info!(path = %path.display(), "Loading configuration for display");

    let cfg = config::load_config(path)?;

    println!("{}", "Current Configuration:".green().bold());
    println!();

    let toml_string = toml::to_string_pretty(&cfg)?;
    println!("{}", toml_string);

    Ok(())
}

/// Execute the config validate command
pub fn validate(path: &Path) -> Result<()> {
    println!("{}", "Validating configuration...".yellow());
    info!(path = %path.display(), "Validating configuration file");

    let cfg = config::load_config(path)?;

    println!("{}", "✓ Configuration is valid".green());
    println!();
    println!("{}", "Summary:".bold());
    for line in summary_lines(&cfg) {
        println!("  {}", line);
    }

    Ok(())
}

fn summary_lines(cfg: &Config) -> Vec<String> {
    let seeding = if cfg.seed.enabled {
        match cfg.seed.rng_seed {
            Some(seed) => format!("{} listings (seed {})", cfg.seed.listing_count, seed),
            None => format!("{} listings", cfg.seed.listing_count),
        }
    } else {
        "disabled".to_string()
    };

    vec![
        format!("Listen: {}:{}", cfg.server.host, cfg.server.port),
        format!("Database: {}", cfg.database.url),
        format!("Seeding: {}", seeding),
        format!("Prediction delay: {}ms", cfg.prediction.delay_ms),
        format!("Client target: {}", cfg.client.base_url),
    ]
}
