use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable prefix, e.g. `RENT_ANALYZER__SERVER__PORT=9090`
pub const ENV_PREFIX: &str = "RENT_ANALYZER";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub seed: SeedConfig,
    #[serde(default)]
    pub prediction: PredictionConfig,
    #[serde(default)]
    pub client: ClientConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// `text` or `json`
    #[serde(default = "default_log_format")]
    pub log_format: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            log_level: default_log_level(),
            log_format: default_log_format(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_database_url")]
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_database_url(),
            max_connections: default_max_connections(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SeedConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_listing_count")]
    pub listing_count: usize,
    /// Fixed seed for reproducible demo data; fresh randomness when unset
    #[serde(default)]
    pub rng_seed: Option<u64>,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            listing_count: default_listing_count(),
            rng_seed: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PredictionConfig {
    /// Pause before answering `/predict`
    #[serde(default = "default_prediction_delay_ms")]
    pub delay_ms: u64,
}

impl Default for PredictionConfig {
    fn default() -> Self {
        Self {
            delay_ms: default_prediction_delay_ms(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ClientConfig {
    /// Service the CLI talks to
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

fn default_database_url() -> String {
    "sqlite:./data/rent-analyzer.db".to_string()
}

fn default_max_connections() -> u32 {
    5
}

fn default_true() -> bool {
    true
}

fn default_listing_count() -> usize {
    20
}

fn default_prediction_delay_ms() -> u64 {
    100
}

fn default_base_url() -> String {
    "http://127.0.0.1:8080".to_string()
}

fn default_timeout_seconds() -> u64 {
    10
}

/// Load configuration from an optional TOML file plus environment overrides.
///
/// A missing file is not an error; every field has a default.
pub fn load_config(path: &Path) -> anyhow::Result<Config> {
    let config = config::Config::builder()
        .add_source(config::File::from(path).required(false))
        .add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"))
        .build()?;

    let cfg: Config = config.try_deserialize()?;
    validate_config(&cfg)?;

    Ok(cfg)
}

pub fn validate_config(cfg: &Config) -> anyhow::Result<()> {
    if cfg.server.host.parse::<std::net::IpAddr>().is_err() {
        anyhow::bail!("Server host '{}' is not a valid IP address", cfg.server.host);
    }

    match cfg.server.log_format.as_str() {
        "text" | "json" => {}
        other => anyhow::bail!("Invalid log format '{}': expected 'text' or 'json'", other),
    }

    if !cfg.database.url.starts_with("sqlite:") {
        anyhow::bail!("Database URL must start with 'sqlite:'");
    }

    if cfg.database.max_connections == 0 {
        anyhow::bail!("Database max_connections must be at least 1");
    }

    if cfg.seed.enabled && cfg.seed.listing_count == 0 {
        anyhow::bail!("Seed listing_count must be at least 1 when seeding is enabled");
    }

    if !cfg.client.base_url.starts_with("http://") && !cfg.client.base_url.starts_with("https://") {
        anyhow::bail!("Client base_url must be an http(s) URL");
    }

    if cfg.client.timeout_seconds == 0 {
        anyhow::bail!("Client timeout_seconds must be at least 1");
    }

    Ok(())
}
