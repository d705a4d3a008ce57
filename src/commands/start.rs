use anyhow::Result;
use colored::Colorize;
use rent_analyzer::{config::Config, server};
use tracing::info;

/// Execute the serve command
///
/// Blocks until SIGINT/SIGTERM.
pub async fn execute(cfg: Config) -> Result<()> {
    println!(
        "{}",
        format!(
            "Starting rent analyzer on {}:{}...",
            cfg.server.host, cfg.server.port
        )
        .green()
    );
    info!(
        database = %cfg.database.url,
        seeding = cfg.seed.enabled,
        "Starting rent analyzer in foreground mode"
    );

    server::start_server(cfg).await
}
