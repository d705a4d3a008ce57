use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;

use rent_analyzer::{client::ApiClient, config, init_tracing, session::Session};

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Cli::parse();
    let command = args.get_command();

    // Config commands report load failures themselves
    if let cli::Commands::Config { action } = &command {
        init_tracing(&config::ServerConfig::default());
        return match action {
            cli::ConfigCommands::Show => commands::config::show(&args.config),
            cli::ConfigCommands::Validate => commands::config::validate(&args.config),
        };
    }
    if let cli::Commands::Version = command {
        println!("rent-analyzer v{}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let cfg = config::load_config(&args.config)?;
    init_tracing(&cfg.server);

    if let cli::Commands::Serve = command {
        return commands::start::execute(cfg).await;
    }

    let client = ApiClient::from_config(&cfg.client)?;
    let mut session = Session::new();

    match command {
        cli::Commands::Profile { action } => match action {
            cli::ProfileCommands::Create(args) => {
                commands::profile::create(&client, &mut session, args.into()).await?
            }
            cli::ProfileCommands::Show => commands::profile::show(&client, &mut session).await?,
        },
        cli::Commands::Listings { limit } => commands::rent::listings(&client, limit).await?,
        cli::Commands::Predict => commands::costs::predict(&client, &mut session).await?,
        cli::Commands::Groceries => commands::costs::groceries(&client).await?,
        cli::Commands::Transport { destination } => {
            commands::costs::transport(&client, &mut session, &destination).await?
        }
        cli::Commands::Inflation => commands::costs::inflation(&client).await?,
        cli::Commands::Heatmap => commands::rent::heatmap(&client).await?,
        cli::Commands::Isochrone { from } => {
            commands::costs::isochrone(&client, &mut session, from).await?
        }
        cli::Commands::Nearby { locality } => commands::rent::nearby(&client, &locality).await?,
        cli::Commands::Compare { first, second } => {
            commands::rent::compare(&client, &first, &second).await?
        }
        cli::Commands::Burden { income } => {
            commands::rent::burden(&client, &mut session, income).await?
        }
        cli::Commands::Menu => commands::menu::execute(&client, &mut session).await?,
        cli::Commands::Serve | cli::Commands::Config { .. } | cli::Commands::Version => {}
    }

    Ok(())
}
