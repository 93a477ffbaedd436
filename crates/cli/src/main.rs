mod app;
mod cli;
mod config;
mod terminal;

use anyhow::{Context, Result};
use clap::Parser;
use pokedex_catalog::FilterCriteria;
use pokedex_client::{CachedSource, PokeApiClient};
use tracing::info;

use crate::app::App;
use crate::cli::CliArgs;
use crate::config::CliConfig;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    pokedex_core::config::load_dotenv();
    let args = CliArgs::parse();

    // Load config: flags > env > file > defaults
    let file = CliConfig::load(args.config.as_deref()).context("failed to load configuration")?;
    let settings = file.resolve(&args, pokedex_core::Config::from_env());
    settings.config.log_summary();

    let client = PokeApiClient::from_config(&settings.config.api)
        .context("failed to create PokeAPI client")?;
    info!(base_url = %client.base_url(), "PokeAPI client ready");

    let criteria = FilterCriteria {
        search: args.search.clone().unwrap_or_default(),
        category: args.category.clone(),
        generation: args.generation.clone(),
    };

    let mut app = App::new(CachedSource::new(client), settings);
    if args.interactive {
        app.run_interactive(criteria).await
    } else {
        app.run_once(criteria, args.page, args.show.as_deref()).await
    }
}
