mod geocode;
mod metrics;
mod offices;

use anyhow::Result;
use esgboard_core::config::LayeredConfig;

use crate::cli::{Cli, Commands};

pub async fn execute(cli: Cli) -> Result<()> {
    let mut config = LayeredConfig::with_defaults();
    if let Some(path) = &cli.config {
        config = config.load_from_file(path)?;
    }
    config = config.load_from_env()?;

    match cli.command {
        Commands::Metrics(args) => metrics::execute(args),
        Commands::Offices(args) => offices::execute(args),
        Commands::Geocode(args) => geocode::execute(args, config).await,
    }
}
