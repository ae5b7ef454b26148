//! fablegate binary entry point.

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use fablegate::config::Config;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env is normal.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    cli::init_logging(cli.log_format);

    let config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;

    match cli.command {
        Commands::Serve { bind, port } => cli::serve::cmd_serve(config, bind, port).await,
        Commands::Lookup { name, translated } => {
            cli::lookup::cmd_lookup(config, &name, translated).await
        }
    }
}
