//! Kline Manager CLI
//!
//! Provides commands for:
//! - `fetch`: Download daily kline data and write a normalized CSV
//! - `forecast`: Prepare a history window and run a predictor over it

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use kline_manager::cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env().add_directive("kline_manager=info".parse()?))
        .init();

    // Load environment variables from .env file
    dotenv::dotenv().ok();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Execute command
    match cli.command {
        Commands::Fetch(args) => {
            kline_manager::cli::fetch::execute(args).await?;
        }
        Commands::Forecast(args) => {
            kline_manager::cli::forecast::execute(args).await?;
        }
    }

    Ok(())
}
