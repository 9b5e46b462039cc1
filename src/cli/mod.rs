//! Command-line interface
//!
//! Provides CLI commands for the kline manager.

pub mod fetch;
pub mod forecast;

use clap::{Parser, Subcommand};

/// Kline Manager CLI
#[derive(Parser)]
#[command(name = "kline-manager")]
#[command(about = "Daily kline fetching, normalization, and forecast preparation")]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Fetch daily kline data and write a normalized CSV
    Fetch(fetch::FetchArgs),
    /// Run a predictor over a normalized kline CSV
    Forecast(forecast::ForecastArgs),
}
