//! Fetch command - download and normalize daily klines
//!
//! Selects a provider and its column mapping via the factory, runs the fetch
//! pipeline, and reports the written file.

use anyhow::Result;
use chrono::NaiveDate;
use clap::Args;
use tracing::info;

use crate::config::Settings;
use crate::pipeline::FetchPipeline;
use crate::provider::{DailyRequest, ProviderFactory};
use crate::storage::CsvStore;

/// Arguments for the fetch command
#[derive(Args)]
pub struct FetchArgs {
    /// Symbol in the provider's identifier space (e.g., BABA, 601995)
    #[arg(long, short)]
    pub symbol: String,

    /// Data provider (yahoo, eastmoney, mock)
    #[arg(long, short, default_value = "yahoo")]
    pub provider: String,

    /// Start date (YYYY-MM-DD)
    #[arg(long)]
    pub start: String,

    /// End date (YYYY-MM-DD)
    #[arg(long)]
    pub end: String,

    /// Output directory (defaults to the configured storage directory)
    #[arg(long)]
    pub output_dir: Option<String>,

    /// Dry run (don't actually fetch)
    #[arg(long)]
    pub dry_run: bool,
}

/// Execute the fetch command
pub async fn execute(args: FetchArgs) -> Result<()> {
    // Parse dates
    let start = NaiveDate::parse_from_str(&args.start, "%Y-%m-%d")?;
    let end = NaiveDate::parse_from_str(&args.end, "%Y-%m-%d")?;
    if start > end {
        anyhow::bail!("Start date {} is after end date {}", start, end);
    }

    // Load settings and create the provider
    let settings = Settings::load().unwrap_or_else(|_| Settings::default_settings());
    let factory = ProviderFactory::new(&settings);
    let (provider, mapping) = factory.create(&args.provider)?;

    info!("=== Fetch Request ===");
    info!("Symbol:     {}", args.symbol);
    info!("Provider:   {}", provider.info().display_name);
    info!("Date Range: {} to {}", args.start, args.end);

    if args.dry_run {
        info!("Dry run - not actually fetching data");
        return Ok(());
    }

    let output_dir = args
        .output_dir
        .unwrap_or_else(|| settings.storage.output_dir.clone());
    let pipeline = FetchPipeline::new(provider, mapping, CsvStore::new(output_dir));

    let request = DailyRequest::new(&args.symbol, start, end);
    let outcome = pipeline.run(&request).await?;

    if let (Some(first), Some(last)) = (outcome.records.first(), outcome.records.last()) {
        info!("Data covers {} to {}", first.timestamp, last.timestamp);
    }
    info!(
        "Fetched {} rows, saved to {}",
        outcome.records.len(),
        outcome.path.display()
    );

    Ok(())
}
