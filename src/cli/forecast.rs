//! Forecast command - run a predictor over a normalized kline CSV
//!
//! Loads a canonical CSV, selects the lookback window, generates future
//! trading days, invokes the predictor, and writes the forecast with the
//! same CSV store the fetch path uses.

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;
use tracing::info;

use crate::config::Settings;
use crate::forecast::{create_predictor, ForecastParams, ForecastSession};
use crate::storage::{read_daily_csv, CsvStore};

/// Arguments for the forecast command
#[derive(Args)]
pub struct ForecastArgs {
    /// Normalized kline CSV to forecast from
    #[arg(long, short)]
    pub input: PathBuf,

    /// Symbol label used in the output file name
    #[arg(long, short)]
    pub symbol: String,

    /// Predictor to run (only "mock" is built in)
    #[arg(long, default_value = "mock")]
    pub predictor: String,

    /// History rows handed to the model
    #[arg(long)]
    pub lookback: Option<usize>,

    /// Trading days to forecast
    #[arg(long)]
    pub horizon: Option<usize>,

    /// Sampling temperature
    #[arg(long)]
    pub temperature: Option<f64>,

    /// Nucleus sampling threshold
    #[arg(long)]
    pub top_p: Option<f64>,

    /// Samples averaged per forecast step
    #[arg(long)]
    pub sample_count: Option<usize>,

    /// Output directory (defaults to the configured storage directory)
    #[arg(long)]
    pub output_dir: Option<String>,
}

/// Execute the forecast command
pub async fn execute(args: ForecastArgs) -> Result<()> {
    let settings = Settings::load().unwrap_or_else(|_| Settings::default_settings());

    let mut params = ForecastParams::from(&settings.forecast);
    if let Some(lookback) = args.lookback {
        params.lookback = lookback;
    }
    if let Some(horizon) = args.horizon {
        params.horizon = horizon;
    }
    if let Some(temperature) = args.temperature {
        params.temperature = temperature;
    }
    if let Some(top_p) = args.top_p {
        params.top_p = top_p;
    }
    if let Some(sample_count) = args.sample_count {
        params.sample_count = sample_count;
    }

    let predictor = create_predictor(&args.predictor).ok_or_else(|| {
        anyhow::anyhow!(
            "Unknown predictor '{}'; pretrained models plug in externally, only 'mock' is built in",
            args.predictor
        )
    })?;

    let history = read_daily_csv(&args.input)?;
    info!(
        "Loaded {} rows of history from {}",
        history.len(),
        args.input.display()
    );

    let session = ForecastSession::new(predictor, params);
    let forecast = session.run(&history).await?;

    let output_dir = args
        .output_dir
        .unwrap_or_else(|| settings.storage.output_dir.clone());
    let store = CsvStore::new(output_dir);

    let (start, end) = match (forecast.first(), forecast.last()) {
        (Some(first), Some(last)) => (first.timestamp, last.timestamp),
        _ => anyhow::bail!("Predictor returned an empty forecast"),
    };
    let path = store.write_forecast(&args.symbol, start, end, &forecast)?;

    info!(
        "Forecast of {} trading days ({} to {}) saved to {}",
        forecast.len(),
        start,
        end,
        path.display()
    );

    Ok(())
}
