//! # Kline Manager
//!
//! Daily kline (OHLCV) fetching, normalization, and forecast input preparation.
//!
//! ## Features
//!
//! - **Historical data loading**: On-demand daily bars from pluggable providers
//!   (Yahoo Finance chart API, Eastmoney kline API, mock for testing)
//! - **Normalization**: Declarative per-provider column mappings into a single
//!   canonical OHLCV schema with gap filling and fixed 2-digit scale
//! - **Persistence**: Atomic CSV output with a deterministic file name per
//!   symbol and date range
//! - **Forecast preparation**: Lookback window selection and future trading-day
//!   generation for an external pretrained forecasting model
//!
//! ## Architecture
//!
//! Providers return raw tables keyed by their native column names. The
//! normalizer renames, coerces, fills, sorts, and rounds them into
//! [`schema::KlineRecord`] rows, which the CSV store persists. The forecasting
//! model itself is an opaque boundary behind the [`forecast::Predictor`] trait.

pub mod cli;
pub mod config;
pub mod forecast;
pub mod normalize;
pub mod pipeline;
pub mod provider;
pub mod schema;
pub mod storage;

// Re-export commonly used types
pub use config::Settings;
pub use normalize::{normalize, ColumnMap, NormalizeError};
pub use pipeline::{FetchOutcome, FetchPipeline, PipelineError};
pub use provider::{
    DailyRequest, KlineProvider, ProviderError, ProviderFactory, ProviderInfo, ProviderResult,
};
pub use schema::{KlineRecord, RawFrame, RawValue};
pub use storage::{CsvStore, StorageError};
