//! Yahoo Finance chart API payloads
//!
//! Response shapes for `/v8/finance/chart/{symbol}`. Only the fields the
//! daily pipeline consumes are modeled.

use serde::Deserialize;

/// Top-level chart response
#[derive(Debug, Deserialize)]
pub struct ChartResponse {
    pub chart: Chart,
}

/// Chart envelope: exactly one of `result` / `error` is populated
#[derive(Debug, Deserialize)]
pub struct Chart {
    pub result: Option<Vec<ChartResult>>,
    pub error: Option<ChartError>,
}

/// Error block returned for unknown symbols or bad ranges
#[derive(Debug, Deserialize)]
pub struct ChartError {
    pub code: String,
    pub description: String,
}

/// One chart series
#[derive(Debug, Deserialize)]
pub struct ChartResult {
    /// Bar timestamps as epoch seconds
    #[serde(default)]
    pub timestamp: Vec<i64>,
    pub indicators: Indicators,
}

/// Indicator container
#[derive(Debug, Deserialize)]
pub struct Indicators {
    #[serde(default)]
    pub quote: Vec<QuoteBlock>,
}

/// OHLCV arrays, index-aligned with `timestamp`; individual bars may be null
#[derive(Debug, Default, Deserialize)]
pub struct QuoteBlock {
    #[serde(default)]
    pub open: Vec<Option<f64>>,
    #[serde(default)]
    pub high: Vec<Option<f64>>,
    #[serde(default)]
    pub low: Vec<Option<f64>>,
    #[serde(default)]
    pub close: Vec<Option<f64>>,
    #[serde(default)]
    pub volume: Vec<Option<f64>>,
}
