//! Yahoo Finance daily kline provider
//!
//! Fetches daily bars from the public v8 chart endpoint. Timestamps arrive as
//! epoch seconds and bars may carry nulls on halted days; both are left to
//! the normalizer.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::provider::{DailyRequest, KlineProvider, ProviderError, ProviderInfo, ProviderResult};
use crate::schema::{RawFrame, RawValue};

use super::types::{ChartResponse, ChartResult};

/// Default Yahoo Finance API host
const DEFAULT_BASE_URL: &str = "https://query1.finance.yahoo.com";

/// Columns of the raw frame this provider emits, matching the chart payload
/// field names.
const NATIVE_COLUMNS: [&str; 6] = ["timestamp", "open", "high", "low", "close", "volume"];

/// Yahoo provider settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YahooSettings {
    /// API host
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl Default for YahooSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

/// Yahoo Finance data provider
pub struct YahooProvider {
    info: ProviderInfo,
    http: reqwest::Client,
    base_url: String,
}

impl YahooProvider {
    /// Create a new Yahoo provider with default settings
    pub fn new() -> Self {
        Self::with_settings(YahooSettings::default())
    }

    /// Create a new Yahoo provider with custom settings
    pub fn with_settings(settings: YahooSettings) -> Self {
        Self {
            info: ProviderInfo {
                name: "yahoo".to_string(),
                display_name: "Yahoo Finance".to_string(),
                markets: vec!["US".to_string(), "HK".to_string()],
            },
            http: reqwest::Client::new(),
            base_url: settings.base_url,
        }
    }

    /// Convert one chart series into a raw frame
    fn build_frame(symbol: &str, result: &ChartResult) -> ProviderResult<RawFrame> {
        if result.timestamp.is_empty() {
            return Err(ProviderError::DataUnavailable(format!(
                "Empty chart result for {}",
                symbol
            )));
        }

        let quote = result.indicators.quote.first().ok_or_else(|| {
            ProviderError::Parse(format!("Chart result for {} has no quote block", symbol))
        })?;

        let bar = |series: &[Option<f64>], i: usize| -> RawValue {
            series.get(i).copied().flatten().into()
        };

        let rows: Vec<Vec<RawValue>> = result
            .timestamp
            .iter()
            .enumerate()
            .map(|(i, ts)| {
                vec![
                    RawValue::Float(*ts as f64),
                    bar(&quote.open, i),
                    bar(&quote.high, i),
                    bar(&quote.low, i),
                    bar(&quote.close, i),
                    bar(&quote.volume, i),
                ]
            })
            .collect();

        RawFrame::with_rows(NATIVE_COLUMNS, rows)
            .map_err(|e| ProviderError::Parse(e.to_string()))
    }
}

impl Default for YahooProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl KlineProvider for YahooProvider {
    fn info(&self) -> &ProviderInfo {
        &self.info
    }

    async fn fetch_daily(&self, request: &DailyRequest) -> ProviderResult<RawFrame> {
        let (period1, period2) = request.epoch_bounds();
        let url = format!("{}/v8/finance/chart/{}", self.base_url, request.symbol);

        info!(
            "Fetching {} daily bars from Yahoo, {} to {}",
            request.symbol, request.start, request.end
        );

        let response = self
            .http
            .get(&url)
            .query(&[
                ("period1", period1.to_string()),
                ("period2", period2.to_string()),
                ("interval", "1d".to_string()),
                ("events", "history".to_string()),
            ])
            .send()
            .await
            .map_err(|e| ProviderError::Connection(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::Request(format!(
                "Yahoo returned HTTP {} for {}",
                status, request.symbol
            )));
        }

        let payload: ChartResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::Parse(e.to_string()))?;

        if let Some(err) = payload.chart.error {
            return Err(ProviderError::DataUnavailable(format!(
                "{}: {} ({})",
                request.symbol, err.description, err.code
            )));
        }

        let result = payload
            .chart
            .result
            .as_ref()
            .and_then(|results| results.first())
            .ok_or_else(|| {
                ProviderError::DataUnavailable(format!("No chart result for {}", request.symbol))
            })?;

        let frame = Self::build_frame(&request.symbol, result)?;
        debug!("Yahoo returned {} rows for {}", frame.len(), request.symbol);
        Ok(frame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chart_result(payload: &str) -> ChartResult {
        let response: ChartResponse = serde_json::from_str(payload).unwrap();
        response.chart.result.unwrap().remove(0)
    }

    #[test]
    fn test_build_frame_preserves_nulls() {
        let result = chart_result(
            r#"{"chart": {"result": [{
                "timestamp": [1704153600, 1704240000],
                "indicators": {"quote": [{
                    "open": [73.5, 74.1],
                    "high": [74.2, 75.0],
                    "low": [72.9, 73.8],
                    "close": [74.0, null],
                    "volume": [21000000.0, 18500000.0]
                }]}
            }], "error": null}}"#,
        );

        let frame = YahooProvider::build_frame("BABA", &result).unwrap();
        assert_eq!(frame.len(), 2);
        assert_eq!(frame.columns()[0], "timestamp");
        assert_eq!(frame.columns()[5], "volume");

        let close = frame.column("close").unwrap();
        assert_eq!(close[0], &RawValue::Float(74.0));
        assert!(close[1].is_null());
    }

    #[test]
    fn test_empty_result_is_data_unavailable() {
        let result = chart_result(
            r#"{"chart": {"result": [{
                "timestamp": [],
                "indicators": {"quote": [{}]}
            }], "error": null}}"#,
        );

        let err = YahooProvider::build_frame("BABA", &result).unwrap_err();
        assert!(matches!(err, ProviderError::DataUnavailable(_)));
    }

    #[test]
    fn test_provider_info() {
        let provider = YahooProvider::new();
        assert_eq!(provider.info().name, "yahoo");
    }
}
