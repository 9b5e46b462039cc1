//! Eastmoney daily kline provider
//!
//! Fetches forward-adjusted daily bars for A-share symbols from the Eastmoney
//! push2his endpoint. The raw frame keeps the source's field names; volume is
//! in lots and amount in CNY, both carried through unchanged.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::provider::{DailyRequest, KlineProvider, ProviderError, ProviderInfo, ProviderResult};
use crate::schema::{RawFrame, RawValue};

use super::types::KlineResponse;

/// Default Eastmoney history API host
const DEFAULT_BASE_URL: &str = "https://push2his.eastmoney.com";

/// Daily bars
const PERIOD_DAILY: &str = "101";

/// Forward adjustment (qfq)
const ADJUST_FORWARD: &str = "1";

/// Field order requested via `fields2` (f51..f57)
const NATIVE_COLUMNS: [&str; 7] = ["日期", "开盘", "收盘", "最高", "最低", "成交量", "成交额"];

/// Eastmoney provider settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EastmoneySettings {
    /// API host
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl Default for EastmoneySettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

/// Eastmoney data provider
pub struct EastmoneyProvider {
    info: ProviderInfo,
    http: reqwest::Client,
    base_url: String,
}

impl EastmoneyProvider {
    /// Create a new Eastmoney provider with default settings
    pub fn new() -> Self {
        Self::with_settings(EastmoneySettings::default())
    }

    /// Create a new Eastmoney provider with custom settings
    pub fn with_settings(settings: EastmoneySettings) -> Self {
        Self {
            info: ProviderInfo {
                name: "eastmoney".to_string(),
                display_name: "Eastmoney".to_string(),
                markets: vec!["CN-A".to_string()],
            },
            http: reqwest::Client::new(),
            base_url: settings.base_url,
        }
    }

    /// Market-qualified security id: Shanghai codes are prefixed `1.`,
    /// Shenzhen/Beijing codes `0.`
    fn secid(symbol: &str) -> String {
        if symbol.starts_with('6') || symbol.starts_with('9') {
            format!("1.{}", symbol)
        } else {
            format!("0.{}", symbol)
        }
    }

    /// Split "date,open,close,high,low,volume,amount" bars into a raw frame
    fn build_frame(symbol: &str, klines: &[String]) -> ProviderResult<RawFrame> {
        let mut rows = Vec::with_capacity(klines.len());

        for kline in klines {
            let fields: Vec<&str> = kline.split(',').map(str::trim).collect();
            if fields.len() < NATIVE_COLUMNS.len() {
                return Err(ProviderError::Parse(format!(
                    "Kline for {} has {} fields, expected {}: '{}'",
                    symbol,
                    fields.len(),
                    NATIVE_COLUMNS.len(),
                    kline
                )));
            }

            rows.push(
                fields[..NATIVE_COLUMNS.len()]
                    .iter()
                    .map(|field| {
                        if field.is_empty() {
                            RawValue::Null
                        } else {
                            RawValue::text(*field)
                        }
                    })
                    .collect(),
            );
        }

        RawFrame::with_rows(NATIVE_COLUMNS, rows)
            .map_err(|e| ProviderError::Parse(e.to_string()))
    }
}

impl Default for EastmoneyProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl KlineProvider for EastmoneyProvider {
    fn info(&self) -> &ProviderInfo {
        &self.info
    }

    async fn fetch_daily(&self, request: &DailyRequest) -> ProviderResult<RawFrame> {
        let url = format!("{}/api/qt/stock/kline/get", self.base_url);

        info!(
            "Fetching {} daily bars from Eastmoney, {} to {}",
            request.symbol, request.start, request.end
        );

        let response = self
            .http
            .get(&url)
            .query(&[
                ("secid", Self::secid(&request.symbol)),
                ("fields1", "f1,f2,f3,f4,f5,f6".to_string()),
                ("fields2", "f51,f52,f53,f54,f55,f56,f57".to_string()),
                ("klt", PERIOD_DAILY.to_string()),
                ("fqt", ADJUST_FORWARD.to_string()),
                ("beg", request.start.format("%Y%m%d").to_string()),
                ("end", request.end.format("%Y%m%d").to_string()),
            ])
            .send()
            .await
            .map_err(|e| ProviderError::Connection(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::Request(format!(
                "Eastmoney returned HTTP {} for {}",
                status, request.symbol
            )));
        }

        let payload: KlineResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::Parse(e.to_string()))?;

        let data = payload.data.ok_or_else(|| {
            ProviderError::SymbolNotFound(format!("No data block for {}", request.symbol))
        })?;

        if data.klines.is_empty() {
            return Err(ProviderError::DataUnavailable(format!(
                "Empty kline list for {} ({})",
                request.symbol, data.name
            )));
        }

        let frame = Self::build_frame(&request.symbol, &data.klines)?;
        debug!(
            "Eastmoney returned {} rows for {} ({})",
            frame.len(),
            data.code,
            data.name
        );
        Ok(frame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secid_by_market() {
        assert_eq!(EastmoneyProvider::secid("601995"), "1.601995");
        assert_eq!(EastmoneyProvider::secid("900905"), "1.900905");
        assert_eq!(EastmoneyProvider::secid("000001"), "0.000001");
        assert_eq!(EastmoneyProvider::secid("300750"), "0.300750");
    }

    #[test]
    fn test_build_frame() {
        let klines = vec![
            "2024-01-02,36.50,37.10,37.25,36.40,182000,671234567.00".to_string(),
            "2024-01-03,37.05,36.80,37.20,36.60,154000,568765432.00".to_string(),
        ];

        let frame = EastmoneyProvider::build_frame("601995", &klines).unwrap();
        assert_eq!(frame.len(), 2);
        assert!(frame.has_column("日期"));
        assert!(frame.has_column("成交额"));

        let close = frame.column("收盘").unwrap();
        assert_eq!(close[0], &RawValue::text("37.10"));
    }

    #[test]
    fn test_build_frame_rejects_short_bars() {
        let klines = vec!["2024-01-02,36.50,37.10".to_string()];
        let err = EastmoneyProvider::build_frame("601995", &klines).unwrap_err();
        assert!(matches!(err, ProviderError::Parse(_)));
    }

    #[test]
    fn test_empty_field_becomes_null() {
        let klines = vec!["2024-01-02,36.50,,37.25,36.40,182000,671234567.00".to_string()];
        let frame = EastmoneyProvider::build_frame("601995", &klines).unwrap();
        assert!(frame.column("收盘").unwrap()[0].is_null());
    }
}
