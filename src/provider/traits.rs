//! Provider trait definitions
//!
//! These traits define the interface for market-data providers. Each provider
//! (Yahoo, Eastmoney, mock) implements them to deliver historical daily bars
//! under its native column names.

use async_trait::async_trait;
use chrono::NaiveDate;
use thiserror::Error;

use crate::schema::RawFrame;

/// Provider error types
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ProviderError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Request error: {0}")]
    Request(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Data unavailable: {0}")]
    DataUnavailable(String),

    #[error("Symbol not found: {0}")]
    SymbolNotFound(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

pub type ProviderResult<T> = Result<T, ProviderError>;

/// Information about a data provider
#[derive(Debug, Clone)]
pub struct ProviderInfo {
    /// Provider identifier (e.g., "yahoo", "eastmoney")
    pub name: String,
    /// Provider display name
    pub display_name: String,
    /// Markets the provider covers (e.g., "US", "CN-A")
    pub markets: Vec<String>,
}

/// Historical daily-bar request
#[derive(Debug, Clone)]
pub struct DailyRequest {
    /// Symbol in the provider's identifier space (e.g., "BABA", "601995")
    pub symbol: String,
    /// First trading day (inclusive)
    pub start: NaiveDate,
    /// Last trading day (inclusive)
    pub end: NaiveDate,
}

impl DailyRequest {
    /// Create a new daily request
    pub fn new(symbol: impl Into<String>, start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            symbol: symbol.into(),
            start,
            end,
        }
    }

    /// Inclusive request range as epoch seconds `[start 00:00, end 24:00)`
    pub fn epoch_bounds(&self) -> (i64, i64) {
        let start = self.start.and_hms_opt(0, 0, 0).unwrap().and_utc();
        let end = self
            .end
            .succ_opt()
            .unwrap_or(self.end)
            .and_hms_opt(0, 0, 0)
            .unwrap()
            .and_utc();
        (start.timestamp(), end.timestamp())
    }
}

/// Trait for daily kline providers
///
/// Returns a [`RawFrame`] with provider-native column names; only the
/// normalizer interprets the contents. An empty provider result is
/// `DataUnavailable`, never an empty frame.
#[async_trait]
pub trait KlineProvider: Send + Sync {
    /// Get provider information
    fn info(&self) -> &ProviderInfo;

    /// Fetch daily bars for the requested symbol and range
    async fn fetch_daily(&self, request: &DailyRequest) -> ProviderResult<RawFrame>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_epoch_bounds_cover_full_last_day() {
        let request = DailyRequest::new(
            "TEST",
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
        );

        let (start, end) = request.epoch_bounds();
        assert_eq!(start, 1704067200); // 2024-01-01 00:00:00 UTC
        assert_eq!(end - start, 2 * 86400);
    }
}
