//! Mock data provider for testing
//!
//! Provides a deterministic in-memory implementation of the provider trait
//! for use in tests and development. The generated frame is yfinance-shaped
//! (capitalized column names, date strings, no amount column) and can inject
//! the defects the normalizer must handle: shuffled ordering, nulls,
//! duplicated days, or an empty result.

use async_trait::async_trait;
use chrono::{Datelike, NaiveDate};
use tracing::debug;

use crate::provider::{DailyRequest, KlineProvider, ProviderError, ProviderInfo, ProviderResult};
use crate::schema::{RawFrame, RawValue};

/// Columns of the generated frame
const NATIVE_COLUMNS: [&str; 6] = ["Date", "Open", "High", "Low", "Close", "Volume"];

/// Mock data provider for testing
pub struct MockProvider {
    info: ProviderInfo,
    /// Base price for generated data
    pub base_price: f64,
    /// Per-day price variation (alternating walk)
    pub price_step: f64,
    /// Emit rows newest-first instead of oldest-first
    pub reverse_order: bool,
    /// Null out the close on every Nth row
    pub null_close_every: Option<usize>,
    /// Repeat the last trading day with a different close
    pub duplicate_last_day: bool,
    /// Return an empty result instead of bars
    pub empty: bool,
}

impl MockProvider {
    /// Create a new mock provider
    pub fn new() -> Self {
        Self {
            info: ProviderInfo {
                name: "mock".to_string(),
                display_name: "Mock Provider".to_string(),
                markets: vec!["MOCK".to_string()],
            },
            base_price: 100.0,
            price_step: 1.0,
            reverse_order: false,
            null_close_every: None,
            duplicate_last_day: false,
            empty: false,
        }
    }

    /// Generate one bar per weekday in the requested range
    fn generate_rows(&self, start: NaiveDate, end: NaiveDate) -> Vec<Vec<RawValue>> {
        let mut rows = Vec::new();
        let mut day = start;
        let mut price = self.base_price;
        let mut i = 0usize;

        while day <= end {
            if day.weekday().num_days_from_monday() < 5 {
                // Simple alternating walk for price
                let delta = if i % 2 == 0 {
                    self.price_step
                } else {
                    -self.price_step
                };
                price += delta;

                let close = match self.null_close_every {
                    Some(n) if n > 0 && (i + 1) % n == 0 => RawValue::Null,
                    _ => RawValue::Float(price),
                };

                rows.push(vec![
                    RawValue::text(day.format("%Y-%m-%d").to_string()),
                    RawValue::Float(price - delta / 2.0),
                    RawValue::Float(price + self.price_step),
                    RawValue::Float(price - self.price_step),
                    close,
                    RawValue::Float(1000.0 + (i as f64) * 10.0),
                ]);
                i += 1;
            }
            day = match day.succ_opt() {
                Some(next) => next,
                None => break,
            };
        }

        if self.duplicate_last_day {
            if let Some(last) = rows.last().cloned() {
                let mut dup = last;
                dup[4] = RawValue::Float(price + self.price_step);
                rows.push(dup);
            }
        }

        if self.reverse_order {
            rows.reverse();
        }

        rows
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl KlineProvider for MockProvider {
    fn info(&self) -> &ProviderInfo {
        &self.info
    }

    async fn fetch_daily(&self, request: &DailyRequest) -> ProviderResult<RawFrame> {
        if self.empty {
            return Err(ProviderError::DataUnavailable(format!(
                "No mock data for {}",
                request.symbol
            )));
        }

        let rows = self.generate_rows(request.start, request.end);
        if rows.is_empty() {
            return Err(ProviderError::DataUnavailable(format!(
                "No weekdays between {} and {}",
                request.start, request.end
            )));
        }

        debug!("Mock generated {} rows for {}", rows.len(), request.symbol);

        RawFrame::with_rows(NATIVE_COLUMNS, rows)
            .map_err(|e| ProviderError::Parse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[tokio::test]
    async fn test_generates_weekdays_only() {
        let provider = MockProvider::new();
        // 2024-01-01 is a Monday; the range spans one full week
        let request = DailyRequest::new("TEST", date("2024-01-01"), date("2024-01-07"));

        let frame = provider.fetch_daily(&request).await.unwrap();
        assert_eq!(frame.len(), 5);
    }

    #[tokio::test]
    async fn test_empty_flag_is_data_unavailable() {
        let mut provider = MockProvider::new();
        provider.empty = true;
        let request = DailyRequest::new("TEST", date("2024-01-01"), date("2024-01-07"));

        let err = provider.fetch_daily(&request).await.unwrap_err();
        assert!(matches!(err, ProviderError::DataUnavailable(_)));
    }

    #[tokio::test]
    async fn test_null_injection() {
        let mut provider = MockProvider::new();
        provider.null_close_every = Some(2);
        let request = DailyRequest::new("TEST", date("2024-01-01"), date("2024-01-05"));

        let frame = provider.fetch_daily(&request).await.unwrap();
        let close = frame.column("Close").unwrap();
        assert!(!close[0].is_null());
        assert!(close[1].is_null());
        assert!(close[3].is_null());
    }

    #[tokio::test]
    async fn test_weekend_only_range_is_unavailable() {
        let provider = MockProvider::new();
        // 2024-01-06/07 is a weekend
        let request = DailyRequest::new("TEST", date("2024-01-06"), date("2024-01-07"));

        let err = provider.fetch_daily(&request).await.unwrap_err();
        assert!(matches!(err, ProviderError::DataUnavailable(_)));
    }
}
