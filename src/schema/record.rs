//! Canonical daily OHLCV record
//!
//! This is the canonical representation of one trading day. All
//! provider-specific data is normalized to this format before persistence.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Canonical output columns, in serialization order.
pub const CANONICAL_COLUMNS: [&str; 7] = [
    "timestamps",
    "open",
    "high",
    "low",
    "close",
    "volume",
    "amount",
];

/// One normalized daily kline bar.
///
/// Prices, volume, and amount are held at a fixed 2-digit scale. The unit of
/// `volume` follows the source (shares vs. lots); `amount` is the traded value
/// in quote currency, either source-provided or derived as `close * volume`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KlineRecord {
    /// Trading day (time-of-day is always midnight for daily bars)
    pub timestamp: NaiveDate,
    /// Open price
    pub open: Decimal,
    /// High price
    pub high: Decimal,
    /// Low price
    pub low: Decimal,
    /// Close price
    pub close: Decimal,
    /// Traded quantity
    pub volume: Decimal,
    /// Traded value
    pub amount: Decimal,
}

impl KlineRecord {
    /// Create a new record
    pub fn new(
        timestamp: NaiveDate,
        open: Decimal,
        high: Decimal,
        low: Decimal,
        close: Decimal,
        volume: Decimal,
        amount: Decimal,
    ) -> Self {
        Self {
            timestamp,
            open,
            high,
            low,
            close,
            volume,
            amount,
        }
    }

    /// Round every numeric field to the canonical 2-digit scale.
    pub fn rounded(mut self) -> Self {
        self.open = self.open.round_dp(2);
        self.high = self.high.round_dp(2);
        self.low = self.low.round_dp(2);
        self.close = self.close.round_dp(2);
        self.volume = self.volume.round_dp(2);
        self.amount = self.amount.round_dp(2);
        self
    }
}
