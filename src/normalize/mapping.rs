//! Declarative column mappings
//!
//! Each provider publishes its kline table under its own column names and
//! units. A [`ColumnMap`] declares, per provider, which source column feeds
//! each canonical field and how `amount` is obtained. Maps are selected by
//! provider identifier at adapter-construction time; there is no global
//! mutable registry.

/// How the canonical `amount` column is obtained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AmountSource {
    /// The provider delivers a traded-value column natively
    Column(String),
    /// Derive as `close * volume` after gap filling
    CloseTimesVolume,
}

/// Source-column mapping for one provider.
#[derive(Debug, Clone)]
pub struct ColumnMap {
    provider: String,
    timestamp: String,
    open: String,
    high: String,
    low: String,
    close: String,
    volume: String,
    amount: AmountSource,
}

impl ColumnMap {
    /// Look up the mapping for a provider identifier.
    pub fn for_provider(provider: &str) -> Option<Self> {
        match provider {
            "yahoo" => Some(Self::yahoo()),
            "eastmoney" => Some(Self::eastmoney()),
            "mock" => Some(Self::mock()),
            _ => None,
        }
    }

    /// Yahoo Finance v8 chart payload: lowercase field names, epoch-second
    /// timestamps, no traded-value series.
    pub fn yahoo() -> Self {
        Self {
            provider: "yahoo".to_string(),
            timestamp: "timestamp".to_string(),
            open: "open".to_string(),
            high: "high".to_string(),
            low: "low".to_string(),
            close: "close".to_string(),
            volume: "volume".to_string(),
            amount: AmountSource::CloseTimesVolume,
        }
    }

    /// Eastmoney daily kline fields. Volume is in lots (1 lot = 100 shares),
    /// amount in CNY; both are carried through unchanged.
    pub fn eastmoney() -> Self {
        Self {
            provider: "eastmoney".to_string(),
            timestamp: "日期".to_string(),
            open: "开盘".to_string(),
            high: "最高".to_string(),
            low: "最低".to_string(),
            close: "收盘".to_string(),
            volume: "成交量".to_string(),
            amount: AmountSource::Column("成交额".to_string()),
        }
    }

    /// Mock provider emits a yfinance-shaped table (capitalized names, date
    /// strings, no amount column).
    pub fn mock() -> Self {
        Self {
            provider: "mock".to_string(),
            timestamp: "Date".to_string(),
            open: "Open".to_string(),
            high: "High".to_string(),
            low: "Low".to_string(),
            close: "Close".to_string(),
            volume: "Volume".to_string(),
            amount: AmountSource::CloseTimesVolume,
        }
    }

    /// Provider identifier this map belongs to
    pub fn provider(&self) -> &str {
        &self.provider
    }

    /// Source column holding the period timestamp
    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    /// Source column for the open price
    pub fn open(&self) -> &str {
        &self.open
    }

    /// Source column for the high price
    pub fn high(&self) -> &str {
        &self.high
    }

    /// Source column for the low price
    pub fn low(&self) -> &str {
        &self.low
    }

    /// Source column for the close price
    pub fn close(&self) -> &str {
        &self.close
    }

    /// Source column for the traded quantity
    pub fn volume(&self) -> &str {
        &self.volume
    }

    /// Amount policy for this provider
    pub fn amount(&self) -> &AmountSource {
        &self.amount
    }

    /// Every source column the raw frame must contain.
    pub fn required_columns(&self) -> Vec<&str> {
        let mut required = vec![
            self.timestamp.as_str(),
            self.open.as_str(),
            self.high.as_str(),
            self.low.as_str(),
            self.close.as_str(),
            self.volume.as_str(),
        ];
        if let AmountSource::Column(name) = &self.amount {
            required.push(name.as_str());
        }
        required
    }
}
