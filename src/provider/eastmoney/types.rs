//! Eastmoney kline API payloads
//!
//! Response shapes for `api/qt/stock/kline/get`. Bars arrive as
//! comma-delimited strings, one per trading day, field order fixed by the
//! `fields2` request parameter.

use serde::Deserialize;

/// Top-level kline response
#[derive(Debug, Deserialize)]
pub struct KlineResponse {
    pub data: Option<KlineData>,
}

/// Kline payload for one security
#[derive(Debug, Deserialize)]
pub struct KlineData {
    /// Security code (e.g., "601995")
    pub code: String,
    /// Security display name
    #[serde(default)]
    pub name: String,
    /// Bars as "date,open,close,high,low,volume,amount" strings
    #[serde(default)]
    pub klines: Vec<String>,
}
