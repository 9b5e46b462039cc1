//! Canonical CSV persistence
//!
//! Writes normalized kline tables to delimited files with a fixed timestamp
//! format and 2-digit numeric scale, and reads them back for the forecast
//! path.

mod csv_store;

pub use csv_store::*;
