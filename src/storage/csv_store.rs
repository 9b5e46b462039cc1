//! CSV reading and writing for canonical kline tables
//!
//! File names are deterministic per symbol and date range. Writes go through
//! a dot-prefixed temp file in the target directory followed by a single
//! rename, so a failed write never leaves a partial output file.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;
use tracing::{debug, info};

use crate::schema::{KlineRecord, CANONICAL_COLUMNS};

/// Timestamp rendering for the `timestamps` column
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Errors during CSV persistence
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Line {line}: {reason}")]
    Malformed { line: usize, reason: String },
}

/// Deterministic file name for a fetched daily table
pub fn daily_file_name(symbol: &str, start: NaiveDate, end: NaiveDate) -> String {
    format!(
        "{}_daily_{}_{}.csv",
        symbol,
        start.format("%Y%m%d"),
        end.format("%Y%m%d")
    )
}

/// Deterministic file name for a forecast table
pub fn forecast_file_name(symbol: &str, start: NaiveDate, end: NaiveDate) -> String {
    format!(
        "{}_forecast_{}_{}.csv",
        symbol,
        start.format("%Y%m%d"),
        end.format("%Y%m%d")
    )
}

/// CSV store rooted at an output directory
#[derive(Debug, Clone)]
pub struct CsvStore {
    output_dir: PathBuf,
}

impl CsvStore {
    /// Create a store rooted at `output_dir` (created on first write)
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// Root directory of this store
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Write a fetched daily table; returns the final path
    pub fn write_daily(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
        records: &[KlineRecord],
    ) -> Result<PathBuf, StorageError> {
        self.write_records(&daily_file_name(symbol, start, end), records)
    }

    /// Write a forecast table; returns the final path
    pub fn write_forecast(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
        records: &[KlineRecord],
    ) -> Result<PathBuf, StorageError> {
        self.write_records(&forecast_file_name(symbol, start, end), records)
    }

    fn write_records(
        &self,
        file_name: &str,
        records: &[KlineRecord],
    ) -> Result<PathBuf, StorageError> {
        fs::create_dir_all(&self.output_dir)?;

        let final_path = self.output_dir.join(file_name);
        let tmp_path = self.output_dir.join(format!(".{}.tmp", file_name));

        if let Err(e) = write_csv(&tmp_path, records) {
            let _ = fs::remove_file(&tmp_path);
            return Err(e);
        }

        if let Err(e) = fs::rename(&tmp_path, &final_path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(e.into());
        }

        info!("Wrote {} rows to {}", records.len(), final_path.display());
        Ok(final_path)
    }
}

fn write_csv(path: &Path, records: &[KlineRecord]) -> Result<(), StorageError> {
    let mut writer = csv::Writer::from_path(path)?;

    writer.write_record(CANONICAL_COLUMNS)?;

    for record in records {
        // Daily bars carry no intraday time; midnight is always rendered
        let timestamp = record.timestamp.and_hms_opt(0, 0, 0).unwrap();
        writer.write_record([
            timestamp.format(TIMESTAMP_FORMAT).to_string(),
            format!("{:.2}", record.open),
            format!("{:.2}", record.high),
            format!("{:.2}", record.low),
            format!("{:.2}", record.close),
            format!("{:.2}", record.volume),
            format!("{:.2}", record.amount),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

/// Read a canonical kline CSV back into records.
pub fn read_daily_csv(path: &Path) -> Result<Vec<KlineRecord>, StorageError> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut records = Vec::new();

    for (i, result) in reader.records().enumerate() {
        let line = i + 2; // header occupies line 1
        let row = result?;

        if row.len() != CANONICAL_COLUMNS.len() {
            return Err(StorageError::Malformed {
                line,
                reason: format!(
                    "expected {} fields, got {}",
                    CANONICAL_COLUMNS.len(),
                    row.len()
                ),
            });
        }

        let timestamp = parse_timestamp(&row[0]).ok_or_else(|| StorageError::Malformed {
            line,
            reason: format!("invalid timestamp '{}'", &row[0]),
        })?;

        let field = |idx: usize| -> Result<Decimal, StorageError> {
            Decimal::from_str(row[idx].trim()).map_err(|e| StorageError::Malformed {
                line,
                reason: format!("invalid {} '{}': {}", CANONICAL_COLUMNS[idx], &row[idx], e),
            })
        };

        records.push(KlineRecord::new(
            timestamp,
            field(1)?,
            field(2)?,
            field(3)?,
            field(4)?,
            field(5)?,
            field(6)?,
        ));
    }

    debug!("Read {} rows from {}", records.len(), path.display());
    Ok(records)
}

fn parse_timestamp(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if let Ok(dt) = NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT) {
        return Some(dt.date());
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn sample_records() -> Vec<KlineRecord> {
        vec![
            KlineRecord::new(
                date("2024-01-02"),
                dec!(10.00),
                dec!(11.00),
                dec!(9.50),
                dec!(10.50),
                dec!(1000.00),
                dec!(10500.00),
            ),
            KlineRecord::new(
                date("2024-01-03"),
                dec!(10.50),
                dec!(12.00),
                dec!(10.25),
                dec!(11.75),
                dec!(1500.00),
                dec!(17625.00),
            ),
        ]
    }

    fn temp_store(tag: &str) -> CsvStore {
        let dir = std::env::temp_dir().join(format!("kline_store_{}_{}", tag, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        CsvStore::new(dir)
    }

    #[test]
    fn test_file_names_deterministic() {
        let name = daily_file_name("BABA", date("2023-01-01"), date("2024-01-01"));
        assert_eq!(name, "BABA_daily_20230101_20240101.csv");

        let name = forecast_file_name("601995", date("2024-02-01"), date("2024-03-15"));
        assert_eq!(name, "601995_forecast_20240201_20240315.csv");
    }

    #[test]
    fn test_write_format() {
        let store = temp_store("format");
        let path = store
            .write_daily("TEST", date("2024-01-02"), date("2024-01-03"), &sample_records())
            .unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[0], "timestamps,open,high,low,close,volume,amount");
        assert_eq!(
            lines[1],
            "2024-01-02 00:00:00,10.00,11.00,9.50,10.50,1000.00,10500.00"
        );
        assert_eq!(lines.len(), 3);

        fs::remove_dir_all(store.output_dir()).unwrap();
    }

    #[test]
    fn test_read_back_round_trip() {
        let store = temp_store("roundtrip");
        let records = sample_records();
        let path = store
            .write_daily("TEST", date("2024-01-02"), date("2024-01-03"), &records)
            .unwrap();

        let read = read_daily_csv(&path).unwrap();
        assert_eq!(read, records);

        fs::remove_dir_all(store.output_dir()).unwrap();
    }

    #[test]
    fn test_no_temp_file_left_behind() {
        let store = temp_store("tmpfile");
        store
            .write_daily("TEST", date("2024-01-02"), date("2024-01-03"), &sample_records())
            .unwrap();

        let leftovers: Vec<_> = fs::read_dir(store.output_dir())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty());

        fs::remove_dir_all(store.output_dir()).unwrap();
    }

    #[test]
    fn test_read_rejects_malformed_row() {
        let store = temp_store("malformed");
        fs::create_dir_all(store.output_dir()).unwrap();
        let path = store.output_dir().join("bad.csv");
        fs::write(
            &path,
            "timestamps,open,high,low,close,volume,amount\n2024-01-02 00:00:00,10.00,11.00,9.50,not-a-number,1000.00,10500.00\n",
        )
        .unwrap();

        let err = read_daily_csv(&path).unwrap_err();
        assert!(matches!(err, StorageError::Malformed { line: 2, .. }));

        fs::remove_dir_all(store.output_dir()).unwrap();
    }
}
