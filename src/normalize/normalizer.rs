//! Raw table to canonical schema
//!
//! Converts a provider-native [`RawFrame`] into ordered, gap-free
//! [`KlineRecord`] rows:
//!
//! 1. Validate that every mapped source column is present
//! 2. Parse timestamps to day granularity (time-of-day dropped)
//! 3. Coerce numeric cells to `Decimal`; unparseable values become null
//! 4. Forward-fill then backward-fill nulls; fail if the column stays gapped
//! 5. Derive `amount = close * volume` when the provider has no native column
//! 6. Sort ascending by timestamp, keeping the last row per duplicate day
//! 7. Round every numeric column to the fixed 2-digit scale

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use std::str::FromStr;
use thiserror::Error;
use tracing::{debug, warn};

use super::mapping::{AmountSource, ColumnMap};
use crate::schema::{KlineRecord, RawFrame, RawValue};

/// Errors during normalization
#[derive(Error, Debug)]
pub enum NormalizeError {
    #[error("Schema mismatch: missing column(s) {missing:?}")]
    SchemaMismatch { missing: Vec<String> },

    #[error("Row {row}: timestamp '{value}' is not a date")]
    InvalidTimestamp { row: usize, value: String },

    #[error("Column '{column}' has no parseable values")]
    EmptyColumn { column: String },

    #[error("Column '{column}' still has {remaining} missing value(s) after fill")]
    UnresolvableGap { column: String, remaining: usize },
}

/// Normalize a raw provider table into canonical records.
pub fn normalize(frame: &RawFrame, map: &ColumnMap) -> Result<Vec<KlineRecord>, NormalizeError> {
    let missing: Vec<String> = map
        .required_columns()
        .into_iter()
        .filter(|&name| !frame.has_column(name))
        .map(str::to_string)
        .collect();
    if !missing.is_empty() {
        return Err(NormalizeError::SchemaMismatch { missing });
    }

    if frame.is_empty() {
        return Ok(Vec::new());
    }

    let timestamps = parse_timestamps(frame, map.timestamp())?;

    let mut open = coerce_column(frame, map.open());
    let mut high = coerce_column(frame, map.high());
    let mut low = coerce_column(frame, map.low());
    let mut close = coerce_column(frame, map.close());
    let mut volume = coerce_column(frame, map.volume());

    fill_gaps(map.open(), &mut open)?;
    fill_gaps(map.high(), &mut high)?;
    fill_gaps(map.low(), &mut low)?;
    fill_gaps(map.close(), &mut close)?;
    fill_gaps(map.volume(), &mut volume)?;

    let amount: Vec<Decimal> = match map.amount() {
        AmountSource::Column(name) => {
            let mut amount = coerce_column(frame, name);
            fill_gaps(name, &mut amount)?;
            amount.into_iter().map(|v| v.unwrap_or_default()).collect()
        }
        AmountSource::CloseTimesVolume => close
            .iter()
            .zip(volume.iter())
            .map(|(c, v)| c.unwrap_or_default() * v.unwrap_or_default())
            .collect(),
    };

    let mut records: Vec<KlineRecord> = timestamps
        .into_iter()
        .enumerate()
        .map(|(i, timestamp)| KlineRecord::new(
            timestamp,
            open[i].unwrap_or_default(),
            high[i].unwrap_or_default(),
            low[i].unwrap_or_default(),
            close[i].unwrap_or_default(),
            volume[i].unwrap_or_default(),
            amount[i],
        ))
        .collect();

    // Stable sort keeps duplicate days in arrival order; the last wins
    records.sort_by_key(|r| r.timestamp);

    let mut ordered: Vec<KlineRecord> = Vec::with_capacity(records.len());
    for record in records {
        match ordered.last_mut() {
            Some(last) if last.timestamp == record.timestamp => {
                warn!("Duplicate timestamp {}, keeping latest row", record.timestamp);
                *last = record;
            }
            _ => ordered.push(record),
        }
    }

    let ordered: Vec<KlineRecord> = ordered.into_iter().map(KlineRecord::rounded).collect();

    debug!(
        "Normalized {} rows for provider '{}'",
        ordered.len(),
        map.provider()
    );

    Ok(ordered)
}

/// Parse the timestamp column to day granularity.
///
/// Accepts `YYYY-MM-DD`, `YYYY-MM-DD HH:MM:SS`, `YYYY-MM-DDTHH:MM:SS`, and
/// epoch seconds (numeric cell or digit string). Any time-of-day component is
/// dropped.
fn parse_timestamps(
    frame: &RawFrame,
    column: &str,
) -> Result<Vec<NaiveDate>, NormalizeError> {
    let idx = frame
        .column_index(column)
        .expect("timestamp column presence validated");

    frame
        .rows()
        .iter()
        .enumerate()
        .map(|(row, cells)| {
            parse_date(&cells[idx]).ok_or_else(|| NormalizeError::InvalidTimestamp {
                row,
                value: format_cell(&cells[idx]),
            })
        })
        .collect()
}

fn parse_date(value: &RawValue) -> Option<NaiveDate> {
    match value {
        RawValue::Null => None,
        RawValue::Float(f) => epoch_date(*f),
        RawValue::Text(s) => {
            let s = s.trim();
            if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
                return Some(date);
            }
            if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
                return Some(dt.date());
            }
            if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
                return Some(dt.date());
            }
            s.parse::<f64>().ok().and_then(epoch_date)
        }
    }
}

fn epoch_date(secs: f64) -> Option<NaiveDate> {
    if !secs.is_finite() {
        return None;
    }
    DateTime::from_timestamp(secs as i64, 0).map(|dt| dt.date_naive())
}

fn format_cell(value: &RawValue) -> String {
    match value {
        RawValue::Null => "<null>".to_string(),
        RawValue::Text(s) => s.clone(),
        RawValue::Float(f) => f.to_string(),
    }
}

/// Coerce one column to decimals; anything unparseable becomes null.
fn coerce_column(frame: &RawFrame, column: &str) -> Vec<Option<Decimal>> {
    let idx = frame
        .column_index(column)
        .expect("column presence validated");

    frame
        .rows()
        .iter()
        .map(|cells| parse_decimal(&cells[idx]))
        .collect()
}

/// Parse a cell that may hold a decimal string, scientific notation
/// (e.g. "7.314e-05"), or a JSON float.
fn parse_decimal(value: &RawValue) -> Option<Decimal> {
    match value {
        RawValue::Null => None,
        RawValue::Float(f) => {
            if f.is_finite() {
                Decimal::try_from(*f).ok()
            } else {
                None
            }
        }
        RawValue::Text(s) => {
            let s = s.trim();
            if s.is_empty() {
                return None;
            }
            // Direct Decimal parsing handles most cases; fall back through
            // f64 for scientific notation
            if let Ok(d) = Decimal::from_str(s) {
                return Some(d);
            }
            s.parse::<f64>()
                .ok()
                .filter(|f| f.is_finite())
                .and_then(|f| Decimal::try_from(f).ok())
        }
    }
}

/// Forward-fill then backward-fill nulls in place.
///
/// A column with no valid value at all is reported as [`NormalizeError::EmptyColumn`];
/// any null surviving both passes is an [`NormalizeError::UnresolvableGap`].
fn fill_gaps(column: &str, values: &mut [Option<Decimal>]) -> Result<(), NormalizeError> {
    if values.iter().all(Option::is_none) {
        return Err(NormalizeError::EmptyColumn {
            column: column.to_string(),
        });
    }

    let gaps = values.iter().filter(|v| v.is_none()).count();
    if gaps == 0 {
        return Ok(());
    }
    warn!("Column '{}' has {} missing value(s), filling", column, gaps);

    let mut last_valid: Option<Decimal> = None;
    for value in values.iter_mut() {
        match value {
            Some(v) => last_valid = Some(*v),
            None => *value = last_valid,
        }
    }

    let mut next_valid: Option<Decimal> = None;
    for value in values.iter_mut().rev() {
        match value {
            Some(v) => next_valid = Some(*v),
            None => *value = next_valid,
        }
    }

    let remaining = values.iter().filter(|v| v.is_none()).count();
    if remaining > 0 {
        return Err(NormalizeError::UnresolvableGap {
            column: column.to_string(),
            remaining,
        });
    }

    Ok(())
}
