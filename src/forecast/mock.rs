//! Mock predictor for testing
//!
//! Holds the last observed bar flat across the horizon. Deterministic, so
//! tests can assert exact output; sampling parameters are accepted and
//! ignored.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::schema::KlineRecord;

use super::predictor::{ForecastError, ForecastParams, ForecastResult, Predictor};

/// Hold-last-bar predictor
#[derive(Debug, Default)]
pub struct MockPredictor;

impl MockPredictor {
    /// Create a new mock predictor
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Predictor for MockPredictor {
    fn name(&self) -> &str {
        "mock"
    }

    async fn predict(
        &self,
        history: &[KlineRecord],
        future: &[NaiveDate],
        _params: &ForecastParams,
    ) -> ForecastResult<Vec<KlineRecord>> {
        let last = history
            .last()
            .ok_or_else(|| ForecastError::Predictor("Empty history window".to_string()))?;

        Ok(future
            .iter()
            .map(|day| {
                KlineRecord::new(
                    *day,
                    last.close,
                    last.close,
                    last.close,
                    last.close,
                    last.volume,
                    (last.close * last.volume).round_dp(2),
                )
            })
            .collect())
    }
}
