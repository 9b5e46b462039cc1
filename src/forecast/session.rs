//! Forecast session
//!
//! Drives one predictor invocation: window selection, future trading-day
//! generation, the model call, and a sanity check that the returned table
//! covers the requested horizon.

use tracing::{debug, info};

use crate::schema::KlineRecord;

use super::calendar::trading_days_after;
use super::predictor::{ForecastError, ForecastParams, ForecastResult, Predictor};

/// One-shot forecast runner
pub struct ForecastSession {
    predictor: Box<dyn Predictor>,
    params: ForecastParams,
}

impl ForecastSession {
    /// Create a session around a predictor and its parameters
    pub fn new(predictor: Box<dyn Predictor>, params: ForecastParams) -> Self {
        Self { predictor, params }
    }

    /// Parameters this session runs with
    pub fn params(&self) -> &ForecastParams {
        &self.params
    }

    /// Run the predictor over the last `lookback` records of `history`.
    pub async fn run(&self, history: &[KlineRecord]) -> ForecastResult<Vec<KlineRecord>> {
        if self.params.horizon == 0 {
            return Err(ForecastError::EmptyHorizon);
        }
        if self.params.lookback == 0 || history.len() < self.params.lookback {
            return Err(ForecastError::InsufficientHistory {
                needed: self.params.lookback.max(1),
                have: history.len(),
            });
        }

        let window = &history[history.len() - self.params.lookback..];
        let last_day = window
            .last()
            .expect("window is non-empty by the lookback check")
            .timestamp;
        let future = trading_days_after(last_day, self.params.horizon);

        info!(
            "Forecasting {} trading days after {} with '{}' (lookback {}, T {}, top_p {}, samples {})",
            self.params.horizon,
            last_day,
            self.predictor.name(),
            self.params.lookback,
            self.params.temperature,
            self.params.top_p,
            self.params.sample_count,
        );

        let forecast = self.predictor.predict(window, &future, &self.params).await?;

        if forecast.len() != future.len() {
            return Err(ForecastError::HorizonMismatch {
                expected: future.len(),
                got: forecast.len(),
            });
        }

        debug!("Predictor '{}' returned {} rows", self.predictor.name(), forecast.len());
        Ok(forecast)
    }
}
