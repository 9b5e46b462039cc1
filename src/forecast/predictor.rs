//! Predictor boundary
//!
//! The pretrained time-series model is an external capability: this crate
//! only prepares its inputs and consumes its output. Implementations receive
//! a history window of canonical records (whose timestamps are the
//! x-timestamps), the future timestamps to forecast, and the sampling
//! parameters, and return a table in the same canonical schema covering the
//! requested horizon.

use async_trait::async_trait;
use chrono::NaiveDate;
use thiserror::Error;

use crate::schema::KlineRecord;

/// Errors during forecast preparation and invocation
#[derive(Error, Debug)]
pub enum ForecastError {
    #[error("Insufficient history: need {needed} rows, have {have}")]
    InsufficientHistory { needed: usize, have: usize },

    #[error("Empty forecast horizon")]
    EmptyHorizon,

    #[error("Predictor returned {got} rows for a horizon of {expected}")]
    HorizonMismatch { expected: usize, got: usize },

    #[error("Predictor error: {0}")]
    Predictor(String),
}

pub type ForecastResult<T> = Result<T, ForecastError>;

/// Sampling parameters passed through to the model
#[derive(Debug, Clone)]
pub struct ForecastParams {
    /// History rows handed to the model
    pub lookback: usize,
    /// Trading days to forecast
    pub horizon: usize,
    /// Sampling temperature
    pub temperature: f64,
    /// Nucleus sampling threshold
    pub top_p: f64,
    /// Samples averaged per forecast step
    pub sample_count: usize,
}

impl Default for ForecastParams {
    fn default() -> Self {
        Self {
            lookback: 200,
            horizon: 30,
            temperature: 1.0,
            top_p: 0.9,
            sample_count: 1,
        }
    }
}

/// Trait for pretrained kline predictors
#[async_trait]
pub trait Predictor: Send + Sync {
    /// Predictor identifier
    fn name(&self) -> &str;

    /// Forecast one bar per future timestamp.
    ///
    /// `history` is ascending and gap-free; `future` holds exactly the
    /// timestamps the returned table must cover, in order.
    async fn predict(
        &self,
        history: &[KlineRecord],
        future: &[NaiveDate],
        params: &ForecastParams,
    ) -> ForecastResult<Vec<KlineRecord>>;
}
