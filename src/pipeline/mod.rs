//! One-shot fetch pipeline
//!
//! Composes a provider, a column mapping, and the CSV store into a single
//! fetch-normalize-persist invocation. Every failure is typed and terminal:
//! nothing is retried, and no partial output file is left behind.

use std::path::PathBuf;
use thiserror::Error;
use tracing::info;

use crate::normalize::{normalize, ColumnMap, NormalizeError};
use crate::provider::{DailyRequest, KlineProvider, ProviderError};
use crate::schema::KlineRecord;
use crate::storage::{CsvStore, StorageError};

/// Errors surfaced by one pipeline run
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error(transparent)]
    Normalize(#[from] NormalizeError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Result of a successful pipeline run
#[derive(Debug)]
pub struct FetchOutcome {
    /// Path of the written CSV
    pub path: PathBuf,
    /// The normalized records, ascending by timestamp
    pub records: Vec<KlineRecord>,
}

/// Fetch pipeline for one provider/mapping pair
pub struct FetchPipeline {
    provider: Box<dyn KlineProvider>,
    mapping: ColumnMap,
    store: CsvStore,
}

impl FetchPipeline {
    /// Create a pipeline from its three stages
    pub fn new(provider: Box<dyn KlineProvider>, mapping: ColumnMap, store: CsvStore) -> Self {
        Self {
            provider,
            mapping,
            store,
        }
    }

    /// Fetch, normalize, and persist one symbol over one date range.
    pub async fn run(&self, request: &DailyRequest) -> Result<FetchOutcome, PipelineError> {
        info!(
            "Fetching {} from {} ({} to {})",
            request.symbol,
            self.provider.info().display_name,
            request.start,
            request.end
        );

        let frame = self.provider.fetch_daily(request).await?;
        if frame.is_empty() {
            return Err(ProviderError::DataUnavailable(format!(
                "Provider returned no rows for {}",
                request.symbol
            ))
            .into());
        }

        let records = normalize(&frame, &self.mapping)?;
        info!("Normalized {} rows for {}", records.len(), request.symbol);

        let path = self
            .store
            .write_daily(&request.symbol, request.start, request.end, &records)?;

        Ok(FetchOutcome { path, records })
    }
}
