//! Provider factory
//!
//! Builds a boxed provider and its declarative column mapping from a provider
//! identifier and the loaded settings.

use crate::config::Settings;
use crate::normalize::ColumnMap;
use crate::provider::eastmoney::EastmoneyProvider;
use crate::provider::mock::MockProvider;
use crate::provider::yahoo::YahooProvider;
use crate::provider::{KlineProvider, ProviderError, ProviderResult};

/// Provider identifiers the factory knows about
pub const KNOWN_PROVIDERS: [&str; 3] = ["yahoo", "eastmoney", "mock"];

/// Factory for daily kline providers
#[derive(Debug, Clone)]
pub struct ProviderFactory {
    settings: Settings,
}

impl ProviderFactory {
    /// Create a factory over the given settings
    pub fn new(settings: &Settings) -> Self {
        Self {
            settings: settings.clone(),
        }
    }

    /// Create a provider and its column mapping by identifier.
    pub fn create(
        &self,
        provider_id: &str,
    ) -> ProviderResult<(Box<dyn KlineProvider>, ColumnMap)> {
        let provider: Box<dyn KlineProvider> = match provider_id {
            "yahoo" => Box::new(YahooProvider::with_settings(
                self.settings.provider.yahoo.clone().unwrap_or_default(),
            )),
            "eastmoney" => Box::new(EastmoneyProvider::with_settings(
                self.settings.provider.eastmoney.clone().unwrap_or_default(),
            )),
            "mock" => Box::new(MockProvider::new()),
            other => {
                return Err(ProviderError::Configuration(format!(
                    "Unknown provider '{}', expected one of {:?}",
                    other, KNOWN_PROVIDERS
                )))
            }
        };

        let mapping = ColumnMap::for_provider(provider_id).ok_or_else(|| {
            ProviderError::Configuration(format!("No column mapping for '{}'", provider_id))
        })?;

        Ok((provider, mapping))
    }
}
