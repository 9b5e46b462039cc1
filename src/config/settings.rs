//! Application settings and configuration

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

use crate::forecast::ForecastParams;
use crate::provider::eastmoney::EastmoneySettings;
use crate::provider::yahoo::YahooSettings;

/// Main application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Provider configurations
    #[serde(default)]
    pub provider: ProviderSettings,
    /// Output/storage settings
    #[serde(default)]
    pub storage: StorageSettings,
    /// Forecast defaults
    #[serde(default)]
    pub forecast: ForecastSettings,
}

/// Provider-specific settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProviderSettings {
    /// Yahoo Finance configuration
    pub yahoo: Option<YahooSettings>,
    /// Eastmoney configuration
    pub eastmoney: Option<EastmoneySettings>,
}

/// Output/storage settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageSettings {
    /// Directory CSV files are written to
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
}

fn default_output_dir() -> String {
    "data".to_string()
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
        }
    }
}

/// Forecast defaults, overridable per invocation from the CLI
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastSettings {
    /// History rows handed to the model
    #[serde(default = "default_lookback")]
    pub lookback: usize,
    /// Trading days to forecast
    #[serde(default = "default_horizon")]
    pub horizon: usize,
    /// Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    /// Nucleus sampling threshold
    #[serde(default = "default_top_p")]
    pub top_p: f64,
    /// Samples averaged per forecast step
    #[serde(default = "default_sample_count")]
    pub sample_count: usize,
}

fn default_lookback() -> usize {
    200
}

fn default_horizon() -> usize {
    30
}

fn default_temperature() -> f64 {
    1.0
}

fn default_top_p() -> f64 {
    0.9
}

fn default_sample_count() -> usize {
    1
}

impl Default for ForecastSettings {
    fn default() -> Self {
        Self {
            lookback: default_lookback(),
            horizon: default_horizon(),
            temperature: default_temperature(),
            top_p: default_top_p(),
            sample_count: default_sample_count(),
        }
    }
}

impl From<&ForecastSettings> for ForecastParams {
    fn from(settings: &ForecastSettings) -> Self {
        Self {
            lookback: settings.lookback,
            horizon: settings.horizon,
            temperature: settings.temperature,
            top_p: settings.top_p,
            sample_count: settings.sample_count,
        }
    }
}

impl Settings {
    /// Load settings from configuration files and environment
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_with_prefix("KLINE_MANAGER")
    }

    /// Load settings with a custom environment variable prefix
    pub fn load_with_prefix(env_prefix: &str) -> Result<Self, ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let config_dir = Self::config_dir();

        let s = Config::builder()
            // Start with default configuration
            .add_source(File::with_name(&format!("{}/default", config_dir)).required(false))
            // Add environment-specific configuration
            .add_source(File::with_name(&format!("{}/{}", config_dir, run_mode)).required(false))
            // Add local overrides (not checked into git)
            .add_source(File::with_name(&format!("{}/local", config_dir)).required(false))
            // Add environment variables (e.g., KLINE_MANAGER__STORAGE__OUTPUT_DIR)
            .add_source(
                Environment::with_prefix(env_prefix)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        s.try_deserialize()
    }

    /// Get the configuration directory path
    fn config_dir() -> String {
        std::env::var("KLINE_MANAGER_CONFIG_DIR").unwrap_or_else(|_| "config".into())
    }

    /// Create default settings (useful for testing)
    pub fn default_settings() -> Self {
        Settings {
            provider: ProviderSettings {
                yahoo: Some(YahooSettings::default()),
                eastmoney: Some(EastmoneySettings::default()),
            },
            storage: StorageSettings::default(),
            forecast: ForecastSettings::default(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::default_settings()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default_settings();
        assert_eq!(settings.storage.output_dir, "data");
        assert_eq!(settings.forecast.lookback, 200);
        assert_eq!(settings.forecast.horizon, 30);
        assert!(settings.provider.yahoo.is_some());
    }

    #[test]
    fn test_forecast_params_from_settings() {
        let params = ForecastParams::from(&ForecastSettings::default());
        assert_eq!(params.temperature, 1.0);
        assert_eq!(params.top_p, 0.9);
        assert_eq!(params.sample_count, 1);
    }
}
