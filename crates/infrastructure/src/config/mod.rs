//! Application configuration
//!
//! Split into focused sub-modules:
//! - `monitoring`: cities, refresh cadence, thresholds, display
//! - `integrations`: OpenWeatherMap provider
//! - `resilience`: logging

mod integrations;
mod monitoring;
mod resilience;

use std::path::Path;

use application::RefreshConfig;
use domain::{DomainError, MonitoredCity, Thresholds, Timezone};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub use integrations::WeatherAppConfig;
pub use monitoring::{CityConfig, DisplayConfig, RefreshAppConfig, ThresholdsAppConfig};
pub use resilience::{LogFormat, TelemetryAppConfig};

use crate::validation::{ConfigValidator, ValidationReport};

/// Prefix of environment overrides, e.g. `METROWEATHER_REFRESH__INTERVAL_SECS`
pub const ENV_PREFIX: &str = "METROWEATHER";

/// Fallback variable for the OpenWeatherMap key
pub const API_KEY_ENV: &str = "OPENWEATHERMAP_API_KEY";

/// Shared default for boolean `true` fields across config structs
pub(crate) const fn default_true() -> bool {
    true
}

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Monitored cities, in display order
    #[serde(default = "monitoring::default_cities")]
    pub cities: Vec<CityConfig>,

    /// Refresh cadence
    #[serde(default)]
    pub refresh: RefreshAppConfig,

    /// Alert thresholds
    #[serde(default)]
    pub thresholds: ThresholdsAppConfig,

    /// Weather provider
    #[serde(default)]
    pub weather: WeatherAppConfig,

    /// Presentation
    #[serde(default)]
    pub display: DisplayConfig,

    /// Logging
    #[serde(default)]
    pub telemetry: TelemetryAppConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            cities: monitoring::default_cities(),
            refresh: RefreshAppConfig::default(),
            thresholds: ThresholdsAppConfig::default(),
            weather: WeatherAppConfig::default(),
            display: DisplayConfig::default(),
            telemetry: TelemetryAppConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load from an optional `config.toml` in the working directory plus
    /// environment overrides
    pub fn load() -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder()
            .add_source(config::File::with_name("config").required(false));
        Self::finish(builder)
    }

    /// Load from an explicit file (must exist) plus environment overrides
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, config::ConfigError> {
        let builder =
            config::Config::builder().add_source(config::File::from(path.as_ref()).required(true));
        Self::finish(builder)
    }

    fn finish(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<Self, config::ConfigError> {
        let config = builder
            // Override with environment variables (e.g., METROWEATHER_DISPLAY__TIMEZONE)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let mut app: Self = config.try_deserialize()?;
        app.apply_api_key_fallback(std::env::var(API_KEY_ENV).ok());
        Ok(app)
    }

    /// Use `key` when no API key was configured
    pub fn apply_api_key_fallback(&mut self, key: Option<String>) {
        if self.weather.has_api_key() {
            return;
        }
        if let Some(key) = key.filter(|k| !k.trim().is_empty()) {
            debug!(source = API_KEY_ENV, "Using API key from environment");
            self.weather.api_key = Some(SecretString::from(key));
        }
    }

    /// Semantic validation of every section
    #[must_use]
    pub fn validate(&self) -> ValidationReport {
        ConfigValidator::validate(self)
    }

    /// Monitored cities as domain values
    pub fn to_cities(&self) -> Result<Vec<MonitoredCity>, DomainError> {
        self.cities.iter().map(CityConfig::to_monitored).collect()
    }

    /// Thresholds as a domain value
    pub fn to_thresholds(&self) -> Result<Thresholds, DomainError> {
        self.thresholds.to_thresholds()
    }

    /// Display timezone
    pub fn to_timezone(&self) -> Result<Timezone, DomainError> {
        self.display.to_timezone()
    }

    /// Orchestrator settings
    #[must_use]
    pub const fn refresh_config(&self) -> RefreshConfig {
        self.refresh.to_refresh_config()
    }

    /// Render as TOML; the API key is never included
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}
