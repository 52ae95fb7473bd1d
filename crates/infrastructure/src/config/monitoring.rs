//! Monitoring configuration: cities, refresh cadence, thresholds, display.

use application::RefreshConfig;
use domain::{CityId, DomainError, GeoLocation, MonitoredCity, Thresholds, Timezone};
use serde::{Deserialize, Serialize};

use super::default_true;

// ==============================
// Cities
// ==============================

/// A monitored city as written in the config file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityConfig {
    /// Name sent to the weather provider, e.g. "Mumbai"
    pub name: String,
    /// Latitude in degrees
    pub latitude: f64,
    /// Longitude in degrees
    pub longitude: f64,
}

impl CityConfig {
    /// Validate into a domain city
    pub fn to_monitored(&self) -> Result<MonitoredCity, DomainError> {
        Ok(MonitoredCity::new(
            CityId::parse(&self.name)?,
            GeoLocation::new(self.latitude, self.longitude)?,
        ))
    }
}

impl From<&MonitoredCity> for CityConfig {
    fn from(city: &MonitoredCity) -> Self {
        Self {
            name: city.id.to_string(),
            latitude: city.location.latitude(),
            longitude: city.location.longitude(),
        }
    }
}

pub(super) fn default_cities() -> Vec<CityConfig> {
    MonitoredCity::default_metros()
        .iter()
        .map(CityConfig::from)
        .collect()
}

// ==============================
// Refresh
// ==============================

/// Refresh cadence and per-call behavior
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshAppConfig {
    /// Seconds between cycles in `watch` mode (default: 300)
    #[serde(default = "default_interval")]
    pub interval_secs: u64,

    /// Timeout for each provider call in seconds (default: 10)
    #[serde(default = "default_fetch_timeout")]
    pub fetch_timeout_secs: u64,

    /// Fetch cities concurrently (default: true)
    #[serde(default = "default_true")]
    pub concurrent: bool,
}

const fn default_interval() -> u64 {
    300
}

const fn default_fetch_timeout() -> u64 {
    10
}

impl Default for RefreshAppConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_interval(),
            fetch_timeout_secs: default_fetch_timeout(),
            concurrent: true,
        }
    }
}

impl RefreshAppConfig {
    /// Orchestrator settings
    #[must_use]
    pub const fn to_refresh_config(&self) -> RefreshConfig {
        RefreshConfig {
            fetch_timeout_secs: self.fetch_timeout_secs,
            concurrent: self.concurrent,
        }
    }
}

// ==============================
// Thresholds
// ==============================

/// Alert thresholds, validated by [`ThresholdsAppConfig::to_thresholds`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThresholdsAppConfig {
    /// Temperature limit in °C (default: 35)
    #[serde(default = "default_max_temp")]
    pub max_temp: f64,

    /// Humidity limit in percent (default: 80)
    #[serde(default = "default_max_humidity")]
    pub max_humidity: f64,

    /// Wind speed limit in m/s (default: 10)
    #[serde(default = "default_max_wind_speed")]
    pub max_wind_speed: f64,

    /// Condition that raises an alert (default: Rain)
    #[serde(default = "default_watched_condition")]
    pub watched_condition: String,
}

const fn default_max_temp() -> f64 {
    Thresholds::DEFAULT_MAX_TEMP
}

const fn default_max_humidity() -> f64 {
    Thresholds::DEFAULT_MAX_HUMIDITY
}

const fn default_max_wind_speed() -> f64 {
    Thresholds::DEFAULT_MAX_WIND_SPEED
}

fn default_watched_condition() -> String {
    Thresholds::DEFAULT_WATCHED_CONDITION.to_string()
}

impl Default for ThresholdsAppConfig {
    fn default() -> Self {
        Self {
            max_temp: default_max_temp(),
            max_humidity: default_max_humidity(),
            max_wind_speed: default_max_wind_speed(),
            watched_condition: default_watched_condition(),
        }
    }
}

impl ThresholdsAppConfig {
    /// Validate into domain thresholds
    pub fn to_thresholds(&self) -> Result<Thresholds, DomainError> {
        Thresholds::new(
            self.max_temp,
            self.max_humidity,
            self.max_wind_speed,
            self.watched_condition.clone(),
        )
    }
}

// ==============================
// Display
// ==============================

/// Presentation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// IANA zone for daily buckets and printed times (default: Asia/Kolkata)
    #[serde(default = "default_timezone")]
    pub timezone: String,

    /// Number of alerts shown after each cycle (default: 5)
    #[serde(default = "default_recent_alerts")]
    pub recent_alerts: usize,
}

fn default_timezone() -> String {
    "Asia/Kolkata".to_string()
}

const fn default_recent_alerts() -> usize {
    5
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            timezone: default_timezone(),
            recent_alerts: default_recent_alerts(),
        }
    }
}

impl DisplayConfig {
    /// Parse the configured zone
    pub fn to_timezone(&self) -> Result<Timezone, DomainError> {
        Timezone::try_new(&self.timezone)
    }
}
