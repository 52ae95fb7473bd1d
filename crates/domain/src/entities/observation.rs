//! Observation entity - One weather reading for one city at one instant

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::{CityId, Humidity};

/// Category substituted when the provider reports no condition
pub const UNKNOWN_CONDITION: &str = "Unknown";

/// Description substituted when the provider reports none
pub const UNKNOWN_DESCRIPTION: &str = "Unknown";

/// A single weather reading
///
/// `(city, observed_at)` is the identity of a reading: the store keeps at
/// most one observation per pair. Observations are never mutated after
/// they have been stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// City the reading belongs to
    pub city: CityId,
    /// Short category, e.g. "Rain" or "Clouds"
    pub condition_main: String,
    /// Free-text description, e.g. "light rain"
    pub description: String,
    /// Temperature in °C
    pub temperature: f64,
    /// Apparent temperature in °C
    pub feels_like: f64,
    /// Relative humidity
    pub humidity: Humidity,
    /// Atmospheric pressure in hPa
    pub pressure: f64,
    /// Wind speed in m/s
    pub wind_speed: f64,
    /// Provider timestamp, or the fetch completion time when absent
    pub observed_at: DateTime<Utc>,
}

impl Observation {
    /// Create an observation with zeroed measurements and unknown condition
    ///
    /// Use the `with_*` methods to fill in measurements.
    #[must_use]
    pub fn new(city: CityId, observed_at: DateTime<Utc>) -> Self {
        Self {
            city,
            condition_main: UNKNOWN_CONDITION.to_string(),
            description: UNKNOWN_DESCRIPTION.to_string(),
            temperature: 0.0,
            feels_like: 0.0,
            humidity: Humidity::default(),
            pressure: 0.0,
            wind_speed: 0.0,
            observed_at,
        }
    }

    /// Set condition category and description
    #[must_use]
    pub fn with_condition(
        mut self,
        condition_main: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        self.condition_main = condition_main.into();
        self.description = description.into();
        self
    }

    /// Set temperature and apparent temperature
    #[must_use]
    pub const fn with_temperature(mut self, temperature: f64, feels_like: f64) -> Self {
        self.temperature = temperature;
        self.feels_like = feels_like;
        self
    }

    /// Set relative humidity
    #[must_use]
    pub const fn with_humidity(mut self, humidity: Humidity) -> Self {
        self.humidity = humidity;
        self
    }

    /// Set pressure
    #[must_use]
    pub const fn with_pressure(mut self, pressure: f64) -> Self {
        self.pressure = pressure;
        self
    }

    /// Set wind speed
    #[must_use]
    pub const fn with_wind_speed(mut self, wind_speed: f64) -> Self {
        self.wind_speed = wind_speed;
        self
    }

    /// Identity of the reading within the store
    #[must_use]
    pub fn key(&self) -> (CityId, DateTime<Utc>) {
        (self.city.clone(), self.observed_at)
    }

    /// Formatted one-line summary
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "{} {:.1}°C (feels like {:.1}°C), humidity {}, wind {:.1} m/s, {} hPa",
            self.condition_main,
            self.temperature,
            self.feels_like,
            self.humidity,
            self.wind_speed,
            self.pressure
        )
    }
}
