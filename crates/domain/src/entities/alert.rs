//! Alert entity - A threshold breach raised for one city

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::value_objects::{CityId, Humidity};

/// Which threshold an alert was raised for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    /// Temperature above `max_temp`
    Temperature,
    /// Humidity above `max_humidity`
    Humidity,
    /// Wind speed above `max_wind_speed`
    Wind,
    /// Watched condition observed
    Condition,
}

impl AlertKind {
    /// Get a human-readable label
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Temperature => "Temperature",
            Self::Humidity => "Humidity",
            Self::Wind => "Wind",
            Self::Condition => "Condition",
        }
    }

    /// Get the emoji prefix used in alert messages
    #[must_use]
    pub const fn emoji(&self) -> &'static str {
        match self {
            Self::Temperature => "🌡️",
            Self::Humidity => "💧",
            Self::Wind => "🌬️",
            Self::Condition => "🌤️",
        }
    }
}

impl fmt::Display for AlertKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A raised alert
///
/// `observed` and `threshold` are already formatted for display; the
/// message embeds both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    /// Threshold that was breached
    pub kind: AlertKind,
    /// City the triggering observation belongs to
    pub city: CityId,
    /// Observed value
    pub observed: String,
    /// Configured limit
    pub threshold: String,
    /// Human-readable message
    pub message: String,
    /// When the alert was raised
    pub raised_at: DateTime<Utc>,
}

impl Alert {
    /// Temperature above the limit
    #[must_use]
    pub fn temperature(
        city: CityId,
        temperature: f64,
        max_temp: f64,
        raised_at: DateTime<Utc>,
    ) -> Self {
        let message = format!(
            "{} Alert: Temperature in {city} exceeded {max_temp}°C. Current temperature: {temperature:.1}°C",
            AlertKind::Temperature.emoji()
        );
        Self {
            kind: AlertKind::Temperature,
            city,
            observed: format!("{temperature:.1}°C"),
            threshold: format!("{max_temp}°C"),
            message,
            raised_at,
        }
    }

    /// Humidity above the limit
    #[must_use]
    pub fn humidity(
        city: CityId,
        humidity: Humidity,
        max_humidity: f64,
        raised_at: DateTime<Utc>,
    ) -> Self {
        let message = format!(
            "{} Alert: Humidity in {city} exceeded {max_humidity}%. Current humidity: {humidity}",
            AlertKind::Humidity.emoji()
        );
        Self {
            kind: AlertKind::Humidity,
            city,
            observed: humidity.to_string(),
            threshold: format!("{max_humidity}%"),
            message,
            raised_at,
        }
    }

    /// Wind speed above the limit
    #[must_use]
    pub fn wind(
        city: CityId,
        wind_speed: f64,
        max_wind_speed: f64,
        raised_at: DateTime<Utc>,
    ) -> Self {
        let message = format!(
            "{} Alert: Wind speed in {city} exceeded {max_wind_speed} m/s. Current wind speed: {wind_speed} m/s",
            AlertKind::Wind.emoji()
        );
        Self {
            kind: AlertKind::Wind,
            city,
            observed: format!("{wind_speed} m/s"),
            threshold: format!("{max_wind_speed} m/s"),
            message,
            raised_at,
        }
    }

    /// Watched condition observed
    #[must_use]
    pub fn condition(city: CityId, condition: &str, raised_at: DateTime<Utc>) -> Self {
        let message = format!(
            "{} Alert: {condition} weather detected in {city}.",
            AlertKind::Condition.emoji()
        );
        Self {
            kind: AlertKind::Condition,
            city,
            observed: condition.to_string(),
            threshold: condition.to_string(),
            message,
            raised_at,
        }
    }
}

impl fmt::Display for Alert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}
