//! Alert thresholds value object
//!
//! # Examples
//!
//! ```
//! use domain::Thresholds;
//!
//! let thresholds = Thresholds::new(38.0, 85.0, 12.0, "Thunderstorm").unwrap();
//! assert!((thresholds.max_temp() - 38.0).abs() < f64::EPSILON);
//!
//! // Negative limits are rejected up front, never during evaluation
//! assert!(Thresholds::new(-1.0, 85.0, 12.0, "Rain").is_err());
//! ```

use crate::errors::DomainError;

/// Boundaries that trigger alerts when the latest observation exceeds them
///
/// Numeric limits are strict: an alert fires only when the observed value is
/// greater than the limit. The watched condition matches `condition_main`
/// exactly.
#[derive(Debug, Clone, PartialEq)]
pub struct Thresholds {
    max_temp: f64,
    max_humidity: f64,
    max_wind_speed: f64,
    watched_condition: String,
}

impl Thresholds {
    /// Default temperature limit in °C
    pub const DEFAULT_MAX_TEMP: f64 = 35.0;
    /// Default humidity limit in percent
    pub const DEFAULT_MAX_HUMIDITY: f64 = 80.0;
    /// Default wind speed limit in m/s
    pub const DEFAULT_MAX_WIND_SPEED: f64 = 10.0;
    /// Default watched condition
    pub const DEFAULT_WATCHED_CONDITION: &'static str = "Rain";

    /// Create validated thresholds
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidThreshold` when a numeric limit is
    /// negative or not finite, when `max_humidity` exceeds 100, or when the
    /// watched condition is blank.
    pub fn new(
        max_temp: f64,
        max_humidity: f64,
        max_wind_speed: f64,
        watched_condition: impl Into<String>,
    ) -> Result<Self, DomainError> {
        Self::check_limit("max_temp", max_temp)?;
        Self::check_limit("max_humidity", max_humidity)?;
        Self::check_limit("max_wind_speed", max_wind_speed)?;
        if max_humidity > 100.0 {
            return Err(DomainError::invalid_threshold(
                "max_humidity",
                format!("{max_humidity} exceeds 100%"),
            ));
        }

        let watched_condition = watched_condition.into().trim().to_string();
        if watched_condition.is_empty() {
            return Err(DomainError::invalid_threshold(
                "watched_condition",
                "must not be empty",
            ));
        }

        Ok(Self {
            max_temp,
            max_humidity,
            max_wind_speed,
            watched_condition,
        })
    }

    fn check_limit(field: &str, value: f64) -> Result<(), DomainError> {
        if !value.is_finite() {
            return Err(DomainError::invalid_threshold(field, "must be a finite number"));
        }
        if value < 0.0 {
            return Err(DomainError::invalid_threshold(
                field,
                format!("{value} must not be negative"),
            ));
        }
        Ok(())
    }

    /// Temperature limit in °C
    #[must_use]
    pub const fn max_temp(&self) -> f64 {
        self.max_temp
    }

    /// Humidity limit in percent
    #[must_use]
    pub const fn max_humidity(&self) -> f64 {
        self.max_humidity
    }

    /// Wind speed limit in m/s
    #[must_use]
    pub const fn max_wind_speed(&self) -> f64 {
        self.max_wind_speed
    }

    /// Condition category that raises an alert when observed
    #[must_use]
    pub fn watched_condition(&self) -> &str {
        &self.watched_condition
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            max_temp: Self::DEFAULT_MAX_TEMP,
            max_humidity: Self::DEFAULT_MAX_HUMIDITY,
            max_wind_speed: Self::DEFAULT_MAX_WIND_SPEED,
            watched_condition: Self::DEFAULT_WATCHED_CONDITION.to_string(),
        }
    }
}
