//! Humidity value object
//!
//! Represents a validated relative humidity percentage (0-100%).
//!
//! # Examples
//!
//! ```
//! use domain::Humidity;
//!
//! let h = Humidity::new(65).expect("valid humidity");
//! assert_eq!(h.value(), 65);
//!
//! assert!(Humidity::new(101).is_err());
//!
//! // Provider payloads are clamped rather than rejected
//! assert_eq!(Humidity::from_reading(104.6).value(), 100);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Error returned when a humidity value is out of range
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("invalid humidity: {0}% is out of range (must be 0-100)")]
pub struct InvalidHumidity(u8);

/// Relative humidity percentage (0-100%)
///
/// The default is 0, the substitute used when a provider omits the field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Humidity(u8);

impl Humidity {
    /// Maximum valid humidity percentage
    pub const MAX: u8 = 100;

    /// Create a new validated humidity value
    ///
    /// # Errors
    ///
    /// Returns `InvalidHumidity` if the value is greater than 100.
    pub const fn new(value: u8) -> Result<Self, InvalidHumidity> {
        if value > Self::MAX {
            Err(InvalidHumidity(value))
        } else {
            Ok(Self(value))
        }
    }

    /// Build from a raw provider number
    ///
    /// Rounds to the nearest percent and clamps into 0-100. Non-finite
    /// input maps to 0.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)] // clamped to 0..=100 first
    pub fn from_reading(value: f64) -> Self {
        if !value.is_finite() {
            return Self(0);
        }
        Self(value.round().clamp(0.0, f64::from(Self::MAX)) as u8)
    }

    /// Get the humidity value as a u8
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Get the humidity value as a float for averaging and comparisons
    #[must_use]
    pub fn as_f64(self) -> f64 {
        f64::from(self.0)
    }
}

impl fmt::Display for Humidity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

impl TryFrom<u8> for Humidity {
    type Error = InvalidHumidity;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Humidity> for u8 {
    fn from(h: Humidity) -> Self {
        h.0
    }
}

/// Custom deserialization that validates humidity values
impl<'de> Deserialize<'de> for Humidity {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = u8::deserialize(deserializer)?;
        Self::new(value).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_humidity_new_valid() {
        assert!(Humidity::new(0).is_ok());
        assert!(Humidity::new(100).is_ok());
    }

    #[test]
    fn test_humidity_new_invalid() {
        let result = Humidity::new(101);
        assert_eq!(
            result.unwrap_err().to_string(),
            "invalid humidity: 101% is out of range (must be 0-100)"
        );
    }

    #[test]
    fn test_from_reading_rounds_and_clamps() {
        assert_eq!(Humidity::from_reading(64.4).value(), 64);
        assert_eq!(Humidity::from_reading(64.5).value(), 65);
        assert_eq!(Humidity::from_reading(-3.0).value(), 0);
        assert_eq!(Humidity::from_reading(250.0).value(), 100);
        assert_eq!(Humidity::from_reading(f64::NAN).value(), 0);
    }

    #[test]
    fn test_humidity_default_is_zero() {
        assert_eq!(Humidity::default().value(), 0);
    }

    #[test]
    fn test_humidity_display() {
        assert_eq!(format!("{}", Humidity::new(83).unwrap()), "83%");
    }

    #[test]
    fn test_humidity_as_f64() {
        assert!((Humidity::new(42).unwrap().as_f64() - 42.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_humidity_serialization() {
        let h = Humidity::new(65).unwrap();
        assert_eq!(serde_json::to_string(&h).expect("serialize"), "65");

        let back: Humidity = serde_json::from_str("65").expect("deserialize");
        assert_eq!(back, h);
        assert!(serde_json::from_str::<Humidity>("101").is_err());
    }
}
