//! City identifier value object
//!
//! # Examples
//!
//! ```
//! use domain::CityId;
//!
//! let city = CityId::parse("  Delhi ").unwrap();
//! assert_eq!(city.as_str(), "Delhi");
//!
//! assert!(CityId::parse("").is_err());
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// Maximum accepted length of a city identifier
const MAX_CITY_LEN: usize = 100;

/// Display identifier of a monitored city, e.g. "Mumbai"
///
/// Identifiers are trimmed and compared exactly (case-sensitive), matching
/// the way the weather provider echoes them back.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct CityId(String);

impl CityId {
    /// Parse a city identifier
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidCity` if the trimmed value is empty,
    /// longer than 100 characters or contains control characters.
    pub fn parse(value: impl AsRef<str>) -> Result<Self, DomainError> {
        let trimmed = value.as_ref().trim();
        if trimmed.is_empty() {
            return Err(DomainError::InvalidCity(
                "city identifier must not be empty".to_string(),
            ));
        }
        if trimmed.chars().count() > MAX_CITY_LEN {
            return Err(DomainError::InvalidCity(format!(
                "city identifier exceeds {MAX_CITY_LEN} characters"
            )));
        }
        if trimmed.chars().any(char::is_control) {
            return Err(DomainError::InvalidCity(trimmed.to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Get the identifier as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CityId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for CityId {
    type Error = DomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl TryFrom<String> for CityId {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl<'de> Deserialize<'de> for CityId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Self::parse(value).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_trims_whitespace() {
        let city = CityId::parse("  Chennai\t").unwrap();
        assert_eq!(city.as_str(), "Chennai");
    }

    #[test]
    fn parse_rejects_empty() {
        assert!(CityId::parse("").is_err());
        assert!(CityId::parse("   ").is_err());
    }

    #[test]
    fn parse_rejects_control_characters() {
        assert!(CityId::parse("Del\u{0}hi").is_err());
    }

    #[test]
    fn parse_rejects_overlong() {
        let long = "x".repeat(101);
        assert!(CityId::parse(&long).is_err());
        assert!(CityId::parse("x".repeat(100)).is_ok());
    }

    #[test]
    fn comparison_is_case_sensitive() {
        assert_ne!(CityId::parse("delhi").unwrap(), CityId::parse("Delhi").unwrap());
    }

    #[test]
    fn display_matches_identifier() {
        assert_eq!(CityId::parse("Kolkata").unwrap().to_string(), "Kolkata");
    }

    #[test]
    fn deserialization_validates() {
        let city: CityId = serde_json::from_str("\"Hyderabad\"").unwrap();
        assert_eq!(city.as_str(), "Hyderabad");

        let result: Result<CityId, _> = serde_json::from_str("\"  \"");
        assert!(result.is_err());
    }
}
