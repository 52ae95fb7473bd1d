//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DomainError {
    /// City identifier is empty or malformed
    #[error("Invalid city: {0}")]
    InvalidCity(String),

    /// Alert threshold outside its sane domain
    #[error("Invalid threshold {field}: {reason}")]
    InvalidThreshold { field: String, reason: String },

    /// Unknown IANA timezone name
    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    /// Validation failed
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

impl DomainError {
    /// Create an invalid threshold error
    pub fn invalid_threshold(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidThreshold {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_threshold_creates_correct_error() {
        let err = DomainError::invalid_threshold("max_temp", "must not be negative");
        match err {
            DomainError::InvalidThreshold { field, reason } => {
                assert_eq!(field, "max_temp");
                assert_eq!(reason, "must not be negative");
            },
            _ => unreachable!("Expected InvalidThreshold error"),
        }
    }

    #[test]
    fn invalid_threshold_error_message() {
        let err = DomainError::invalid_threshold("max_humidity", "must be at most 100");
        assert_eq!(
            err.to_string(),
            "Invalid threshold max_humidity: must be at most 100"
        );
    }

    #[test]
    fn invalid_city_error_message() {
        let err = DomainError::InvalidCity("   ".to_string());
        assert_eq!(err.to_string(), "Invalid city:    ");
    }

    #[test]
    fn invalid_timezone_error_message() {
        let err = DomainError::InvalidTimezone("Mars/Olympus".to_string());
        assert_eq!(err.to_string(), "Invalid timezone: Mars/Olympus");
    }

    #[test]
    fn validation_error_message() {
        let err = DomainError::ValidationError("no cities configured".to_string());
        assert_eq!(err.to_string(), "Validation failed: no cities configured");
    }
}
