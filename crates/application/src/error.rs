//! Application-level errors

use std::time::Duration;

use domain::DomainError;
use thiserror::Error;

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level error
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Provider rejected or failed the request for a city
    #[error("Provider error for {city}: {reason}")]
    Provider { city: String, reason: String },

    /// Provider call exceeded its deadline
    #[error("Timed out after {0:?}")]
    Timeout(Duration),

    /// External service error
    #[error("External service error: {0}")]
    ExternalService(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimited,

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApplicationError {
    /// Create a provider error for a city
    pub fn provider(city: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Provider {
            city: city.into(),
            reason: reason.into(),
        }
    }

    /// Check if this error is retryable
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::RateLimited | Self::ExternalService(_) | Self::Timeout(_)
        )
    }
}
