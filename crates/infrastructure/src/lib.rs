//! Infrastructure layer - Adapters for external systems
//!
//! Implements ports defined in the application layer and owns the ambient
//! concerns: configuration loading, validation and logging.

pub mod adapters;
pub mod config;
pub mod retry;
pub mod telemetry;
pub mod validation;

pub use adapters::*;
pub use config::{
    AppConfig, CityConfig, DisplayConfig, LogFormat, RefreshAppConfig, TelemetryAppConfig,
    ThresholdsAppConfig, WeatherAppConfig,
};
pub use retry::{RetryConfig, RetryResult, Retryable, retry, with_retry};
pub use telemetry::{TelemetryError, init_logging};
pub use validation::{ConfigValidator, IssueSeverity, ValidationIssue, ValidationReport};
