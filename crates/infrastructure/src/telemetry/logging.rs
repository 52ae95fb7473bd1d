//! Logging initialization
//!
//! Installs a `tracing-subscriber` registry with an `EnvFilter` and a text
//! or JSON `fmt` layer. Log lines go to stderr so command output on stdout
//! stays clean.

use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{LogFormat, TelemetryAppConfig};

/// Build the filter: `RUST_LOG` wins, then `directive`, then the configured filter
#[must_use]
pub fn build_filter(config: &TelemetryAppConfig, directive: Option<&str>) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(directive.unwrap_or(&config.log_filter)))
}

/// Initialize the global subscriber
///
/// `directive` usually comes from the CLI verbosity flag. Fails if a global
/// subscriber is already installed.
pub fn init_logging(
    config: &TelemetryAppConfig,
    directive: Option<&str>,
) -> Result<(), TelemetryError> {
    let registry = tracing_subscriber::registry().with(build_filter(config, directive));

    match config.log_format {
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_writer(std::io::stderr),
            )
            .try_init(),
        LogFormat::Text => registry
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_writer(std::io::stderr),
            )
            .try_init(),
    }
    .map_err(|e| TelemetryError::Init(e.to_string()))?;

    debug!(format = %config.log_format, "Logging initialized");
    Ok(())
}

/// Error type for logging initialization
#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    /// Failed to initialize tracing subscriber
    #[error("Failed to initialize tracing: {0}")]
    Init(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_accepts_directives() {
        let config = TelemetryAppConfig::default();
        let filter = build_filter(&config, Some("metroweather=debug,application=trace"));
        assert!(!filter.to_string().is_empty());
    }

    #[test]
    fn second_init_fails() {
        let config = TelemetryAppConfig {
            log_format: LogFormat::Json,
            ..Default::default()
        };
        // Only the second call has a guaranteed outcome
        let _ = init_logging(&config, Some("warn"));
        let err = init_logging(&config, Some("warn")).unwrap_err();
        assert!(err.to_string().contains("Failed to initialize tracing"));
    }
}
