//! Retry with exponential backoff
//!
//! Transient provider failures (rate limits, 5xx, dropped connections) are
//! retried a few times with growing, jittered delays before a city is
//! reported as failed for the cycle.
//!
//! # Example
//!
//! ```rust,ignore
//! use infrastructure::retry::{RetryConfig, retry};
//!
//! let config = RetryConfig::default();
//! let conditions = retry(&config, || client.current_by_city("Delhi")).await?;
//! ```

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::time::Duration;
use tracing::{debug, warn};

/// Backoff settings for provider calls
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Delay before the first retry in milliseconds (default: 500)
    #[serde(default = "default_initial_delay")]
    pub initial_delay_ms: u64,

    /// Upper bound for any single delay in milliseconds (default: 5000)
    #[serde(default = "default_max_delay")]
    pub max_delay_ms: u64,

    /// Growth factor between consecutive delays (default: 2.0)
    #[serde(default = "default_multiplier")]
    pub multiplier: f64,

    /// Retries after the first attempt; 0 disables retrying (default: 2)
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Fraction of the delay randomly added or removed (default: 0.1)
    #[serde(default = "default_jitter_factor")]
    pub jitter_factor: f64,
}

const fn default_initial_delay() -> u64 {
    500
}

const fn default_max_delay() -> u64 {
    5_000
}

const fn default_multiplier() -> f64 {
    2.0
}

const fn default_max_retries() -> u32 {
    2
}

const fn default_jitter_factor() -> f64 {
    0.1
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            initial_delay_ms: default_initial_delay(),
            max_delay_ms: default_max_delay(),
            multiplier: default_multiplier(),
            max_retries: default_max_retries(),
            jitter_factor: default_jitter_factor(),
        }
    }
}

impl RetryConfig {
    /// Configuration that never retries
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            max_retries: 0,
            ..Self::default()
        }
    }

    /// Remove jitter so delays are deterministic
    #[must_use]
    pub const fn without_jitter(mut self) -> Self {
        self.jitter_factor = 0.0;
        self
    }

    /// Delay before retry number `attempt` (0-indexed)
    ///
    /// `initial * multiplier^attempt`, capped at `max_delay_ms`, then
    /// jittered by up to `jitter_factor` in either direction.
    #[must_use]
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_wrap,
        clippy::cast_sign_loss,
        clippy::cast_possible_truncation
    )]
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let exponent = attempt.min(30) as i32;
        let base = (self.initial_delay_ms as f64) * self.multiplier.powi(exponent);
        let capped = base.min(self.max_delay_ms as f64);

        let jitter_range = capped * self.jitter_factor.clamp(0.0, 1.0);
        let delay = if jitter_range > 0.0 {
            capped + rand::rng().random_range(-jitter_range..=jitter_range)
        } else {
            capped
        };

        Duration::from_millis(delay.max(0.0) as u64)
    }
}

/// Errors that know whether another attempt could succeed
pub trait Retryable {
    /// Returns true if this error is retryable
    fn is_retryable(&self) -> bool;
}

impl Retryable for application::ApplicationError {
    fn is_retryable(&self) -> bool {
        Self::is_retryable(self)
    }
}

impl Retryable for integration_weather::WeatherError {
    fn is_retryable(&self) -> bool {
        self.is_transient()
    }
}

/// Outcome of a retried operation
#[derive(Debug)]
pub struct RetryResult<T, E> {
    /// Final result
    pub result: Result<T, E>,
    /// Attempts made, including the first
    pub attempts: u32,
}

/// Run `operation` until it succeeds, fails permanently or retries run out
pub async fn with_retry<F, Fut, T, E>(config: &RetryConfig, mut operation: F) -> RetryResult<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Retryable + std::fmt::Display,
{
    let mut attempts = 0u32;

    loop {
        attempts += 1;
        let err = match operation().await {
            Ok(value) => {
                if attempts > 1 {
                    debug!(attempts, "Succeeded after retries");
                }
                return RetryResult {
                    result: Ok(value),
                    attempts,
                };
            },
            Err(err) => err,
        };

        let retries_used = attempts - 1;
        if !err.is_retryable() || retries_used >= config.max_retries {
            if err.is_retryable() {
                warn!(attempts, error = %err, "Giving up after max retries");
            }
            return RetryResult {
                result: Err(err),
                attempts,
            };
        }

        let delay = config.delay_for_attempt(retries_used);
        warn!(
            attempt = attempts,
            max_retries = config.max_retries,
            delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
            error = %err,
            "Attempt failed, retrying"
        );
        tokio::time::sleep(delay).await;
    }
}

/// Like [`with_retry`], returning only the result
pub async fn retry<F, Fut, T, E>(config: &RetryConfig, operation: F) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Retryable + std::fmt::Display,
{
    with_retry(config, operation).await.result
}

#[cfg(test)]
mod tests {
    use super::*;
    use application::ApplicationError;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn fast() -> RetryConfig {
        RetryConfig {
            initial_delay_ms: 1,
            max_delay_ms: 5,
            ..RetryConfig::default()
        }
        .without_jitter()
    }

    #[test]
    fn default_config() {
        let config = RetryConfig::default();
        assert_eq!(config.initial_delay_ms, 500);
        assert_eq!(config.max_retries, 2);
        assert_eq!(RetryConfig::disabled().max_retries, 0);
    }

    #[test]
    fn delays_grow_and_cap() {
        let config = RetryConfig::default().without_jitter();
        assert_eq!(config.delay_for_attempt(0), Duration::from_millis(500));
        assert_eq!(config.delay_for_attempt(1), Duration::from_millis(1000));
        assert_eq!(config.delay_for_attempt(2), Duration::from_millis(2000));
        assert_eq!(config.delay_for_attempt(10), Duration::from_millis(5000));
    }

    #[test]
    fn jitter_stays_in_range() {
        let config = RetryConfig::default();
        for _ in 0..50 {
            let ms = config.delay_for_attempt(0).as_millis();
            assert!((450..=550).contains(&ms));
        }
    }

    #[tokio::test]
    async fn retries_transient_until_success() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = Arc::clone(&calls);

        let outcome = with_retry(&fast(), || {
            let counter = Arc::clone(&counter);
            async move {
                if counter.fetch_add(1, Ordering::SeqCst) < 2 {
                    Err(ApplicationError::RateLimited)
                } else {
                    Ok(42)
                }
            }
        })
        .await;

        assert_eq!(outcome.result.unwrap(), 42);
        assert_eq!(outcome.attempts, 3);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn permanent_error_is_not_retried() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = Arc::clone(&calls);

        let result: Result<(), _> = retry(&fast(), || {
            let counter = Arc::clone(&counter);
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Err(ApplicationError::provider("Atlantis", "city not found"))
            }
        })
        .await;

        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn stops_after_max_retries() {
        let outcome: RetryResult<(), _> = with_retry(&fast(), || async {
            Err(ApplicationError::ExternalService("HTTP 503".into()))
        })
        .await;

        assert!(outcome.result.is_err());
        assert_eq!(outcome.attempts, 3);
    }

    #[test]
    fn weather_errors_follow_transience() {
        use integration_weather::WeatherError;
        assert!(Retryable::is_retryable(&WeatherError::RateLimitExceeded));
        assert!(!Retryable::is_retryable(&WeatherError::InvalidApiKey));
    }
}
