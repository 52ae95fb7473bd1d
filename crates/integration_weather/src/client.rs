//! OpenWeatherMap client
//!
//! HTTP client for the OpenWeatherMap current weather endpoint.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument};

use crate::models::{ApiErrorBody, ApiResponse, CurrentConditions};

/// Weather client errors
#[derive(Debug, Error)]
pub enum WeatherError {
    /// Connection to the weather service failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Request to the weather service failed
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Request did not complete in time
    #[error("Request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    /// Failed to parse response from weather service
    #[error("Parse error: {0}")]
    ParseError(String),

    /// API key missing from configuration
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// API key rejected (HTTP 401)
    #[error("Invalid API key")]
    InvalidApiKey,

    /// Provider does not know the city (HTTP 404)
    #[error("City not found: {0}")]
    CityNotFound(String),

    /// Service is temporarily unavailable
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,
}

impl WeatherError {
    /// Check if a later attempt could succeed
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::ConnectionFailed(_)
                | Self::Timeout { .. }
                | Self::ServiceUnavailable(_)
                | Self::RateLimitExceeded
        )
    }
}

/// Weather service configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// API base URL (default: <https://api.openweathermap.org/data/2.5>)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// OpenWeatherMap API key, sent as `appid`
    #[serde(default)]
    pub api_key: Option<String>,

    /// Request timeout in seconds (default: 10)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Unit system requested from the API (default: metric)
    #[serde(default = "default_units")]
    pub units: String,

    /// City queried by the health check (default: Delhi)
    #[serde(default = "default_probe_city")]
    pub probe_city: String,
}

fn default_base_url() -> String {
    "https://api.openweathermap.org/data/2.5".to_string()
}

const fn default_timeout() -> u64 {
    10
}

fn default_units() -> String {
    "metric".to_string()
}

fn default_probe_city() -> String {
    "Delhi".to_string()
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: None,
            timeout_secs: default_timeout(),
            units: default_units(),
            probe_city: default_probe_city(),
        }
    }
}

impl fmt::Debug for WeatherConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeatherConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("timeout_secs", &self.timeout_secs)
            .field("units", &self.units)
            .field("probe_city", &self.probe_city)
            .finish()
    }
}

/// Weather client trait for fetching current conditions
#[async_trait]
pub trait WeatherClient: Send + Sync {
    /// Get current conditions for a city by name
    async fn current_by_city(&self, city: &str) -> Result<CurrentConditions, WeatherError>;

    /// Check if the weather service is healthy
    async fn is_healthy(&self) -> bool;
}

/// OpenWeatherMap HTTP client implementation
pub struct OpenWeatherMapClient {
    client: Client,
    api_key: String,
    config: WeatherConfig,
}

impl fmt::Debug for OpenWeatherMapClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenWeatherMapClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl OpenWeatherMapClient {
    /// Create a new client with the given configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is missing or the HTTP client
    /// cannot be initialized.
    pub fn new(config: WeatherConfig) -> Result<Self, WeatherError> {
        let api_key = config
            .api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| {
                WeatherError::ConfigurationError("OpenWeatherMap API key is required".to_string())
            })?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| WeatherError::ConnectionFailed(e.to_string()))?;

        Ok(Self {
            client,
            api_key,
            config,
        })
    }

    /// Active configuration
    #[must_use]
    pub const fn config(&self) -> &WeatherConfig {
        &self.config
    }

    fn endpoint(&self) -> String {
        format!("{}/weather", self.config.base_url.trim_end_matches('/'))
    }

    fn map_transport_error(&self, e: &reqwest::Error) -> WeatherError {
        if e.is_timeout() {
            WeatherError::Timeout {
                timeout_secs: self.config.timeout_secs,
            }
        } else if e.is_connect() {
            WeatherError::ConnectionFailed(e.to_string())
        } else {
            WeatherError::RequestFailed(e.to_string())
        }
    }

    /// Map a non-success status to an error
    fn map_status(status: StatusCode, city: &str, body: &str) -> WeatherError {
        let detail = serde_json::from_str::<ApiErrorBody>(body)
            .ok()
            .and_then(|b| b.message)
            .unwrap_or_else(|| format!("HTTP {status}"));

        match status {
            StatusCode::UNAUTHORIZED => WeatherError::InvalidApiKey,
            StatusCode::NOT_FOUND => WeatherError::CityNotFound(city.to_string()),
            StatusCode::TOO_MANY_REQUESTS => WeatherError::RateLimitExceeded,
            s if s.is_server_error() => WeatherError::ServiceUnavailable(detail),
            _ => WeatherError::RequestFailed(detail),
        }
    }
}

#[async_trait]
impl WeatherClient for OpenWeatherMapClient {
    #[instrument(skip(self), fields(units = %self.config.units))]
    async fn current_by_city(&self, city: &str) -> Result<CurrentConditions, WeatherError> {
        let url = self.endpoint();
        debug!(url = %url, "Fetching current weather");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("q", city),
                ("appid", self.api_key.as_str()),
                ("units", self.config.units.as_str()),
            ])
            .send()
            .await
            .map_err(|e| self.map_transport_error(&e))?;

        let status = response.status();
        debug!(status = %status, "Received weather response");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Self::map_status(status, city, &body));
        }

        let body = response
            .text()
            .await
            .map_err(|e| self.map_transport_error(&e))?;
        let api_response: ApiResponse =
            serde_json::from_str(&body).map_err(|e| WeatherError::ParseError(e.to_string()))?;

        Ok(CurrentConditions::from_response(api_response, Utc::now()))
    }

    async fn is_healthy(&self) -> bool {
        self.current_by_city(&self.config.probe_city).await.is_ok()
    }
}
