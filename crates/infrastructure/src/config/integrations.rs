//! Weather provider configuration.

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::retry::RetryConfig;

/// OpenWeatherMap settings
#[derive(Clone, Serialize, Deserialize)]
pub struct WeatherAppConfig {
    /// API base URL (default: <https://api.openweathermap.org/data/2.5>)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// API key (sensitive - uses SecretString)
    ///
    /// Falls back to `OPENWEATHERMAP_API_KEY` when unset.
    #[serde(default, skip_serializing)]
    pub api_key: Option<SecretString>,

    /// HTTP timeout in seconds (default: 10)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// How long a reading is reused, in seconds; 0 disables caching (default: 300)
    #[serde(default = "default_cache_ttl")]
    pub cache_ttl_secs: u64,

    /// Backoff for transient failures
    #[serde(default)]
    pub retry: RetryConfig,
}

fn default_base_url() -> String {
    "https://api.openweathermap.org/data/2.5".to_string()
}

const fn default_timeout() -> u64 {
    10
}

const fn default_cache_ttl() -> u64 {
    300
}

impl Default for WeatherAppConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: None,
            timeout_secs: default_timeout(),
            cache_ttl_secs: default_cache_ttl(),
            retry: RetryConfig::default(),
        }
    }
}

impl std::fmt::Debug for WeatherAppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeatherAppConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("timeout_secs", &self.timeout_secs)
            .field("cache_ttl_secs", &self.cache_ttl_secs)
            .field("retry", &self.retry)
            .finish()
    }
}

impl WeatherAppConfig {
    /// Whether an API key is configured
    #[must_use]
    pub fn has_api_key(&self) -> bool {
        self.api_key
            .as_ref()
            .is_some_and(|k| !k.expose_secret().trim().is_empty())
    }

    /// Settings for the HTTP client
    #[must_use]
    pub fn to_client_config(&self) -> integration_weather::WeatherConfig {
        integration_weather::WeatherConfig {
            base_url: self.base_url.clone(),
            api_key: self.api_key.as_ref().map(|k| k.expose_secret().to_string()),
            timeout_secs: self.timeout_secs,
            ..Default::default()
        }
    }
}
