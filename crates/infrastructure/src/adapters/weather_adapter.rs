//! Weather adapter - Implements WeatherProviderPort using integration_weather

use application::error::ApplicationError;
use application::ports::WeatherProviderPort;
use async_trait::async_trait;
use chrono::Utc;
use domain::{CityId, Observation};
use integration_weather::{
    CurrentConditions, OpenWeatherMapClient, WeatherClient, WeatherConfig, WeatherError,
};
use std::time::Duration;
use tracing::{debug, instrument};

use crate::retry::{RetryConfig, with_retry};

/// Adapter for the OpenWeatherMap API
pub struct WeatherAdapter<C = OpenWeatherMapClient> {
    client: C,
    retry: RetryConfig,
}

impl<C> std::fmt::Debug for WeatherAdapter<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeatherAdapter")
            .field("client", &std::any::type_name::<C>())
            .field("retry", &self.retry)
            .finish()
    }
}

impl WeatherAdapter {
    /// Create an adapter for OpenWeatherMap
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Configuration` if the API key is missing
    /// or the HTTP client fails to initialize.
    pub fn with_config(config: WeatherConfig) -> Result<Self, ApplicationError> {
        let client = OpenWeatherMapClient::new(config).map_err(|e| match e {
            WeatherError::ConfigurationError(msg) => ApplicationError::Configuration(msg),
            other => ApplicationError::Internal(other.to_string()),
        })?;
        Ok(Self::from_client(client))
    }
}

impl<C: WeatherClient> WeatherAdapter<C> {
    /// Wrap an existing client without retries
    pub fn from_client(client: C) -> Self {
        Self {
            client,
            retry: RetryConfig::disabled(),
        }
    }

    /// Retry transient failures with the given backoff
    #[must_use]
    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// Map integration weather error to application error
    fn map_error(city: &CityId, err: WeatherError) -> ApplicationError {
        match err {
            WeatherError::InvalidApiKey => ApplicationError::provider(city.as_str(), "invalid API key"),
            WeatherError::CityNotFound(_) => ApplicationError::provider(city.as_str(), "city not found"),
            WeatherError::ParseError(e) => {
                ApplicationError::provider(city.as_str(), format!("malformed payload: {e}"))
            },
            WeatherError::RequestFailed(e) => ApplicationError::provider(city.as_str(), e),
            WeatherError::RateLimitExceeded => ApplicationError::RateLimited,
            WeatherError::Timeout { timeout_secs } => {
                ApplicationError::Timeout(Duration::from_secs(timeout_secs))
            },
            WeatherError::ConnectionFailed(e) | WeatherError::ServiceUnavailable(e) => {
                ApplicationError::ExternalService(e)
            },
            WeatherError::ConfigurationError(e) => ApplicationError::Configuration(e),
        }
    }

    /// Convert typed conditions into a domain observation
    fn to_observation(city: &CityId, conditions: CurrentConditions) -> Observation {
        Observation {
            city: city.clone(),
            condition_main: conditions.condition_main,
            description: conditions.description,
            temperature: conditions.temperature,
            feels_like: conditions.feels_like,
            humidity: conditions.humidity,
            pressure: conditions.pressure,
            wind_speed: conditions.wind_speed,
            observed_at: conditions.observed_at,
        }
    }
}

#[async_trait]
impl<C: WeatherClient> WeatherProviderPort for WeatherAdapter<C> {
    #[instrument(skip(self), fields(city = %city))]
    async fn fetch(&self, city: &CityId) -> Result<Observation, ApplicationError> {
        let started = Utc::now();
        let outcome = with_retry(&self.retry, || self.client.current_by_city(city.as_str())).await;

        let conditions = outcome.result.map_err(|e| Self::map_error(city, e))?;
        debug!(
            attempts = outcome.attempts,
            condition = %conditions.condition_main,
            temperature = conditions.temperature,
            elapsed_ms = (Utc::now() - started).num_milliseconds(),
            "Fetched current conditions"
        );

        Ok(Self::to_observation(city, conditions))
    }

    async fn is_available(&self) -> bool {
        self.client.is_healthy().await
    }
}
