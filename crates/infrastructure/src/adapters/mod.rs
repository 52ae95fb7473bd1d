//! Infrastructure adapters
//!
//! Adapters connect application ports to concrete implementations.

mod cached_weather_adapter;
mod weather_adapter;

use std::sync::Arc;
use std::time::Duration;

use application::{error::ApplicationError, ports::WeatherProviderPort};
use tracing::info;

pub use cached_weather_adapter::{CachedWeatherProvider, DEFAULT_WEATHER_CACHE_TTL};
pub use weather_adapter::WeatherAdapter;

use crate::config::WeatherAppConfig;

/// Build the provider stack: HTTP client, retry, and a TTL cache unless
/// `cache_ttl_secs` is 0
pub fn build_weather_provider(
    config: &WeatherAppConfig,
) -> Result<Arc<dyn WeatherProviderPort>, ApplicationError> {
    let adapter =
        WeatherAdapter::with_config(config.to_client_config())?.with_retry(config.retry.clone());

    if config.cache_ttl_secs == 0 {
        info!("Weather cache disabled");
        return Ok(Arc::new(adapter));
    }

    info!(ttl_secs = config.cache_ttl_secs, "Weather cache enabled");
    Ok(Arc::new(CachedWeatherProvider::with_ttl(
        adapter,
        Duration::from_secs(config.cache_ttl_secs),
    )))
}
