//! Cached weather provider - Decorator that adds a TTL cache to any `WeatherProviderPort`
//!
//! Successful readings are kept per city for the configured TTL; failures
//! are never cached. A cached reading keeps its original `observed_at`, so
//! the store drops it as a duplicate on the next merge.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use application::{error::ApplicationError, ports::WeatherProviderPort};
use async_trait::async_trait;
use domain::{CityId, Observation};
use moka::future::Cache;
use tracing::{debug, instrument};

/// Default TTL for cached readings
pub const DEFAULT_WEATHER_CACHE_TTL: Duration = Duration::from_secs(300);

/// Upper bound on cached cities
const MAX_CACHED_CITIES: u64 = 1_000;

/// Caching decorator for weather providers
pub struct CachedWeatherProvider<P: WeatherProviderPort> {
    inner: P,
    cache: Cache<CityId, Observation>,
    ttl: Duration,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl<P: WeatherProviderPort + std::fmt::Debug> std::fmt::Debug for CachedWeatherProvider<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CachedWeatherProvider")
            .field("inner", &self.inner)
            .field("ttl", &self.ttl)
            .field("entries", &self.cache.entry_count())
            .field("hits", &self.hits.load(Ordering::Relaxed))
            .field("misses", &self.misses.load(Ordering::Relaxed))
            .finish()
    }
}

impl<P: WeatherProviderPort> CachedWeatherProvider<P> {
    /// Wrap `inner` with the default 300 second TTL
    pub fn new(inner: P) -> Self {
        Self::with_ttl(inner, DEFAULT_WEATHER_CACHE_TTL)
    }

    /// Wrap `inner` with a custom TTL
    pub fn with_ttl(inner: P, ttl: Duration) -> Self {
        let cache = Cache::builder()
            .max_capacity(MAX_CACHED_CITIES)
            .time_to_live(ttl)
            .build();

        Self {
            inner,
            cache,
            ttl,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Number of fetches answered from cache
    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    /// Number of fetches passed to the inner provider
    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl<P: WeatherProviderPort> WeatherProviderPort for CachedWeatherProvider<P> {
    #[instrument(skip(self), fields(city = %city))]
    async fn fetch(&self, city: &CityId) -> Result<Observation, ApplicationError> {
        if let Some(cached) = self.cache.get(city).await {
            self.hits.fetch_add(1, Ordering::Relaxed);
            debug!(hits = self.hits(), "Weather cache hit");
            return Ok(cached);
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        let observation = self.inner.fetch(city).await?;
        self.cache.insert(city.clone(), observation.clone()).await;
        debug!(
            ttl_secs = self.ttl.as_secs(),
            misses = self.misses(),
            "Cached weather reading"
        );
        Ok(observation)
    }

    async fn is_available(&self) -> bool {
        self.inner.is_available().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use std::sync::Arc;
    use std::sync::atomic::AtomicUsize;

    #[derive(Debug, Default)]
    struct CountingProvider {
        calls: Arc<AtomicUsize>,
        fail: bool,
    }

    impl CountingProvider {
        fn failing() -> Self {
            Self {
                fail: true,
                ..Default::default()
            }
        }

        fn counter(&self) -> Arc<AtomicUsize> {
            Arc::clone(&self.calls)
        }
    }

    #[async_trait]
    impl WeatherProviderPort for CountingProvider {
        async fn fetch(&self, city: &CityId) -> Result<Observation, ApplicationError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(ApplicationError::ExternalService("HTTP 503".into()));
            }
            Ok(Observation::new(city.clone(), Utc::now()))
        }

        async fn is_available(&self) -> bool {
            !self.fail
        }
    }

    fn city(name: &str) -> CityId {
        CityId::parse(name).unwrap()
    }

    #[tokio::test]
    async fn second_fetch_within_ttl_is_cached() {
        let inner = CountingProvider::default();
        let calls = inner.counter();
        let provider = CachedWeatherProvider::new(inner);

        let first = provider.fetch(&city("Delhi")).await.unwrap();
        let second = provider.fetch(&city("Delhi")).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(provider.hits(), 1);
        assert_eq!(provider.misses(), 1);
    }

    #[tokio::test]
    async fn cities_are_cached_independently() {
        let inner = CountingProvider::default();
        let calls = inner.counter();
        let provider = CachedWeatherProvider::new(inner);

        provider.fetch(&city("Delhi")).await.unwrap();
        provider.fetch(&city("Mumbai")).await.unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn failures_are_not_cached() {
        let inner = CountingProvider::failing();
        let calls = inner.counter();
        let provider = CachedWeatherProvider::new(inner);

        assert!(provider.fetch(&city("Delhi")).await.is_err());
        assert!(provider.fetch(&city("Delhi")).await.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(provider.hits(), 0);
        assert!(!provider.is_available().await);
    }

    #[tokio::test]
    async fn expired_entries_are_refetched() {
        let inner = CountingProvider::default();
        let calls = inner.counter();
        let provider = CachedWeatherProvider::with_ttl(inner, Duration::from_millis(50));

        provider.fetch(&city("Delhi")).await.unwrap();
        tokio::time::sleep(Duration::from_millis(120)).await;
        provider.fetch(&city("Delhi")).await.unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
