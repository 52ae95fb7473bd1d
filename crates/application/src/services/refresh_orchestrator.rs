//! Refresh cycle orchestration
//!
//! One cycle fetches every configured city once, merges the successes in a
//! single batch and then recomputes summaries and evaluates alerts. A
//! failing city never aborts the others.

use std::sync::Arc;
use std::time::Duration;

use domain::{Alert, CityId, DailySummary, Observation};
use futures::future::join_all;
use serde::{Deserialize, Serialize};
use tokio::time::timeout;
use tracing::{info, instrument, warn};

use super::monitoring_session::MonitoringSession;
use crate::error::ApplicationError;
use crate::ports::WeatherProviderPort;

/// Default per-call provider timeout in seconds
const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 10;

/// Cycle behavior
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshConfig {
    /// Timeout for each provider call in seconds (default: 10)
    #[serde(default = "default_fetch_timeout")]
    pub fetch_timeout_secs: u64,

    /// Fetch all cities concurrently instead of one after another
    #[serde(default = "default_concurrent")]
    pub concurrent: bool,
}

const fn default_fetch_timeout() -> u64 {
    DEFAULT_FETCH_TIMEOUT_SECS
}

const fn default_concurrent() -> bool {
    true
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            fetch_timeout_secs: default_fetch_timeout(),
            concurrent: default_concurrent(),
        }
    }
}

/// A city whose fetch failed during a cycle
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CityFailure {
    /// City that failed
    pub city: CityId,
    /// Rendered error
    pub reason: String,
}

/// Outcome of one refresh cycle
#[derive(Debug, Clone, Default)]
pub struct CycleReport {
    /// Readings newly added to the store
    pub added: usize,
    /// Cities that could not be fetched
    pub failures: Vec<CityFailure>,
    /// Summaries recomputed after the merge
    pub summaries: Vec<DailySummary>,
    /// Alerts raised in this cycle
    pub alerts: Vec<Alert>,
}

impl CycleReport {
    /// Whether every city was fetched
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Runs refresh cycles against a weather provider
pub struct RefreshOrchestrator {
    provider: Arc<dyn WeatherProviderPort>,
    fetch_timeout: Duration,
    concurrent: bool,
}

impl std::fmt::Debug for RefreshOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RefreshOrchestrator")
            .field("provider", &"<WeatherProviderPort>")
            .field("fetch_timeout", &self.fetch_timeout)
            .field("concurrent", &self.concurrent)
            .finish()
    }
}

impl RefreshOrchestrator {
    /// Create an orchestrator with default timeout and concurrent fetches
    #[must_use]
    pub fn new(provider: Arc<dyn WeatherProviderPort>) -> Self {
        Self::with_config(provider, &RefreshConfig::default())
    }

    /// Create an orchestrator from configuration
    #[must_use]
    pub fn with_config(provider: Arc<dyn WeatherProviderPort>, config: &RefreshConfig) -> Self {
        Self {
            provider,
            fetch_timeout: Duration::from_secs(config.fetch_timeout_secs),
            concurrent: config.concurrent,
        }
    }

    /// Override the per-call timeout
    #[must_use]
    pub const fn with_fetch_timeout(mut self, fetch_timeout: Duration) -> Self {
        self.fetch_timeout = fetch_timeout;
        self
    }

    /// Switch between concurrent and sequential fetching
    #[must_use]
    pub const fn with_concurrency(mut self, concurrent: bool) -> Self {
        self.concurrent = concurrent;
        self
    }

    /// Run one cycle over `cities`
    #[instrument(skip(self, cities, session), fields(cities = cities.len(), concurrent = self.concurrent))]
    pub async fn run_cycle(&self, cities: &[CityId], session: &mut MonitoringSession) -> CycleReport {
        let results = if self.concurrent {
            join_all(cities.iter().map(|city| self.fetch_one(city))).await
        } else {
            let mut results = Vec::with_capacity(cities.len());
            for city in cities {
                results.push(self.fetch_one(city).await);
            }
            results
        };

        let mut readings = Vec::with_capacity(cities.len());
        let mut failures = Vec::new();
        for (city, result) in cities.iter().zip(results) {
            match result {
                Ok(observation) => readings.push(observation),
                Err(e) => {
                    warn!(city = %city, error = %e, "Fetch failed");
                    failures.push(CityFailure {
                        city: city.clone(),
                        reason: e.to_string(),
                    });
                },
            }
        }

        let fetched = readings.len();
        let outcome = session.ingest(readings, cities);

        info!(
            fetched,
            added = outcome.added,
            failed = failures.len(),
            alerts = outcome.alerts.len(),
            "Refresh cycle complete"
        );

        CycleReport {
            added: outcome.added,
            failures,
            summaries: outcome.summaries,
            alerts: outcome.alerts,
        }
    }

    async fn fetch_one(&self, city: &CityId) -> Result<Observation, ApplicationError> {
        timeout(self.fetch_timeout, self.provider.fetch(city))
            .await
            .map_err(|_| ApplicationError::Timeout(self.fetch_timeout))?
    }

    /// Check if the underlying provider is reachable
    pub async fn provider_available(&self) -> bool {
        timeout(self.fetch_timeout, self.provider.is_available())
            .await
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::MockWeatherProviderPort;
    use async_trait::async_trait;
    use chrono::{DateTime, TimeZone, Utc};
    use domain::{Thresholds, Timezone};

    fn city(name: &str) -> CityId {
        CityId::parse(name).unwrap()
    }

    fn metros() -> Vec<CityId> {
        ["Delhi", "Mumbai", "Chennai"].into_iter().map(city).collect()
    }

    fn reading_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 6, 0, 0).unwrap()
    }

    fn reading(city: &CityId) -> Observation {
        Observation::new(city.clone(), reading_time()).with_temperature(30.0, 31.0)
    }

    fn session() -> MonitoringSession {
        MonitoringSession::new(Thresholds::default(), Timezone::utc())
    }

    fn provider_failing_for(failing: &'static str) -> MockWeatherProviderPort {
        let mut mock = MockWeatherProviderPort::new();
        mock.expect_fetch().returning(move |c| {
            if c.as_str() == failing {
                Err(ApplicationError::provider(c.as_str(), "HTTP 503"))
            } else {
                Ok(reading(c))
            }
        });
        mock
    }

    #[test]
    fn refresh_config_default() {
        let config = RefreshConfig::default();
        assert_eq!(config.fetch_timeout_secs, 10);
        assert!(config.concurrent);
    }

    #[tokio::test]
    async fn calls_provider_once_per_city() {
        let mut mock = MockWeatherProviderPort::new();
        mock.expect_fetch().times(3).returning(|c| Ok(reading(c)));

        let orchestrator = RefreshOrchestrator::new(Arc::new(mock));
        let mut session = session();
        let report = orchestrator.run_cycle(&metros(), &mut session).await;

        assert_eq!(report.added, 3);
        assert!(report.is_complete());
        assert_eq!(report.summaries.len(), 3);
        assert_eq!(session.store().len(), 3);
    }

    #[tokio::test]
    async fn failing_city_is_isolated_then_recovers() {
        let cities = metros();
        let mut session = session();

        let first = RefreshOrchestrator::new(Arc::new(provider_failing_for("Chennai")))
            .run_cycle(&cities, &mut session)
            .await;
        assert_eq!(first.added, 2);
        assert_eq!(first.failures.len(), 1);
        assert_eq!(first.failures[0].city.as_str(), "Chennai");
        assert!(first.failures[0].reason.contains("503"));

        let mut healthy = MockWeatherProviderPort::new();
        healthy.expect_fetch().returning(|c| Ok(reading(c)));
        let second = RefreshOrchestrator::new(Arc::new(healthy))
            .run_cycle(&cities, &mut session)
            .await;

        assert_eq!(second.added, 1);
        assert!(second.is_complete());
        assert_eq!(session.store().len(), 3);
    }

    #[tokio::test]
    async fn sequential_mode_gives_same_result() {
        let orchestrator = RefreshOrchestrator::new(Arc::new(provider_failing_for("Mumbai")))
            .with_concurrency(false);
        let mut session = session();
        let report = orchestrator.run_cycle(&metros(), &mut session).await;

        assert_eq!(report.added, 2);
        assert_eq!(report.failures[0].city.as_str(), "Mumbai");
    }

    #[tokio::test]
    async fn alerts_follow_configured_city_order() {
        let mut mock = MockWeatherProviderPort::new();
        mock.expect_fetch()
            .returning(|c| Ok(reading(c).with_temperature(37.0, 40.0)));

        let mut session = session();
        let cities = vec![city("Mumbai"), city("Delhi")];
        let report = RefreshOrchestrator::new(Arc::new(mock))
            .run_cycle(&cities, &mut session)
            .await;

        let order: Vec<&str> = report.alerts.iter().map(|a| a.city.as_str()).collect();
        assert_eq!(order, vec!["Mumbai", "Delhi"]);
    }

    #[tokio::test]
    async fn empty_city_list_yields_empty_report() {
        let mock = MockWeatherProviderPort::new();
        let mut session = session();
        let report = RefreshOrchestrator::new(Arc::new(mock))
            .run_cycle(&[], &mut session)
            .await;

        assert_eq!(report.added, 0);
        assert!(report.summaries.is_empty());
        assert!(report.alerts.is_empty());
    }

    struct SlowProvider;

    #[async_trait]
    impl WeatherProviderPort for SlowProvider {
        async fn fetch(&self, city: &CityId) -> Result<Observation, ApplicationError> {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(reading(city))
        }

        async fn is_available(&self) -> bool {
            tokio::time::sleep(Duration::from_secs(5)).await;
            true
        }
    }

    #[tokio::test]
    async fn slow_provider_times_out() {
        let orchestrator = RefreshOrchestrator::new(Arc::new(SlowProvider))
            .with_fetch_timeout(Duration::from_millis(20));
        let mut session = session();
        let report = orchestrator.run_cycle(&[city("Delhi")], &mut session).await;

        assert_eq!(report.added, 0);
        assert_eq!(report.failures.len(), 1);
        assert!(report.failures[0].reason.starts_with("Timed out"));
        assert!(!orchestrator.provider_available().await);
    }
}
