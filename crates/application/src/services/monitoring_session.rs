//! Caller-owned monitoring state
//!
//! Bundles the store, the aggregator, the alert log and the active
//! thresholds. The CLI creates one session and passes it to every cycle.

use domain::{Alert, CityId, DailySummary, DomainError, Observation, Thresholds, Timezone};
use tracing::{info, instrument};

use super::alert_evaluator::AlertEvaluator;
use super::daily_aggregator::DailyAggregator;
use super::observation_store::ObservationStore;

/// Result of merging one batch into the session
#[derive(Debug, Clone, Default)]
pub struct IngestOutcome {
    /// Readings actually added to the store
    pub added: usize,
    /// Recomputed summaries (empty if the store is empty)
    pub summaries: Vec<DailySummary>,
    /// Alerts raised against the latest readings
    pub alerts: Vec<Alert>,
}

/// State of one monitoring run
#[derive(Debug, Default)]
pub struct MonitoringSession {
    store: ObservationStore,
    aggregator: DailyAggregator,
    evaluator: AlertEvaluator,
    thresholds: Thresholds,
}

impl MonitoringSession {
    /// Create an empty session
    #[must_use]
    pub fn new(thresholds: Thresholds, timezone: Timezone) -> Self {
        Self {
            store: ObservationStore::new(),
            aggregator: DailyAggregator::new(timezone),
            evaluator: AlertEvaluator::new(),
            thresholds,
        }
    }

    /// Observation store
    #[must_use]
    pub const fn store(&self) -> &ObservationStore {
        &self.store
    }

    /// Last computed daily summaries
    #[must_use]
    pub fn summaries(&self) -> &[DailySummary] {
        self.aggregator.current()
    }

    /// Full alert log
    #[must_use]
    pub fn alerts(&self) -> &[Alert] {
        self.evaluator.log()
    }

    /// Last `n` alerts, oldest first
    #[must_use]
    pub fn recent_alerts(&self, n: usize) -> &[Alert] {
        self.evaluator.recent(n)
    }

    /// Active thresholds
    #[must_use]
    pub const fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    /// Zone used for daily buckets
    #[must_use]
    pub const fn timezone(&self) -> Timezone {
        self.aggregator.timezone()
    }

    /// Replace the thresholds with already validated values
    pub fn set_thresholds(&mut self, thresholds: Thresholds) {
        info!(
            max_temp = thresholds.max_temp(),
            max_humidity = thresholds.max_humidity(),
            max_wind_speed = thresholds.max_wind_speed(),
            watched_condition = thresholds.watched_condition(),
            "Thresholds updated"
        );
        self.thresholds = thresholds;
    }

    /// Validate and replace the thresholds
    ///
    /// On error the previous thresholds stay active.
    pub fn update_thresholds(
        &mut self,
        max_temp: f64,
        max_humidity: f64,
        max_wind_speed: f64,
        watched_condition: impl Into<String>,
    ) -> Result<(), DomainError> {
        let thresholds =
            Thresholds::new(max_temp, max_humidity, max_wind_speed, watched_condition)?;
        self.set_thresholds(thresholds);
        Ok(())
    }

    /// Merge a batch, recompute summaries and evaluate alerts
    ///
    /// Latest readings are evaluated in `city_order`; cities in the store
    /// but not in `city_order` follow in store order.
    #[instrument(skip(self, readings, city_order))]
    pub fn ingest(
        &mut self,
        readings: Vec<Observation>,
        city_order: &[CityId],
    ) -> IngestOutcome {
        let added = self.store.add(readings);
        let summaries = self.aggregator.recompute(&self.store);
        let latest = order_by_cities(self.store.latest_per_city(), city_order);
        let alerts = self.evaluator.evaluate(&latest, &self.thresholds);

        IngestOutcome {
            added,
            summaries,
            alerts,
        }
    }
}

fn order_by_cities(mut latest: Vec<Observation>, city_order: &[CityId]) -> Vec<Observation> {
    let mut ordered = Vec::with_capacity(latest.len());
    for city in city_order {
        if let Some(pos) = latest.iter().position(|obs| &obs.city == city) {
            ordered.push(latest.remove(pos));
        }
    }
    ordered.append(&mut latest);
    ordered
}
