//! Daily summary aggregation
//!
//! Summaries are recomputed in full from the store on every trigger and
//! replace the previously retained set.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use domain::{CityId, DailySummary, Observation, Timezone};
use tracing::{debug, instrument};

use super::observation_store::ObservationStore;

/// Derives per-city, per-day statistics from the observation store
#[derive(Debug, Clone, Default)]
pub struct DailyAggregator {
    timezone: Timezone,
    current: Vec<DailySummary>,
}

impl DailyAggregator {
    /// Create an aggregator that buckets dates in the given zone
    #[must_use]
    pub const fn new(timezone: Timezone) -> Self {
        Self {
            timezone,
            current: Vec::new(),
        }
    }

    /// Zone used to derive calendar dates
    #[must_use]
    pub const fn timezone(&self) -> Timezone {
        self.timezone
    }

    /// Most recently computed summaries
    #[must_use]
    pub fn current(&self) -> &[DailySummary] {
        &self.current
    }

    /// Recompute all summaries from the store
    ///
    /// Output is ordered by date, then by the city's first appearance in
    /// the store. An empty store yields an empty result and leaves the
    /// retained set untouched.
    #[instrument(skip(self, store), fields(timezone = %self.timezone))]
    pub fn recompute(&mut self, store: &ObservationStore) -> Vec<DailySummary> {
        let observations = store.snapshot();
        if observations.is_empty() {
            debug!("Store is empty, keeping previous summaries");
            return Vec::new();
        }

        let summaries = summarize(&observations, self.timezone);
        debug!(count = summaries.len(), "Recomputed daily summaries");
        self.current.clone_from(&summaries);
        summaries
    }
}

/// Group observations by (local date, city) and summarize each group
fn summarize(observations: &[Observation], timezone: Timezone) -> Vec<DailySummary> {
    let mut city_rank: HashMap<&CityId, usize> = HashMap::new();
    let mut partitions: BTreeMap<(NaiveDate, usize), Vec<&Observation>> = BTreeMap::new();

    for obs in observations {
        let next_rank = city_rank.len();
        let rank = *city_rank.entry(&obs.city).or_insert(next_rank);
        let date = timezone.local_date(obs.observed_at);
        partitions.entry((date, rank)).or_default().push(obs);
    }

    partitions
        .into_iter()
        .filter_map(|((date, _), group)| summarize_group(date, &group))
        .collect()
}

#[allow(clippy::cast_precision_loss)] // observation counts stay far below 2^52
fn summarize_group(date: NaiveDate, group: &[&Observation]) -> Option<DailySummary> {
    let first = group.first()?;
    let count = group.len() as f64;

    let temp_sum: f64 = group.iter().map(|o| o.temperature).sum();
    let max_temp = group.iter().map(|o| o.temperature).fold(f64::NEG_INFINITY, f64::max);
    let min_temp = group.iter().map(|o| o.temperature).fold(f64::INFINITY, f64::min);
    let humidity_sum: f64 = group.iter().map(|o| o.humidity.as_f64()).sum();
    let wind_sum: f64 = group.iter().map(|o| o.wind_speed).sum();

    Some(DailySummary {
        date,
        city: first.city.clone(),
        avg_temp: temp_sum / count,
        max_temp,
        min_temp,
        avg_humidity: humidity_sum / count,
        avg_wind_speed: wind_sum / count,
        dominant_condition: dominant_condition(group),
        observation_count: group.len(),
    })
}

/// Most frequent condition; ties go to the value seen first
fn dominant_condition(group: &[&Observation]) -> String {
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for obs in group {
        match counts.iter().position(|(c, _)| *c == obs.condition_main) {
            Some(i) => counts[i].1 += 1,
            None => counts.push((obs.condition_main.as_str(), 1)),
        }
    }

    let mut best: Option<(&str, usize)> = None;
    for (condition, n) in counts {
        if best.is_none_or(|(_, top)| n > top) {
            best = Some((condition, n));
        }
    }
    best.map(|(c, _)| c.to_string()).unwrap_or_default()
}
