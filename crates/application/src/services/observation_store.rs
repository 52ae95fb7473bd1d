//! In-memory observation store
//!
//! Append-only and de-duplicated on `(city, observed_at)`. A batch merge
//! happens under a single write lock, so readers observe either the state
//! before the batch or after it.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use domain::{CityId, Observation};
use parking_lot::RwLock;
use tracing::debug;

#[derive(Debug, Default)]
struct StoreInner {
    observations: Vec<Observation>,
    keys: HashSet<(CityId, DateTime<Utc>)>,
}

/// Time-series of observations for every monitored city
#[derive(Debug, Default)]
pub struct ObservationStore {
    inner: RwLock<StoreInner>,
}

impl ObservationStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge a batch of readings
    ///
    /// A reading whose `(city, observed_at)` is already present, in the
    /// store or earlier in the same batch, is dropped. Returns how many
    /// readings were actually added.
    pub fn add(&self, readings: impl IntoIterator<Item = Observation>) -> usize {
        let mut inner = self.inner.write();
        let mut added = 0;
        let mut dropped = 0;

        for reading in readings {
            if inner.keys.insert(reading.key()) {
                inner.observations.push(reading);
                added += 1;
            } else {
                dropped += 1;
            }
        }

        debug!(added, dropped, total = inner.observations.len(), "Merged observation batch");
        added
    }

    /// Latest observation of every city
    ///
    /// Cities appear in the order they were first stored. When two
    /// readings of a city share the greatest timestamp, the later insert
    /// wins.
    #[must_use]
    pub fn latest_per_city(&self) -> Vec<Observation> {
        let inner = self.inner.read();
        let mut slots: HashMap<&CityId, usize> = HashMap::new();
        let mut latest: Vec<&Observation> = Vec::new();

        for obs in &inner.observations {
            if let Some(&slot) = slots.get(&obs.city) {
                if obs.observed_at >= latest[slot].observed_at {
                    latest[slot] = obs;
                }
            } else {
                slots.insert(&obs.city, latest.len());
                latest.push(obs);
            }
        }

        latest.into_iter().cloned().collect()
    }

    /// Observations with `start <= observed_at <= end`, in insertion order
    ///
    /// An inverted range yields nothing.
    #[must_use]
    pub fn filter_by_date_range(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Vec<Observation> {
        if start > end {
            return Vec::new();
        }
        self.inner
            .read()
            .observations
            .iter()
            .filter(|obs| obs.observed_at >= start && obs.observed_at <= end)
            .cloned()
            .collect()
    }

    /// Latest observation of one city
    #[must_use]
    pub fn latest_for(&self, city: &CityId) -> Option<Observation> {
        let inner = self.inner.read();
        let mut best: Option<&Observation> = None;
        for obs in inner.observations.iter().filter(|o| &o.city == city) {
            if best.is_none_or(|b| obs.observed_at >= b.observed_at) {
                best = Some(obs);
            }
        }
        best.cloned()
    }

    /// All observations of one city, in insertion order
    #[must_use]
    pub fn history_for(&self, city: &CityId) -> Vec<Observation> {
        self.inner
            .read()
            .observations
            .iter()
            .filter(|obs| &obs.city == city)
            .cloned()
            .collect()
    }

    /// Copy of every stored observation, in insertion order
    #[must_use]
    pub fn snapshot(&self) -> Vec<Observation> {
        self.inner.read().observations.clone()
    }

    /// Cities present in the store, in order of first appearance
    #[must_use]
    pub fn cities(&self) -> Vec<CityId> {
        let inner = self.inner.read();
        let mut seen = HashSet::new();
        inner
            .observations
            .iter()
            .filter(|obs| seen.insert(&obs.city))
            .map(|obs| obs.city.clone())
            .collect()
    }

    /// Number of stored observations
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.read().observations.len()
    }

    /// Whether the store holds no observations
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.read().observations.is_empty()
    }
}
