//! Weather provider port
//!
//! Defines the interface the refresh cycle uses to fetch one reading per city.

use async_trait::async_trait;
use domain::{CityId, Observation};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for fetching current weather observations
///
/// Implementations apply the boundary defaults (unknown condition,
/// zeroed measurements, fetch time as timestamp) before returning, so an
/// `Ok` observation is always complete.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait WeatherProviderPort: Send + Sync {
    /// Fetch the current reading for a city
    async fn fetch(&self, city: &CityId) -> Result<Observation, ApplicationError>;

    /// Check if the provider is reachable
    async fn is_available(&self) -> bool;
}
