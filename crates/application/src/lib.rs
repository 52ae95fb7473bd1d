//! Application layer - Use cases and orchestration
//!
//! Holds the in-memory observation store, the daily aggregator, the alert
//! evaluator and the refresh cycle that ties them to a weather provider.
//! Provider access goes through the [`ports::WeatherProviderPort`] trait;
//! adapters in the infrastructure layer implement it.

pub mod error;
pub mod ports;
pub mod services;

pub use error::ApplicationError;
pub use ports::*;
pub use services::*;
