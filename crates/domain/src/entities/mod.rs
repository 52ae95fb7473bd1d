//! Domain entities - Readings and the artifacts derived from them

mod alert;
mod daily_summary;
mod monitored_city;
mod observation;

pub use alert::{Alert, AlertKind};
pub use daily_summary::DailySummary;
pub use monitored_city::MonitoredCity;
pub use observation::{Observation, UNKNOWN_CONDITION, UNKNOWN_DESCRIPTION};
