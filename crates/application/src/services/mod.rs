//! Application services - Use case implementations

mod alert_evaluator;
mod daily_aggregator;
mod monitoring_session;
mod observation_store;
mod refresh_orchestrator;

pub use alert_evaluator::AlertEvaluator;
pub use daily_aggregator::DailyAggregator;
pub use monitoring_session::{IngestOutcome, MonitoringSession};
pub use observation_store::ObservationStore;
pub use refresh_orchestrator::{CityFailure, CycleReport, RefreshConfig, RefreshOrchestrator};
