//! Telemetry: structured logging setup.

mod logging;

pub use logging::{TelemetryError, build_filter, init_logging};
