//! MetroWeather CLI library
//!
//! Argument definitions, the monitor that drives refresh cycles, and the
//! text renderer. The `metroweather` binary is a thin shell over these.

pub mod cli;
pub mod monitor;
pub mod render;

pub use cli::{Cli, Commands, ThresholdOverrides, log_filter_from_verbosity};
pub use monitor::{Monitor, ensure_valid};
