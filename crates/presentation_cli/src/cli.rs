//! Command-line arguments

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use infrastructure::ThresholdsAppConfig;

/// MetroWeather CLI
#[derive(Debug, Parser)]
#[command(name = "metroweather")]
#[command(author, version, about = "Weather monitoring for metropolitan cities", long_about = None)]
pub struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Configuration file (default: ./config.toml if present)
    #[arg(short, long, global = true, env = "METROWEATHER_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run one refresh cycle and print the results
    ///
    /// Example: metroweather fetch --from 2024-07-01 --to 2024-07-02
    Fetch {
        /// First day of observations to list (inclusive, display timezone)
        #[arg(long, requires = "to")]
        from: Option<NaiveDate>,

        /// Last day of observations to list (inclusive, display timezone)
        #[arg(long, requires = "from")]
        to: Option<NaiveDate>,
    },

    /// Refresh on an interval until Ctrl-C
    Watch {
        /// Seconds between cycles (overrides refresh.interval_secs)
        #[arg(short, long, value_parser = clap::value_parser!(u64).range(1..))]
        interval: Option<u64>,

        /// Stop after this many cycles
        #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
        max_cycles: Option<u64>,

        #[command(flatten)]
        thresholds: ThresholdOverrides,
    },

    /// Print the effective configuration and validation report
    Config,
}

/// Threshold flags layered over the configured values
#[derive(Debug, Clone, Default, Args)]
pub struct ThresholdOverrides {
    /// Temperature limit in °C
    #[arg(long, allow_negative_numbers = true)]
    pub max_temp: Option<f64>,

    /// Humidity limit in percent
    #[arg(long)]
    pub max_humidity: Option<f64>,

    /// Wind speed limit in m/s
    #[arg(long)]
    pub max_wind: Option<f64>,

    /// Condition that raises an alert, e.g. Rain
    #[arg(long)]
    pub condition: Option<String>,
}

impl ThresholdOverrides {
    /// Whether any flag was given
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.max_temp.is_none()
            && self.max_humidity.is_none()
            && self.max_wind.is_none()
            && self.condition.is_none()
    }

    /// Write the given flags into `thresholds`; validation happens later
    pub fn apply_to(&self, thresholds: &mut ThresholdsAppConfig) {
        if let Some(v) = self.max_temp {
            thresholds.max_temp = v;
        }
        if let Some(v) = self.max_humidity {
            thresholds.max_humidity = v;
        }
        if let Some(v) = self.max_wind {
            thresholds.max_wind_speed = v;
        }
        if let Some(v) = &self.condition {
            thresholds.watched_condition.clone_from(v);
        }
    }
}

/// Determine log filter from verbosity count; `None` defers to configuration
#[must_use]
pub const fn log_filter_from_verbosity(verbose: u8) -> Option<&'static str> {
    match verbose {
        0 => None,
        1 => Some("info"),
        2 => Some("debug"),
        _ => Some("trace"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_filter_verbosity() {
        assert_eq!(log_filter_from_verbosity(0), None);
        assert_eq!(log_filter_from_verbosity(1), Some("info"));
        assert_eq!(log_filter_from_verbosity(2), Some("debug"));
        assert_eq!(log_filter_from_verbosity(7), Some("trace"));
    }

    #[test]
    fn overrides_replace_only_given_fields() {
        let overrides = ThresholdOverrides {
            max_temp: Some(30.0),
            condition: Some("Snow".to_string()),
            ..Default::default()
        };
        let mut thresholds = ThresholdsAppConfig::default();
        overrides.apply_to(&mut thresholds);

        assert!((thresholds.max_temp - 30.0).abs() < f64::EPSILON);
        assert!((thresholds.max_humidity - 80.0).abs() < f64::EPSILON);
        assert_eq!(thresholds.watched_condition, "Snow");
        assert!(!overrides.is_empty());
        assert!(ThresholdOverrides::default().is_empty());
    }
}
