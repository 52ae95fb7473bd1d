//! Semantic validation for application configuration
//!
//! Loading only checks that values have the right shape. This module checks
//! that they make sense together: thresholds, coordinates, timezone, city
//! list and refresh cadence. Errors block a run; warnings are printed.

use std::collections::HashSet;
use std::fmt;

use crate::config::AppConfig;

/// Sane cadence range for `watch` mode, in seconds
const MIN_SANE_INTERVAL_SECS: u64 = 60;
const MAX_SANE_INTERVAL_SECS: u64 = 3_600;

/// Severity level for validation issues
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum IssueSeverity {
    /// Should be looked at, the run still works
    Warning,
    /// The configuration cannot be used
    Error,
}

impl fmt::Display for IssueSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Warning => write!(f, "WARNING"),
            Self::Error => write!(f, "ERROR"),
        }
    }
}

/// A single finding
#[derive(Debug, Clone)]
pub struct ValidationIssue {
    /// Severity level
    pub severity: IssueSeverity,
    /// Short code identifying the check, e.g. `duplicate_city`
    pub code: String,
    /// Human-readable description
    pub message: String,
    /// Recommended fix
    pub recommendation: String,
}

impl ValidationIssue {
    /// Create an error-level issue
    #[must_use]
    pub fn error(
        code: impl Into<String>,
        message: impl Into<String>,
        recommendation: impl Into<String>,
    ) -> Self {
        Self {
            severity: IssueSeverity::Error,
            code: code.into(),
            message: message.into(),
            recommendation: recommendation.into(),
        }
    }

    /// Create a warning-level issue
    #[must_use]
    pub fn warning(
        code: impl Into<String>,
        message: impl Into<String>,
        recommendation: impl Into<String>,
    ) -> Self {
        Self {
            severity: IssueSeverity::Warning,
            code: code.into(),
            message: message.into(),
            recommendation: recommendation.into(),
        }
    }

    /// Check if this issue blocks a run
    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self.severity, IssueSeverity::Error)
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}: {} - {}",
            self.severity, self.code, self.message, self.recommendation
        )
    }
}

/// Result of validating an [`AppConfig`], errors first
#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    /// All issues, errors first
    #[must_use]
    pub fn issues(&self) -> &[ValidationIssue] {
        &self.issues
    }

    /// Error-level issues
    pub fn errors(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.issues.iter().filter(|i| i.is_error())
    }

    /// Warning-level issues
    pub fn warnings(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.issues.iter().filter(|i| !i.is_error())
    }

    /// Whether any issue blocks a run
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.issues.iter().any(ValidationIssue::is_error)
    }

    /// No issues at all
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    /// Whether an issue with `code` was reported
    #[must_use]
    pub fn contains(&self, code: &str) -> bool {
        self.issues.iter().any(|i| i.code == code)
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.issues.is_empty() {
            return write!(f, "Configuration OK");
        }
        for (i, issue) in self.issues.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{issue}")?;
        }
        Ok(())
    }
}

/// Validates application configuration
#[derive(Debug, Clone, Copy, Default)]
pub struct ConfigValidator;

impl ConfigValidator {
    /// Run every check and collect the findings
    #[must_use]
    pub fn validate(config: &AppConfig) -> ValidationReport {
        let mut issues = Vec::new();

        Self::check_cities(config, &mut issues);
        Self::check_thresholds(config, &mut issues);
        Self::check_refresh(config, &mut issues);
        Self::check_display(config, &mut issues);
        Self::check_weather(config, &mut issues);

        // Stable: keeps check order within a severity
        issues.sort_by(|a, b| b.severity.cmp(&a.severity));
        ValidationReport { issues }
    }

    fn check_cities(config: &AppConfig, issues: &mut Vec<ValidationIssue>) {
        if config.cities.is_empty() {
            issues.push(ValidationIssue::error(
                "no_cities",
                "No cities are configured",
                "Add at least one [[cities]] entry",
            ));
            return;
        }

        let mut seen = HashSet::new();
        for city in &config.cities {
            match city.to_monitored() {
                Ok(monitored) => {
                    if !seen.insert(monitored.id.as_str().to_lowercase()) {
                        issues.push(ValidationIssue::error(
                            "duplicate_city",
                            format!("City '{}' is configured more than once", monitored.id),
                            "Remove the duplicate [[cities]] entry",
                        ));
                    }
                },
                Err(e) => issues.push(ValidationIssue::error(
                    "invalid_city",
                    format!("City '{}': {e}", city.name),
                    "Use a non-empty name and coordinates within ±90/±180",
                )),
            }
        }
    }

    fn check_thresholds(config: &AppConfig, issues: &mut Vec<ValidationIssue>) {
        if let Err(e) = config.to_thresholds() {
            issues.push(ValidationIssue::error(
                "invalid_thresholds",
                e.to_string(),
                "Use finite, non-negative limits with humidity at most 100",
            ));
        }
    }

    fn check_refresh(config: &AppConfig, issues: &mut Vec<ValidationIssue>) {
        let refresh = &config.refresh;

        if refresh.interval_secs == 0 {
            issues.push(ValidationIssue::error(
                "zero_interval",
                "refresh.interval_secs is 0",
                "Use an interval between 60 and 3600 seconds",
            ));
        } else if !(MIN_SANE_INTERVAL_SECS..=MAX_SANE_INTERVAL_SECS)
            .contains(&refresh.interval_secs)
        {
            issues.push(ValidationIssue::warning(
                "unusual_interval",
                format!(
                    "refresh.interval_secs is {}, outside {MIN_SANE_INTERVAL_SECS}-{MAX_SANE_INTERVAL_SECS}",
                    refresh.interval_secs
                ),
                "Short intervals burn API quota; long ones make alerts stale",
            ));
        }

        if refresh.fetch_timeout_secs == 0 {
            issues.push(ValidationIssue::error(
                "zero_fetch_timeout",
                "refresh.fetch_timeout_secs is 0",
                "Use a timeout of a few seconds",
            ));
        } else if refresh.interval_secs > 0 && refresh.fetch_timeout_secs >= refresh.interval_secs
        {
            issues.push(ValidationIssue::warning(
                "timeout_exceeds_interval",
                "refresh.fetch_timeout_secs is not shorter than the interval",
                "Lower the fetch timeout so cycles do not overlap",
            ));
        }
    }

    fn check_display(config: &AppConfig, issues: &mut Vec<ValidationIssue>) {
        if let Err(e) = config.to_timezone() {
            issues.push(ValidationIssue::error(
                "unknown_timezone",
                e.to_string(),
                "Use an IANA name such as Asia/Kolkata or UTC",
            ));
        }
        if config.display.recent_alerts == 0 {
            issues.push(ValidationIssue::warning(
                "alerts_hidden",
                "display.recent_alerts is 0, no alerts will be shown",
                "Set display.recent_alerts to 5",
            ));
        }
    }

    fn check_weather(config: &AppConfig, issues: &mut Vec<ValidationIssue>) {
        let weather = &config.weather;

        if !weather.has_api_key() {
            issues.push(ValidationIssue::warning(
                "missing_api_key",
                "No OpenWeatherMap API key configured",
                "Set weather.api_key or OPENWEATHERMAP_API_KEY",
            ));
        }
        if weather.timeout_secs == 0 {
            issues.push(ValidationIssue::error(
                "zero_http_timeout",
                "weather.timeout_secs is 0",
                "Use a timeout of a few seconds",
            ));
        }
        if config.refresh.interval_secs > 0 && weather.cache_ttl_secs > config.refresh.interval_secs
        {
            issues.push(ValidationIssue::warning(
                "cache_outlives_interval",
                "weather.cache_ttl_secs is longer than the refresh interval",
                "Some cycles will reuse cached readings and add nothing new",
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CityConfig;
    use secrecy::SecretString;

    fn valid_config() -> AppConfig {
        let mut config = AppConfig::default();
        config.weather.api_key = Some(SecretString::from("key"));
        config
    }

    // ==============================
    // Success scenarios
    // ==============================

    #[test]
    fn default_config_with_key_is_clean() {
        let report = valid_config().validate();
        assert!(report.is_clean(), "{report}");
        assert_eq!(report.to_string(), "Configuration OK");
    }

    #[test]
    fn missing_key_is_only_a_warning() {
        let report = AppConfig::default().validate();
        assert!(!report.has_errors());
        assert!(report.contains("missing_api_key"));
    }

    // ==============================
    // Error scenarios
    // ==============================

    #[test]
    fn empty_city_list() {
        let mut config = valid_config();
        config.cities.clear();
        let report = config.validate();
        assert!(report.has_errors());
        assert!(report.contains("no_cities"));
    }

    #[test]
    fn duplicate_cities_ignore_case() {
        let mut config = valid_config();
        config.cities.push(CityConfig {
            name: "delhi".to_string(),
            latitude: 28.6,
            longitude: 77.2,
        });
        let report = config.validate();
        assert!(report.contains("duplicate_city"));
        assert_eq!(report.errors().count(), 1);
    }

    #[test]
    fn invalid_coordinates() {
        let mut config = valid_config();
        config.cities[0].longitude = 200.0;
        assert!(config.validate().contains("invalid_city"));
    }

    #[test]
    fn invalid_thresholds() {
        let mut config = valid_config();
        config.thresholds.max_humidity = 150.0;
        assert!(config.validate().contains("invalid_thresholds"));
    }

    #[test]
    fn unknown_timezone() {
        let mut config = valid_config();
        config.display.timezone = "Mars/Olympus".to_string();
        assert!(config.validate().contains("unknown_timezone"));
    }

    #[test]
    fn zero_interval_is_an_error_not_a_warning() {
        let mut config = valid_config();
        config.refresh.interval_secs = 0;
        let report = config.validate();
        assert!(report.contains("zero_interval"));
        assert!(!report.contains("unusual_interval"));
        assert!(!report.contains("cache_outlives_interval"));
    }

    // ==============================
    // Warning scenarios
    // ==============================

    #[test]
    fn unusual_intervals_warn() {
        let mut config = valid_config();
        config.refresh.interval_secs = 30;
        config.weather.cache_ttl_secs = 0;
        config.refresh.fetch_timeout_secs = 5;
        let report = config.validate();
        assert!(!report.has_errors());
        assert!(report.contains("unusual_interval"));

        config.refresh.interval_secs = 7_200;
        assert!(config.validate().contains("unusual_interval"));
    }

    #[test]
    fn cache_longer_than_interval_warns() {
        let mut config = valid_config();
        config.refresh.interval_secs = 120;
        let report = config.validate();
        assert!(report.contains("cache_outlives_interval"));
        assert!(!report.has_errors());
    }

    #[test]
    fn errors_sort_before_warnings() {
        let mut config = AppConfig::default();
        config.display.timezone = "Nowhere".to_string();
        let report = config.validate();
        assert!(report.issues()[0].is_error());
        assert!(!report.issues().last().unwrap().is_error());
        assert!(report.to_string().contains("[ERROR] unknown_timezone"));
    }
}
