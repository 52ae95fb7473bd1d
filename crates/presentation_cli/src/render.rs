//! Plain-text rendering of cycle results
//!
//! Every function returns a `String` so output can be asserted in tests;
//! `main` decides where it goes.

use std::fmt::Write;

use application::CityFailure;
use domain::{Alert, DailySummary, MonitoredCity, Observation, Timezone};
use infrastructure::ValidationReport;

const LOCAL_TIME_FORMAT: &str = "%Y-%m-%d %H:%M %Z";

fn local_time(obs: &Observation, tz: Timezone) -> String {
    obs.observed_at
        .with_timezone(&tz.tz())
        .format(LOCAL_TIME_FORMAT)
        .to_string()
}

/// Current conditions per city, in `cities` order
///
/// Cities without a reading yet are listed as unavailable.
#[must_use]
pub fn current_conditions(
    latest: &[Observation],
    cities: &[MonitoredCity],
    tz: Timezone,
) -> String {
    let mut out = String::from("🌍 Current conditions\n");
    for city in cities {
        let _ = writeln!(
            out,
            "\n📍 {} ({:.4}, {:.4})",
            city.id,
            city.location.latitude(),
            city.location.longitude()
        );
        match latest.iter().find(|o| o.city == city.id) {
            Some(obs) => {
                let _ = writeln!(out, "   {} - {}", obs.condition_main, obs.description);
                let _ = writeln!(
                    out,
                    "   🌡️  {:.1}°C (feels like {:.1}°C)  💧 {}  💨 {:.1} m/s  ⏲️  {} hPa",
                    obs.temperature, obs.feels_like, obs.humidity, obs.wind_speed, obs.pressure
                );
                let _ = writeln!(out, "   🕒 {}", local_time(obs, tz));
            },
            None => {
                let _ = writeln!(out, "   (no reading available)");
            },
        }
    }
    out
}

/// Daily summaries as a table
#[must_use]
pub fn daily_summaries(summaries: &[DailySummary]) -> String {
    if summaries.is_empty() {
        return "📊 Daily summaries: none yet\n".to_string();
    }

    let mut out = String::from("📊 Daily summaries\n");
    let _ = writeln!(
        out,
        "{:<10}  {:<12}  {:>6}  {:>6}  {:>6}  {:>5}  {:>5}  {:<12}  {:>3}",
        "Date", "City", "Avg°C", "Max°C", "Min°C", "Hum%", "Wind", "Dominant", "N"
    );
    for s in summaries {
        let _ = writeln!(
            out,
            "{:<10}  {:<12}  {:>6.1}  {:>6.1}  {:>6.1}  {:>5.1}  {:>5.1}  {:<12}  {:>3}",
            s.date.format("%Y-%m-%d"),
            s.city.as_str(),
            s.avg_temp,
            s.max_temp,
            s.min_temp,
            s.avg_humidity,
            s.avg_wind_speed,
            s.dominant_condition,
            s.observation_count
        );
    }
    out
}

/// Alert messages, oldest first
#[must_use]
pub fn alerts(alerts: &[Alert], tz: Timezone) -> String {
    if alerts.is_empty() {
        return "✅ No alerts\n".to_string();
    }

    let mut out = format!("🚨 Recent alerts ({})\n", alerts.len());
    for alert in alerts {
        let _ = writeln!(
            out,
            "   [{}] {}",
            alert
                .raised_at
                .with_timezone(&tz.tz())
                .format(LOCAL_TIME_FORMAT),
            alert.message
        );
    }
    out
}

/// Cities that could not be fetched; empty when there are none
#[must_use]
pub fn failures(failures: &[CityFailure]) -> String {
    let mut out = String::new();
    if failures.is_empty() {
        return out;
    }
    out.push_str("⚠️  Failed to fetch\n");
    for failure in failures {
        let _ = writeln!(out, "   {}: {}", failure.city, failure.reason);
    }
    out
}

/// Observations in a date range
#[must_use]
pub fn observations(observations: &[Observation], tz: Timezone) -> String {
    if observations.is_empty() {
        return "🗂️  No observations in range\n".to_string();
    }

    let mut out = format!("🗂️  Observations in range ({})\n", observations.len());
    for obs in observations {
        let _ = writeln!(
            out,
            "   {}  {:<12}  {}",
            local_time(obs, tz),
            obs.city.as_str(),
            obs.summary()
        );
    }
    out
}

/// Validation findings
#[must_use]
pub fn validation(report: &ValidationReport) -> String {
    if report.is_clean() {
        return "✅ Configuration OK\n".to_string();
    }
    let mut out = String::from("🔎 Configuration issues\n");
    for issue in report.issues() {
        let icon = if issue.is_error() { "❌" } else { "⚠️ " };
        let _ = writeln!(
            out,
            "   {icon} {}: {} ({})",
            issue.code, issue.message, issue.recommendation
        );
    }
    out
}
