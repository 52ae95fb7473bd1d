//! Wires configuration into a monitoring session and runs cycles

use std::sync::Arc;

use anyhow::{Context, bail};
use application::{CycleReport, MonitoringSession, RefreshOrchestrator, WeatherProviderPort};
use chrono::{DateTime, NaiveDate, TimeDelta, Utc};
use domain::{CityId, MonitoredCity, Observation, Timezone};
use infrastructure::{AppConfig, build_weather_provider};
use tracing::{info, warn};

use crate::render;

/// A configured session plus the orchestrator feeding it
#[derive(Debug)]
pub struct Monitor {
    cities: Vec<MonitoredCity>,
    city_ids: Vec<CityId>,
    recent_alerts: usize,
    orchestrator: RefreshOrchestrator,
    session: MonitoringSession,
}

/// Reject configurations with errors; log warnings
pub fn ensure_valid(config: &AppConfig) -> anyhow::Result<()> {
    let report = config.validate();
    for issue in report.warnings() {
        warn!(code = %issue.code, "{}", issue.message);
    }
    if report.has_errors() {
        bail!("invalid configuration\n{}", render::validation(&report));
    }
    Ok(())
}

impl Monitor {
    /// Validate `config` and build the OpenWeatherMap provider stack
    pub fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        ensure_valid(config)?;
        let provider =
            build_weather_provider(&config.weather).context("failed to set up weather provider")?;
        Self::with_provider(config, provider)
    }

    /// Build around an existing provider
    pub fn with_provider(
        config: &AppConfig,
        provider: Arc<dyn WeatherProviderPort>,
    ) -> anyhow::Result<Self> {
        let cities = config.to_cities()?;
        let session = MonitoringSession::new(config.to_thresholds()?, config.to_timezone()?);
        let orchestrator = RefreshOrchestrator::with_config(provider, &config.refresh_config());

        info!(
            cities = cities.len(),
            timezone = session.timezone().name(),
            "Monitor ready"
        );

        Ok(Self {
            city_ids: cities.iter().map(|c| c.id.clone()).collect(),
            cities,
            recent_alerts: config.display.recent_alerts,
            orchestrator,
            session,
        })
    }

    /// Run one refresh cycle
    pub async fn cycle(&mut self) -> CycleReport {
        self.orchestrator
            .run_cycle(&self.city_ids, &mut self.session)
            .await
    }

    /// Health check against the provider's probe city
    pub async fn provider_available(&self) -> bool {
        self.orchestrator.provider_available().await
    }

    /// Accumulated state
    pub const fn session(&self) -> &MonitoringSession {
        &self.session
    }

    /// Display timezone
    pub const fn timezone(&self) -> Timezone {
        self.session.timezone()
    }

    /// Observations whose local date lies in `from..=to`
    pub fn observations_between(&self, from: NaiveDate, to: NaiveDate) -> Vec<Observation> {
        match day_bounds(self.timezone(), from, to) {
            Some((start, end)) => self.session.store().filter_by_date_range(start, end),
            None => Vec::new(),
        }
    }

    /// Text shown after each cycle
    pub fn render_cycle(&self, report: &CycleReport) -> String {
        let tz = self.timezone();
        let latest = self.session.store().latest_per_city();

        let mut out = render::current_conditions(&latest, &self.cities, tz);
        out.push('\n');
        out.push_str(&render::daily_summaries(self.session.summaries()));
        out.push('\n');
        out.push_str(&render::alerts(
            self.session.recent_alerts(self.recent_alerts),
            tz,
        ));
        let failures = render::failures(&report.failures);
        if !failures.is_empty() {
            out.push('\n');
            out.push_str(&failures);
        }
        out
    }
}

/// UTC bounds covering local days `from..=to`
fn day_bounds(
    tz: Timezone,
    from: NaiveDate,
    to: NaiveDate,
) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
    let start = tz.start_of_day(from)?;
    let end = tz.start_of_day(to.succ_opt()?)? - TimeDelta::nanoseconds(1);
    Some((start, end))
}
