//! MetroWeather CLI
//!
//! Fetches current weather for the configured cities, keeps daily
//! summaries and prints threshold alerts.

#![allow(clippy::print_stdout)]

use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use chrono::NaiveDate;
use clap::Parser;
use infrastructure::{AppConfig, init_logging};
use presentation_cli::{Cli, Commands, Monitor, ThresholdOverrides, log_filter_from_verbosity, render};
use tokio::time::MissedTickBehavior;
use tracing::{info, warn};

fn load_config(path: Option<&Path>) -> anyhow::Result<AppConfig> {
    match path {
        Some(path) => AppConfig::load_from(path)
            .with_context(|| format!("failed to load configuration from {}", path.display())),
        None => AppConfig::load().context("failed to load configuration"),
    }
}

async fn run_fetch(config: &AppConfig, range: Option<(NaiveDate, NaiveDate)>) -> anyhow::Result<()> {
    let mut monitor = Monitor::from_config(config)?;
    let report = monitor.cycle().await;

    println!("{}", monitor.render_cycle(&report));
    if let Some((from, to)) = range {
        let observations = monitor.observations_between(from, to);
        println!("{}", render::observations(&observations, monitor.timezone()));
    }
    Ok(())
}

async fn run_watch(
    mut config: AppConfig,
    interval: Option<u64>,
    max_cycles: Option<u64>,
    overrides: &ThresholdOverrides,
) -> anyhow::Result<()> {
    if let Some(secs) = interval {
        config.refresh.interval_secs = secs;
    }
    if !overrides.is_empty() {
        info!(?overrides, "Applying threshold overrides");
        overrides.apply_to(&mut config.thresholds);
    }

    let mut monitor = Monitor::from_config(&config)?;
    if !monitor.provider_available().await {
        warn!("Weather provider is unreachable, cycles will report failures until it recovers");
    }
    let mut ticker = tokio::time::interval(Duration::from_secs(config.refresh.interval_secs));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    info!(
        interval_secs = config.refresh.interval_secs,
        max_cycles, "Watching, press Ctrl-C to stop"
    );

    let mut cycles = 0u64;
    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let report = monitor.cycle().await;
                cycles += 1;
                println!("━━━ Cycle {cycles} ━━━");
                println!("{}", monitor.render_cycle(&report));

                if max_cycles.is_some_and(|max| cycles >= max) {
                    info!(cycles, "Reached cycle limit");
                    break;
                }
            }
            result = &mut shutdown => {
                result.context("failed to listen for Ctrl-C")?;
                info!(cycles, "Stopping on Ctrl-C");
                break;
            }
        }
    }
    Ok(())
}

fn show_config(config: &AppConfig) -> anyhow::Result<()> {
    println!("{}", config.to_toml().context("failed to render configuration")?);
    println!(
        "# weather.api_key: {}",
        if config.weather.has_api_key() { "set" } else { "not set" }
    );
    println!();
    print!("{}", render::validation(&config.validate()));
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    init_logging(&config.telemetry, log_filter_from_verbosity(cli.verbose))?;

    match cli.command {
        Commands::Fetch { from, to } => run_fetch(&config, from.zip(to)).await,
        Commands::Watch {
            interval,
            max_cycles,
            thresholds,
        } => run_watch(config, interval, max_cycles, &thresholds).await,
        Commands::Config => show_config(&config),
    }
}
