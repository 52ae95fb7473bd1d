//! Daily summary entity - Aggregate over one city for one calendar day

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::value_objects::CityId;

/// Aggregated statistics of one city's observations on one local date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySummary {
    /// Local calendar date the observations fall on
    pub date: NaiveDate,
    /// City the observations belong to
    pub city: CityId,
    /// Mean temperature in °C
    pub avg_temp: f64,
    /// Highest temperature in °C
    pub max_temp: f64,
    /// Lowest temperature in °C
    pub min_temp: f64,
    /// Mean relative humidity in percent
    pub avg_humidity: f64,
    /// Mean wind speed in m/s
    pub avg_wind_speed: f64,
    /// Most frequent `condition_main`; ties go to the first seen
    pub dominant_condition: String,
    /// Number of observations aggregated
    pub observation_count: usize,
}
