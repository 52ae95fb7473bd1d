//! Weather data models
//!
//! Raw OpenWeatherMap payloads and the typed current conditions derived
//! from them. Every raw field is optional; defaults are applied once, in
//! [`CurrentConditions::from_response`].

use chrono::{DateTime, Utc};
use domain::{Humidity, UNKNOWN_CONDITION, UNKNOWN_DESCRIPTION};
use serde::{Deserialize, Serialize};

/// Raw `/weather` response
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct ApiResponse {
    #[serde(default)]
    pub weather: Option<Vec<WeatherEntry>>,
    #[serde(default)]
    pub main: Option<MainBlock>,
    #[serde(default)]
    pub wind: Option<WindBlock>,
    /// Observation time, unix seconds
    #[serde(default)]
    pub dt: Option<i64>,
    /// City name as resolved by the provider
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct WeatherEntry {
    #[serde(default)]
    pub main: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct MainBlock {
    #[serde(default)]
    pub temp: Option<f64>,
    #[serde(default)]
    pub feels_like: Option<f64>,
    #[serde(default)]
    pub humidity: Option<f64>,
    #[serde(default)]
    pub pressure: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct WindBlock {
    #[serde(default)]
    pub speed: Option<f64>,
}

/// Error body returned with non-2xx responses
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct ApiErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

/// Current conditions for one city, defaults applied
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    /// City name reported by the provider, if any
    pub resolved_name: Option<String>,
    /// Short category, "Unknown" when absent
    pub condition_main: String,
    /// Free-text description, "Unknown" when absent
    pub description: String,
    /// Temperature in °C (metric units)
    pub temperature: f64,
    /// Apparent temperature in °C
    pub feels_like: f64,
    /// Relative humidity, rounded and clamped
    pub humidity: Humidity,
    /// Pressure in hPa
    pub pressure: f64,
    /// Wind speed in m/s
    pub wind_speed: f64,
    /// Provider timestamp, or the fetch time if missing or invalid
    pub observed_at: DateTime<Utc>,
}

impl CurrentConditions {
    /// Build typed conditions from a raw payload
    ///
    /// Missing text becomes "Unknown", missing numbers become 0 and a
    /// missing timestamp becomes `fetched_at`.
    pub(crate) fn from_response(response: ApiResponse, fetched_at: DateTime<Utc>) -> Self {
        let entry = response
            .weather
            .and_then(|entries| entries.into_iter().next())
            .unwrap_or_default();
        let main = response.main.unwrap_or_default();
        let wind = response.wind.unwrap_or_default();

        let observed_at = response
            .dt
            .and_then(|secs| DateTime::from_timestamp(secs, 0))
            .unwrap_or(fetched_at);

        Self {
            resolved_name: response.name,
            condition_main: entry
                .main
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| UNKNOWN_CONDITION.to_string()),
            description: entry
                .description
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| UNKNOWN_DESCRIPTION.to_string()),
            temperature: finite_or_zero(main.temp),
            feels_like: finite_or_zero(main.feels_like),
            humidity: Humidity::from_reading(finite_or_zero(main.humidity)),
            pressure: finite_or_zero(main.pressure),
            wind_speed: finite_or_zero(wind.speed),
            observed_at,
        }
    }
}

fn finite_or_zero(value: Option<f64>) -> f64 {
    value.filter(|v| v.is_finite()).unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fetched_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn full_payload_maps_every_field() {
        let json = serde_json::json!({
            "weather": [{"id": 500, "main": "Rain", "description": "light rain", "icon": "10d"}],
            "main": {"temp": 29.4, "feels_like": 34.1, "humidity": 84, "pressure": 1006},
            "wind": {"speed": 5.7, "deg": 240},
            "dt": 1_714_550_400,
            "name": "Mumbai",
            "cod": 200
        });
        let response: ApiResponse = serde_json::from_value(json).unwrap();
        let conditions = CurrentConditions::from_response(response, fetched_at());

        assert_eq!(conditions.condition_main, "Rain");
        assert_eq!(conditions.description, "light rain");
        assert!((conditions.temperature - 29.4).abs() < f64::EPSILON);
        assert!((conditions.feels_like - 34.1).abs() < f64::EPSILON);
        assert_eq!(conditions.humidity.value(), 84);
        assert!((conditions.pressure - 1006.0).abs() < f64::EPSILON);
        assert!((conditions.wind_speed - 5.7).abs() < f64::EPSILON);
        assert_eq!(conditions.observed_at.timestamp(), 1_714_550_400);
        assert_eq!(conditions.resolved_name.as_deref(), Some("Mumbai"));
    }

    #[test]
    fn empty_payload_gets_defaults() {
        let response: ApiResponse = serde_json::from_str("{}").unwrap();
        let conditions = CurrentConditions::from_response(response, fetched_at());

        assert_eq!(conditions.condition_main, "Unknown");
        assert_eq!(conditions.description, "Unknown");
        assert!(conditions.temperature.abs() < f64::EPSILON);
        assert_eq!(conditions.humidity.value(), 0);
        assert!(conditions.wind_speed.abs() < f64::EPSILON);
        assert_eq!(conditions.observed_at, fetched_at());
    }

    #[test]
    fn empty_weather_array_is_unknown() {
        let response: ApiResponse =
            serde_json::from_str(r#"{"weather": [], "main": {"temp": 31.0}}"#).unwrap();
        let conditions = CurrentConditions::from_response(response, fetched_at());
        assert_eq!(conditions.condition_main, "Unknown");
        assert!((conditions.temperature - 31.0).abs() < f64::EPSILON);
    }

    #[test]
    fn humidity_out_of_range_is_clamped() {
        let response: ApiResponse =
            serde_json::from_str(r#"{"main": {"humidity": 130}}"#).unwrap();
        let conditions = CurrentConditions::from_response(response, fetched_at());
        assert_eq!(conditions.humidity.value(), 100);
    }
}
