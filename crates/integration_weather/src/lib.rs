//! OpenWeatherMap weather integration
//!
//! Client for the OpenWeatherMap current weather API
//! (<https://openweathermap.org/current>). Requires an API key and
//! requests metric units.

pub mod client;
mod models;

pub use client::{OpenWeatherMapClient, WeatherClient, WeatherConfig, WeatherError};
pub use models::CurrentConditions;
