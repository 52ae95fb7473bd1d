//! Domain layer for MetroWeather
//!
//! Contains the observation, daily summary and alert entities together with
//! the value objects they are built from. This layer performs no I/O.

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use value_objects::*;
