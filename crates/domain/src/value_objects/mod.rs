//! Value Objects - Immutable, identity-less domain primitives

mod city_id;
mod geo_location;
mod humidity;
mod thresholds;
mod timezone;

pub use city_id::CityId;
pub use geo_location::GeoLocation;
pub use humidity::{Humidity, InvalidHumidity};
pub use thresholds::Thresholds;
pub use timezone::Timezone;
