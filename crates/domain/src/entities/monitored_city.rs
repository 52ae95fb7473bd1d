//! Monitored city entity

use serde::{Deserialize, Serialize};

use crate::value_objects::{CityId, GeoLocation};

/// A city the refresh cycle fetches, with coordinates for display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonitoredCity {
    /// Identifier sent to the weather provider
    pub id: CityId,
    /// Map position
    pub location: GeoLocation,
}

impl MonitoredCity {
    /// Create a monitored city
    #[must_use]
    pub const fn new(id: CityId, location: GeoLocation) -> Self {
        Self { id, location }
    }

    /// The six Indian metros monitored out of the box
    #[must_use]
    pub fn default_metros() -> Vec<Self> {
        [
            ("Delhi", 28.6139, 77.2090),
            ("Mumbai", 19.0760, 72.8777),
            ("Chennai", 13.0827, 80.2707),
            ("Bangalore", 12.9716, 77.5946),
            ("Kolkata", 22.5726, 88.3639),
            ("Hyderabad", 17.3850, 78.4867),
        ]
        .into_iter()
        .filter_map(|(name, lat, lon)| {
            CityId::parse(name)
                .ok()
                .map(|id| Self::new(id, GeoLocation::new_unchecked(lat, lon)))
        })
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_metros_are_six_in_order() {
        let metros = MonitoredCity::default_metros();
        let names: Vec<_> = metros.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(
            names,
            ["Delhi", "Mumbai", "Chennai", "Bangalore", "Kolkata", "Hyderabad"]
        );
        assert!((metros[0].location.latitude() - 28.6139).abs() < f64::EPSILON);
    }

    #[test]
    fn default_metro_coordinates_are_valid() {
        for city in MonitoredCity::default_metros() {
            assert!(
                GeoLocation::new(city.location.latitude(), city.location.longitude()).is_ok()
            );
        }
    }
}
