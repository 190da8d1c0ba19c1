//! Geographic coordinates

use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};

/// A resolved coordinate pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    /// Longitude in decimal degrees
    pub longitude: f64,

    /// Latitude in decimal degrees
    pub latitude: f64,
}

impl Coordinates {
    /// Create a coordinate pair
    pub fn new(longitude: f64, latitude: f64) -> Self {
        Self { longitude, latitude }
    }
}

/// Where an entity sits, as written to output
///
/// Both variants serialize as a `longitude`/`latitude` pair, so flattening a
/// location into an entity always yields the two keys. An unknown location
/// writes its sentinel in place of both numbers.
#[derive(Debug, Clone, PartialEq)]
pub enum Location {
    /// Resolved coordinates
    Known(Coordinates),
    /// Not resolvable; holds the sentinel text
    Unknown(String),
}

impl Location {
    /// An unknown location written as `sentinel`
    pub fn unknown(sentinel: impl Into<String>) -> Self {
        Location::Unknown(sentinel.into())
    }

    /// Known coordinates, else an unknown location written as `sentinel`
    pub fn or_unknown(coordinates: Option<Coordinates>, sentinel: &str) -> Self {
        match coordinates {
            Some(coordinates) => Location::Known(coordinates),
            None => Location::unknown(sentinel),
        }
    }

    /// The coordinates, if known
    pub fn coordinates(&self) -> Option<Coordinates> {
        match self {
            Location::Known(coordinates) => Some(*coordinates),
            Location::Unknown(_) => None,
        }
    }

    /// Whether the coordinates are known
    pub fn is_known(&self) -> bool {
        matches!(self, Location::Known(_))
    }
}

impl Serialize for Location {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        match self {
            Location::Known(coordinates) => {
                map.serialize_entry("longitude", &coordinates.longitude)?;
                map.serialize_entry("latitude", &coordinates.latitude)?;
            }
            Location::Unknown(sentinel) => {
                map.serialize_entry("longitude", sentinel)?;
                map.serialize_entry("latitude", sentinel)?;
            }
        }
        map.end()
    }
}

/// Build the location text handed to a geocoder: `city,stateProvince,country`
pub fn location_text(city: &str, state_province: &str, country: &str) -> String {
    format!("{},{},{}", city, state_province, country)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_text() {
        assert_eq!(
            location_text("San Francisco", "CA", "US"),
            "San Francisco,CA,US"
        );
    }

    #[test]
    fn test_unknown_location_keeps_both_keys() {
        let json = serde_json::to_value(Location::unknown("Unknown")).unwrap();
        assert_eq!(json["longitude"], "Unknown");
        assert_eq!(json["latitude"], "Unknown");

        let json = serde_json::to_value(Location::Known(Coordinates::new(-95.37, 29.76))).unwrap();
        assert_eq!(json["longitude"], -95.37);
        assert_eq!(json["latitude"], 29.76);
    }

    #[test]
    fn test_or_unknown() {
        let known = Coordinates::new(1.0, 2.0);
        assert_eq!(Location::or_unknown(Some(known), "?").coordinates(), Some(known));

        let unknown = Location::or_unknown(None, "?");
        assert!(!unknown.is_known());
        assert_eq!(unknown, Location::Unknown("?".to_string()));
    }
}
