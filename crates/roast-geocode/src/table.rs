//! Static location table

use crate::GeocodeError;
use roast_domain::{Coordinates, GeocodeGateway};
use std::collections::HashMap;
use std::path::Path;
use tracing::info;

/// Answers lookups from a fixed location → coordinates table
///
/// The table file is a JSON object keyed by location text
/// (`city,stateProvince,country`):
///
/// ```json
/// { "Austin,TX,US": { "longitude": -97.74, "latitude": 30.27 } }
/// ```
///
/// Locations missing from the table resolve to `Ok(None)`.
#[derive(Debug, Clone, Default)]
pub struct TableGeocoder {
    locations: HashMap<String, Coordinates>,
}

impl TableGeocoder {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a table from JSON text
    pub fn from_json(json: &str) -> Result<Self, GeocodeError> {
        let locations: HashMap<String, Coordinates> =
            serde_json::from_str(json).map_err(|e| GeocodeError::Load(e.to_string()))?;
        Ok(Self { locations })
    }

    /// Load a table from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, GeocodeError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| GeocodeError::Load(format!("{}: {}", path.display(), e)))?;
        let table = Self::from_json(&contents)?;
        info!("Loaded {} locations from {}", table.len(), path.display());
        Ok(table)
    }

    /// Add or replace a location
    pub fn insert(&mut self, location: impl Into<String>, coordinates: Coordinates) {
        self.locations.insert(location.into(), coordinates);
    }

    /// Number of known locations
    pub fn len(&self) -> usize {
        self.locations.len()
    }

    /// Whether the table is empty
    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }
}

impl GeocodeGateway for TableGeocoder {
    type Error = GeocodeError;

    fn locate(&self, location: &str) -> Result<Option<Coordinates>, Self::Error> {
        Ok(self.locations.get(location.trim()).copied())
    }
}
