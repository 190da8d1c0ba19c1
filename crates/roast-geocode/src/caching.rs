//! Per-location result caching

use crate::lock;
use roast_domain::{Coordinates, GeocodeGateway};
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::debug;

/// Wraps a gateway so each distinct location text is looked up once
///
/// A failed lookup is returned to the caller the first time and cached as
/// unknown, so later lookups of the same text resolve to `Ok(None)` without
/// calling the provider again.
#[derive(Debug)]
pub struct CachingGeocoder<G> {
    inner: G,
    cache: Mutex<HashMap<String, Option<Coordinates>>>,
}

impl<G: GeocodeGateway> CachingGeocoder<G> {
    /// Wrap `inner`
    pub fn new(inner: G) -> Self {
        Self {
            inner,
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Number of cached locations
    pub fn cached(&self) -> usize {
        lock(&self.cache).len()
    }
}

impl<G: GeocodeGateway> GeocodeGateway for CachingGeocoder<G> {
    type Error = G::Error;

    fn locate(&self, location: &str) -> Result<Option<Coordinates>, Self::Error> {
        if let Some(cached) = lock(&self.cache).get(location) {
            debug!("Geocode cache hit for '{}'", location);
            return Ok(*cached);
        }

        let result = self.inner.locate(location);
        let cached = match &result {
            Ok(coordinates) => *coordinates,
            Err(_) => None,
        };
        lock(&self.cache).insert(location.to_string(), cached);
        result
    }
}
