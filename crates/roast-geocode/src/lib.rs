//! Roast Geocode Gateway Adapters
//!
//! Implementations and wrappers of the `GeocodeGateway` trait from
//! `roast-domain`. The geocoding provider itself is an external capability;
//! this crate supplies what a transformation pass needs around it.
//!
//! # Gateways
//!
//! - `MockGeocoder`: Deterministic mock for testing
//! - `TableGeocoder`: Static location table loaded from JSON
//! - `CachingGeocoder`: One lookup per distinct location text
//! - `TimeoutGeocoder`: Bounded wait on a slow provider
//!
//! # Examples
//!
//! ```
//! use roast_domain::{Coordinates, GeocodeGateway};
//! use roast_geocode::{CachingGeocoder, MockGeocoder};
//!
//! let mut mock = MockGeocoder::default();
//! mock.add_location("San Francisco,CA,US", Coordinates::new(-122.42, 37.77));
//!
//! let geocoder = CachingGeocoder::new(mock.clone());
//! geocoder.locate("San Francisco,CA,US").unwrap();
//! geocoder.locate("San Francisco,CA,US").unwrap();
//! assert_eq!(mock.call_count(), 1);
//! ```

#![warn(missing_docs)]

pub mod caching;
pub mod table;
pub mod timeout;

use roast_domain::{Coordinates, GeocodeGateway};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use thiserror::Error;

pub use caching::CachingGeocoder;
pub use table::TableGeocoder;
pub use timeout::TimeoutGeocoder;

/// Errors that can occur during geocoding
///
/// A failed lookup is recoverable: the pass records unknown coordinates
/// and continues.
#[derive(Error, Debug)]
pub enum GeocodeError {
    /// Provider could not answer
    #[error("Geocoding unavailable: {0}")]
    Unavailable(String),

    /// Provider did not answer in time
    #[error("Geocoding timed out after {0:?}")]
    Timeout(Duration),

    /// Location table could not be loaded
    #[error("Failed to load location table: {0}")]
    Load(String),
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[derive(Debug, Clone, Copy)]
enum MockAnswer {
    Found(Coordinates),
    Fail,
}

/// Mock geocoder for deterministic testing
///
/// Returns pre-configured coordinates without any network calls. Unknown
/// locations resolve to `Ok(None)`. Clones share their configuration and
/// call count.
///
/// # Examples
///
/// ```
/// use roast_domain::{Coordinates, GeocodeGateway};
/// use roast_geocode::MockGeocoder;
///
/// let mut geocoder = MockGeocoder::default();
/// geocoder.add_location("Austin,TX,US", Coordinates::new(-97.74, 30.27));
/// geocoder.add_error("Nowhere,,");
///
/// assert!(geocoder.locate("Austin,TX,US").unwrap().is_some());
/// assert!(geocoder.locate("Elsewhere,,").unwrap().is_none());
/// assert!(geocoder.locate("Nowhere,,").is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockGeocoder {
    answers: Arc<Mutex<HashMap<String, MockAnswer>>>,
    call_count: Arc<Mutex<usize>>,
}

impl MockGeocoder {
    /// Create a mock that knows no locations
    pub fn new() -> Self {
        Self::default()
    }

    /// Add coordinates for a location
    pub fn add_location(&mut self, location: impl Into<String>, coordinates: Coordinates) {
        lock(&self.answers).insert(location.into(), MockAnswer::Found(coordinates));
    }

    /// Configure to return an error for a location
    pub fn add_error(&mut self, location: impl Into<String>) {
        lock(&self.answers).insert(location.into(), MockAnswer::Fail);
    }

    /// Get the number of times locate was called
    pub fn call_count(&self) -> usize {
        *lock(&self.call_count)
    }

    /// Reset the call count
    pub fn reset_call_count(&self) {
        *lock(&self.call_count) = 0;
    }
}

impl GeocodeGateway for MockGeocoder {
    type Error = GeocodeError;

    fn locate(&self, location: &str) -> Result<Option<Coordinates>, Self::Error> {
        *lock(&self.call_count) += 1;

        match lock(&self.answers).get(location) {
            Some(MockAnswer::Found(coordinates)) => Ok(Some(*coordinates)),
            Some(MockAnswer::Fail) => Err(GeocodeError::Unavailable(format!(
                "mock failure for '{}'",
                location
            ))),
            None => Ok(None),
        }
    }
}
