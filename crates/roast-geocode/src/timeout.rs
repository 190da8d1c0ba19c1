//! Bounded waits on a slow gateway

use crate::GeocodeError;
use roast_domain::{Coordinates, GeocodeGateway};
use std::fmt::Display;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tracing::warn;

/// Default time to wait for one lookup
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Wraps a gateway so no lookup blocks the pass longer than `timeout`
///
/// Each lookup runs on a worker thread. When the wait expires the caller gets
/// [`GeocodeError::Timeout`]; the worker is left to finish on its own and its
/// answer is discarded.
#[derive(Debug)]
pub struct TimeoutGeocoder<G> {
    inner: Arc<G>,
    timeout: Duration,
}

impl<G> TimeoutGeocoder<G>
where
    G: GeocodeGateway + Send + Sync + 'static,
    G::Error: Display,
{
    /// Wrap `inner` with the default timeout
    pub fn new(inner: G) -> Self {
        Self::with_timeout(inner, DEFAULT_TIMEOUT)
    }

    /// Wrap `inner` with a custom timeout
    pub fn with_timeout(inner: G, timeout: Duration) -> Self {
        Self {
            inner: Arc::new(inner),
            timeout,
        }
    }

    /// The configured timeout
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl<G> GeocodeGateway for TimeoutGeocoder<G>
where
    G: GeocodeGateway + Send + Sync + 'static,
    G::Error: Display,
{
    type Error = GeocodeError;

    fn locate(&self, location: &str) -> Result<Option<Coordinates>, Self::Error> {
        let (tx, rx) = mpsc::channel();
        let inner = Arc::clone(&self.inner);
        let text = location.to_string();

        thread::spawn(move || {
            let result = inner.locate(&text).map_err(|e| e.to_string());
            // Receiver may have given up already.
            let _ = tx.send(result);
        });

        match rx.recv_timeout(self.timeout) {
            Ok(Ok(coordinates)) => Ok(coordinates),
            Ok(Err(message)) => Err(GeocodeError::Unavailable(message)),
            Err(RecvTimeoutError::Timeout) => {
                warn!("Geocoding '{}' timed out after {:?}", location, self.timeout);
                Err(GeocodeError::Timeout(self.timeout))
            }
            Err(RecvTimeoutError::Disconnected) => Err(GeocodeError::Unavailable(
                "geocoding worker exited without answering".to_string(),
            )),
        }
    }
}
