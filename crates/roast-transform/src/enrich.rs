//! Geocode enrichment with failure accounting

use roast_domain::{Coordinates, GeocodeGateway};
use std::fmt::Display;
use tracing::{debug, warn};

/// Coordinates as the rules state them
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RuleCoordinates {
    /// Rules hold the unknown sentinel; ask the gateway
    Unknown,
    /// Rules hold explicit coordinates; use them verbatim
    Known(Coordinates),
}

/// Applies the geocoding policy for one pass and counts what happened
///
/// Rule coordinates always win. The gateway is only asked when the rules say
/// the location is unknown, and a failed lookup degrades to `None` rather
/// than failing the pass.
#[derive(Debug)]
pub struct GeoEnricher<G> {
    gateway: G,
    lookups: usize,
    failures: usize,
}

impl<G> GeoEnricher<G>
where
    G: GeocodeGateway,
    G::Error: Display,
{
    /// Wrap `gateway` for one pass
    pub fn new(gateway: G) -> Self {
        Self {
            gateway,
            lookups: 0,
            failures: 0,
        }
    }

    /// Final coordinates for an entity at `location`
    pub fn enrich(&mut self, rules: RuleCoordinates, location: &str) -> Option<Coordinates> {
        match rules {
            RuleCoordinates::Known(coordinates) => Some(coordinates),
            RuleCoordinates::Unknown => {
                self.lookups += 1;
                match self.gateway.locate(location) {
                    Ok(Some(coordinates)) => Some(coordinates),
                    Ok(None) => {
                        debug!("No coordinates for '{}'", location);
                        None
                    }
                    Err(e) => {
                        self.failures += 1;
                        warn!("Geocoding '{}' failed, leaving coordinates unknown: {}", location, e);
                        None
                    }
                }
            }
        }
    }

    /// Gateway calls made
    pub fn lookups(&self) -> usize {
        self.lookups
    }

    /// Gateway calls that failed
    pub fn failures(&self) -> usize {
        self.failures
    }
}
