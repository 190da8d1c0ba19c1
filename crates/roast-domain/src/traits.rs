//! Trait definitions for external interactions
//!
//! These traits define the boundaries between the transformation pass and
//! collaborators it does not own.

use crate::{Coordinates, InteractionStatus, Links};

/// Trait for resolving a textual location into coordinates
///
/// Implemented outside the transformation pass (see `roast-geocode`).
/// `Ok(None)` means the location is unknown to the provider.
pub trait GeocodeGateway {
    /// Error type for lookups
    type Error;

    /// Resolve `location` (e.g. `San Francisco,CA,US`) into coordinates
    fn locate(&self, location: &str) -> Result<Option<Coordinates>, Self::Error>;
}

impl<G: GeocodeGateway + ?Sized> GeocodeGateway for &G {
    type Error = G::Error;

    fn locate(&self, location: &str) -> Result<Option<Coordinates>, Self::Error> {
        (**self).locate(location)
    }
}

/// Trait for assigning an interaction's status
///
/// Status is not derived from data yet. The strategy is injectable so the
/// placeholder can be swapped for a deterministic one in tests.
pub trait StatusStrategy {
    /// Pick a status for `interaction_name`; `rule_status` is the rule-resolved value
    fn assign(&self, interaction_name: &str, rule_status: &str) -> InteractionStatus;
}

/// Entities that accumulate cross-links across raw records
pub trait Linked {
    /// The entity's link maps
    fn links(&self) -> &Links;

    /// Mutable access to the entity's link maps
    fn links_mut(&mut self) -> &mut Links;
}
