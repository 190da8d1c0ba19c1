//! Roast Domain Layer
//!
//! This crate contains the domain model shared by every other Roast crate:
//! the raw records produced by extractors, the three canonical entities the
//! transformation pass materializes, and the trait seams for collaborators
//! that live outside the pass (geocoding, status assignment).
//!
//! ## Key Concepts
//!
//! - **RawRecord**: a fixed-arity tuple of positional string fields
//! - **Company / Study / Interaction**: canonical, deduplicated entities
//! - **ObjectId**: a deterministic content digest, stable across runs
//! - **Links**: name → identifier maps accumulated across records
//! - **Document**: Introduction / Purpose / Action text bundle for companies
//!
//! ## Architecture
//!
//! - No I/O, no configuration loading
//! - Only `serde`/`indexmap` (output shape) and `sha2`/`hex` (identifier digest)
//! - Trait definitions for all external interactions

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod document;
pub mod entity;
pub mod geo;
pub mod id;
pub mod record;
pub mod traits;

// Re-exports for convenience
pub use document::{Action, Document, TEXT_ACTION};
pub use entity::{Company, Interaction, InteractionStatus, LinkMap, Links, Study};
pub use geo::{location_text, Coordinates, Location};
pub use id::ObjectId;
pub use record::{RawField, RawRecord, RECORD_ARITY};
pub use traits::{GeocodeGateway, Linked, StatusStrategy};
