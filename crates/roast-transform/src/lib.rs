//! Roast Transform
//!
//! Turns positional raw records into cross-linked, deduplicated companies,
//! studies and interactions, resolving every attribute through per-name
//! rewrite rules with a shared default.
//!
//! # Architecture
//!
//! ```text
//! RawRecord → RecordContext → { Company, Study, Interaction } transformers
//!           → EntityTable (first write wins, links accumulate) → Materialized
//! ```
//!
//! # Key Features
//!
//! - **Fail-fast rules**: Missing rule files and missing defaults are caught at construction
//! - **Skip-and-count**: Malformed records are reported, never fatal
//! - **Deterministic identifiers**: Content digests, so re-runs are idempotent
//! - **Templated documents**: Company documents built from `_PRFAQ` rule sections
//! - **Lazy geocoding**: The gateway is only consulted when rules say "Unknown"
//!
//! # Example Usage
//!
//! ```no_run
//! use roast_domain::RawRecord;
//! use roast_geocode::MockGeocoder;
//! use roast_transform::{FixedStatus, Materializer, MaterializerConfig};
//! use roast_domain::InteractionStatus;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let materializer = Materializer::new(
//!     "rules/",
//!     MaterializerConfig::default(),
//!     MockGeocoder::new(),
//!     FixedStatus(InteractionStatus::Planned),
//! )?;
//!
//! let records: Vec<RawRecord> = serde_json::from_str(&std::fs::read_to_string("records.json")?)?;
//! let output = materializer.materialize(&records)?;
//!
//! println!("{}", output.report.summary());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod company;
mod config;
mod context;
mod document;
mod enrich;
mod error;
mod interaction;
mod materializer;
mod naming;
mod report;
mod status;
mod study;
mod table;
mod transformer;


pub use company::{CompanyTransformer, COMPANY_MANIFEST};
pub use config::MaterializerConfig;
pub use context::{parse_date_time, RecordContext};
pub use document::{parse_section, section_name, DocumentAssembler};
pub use enrich::{GeoEnricher, RuleCoordinates};
pub use error::{MalformedRecord, RecordDefect, Result, TransformError};
pub use interaction::{InteractionTransformer, INTERACTION_MANIFEST};
pub use materializer::{Materialized, Materializer};
pub use naming::{interaction_name, make_id, NameResolver, Names, NAMES_SECTION};
pub use report::PassReport;
pub use status::{FixedStatus, RandomStatus};
pub use study::{StudyTransformer, STUDY_MANIFEST};
pub use table::{merge, EntityTable};
pub use transformer::{security_scope, Attribute, EntityBatch, EntityTransformer, RuleAccess};
