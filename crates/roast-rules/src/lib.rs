//! Roast Rule Store
//!
//! Loads the layered, human-editable rewrite rules that drive a
//! transformation pass and answers attribute lookups with fallback.
//!
//! # Overview
//!
//! There is one rule file per entity type (`company.ini`, `study.ini`,
//! `interaction.ini`). Each file is a set of `[sections]` holding
//! `key = value` entries. Sections such as `[industries]` map an entity name
//! to an override; the reserved `[DEFAULT]` section holds the value every
//! other entity falls back to.
//!
//! ```text
//! [DEFAULT]
//! industry = Unknown
//!
//! [industries]
//! Acme Corp = Manufacturing
//! ```
//!
//! `resolve("Acme Corp", "industries", "industry")` yields `Manufacturing`;
//! any other company name yields `Unknown`. A lookup that finds neither is a
//! configuration error, never an empty string.
//!
//! # Example Usage
//!
//! ```
//! use roast_rules::RuleSet;
//!
//! # fn main() -> Result<(), roast_rules::RuleError> {
//! let rules = RuleSet::parse("company.ini", "[DEFAULT]\nrole = Customer\n\n[roles]\nAcme = Partner\n")?;
//!
//! assert_eq!(rules.resolve("Acme", "roles", "role")?, "Partner");
//! assert_eq!(rules.resolve("Globex", "roles", "role")?, "Customer");
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod book;
mod error;
mod ini;
mod ruleset;

pub use book::{RuleBook, RuleFiles, RuleKind};
pub use error::RuleError;
pub use ruleset::{Entry, Origin, Resolved, RuleSet, Section, DEFAULT_SECTION};
