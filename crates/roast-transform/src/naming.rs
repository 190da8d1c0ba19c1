//! Canonical names and identifiers

use crate::error::RecordDefect;
use roast_domain::ObjectId;
use roast_rules::{RuleBook, RuleSet};
use std::sync::Arc;

/// Section holding `raw name = canonical name` rewrites
pub const NAMES_SECTION: &str = "names";

/// Compute the identifier for `name`, with `extra_text` appended when given
pub fn make_id(name: &str, extra_text: Option<&str>) -> ObjectId {
    ObjectId::digest(name, extra_text)
}

/// Synthesize an interaction name as `date-study-company`
///
/// Interaction records carry no name of their own; the tuple that identifies
/// them becomes the name. Empty inputs are rejected so the name never has
/// empty segments.
pub fn interaction_name(
    date: &str,
    study_name: &str,
    company_name: &str,
) -> Result<String, RecordDefect> {
    for (field, value) in [("date", date), ("study", study_name), ("company", company_name)] {
        if value.trim().is_empty() {
            return Err(RecordDefect::EmptyField(field));
        }
    }
    Ok(format!("{}-{}-{}", date, study_name, company_name))
}

/// Rewrites raw name tokens through a rule set's `[names]` section
#[derive(Debug, Clone)]
pub struct NameResolver {
    rules: Arc<RuleSet>,
}

impl NameResolver {
    /// Create a resolver over `rules`
    pub fn new(rules: Arc<RuleSet>) -> Self {
        Self { rules }
    }

    /// The rewritten name, or `raw_name` unchanged
    pub fn resolve_name(&self, raw_name: &str) -> String {
        self.rules
            .override_for(raw_name, NAMES_SECTION)
            .unwrap_or(raw_name)
            .to_string()
    }
}

/// Name resolvers for the two entity types whose names come from rules
#[derive(Debug, Clone)]
pub struct Names {
    /// Company name rewrites
    pub company: NameResolver,
    /// Study name rewrites
    pub study: NameResolver,
}

impl Names {
    /// Build from the company and study rules of `book`
    pub fn from_book(book: &RuleBook) -> Self {
        Self {
            company: NameResolver::new(Arc::clone(book.company())),
            study: NameResolver::new(Arc::clone(book.study())),
        }
    }
}
