//! Study transformer

use crate::config::MaterializerConfig;
use crate::context::RecordContext;
use crate::enrich::GeoEnricher;
use crate::naming::Names;
use crate::transformer::{Attribute, EntityTransformer, RuleAccess};
use roast_domain::{GeocodeGateway, Links, Study};
use roast_rules::{RuleBook, RuleError};
use std::fmt::Display;
use std::sync::Arc;

const DESCRIPTION: Attribute = Attribute::new("descriptions", "description");
const GROUPS: Attribute = Attribute::new("groups", "groups");

/// Every attribute whose default must exist in the study rules
pub const STUDY_MANIFEST: &[Attribute] = &[DESCRIPTION, GROUPS];

/// Builds studies from `study.ini` rules
#[derive(Debug, Clone)]
pub struct StudyTransformer {
    rules: RuleAccess,
    names: Names,
}

impl StudyTransformer {
    /// Create a transformer; fails if a required default is missing
    pub fn new(book: &RuleBook, config: &MaterializerConfig) -> Result<Self, RuleError> {
        Ok(Self {
            rules: RuleAccess::new(Arc::clone(book.study()), config, STUDY_MANIFEST)?,
            names: Names::from_book(book),
        })
    }
}

impl EntityTransformer for StudyTransformer {
    type Entity = Study;

    fn names(&self) -> &Names {
        &self.names
    }

    fn natural_key<'c>(&self, ctx: &'c RecordContext<'_>) -> &'c str {
        ctx.raw_study
    }

    fn build<G>(&self, ctx: &RecordContext<'_>, _geo: &mut GeoEnricher<G>) -> Result<Study, RuleError>
    where
        G: GeocodeGateway,
        G::Error: Display,
    {
        Ok(Study {
            id: ctx.study_id.clone(),
            name: ctx.study_name.clone(),
            description: self.rules.value(ctx.raw_study, DESCRIPTION)?,
            groups: self.rules.value(ctx.raw_study, GROUPS)?,
            links: Links::new(),
        })
    }

    fn links(&self, ctx: &RecordContext<'_>) -> Links {
        Links::new()
            .with_company(ctx.company_name.clone(), ctx.company_id.clone())
            .with_interaction(ctx.interaction_name.clone(), ctx.interaction_id.clone())
    }
}
