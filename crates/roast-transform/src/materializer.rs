//! The full transformation pass

use crate::company::CompanyTransformer;
use crate::config::MaterializerConfig;
use crate::context::RecordContext;
use crate::enrich::GeoEnricher;
use crate::error::{Result, TransformError};
use crate::interaction::InteractionTransformer;
use crate::naming::Names;
use crate::report::PassReport;
use crate::study::StudyTransformer;
use crate::table::EntityTable;
use crate::transformer::EntityTransformer;
use roast_domain::{Company, GeocodeGateway, Interaction, RawRecord, StatusStrategy, Study};
use roast_rules::RuleBook;
use serde::Serialize;
use std::fmt::Display;
use std::path::Path;
use tracing::{info, warn};

/// Output of one pass
#[derive(Debug, Clone, Serialize)]
pub struct Materialized {
    /// Deduplicated companies in first-seen order
    pub companies: Vec<Company>,

    /// Deduplicated studies in first-seen order
    pub studies: Vec<Study>,

    /// One interaction per accepted record
    pub interactions: Vec<Interaction>,

    /// Number of interactions produced
    #[serde(rename = "totalInteractions")]
    pub total_interactions: usize,

    /// Pass accounting
    #[serde(skip)]
    pub report: PassReport,
}

/// Runs the three transformers over a record stream
///
/// Rules are loaded and checked once at construction; each call to
/// [`materialize`](Self::materialize) starts from empty tables.
#[derive(Debug)]
pub struct Materializer<G, S> {
    names: Names,
    companies: CompanyTransformer,
    studies: StudyTransformer,
    interactions: InteractionTransformer<S>,
    geocoder: G,
}

impl<G, S> Materializer<G, S>
where
    G: GeocodeGateway,
    G::Error: Display,
    S: StatusStrategy,
{
    /// Load the rules in `rule_dir` and construct the transformers
    pub fn new<P: AsRef<Path>>(
        rule_dir: P,
        config: MaterializerConfig,
        geocoder: G,
        status: S,
    ) -> Result<Self> {
        config.validate().map_err(TransformError::Config)?;
        let book = RuleBook::load_with(rule_dir, &config.rule_files)?;
        Self::from_book(&book, config, geocoder, status)
    }

    /// Construct the transformers over already loaded rules
    pub fn from_book(
        book: &RuleBook,
        config: MaterializerConfig,
        geocoder: G,
        status: S,
    ) -> Result<Self> {
        config.validate().map_err(TransformError::Config)?;
        Ok(Self {
            names: Names::from_book(book),
            companies: CompanyTransformer::new(book, &config)?,
            studies: StudyTransformer::new(book, &config)?,
            interactions: InteractionTransformer::new(book, &config, status)?,
            geocoder,
        })
    }

    /// The geocoder in use
    pub fn geocoder(&self) -> &G {
        &self.geocoder
    }

    /// Transform `records` into cross-linked companies, studies and interactions
    ///
    /// Malformed records are skipped and counted. Fails without output if a
    /// rule value cannot be interpreted or if the interaction count does not
    /// match the accepted record count.
    pub fn materialize(&self, records: &[RawRecord]) -> Result<Materialized> {
        info!("Materializing {} records", records.len());

        let mut geo = GeoEnricher::new(&self.geocoder);
        let mut companies = EntityTable::new();
        let mut studies = EntityTable::new();
        let mut interactions = EntityTable::new();
        let mut report = PassReport::new(records.len());

        for (index, record) in records.iter().enumerate() {
            let ctx = match RecordContext::resolve(index, record, &self.names) {
                Ok(ctx) => ctx,
                Err(malformed) => {
                    warn!("Skipping {}", malformed);
                    report.record_skip(malformed);
                    continue;
                }
            };

            let transformer = &self.companies;
            companies.upsert(transformer.natural_key(&ctx), transformer.links(&ctx), || {
                transformer.build(&ctx, &mut geo)
            })?;

            let transformer = &self.studies;
            studies.upsert(transformer.natural_key(&ctx), transformer.links(&ctx), || {
                transformer.build(&ctx, &mut geo)
            })?;

            let transformer = &self.interactions;
            interactions.upsert(transformer.natural_key(&ctx), transformer.links(&ctx), || {
                transformer.build(&ctx, &mut geo)
            })?;
        }

        report.geocode_lookups = geo.lookups();
        report.geocode_failures = geo.failures();
        report.companies = companies.len();
        report.studies = studies.len();
        report.interactions = interactions.len();

        let expected = report.accepted();
        let produced = interactions.len();
        if produced != expected {
            return Err(TransformError::Consistency { expected, produced });
        }

        info!(
            "Materialized {} companies, {} studies, {} interactions ({} records skipped, {} geocode failures)",
            report.companies,
            report.studies,
            report.interactions,
            report.skipped_count(),
            report.geocode_failures
        );

        Ok(Materialized {
            companies: companies.into_entities(),
            studies: studies.into_entities(),
            total_interactions: produced,
            interactions: interactions.into_entities(),
            report,
        })
    }
}
