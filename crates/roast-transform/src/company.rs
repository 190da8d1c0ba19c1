//! Company transformer

use crate::config::MaterializerConfig;
use crate::context::RecordContext;
use crate::document::DocumentAssembler;
use crate::enrich::GeoEnricher;
use crate::naming::Names;
use crate::transformer::{Attribute, EntityTransformer, RuleAccess, LATITUDE, LONGITUDE};
use roast_domain::{location_text, Company, GeocodeGateway, Links};
use roast_rules::{RuleBook, RuleError};
use std::fmt::Display;
use std::sync::Arc;
use tracing::debug;

const INDUSTRY: Attribute = Attribute::new("industries", "industry");
const ROLE: Attribute = Attribute::new("roles", "role");
const DESCRIPTION: Attribute = Attribute::new("descriptions", "description");
const URL: Attribute = Attribute::new("urls", "url");
const LOGO: Attribute = Attribute::new("logos", "logo");
const STREET_ADDRESS: Attribute = Attribute::new("streetAddresses", "streetAddress");
const ZIP_POSTAL: Attribute = Attribute::new("zipPostals", "zipPostal");
const PHONE: Attribute = Attribute::new("phones", "phone");
const CIK: Attribute = Attribute::new("ciks", "cik");
const STOCK_SYMBOL: Attribute = Attribute::new("stockSymbols", "stockSymbol");
const RECENT_10K: Attribute = Attribute::new("recent10kURLs", "recent10kURL");
const RECENT_10Q: Attribute = Attribute::new("recent10qURLs", "recent10qURL");

/// Every attribute whose default must exist in the company rules
pub const COMPANY_MANIFEST: &[Attribute] = &[
    INDUSTRY,
    ROLE,
    DESCRIPTION,
    URL,
    LOGO,
    STREET_ADDRESS,
    ZIP_POSTAL,
    PHONE,
    CIK,
    STOCK_SYMBOL,
    RECENT_10K,
    RECENT_10Q,
    LATITUDE,
    LONGITUDE,
];

// Address sections that override the record's own values when present.
const CITIES: &str = "cities";
const STATE_PROVINCES: &str = "stateProvinces";
const COUNTRIES: &str = "countries";
const REGIONS: &str = "regions";

/// Builds companies from `company.ini` rules
#[derive(Debug, Clone)]
pub struct CompanyTransformer {
    rules: RuleAccess,
    documents: DocumentAssembler,
    names: Names,
}

impl CompanyTransformer {
    /// Create a transformer; fails if a required default or the default
    /// document section is missing
    pub fn new(book: &RuleBook, config: &MaterializerConfig) -> Result<Self, RuleError> {
        let rules = Arc::clone(book.company());
        let documents = DocumentAssembler::new(
            Arc::clone(&rules),
            config.document_placeholder.clone(),
            config.default_document_section.clone(),
        )?;
        Ok(Self {
            rules: RuleAccess::new(rules, config, COMPANY_MANIFEST)?,
            documents,
            names: Names::from_book(book),
        })
    }
}

impl EntityTransformer for CompanyTransformer {
    type Entity = Company;

    fn names(&self) -> &Names {
        &self.names
    }

    fn natural_key<'c>(&self, ctx: &'c RecordContext<'_>) -> &'c str {
        ctx.raw_company
    }

    fn build<G>(
        &self,
        ctx: &RecordContext<'_>,
        geo: &mut GeoEnricher<G>,
    ) -> Result<Company, RuleError>
    where
        G: GeocodeGateway,
        G::Error: Display,
    {
        let key = ctx.raw_company;
        let rules = &self.rules;

        let city = rules.override_or(key, CITIES, ctx.city);
        let state_province = rules.override_or(key, STATE_PROVINCES, ctx.state_province);
        let country = rules.override_or(key, COUNTRIES, ctx.country);
        let region = rules.override_or(key, REGIONS, ctx.region);

        let location = rules.location(
            key,
            geo,
            &location_text(&city, &state_province, &country),
        )?;
        let logo = rules.value(key, LOGO)?;

        debug!("Materializing company '{}'", ctx.company_name);

        Ok(Company {
            id: ctx.company_id.clone(),
            name: ctx.company_name.clone(),
            industry: rules.value(key, INDUSTRY)?,
            role: rules.value(key, ROLE)?,
            url: rules.value(key, URL)?,
            logo_url: logo.clone(),
            icon: logo,
            street_address: rules.value(key, STREET_ADDRESS)?,
            city,
            state_province,
            country,
            region,
            zip_postal: rules.value(key, ZIP_POSTAL)?,
            phone: rules.value(key, PHONE)?,
            description: rules.value(key, DESCRIPTION)?,
            cik: rules.value(key, CIK)?,
            stock_symbol: rules.value(key, STOCK_SYMBOL)?,
            recent10k_url: rules.value(key, RECENT_10K)?,
            recent10q_url: rules.value(key, RECENT_10Q)?,
            location,
            document: self.documents.assemble(&ctx.company_name)?,
            links: Links::new(),
        })
    }

    fn links(&self, ctx: &RecordContext<'_>) -> Links {
        Links::new()
            .with_study(ctx.study_name.clone(), ctx.study_id.clone())
            .with_interaction(ctx.interaction_name.clone(), ctx.interaction_id.clone())
    }
}
