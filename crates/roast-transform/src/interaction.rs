//! Interaction transformer

use crate::config::MaterializerConfig;
use crate::context::RecordContext;
use crate::enrich::GeoEnricher;
use crate::naming::Names;
use crate::transformer::{
    security_scope, Attribute, EntityTransformer, RuleAccess, LATITUDE, LONGITUDE,
};
use roast_domain::{GeocodeGateway, Interaction, Links, StatusStrategy};
use roast_rules::{Origin, RuleBook, RuleError};
use std::fmt::Display;
use std::sync::Arc;
use tracing::debug;

const GROUPS: Attribute = Attribute::new("groups", "groups");
const ABSTRACT: Attribute = Attribute::new("abstracts", "abstract");
const STATUS: Attribute = Attribute::new("statuses", "status");
const TYPE: Attribute = Attribute::new("types", "type");
const CONTACT_ADDRESS: Attribute = Attribute::new("contact_addresses", "contact_address");
const CONTACT_ZIP_POSTAL: Attribute = Attribute::new("contact_zipPostals", "contact_zipPostal");
const CONTACT_PHONE: Attribute = Attribute::new("contact_phones", "contact_phone");
const CONTACT_LINKEDIN: Attribute = Attribute::new("contact_linkedins", "contact_linkedin");
const CONTACT_EMAIL: Attribute = Attribute::new("contact_emails", "contact_email");
const CONTACT_TWITTER: Attribute = Attribute::new("contact_twitters", "contact_twitter");
const CONTACT_NAME: Attribute = Attribute::new("contact_names", "contact_name");
const SECURITY_SCOPE: Attribute = Attribute::new("security_scopes", "security_scope");
const DESCRIPTION: Attribute = Attribute::new("descriptions", "description");
const SUBSTUDY: Attribute = Attribute::new("substudy_mappings", "substudy");

/// Every attribute whose default must exist in the interaction rules
pub const INTERACTION_MANIFEST: &[Attribute] = &[
    GROUPS,
    ABSTRACT,
    STATUS,
    TYPE,
    CONTACT_ADDRESS,
    CONTACT_ZIP_POSTAL,
    CONTACT_PHONE,
    CONTACT_LINKEDIN,
    CONTACT_EMAIL,
    CONTACT_TWITTER,
    CONTACT_NAME,
    SECURITY_SCOPE,
    DESCRIPTION,
    SUBSTUDY,
    LATITUDE,
    LONGITUDE,
];

/// Token in the default description replaced by the company name
pub const COMPANY_TOKEN: &str = "COMPANY";

/// Token in the default description replaced by the study name
pub const STUDY_TOKEN: &str = "STUDYNAME";

/// Builds interactions from `interaction.ini` rules
///
/// Rules are keyed by the synthesized interaction name.
#[derive(Debug, Clone)]
pub struct InteractionTransformer<S> {
    rules: RuleAccess,
    names: Names,
    status: S,
}

impl<S: StatusStrategy> InteractionTransformer<S> {
    /// Create a transformer; fails if a required default is missing
    pub fn new(book: &RuleBook, config: &MaterializerConfig, status: S) -> Result<Self, RuleError> {
        Ok(Self {
            rules: RuleAccess::new(Arc::clone(book.interaction()), config, INTERACTION_MANIFEST)?,
            names: Names::from_book(book),
            status,
        })
    }

    /// Description for the interaction in `ctx`
    ///
    /// The shared default is a template; name-specific descriptions are used
    /// verbatim.
    pub fn description(&self, ctx: &RecordContext<'_>) -> Result<String, RuleError> {
        let resolved = self.rules.lookup(&ctx.interaction_name, DESCRIPTION)?;
        Ok(match resolved.origin {
            Origin::Override => resolved.value.to_string(),
            Origin::Default => resolved
                .value
                .replace(COMPANY_TOKEN, &ctx.company_name)
                .replace(STUDY_TOKEN, &ctx.study_name),
        })
    }
}

impl<S: StatusStrategy> EntityTransformer for InteractionTransformer<S> {
    type Entity = Interaction;

    fn names(&self) -> &Names {
        &self.names
    }

    fn natural_key<'c>(&self, ctx: &'c RecordContext<'_>) -> &'c str {
        &ctx.interaction_name
    }

    fn build<G>(
        &self,
        ctx: &RecordContext<'_>,
        geo: &mut GeoEnricher<G>,
    ) -> Result<Interaction, RuleError>
    where
        G: GeocodeGateway,
        G::Error: Display,
    {
        let key = ctx.interaction_name.as_str();
        let rules = &self.rules;

        let rule_status = rules.value(key, STATUS)?;
        let location = rules.location(key, geo, &ctx.location())?;

        debug!("Materializing interaction '{}'", key);

        Ok(Interaction {
            id: ctx.interaction_id.clone(),
            name: ctx.interaction_name.clone(),
            description: self.description(ctx)?,
            date_time: ctx.date_time.clone(),
            public: security_scope(&rules.value(key, SECURITY_SCOPE)?),
            groups: rules.value(key, GROUPS)?,
            status: self.status.assign(key, &rule_status),
            interaction_type: rules.value(key, TYPE)?,
            abstract_text: rules.value(key, ABSTRACT)?,
            substudy: rules.value(key, SUBSTUDY)?,
            contact_name: rules.value(key, CONTACT_NAME)?,
            contact_email: rules.value(key, CONTACT_EMAIL)?,
            contact_linkedin: rules.value(key, CONTACT_LINKEDIN)?,
            contact_twitter: rules.value(key, CONTACT_TWITTER)?,
            url: ctx.url.to_string(),
            thumbnail: ctx.thumbnail.to_string(),
            street_address: rules.value(key, CONTACT_ADDRESS)?,
            city: ctx.city.to_string(),
            zip_postal: rules.value(key, CONTACT_ZIP_POSTAL)?,
            state_province: ctx.state_province.to_string(),
            country: ctx.country.to_string(),
            region: ctx.region.to_string(),
            phone: rules.value(key, CONTACT_PHONE)?,
            location,
            links: Links::new(),
        })
    }

    fn links(&self, ctx: &RecordContext<'_>) -> Links {
        Links::new()
            .with_study(ctx.study_name.clone(), ctx.study_id.clone())
            .with_company(ctx.company_name.clone(), ctx.company_id.clone())
    }
}
