//! Shared machinery for entity transformers

use crate::config::MaterializerConfig;
use crate::context::RecordContext;
use crate::enrich::{GeoEnricher, RuleCoordinates};
use crate::error::TransformError;
use crate::naming::Names;
use crate::report::PassReport;
use crate::table::EntityTable;
use roast_domain::{Coordinates, GeocodeGateway, Linked, Links, Location, RawRecord};
use roast_rules::{Resolved, RuleError, RuleSet};
use std::fmt::Display;
use std::sync::Arc;
use tracing::{info, warn};

/// One resolvable attribute: a name-specific section and its fallback key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Attribute {
    /// Section holding per-entity overrides
    pub section: &'static str,
    /// Key in the default section
    pub default_key: &'static str,
}

impl Attribute {
    /// Create an attribute
    pub const fn new(section: &'static str, default_key: &'static str) -> Self {
        Self {
            section,
            default_key,
        }
    }
}

/// Latitude rules, shared by companies and interactions
pub const LATITUDE: Attribute = Attribute::new("latitudes", "latitude");

/// Longitude rules, shared by companies and interactions
pub const LONGITUDE: Attribute = Attribute::new("longitudes", "longitude");

/// Rule lookups for one entity type
///
/// Construction checks that every default key in the manifest exists, so
/// later resolutions can only fail on bad values.
#[derive(Debug, Clone)]
pub struct RuleAccess {
    rules: Arc<RuleSet>,
    default_section: String,
    unknown_sentinel: String,
}

impl RuleAccess {
    /// Bind `rules` and validate `manifest` against its default section
    pub fn new(
        rules: Arc<RuleSet>,
        config: &MaterializerConfig,
        manifest: &[Attribute],
    ) -> Result<Self, RuleError> {
        rules.require_defaults_in(
            &config.default_section,
            manifest.iter().map(|attr| attr.default_key),
        )?;
        Ok(Self {
            rules,
            default_section: config.default_section.clone(),
            unknown_sentinel: config.unknown_sentinel.clone(),
        })
    }

    /// The underlying rule set
    pub fn rules(&self) -> &Arc<RuleSet> {
        &self.rules
    }

    /// Resolve `attr` for `entity`, reporting where the value came from
    pub fn lookup(&self, entity: &str, attr: Attribute) -> Result<Resolved<'_>, RuleError> {
        self.rules
            .lookup_in(entity, attr.section, attr.default_key, &self.default_section)
    }

    /// Resolve `attr` for `entity`
    pub fn value(&self, entity: &str, attr: Attribute) -> Result<String, RuleError> {
        self.lookup(entity, attr).map(|resolved| resolved.value.to_string())
    }

    /// The override in `section` for `entity`, else `fallback`
    pub fn override_or(&self, entity: &str, section: &str, fallback: &str) -> String {
        self.rules
            .override_for(entity, section)
            .unwrap_or(fallback)
            .to_string()
    }

    /// Coordinates for `entity` as the rules state them
    ///
    /// Either value equal to the unknown sentinel makes the location
    /// unknown. Otherwise both must parse as numbers.
    pub fn coordinates(&self, entity: &str) -> Result<RuleCoordinates, RuleError> {
        let latitude = self.lookup(entity, LATITUDE)?.value;
        let longitude = self.lookup(entity, LONGITUDE)?.value;
        if latitude == self.unknown_sentinel || longitude == self.unknown_sentinel {
            return Ok(RuleCoordinates::Unknown);
        }

        let parse = |attr: Attribute, text: &str| -> Result<f64, RuleError> {
            text.trim().parse().map_err(|e| RuleError::InvalidValue {
                origin: self.rules.origin().to_string(),
                section: attr.section.to_string(),
                key: entity.to_string(),
                message: format!("'{}' is not a coordinate: {}", text, e),
            })
        };
        Ok(RuleCoordinates::Known(Coordinates::new(
            parse(LONGITUDE, longitude)?,
            parse(LATITUDE, latitude)?,
        )))
    }

    /// Output location for `entity` at `location`
    ///
    /// Rule coordinates win; otherwise the gateway is asked. Anything still
    /// unresolved is written as the unknown sentinel.
    pub fn location<G>(
        &self,
        entity: &str,
        geo: &mut GeoEnricher<G>,
        location: &str,
    ) -> Result<Location, RuleError>
    where
        G: GeocodeGateway,
        G::Error: Display,
    {
        let coordinates = geo.enrich(self.coordinates(entity)?, location);
        Ok(Location::or_unknown(coordinates, &self.unknown_sentinel))
    }
}

/// Entities from a standalone pass of one transformer
#[derive(Debug, Clone)]
pub struct EntityBatch<E> {
    /// Deduplicated entities in first-seen order
    pub entities: Vec<E>,
    /// Pass accounting
    pub report: PassReport,
}

/// Turns validated records into one kind of canonical entity
///
/// Implementors are attribute manifests over [`RuleAccess`]; the dedup and
/// skip-and-count policy lives in [`create_objects`](Self::create_objects)
/// and the materializer.
pub trait EntityTransformer {
    /// Entity produced
    type Entity: Linked;

    /// Name resolvers used to build record contexts
    fn names(&self) -> &Names;

    /// Key that identifies repeated references to the same entity
    fn natural_key<'c>(&self, ctx: &'c RecordContext<'_>) -> &'c str;

    /// Materialize the entity on first sight of its natural key
    fn build<G>(
        &self,
        ctx: &RecordContext<'_>,
        geo: &mut GeoEnricher<G>,
    ) -> Result<Self::Entity, RuleError>
    where
        G: GeocodeGateway,
        G::Error: Display;

    /// Links this record contributes to the entity
    fn links(&self, ctx: &RecordContext<'_>) -> Links;

    /// Transform `records` into deduplicated entities of this type
    ///
    /// Malformed records are skipped and counted in the report.
    fn create_objects<G>(
        &self,
        records: &[RawRecord],
        geocoder: G,
    ) -> Result<EntityBatch<Self::Entity>, TransformError>
    where
        G: GeocodeGateway,
        G::Error: Display,
    {
        let mut geo = GeoEnricher::new(geocoder);
        let mut table = EntityTable::new();
        let mut report = PassReport::new(records.len());

        for (index, record) in records.iter().enumerate() {
            let ctx = match RecordContext::resolve(index, record, self.names()) {
                Ok(ctx) => ctx,
                Err(malformed) => {
                    warn!("Skipping {}", malformed);
                    report.record_skip(malformed);
                    continue;
                }
            };
            table.upsert(self.natural_key(&ctx), self.links(&ctx), || {
                self.build(&ctx, &mut geo)
            })?;
        }

        report.geocode_lookups = geo.lookups();
        report.geocode_failures = geo.failures();
        info!(
            "Created {} objects from {} records ({} skipped)",
            table.len(),
            records.len(),
            report.skipped_count()
        );

        Ok(EntityBatch {
            entities: table.into_entities(),
            report,
        })
    }
}

/// Exactly `"True"` is true
pub fn security_scope(value: &str) -> bool {
    value == "True"
}
