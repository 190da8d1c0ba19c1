//! Pass execution: loading inputs, wiring the gateway, writing output.

use crate::cli::Cli;
use anyhow::{anyhow, Context, Result};
use roast_domain::{InteractionStatus, RawRecord, StatusStrategy};
use roast_geocode::{CachingGeocoder, TableGeocoder, TimeoutGeocoder};
use roast_transform::{FixedStatus, Materialized, Materializer, MaterializerConfig, RandomStatus};
use std::fs;
use std::path::Path;
use std::time::Duration;
use tracing::info;

/// The gateway stack the driver runs with
pub type DriverGeocoder = CachingGeocoder<TimeoutGeocoder<TableGeocoder>>;

/// Status strategy chosen on the command line
#[derive(Debug)]
pub enum StatusChoice {
    /// `--status` given
    Fixed(FixedStatus),
    /// Placeholder random status
    Random(RandomStatus),
}

impl StatusChoice {
    /// Fixed when a status is given, random otherwise
    pub fn from_arg(status: Option<InteractionStatus>) -> Self {
        match status {
            Some(status) => Self::Fixed(FixedStatus(status)),
            None => Self::Random(RandomStatus::new()),
        }
    }
}

impl StatusStrategy for StatusChoice {
    fn assign(&self, interaction_name: &str, rule_status: &str) -> InteractionStatus {
        match self {
            Self::Fixed(fixed) => fixed.assign(interaction_name, rule_status),
            Self::Random(random) => random.assign(interaction_name, rule_status),
        }
    }
}

/// Load the configuration file, or defaults when none is given
pub fn load_config(path: Option<&Path>) -> Result<MaterializerConfig> {
    match path {
        Some(path) => MaterializerConfig::from_file(path)
            .map_err(|e| anyhow!("Failed to load config {}: {}", path.display(), e)),
        None => Ok(MaterializerConfig::default()),
    }
}

/// Read a JSON array of raw records
pub fn load_records(path: &Path) -> Result<Vec<RawRecord>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read records from {}", path.display()))?;
    let records: Vec<RawRecord> = serde_json::from_str(&text)
        .with_context(|| format!("Invalid record file {}", path.display()))?;
    info!("Loaded {} records from {}", records.len(), path.display());
    Ok(records)
}

/// Static lookup table behind a timeout and a per-location cache
pub fn build_geocoder(locations: Option<&Path>, timeout: Duration) -> Result<DriverGeocoder> {
    let table = match locations {
        Some(path) => TableGeocoder::from_file(path)?,
        None => TableGeocoder::new(),
    };
    Ok(CachingGeocoder::new(TimeoutGeocoder::with_timeout(table, timeout)))
}

/// Run one pass as described by `cli`
pub fn execute(cli: &Cli) -> Result<Materialized> {
    let config = load_config(cli.config.as_deref())?;
    let geocoder = build_geocoder(cli.locations.as_deref(), config.geocode_timeout())?;
    let status = StatusChoice::from_arg(cli.status);

    let materializer = Materializer::new(&cli.rules, config, geocoder, status)
        .with_context(|| format!("Failed to load rules from {}", cli.rules.display()))?;

    let records = load_records(&cli.input)?;
    let output = materializer.materialize(&records)?;
    info!(
        "Geocoded {} distinct locations",
        materializer.geocoder().cached()
    );
    Ok(output)
}

/// Serialize the pass output
pub fn render(output: &Materialized, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(output)?
    } else {
        serde_json::to_string(output)?
    };
    Ok(json)
}

/// Write `json` to `path`, or stdout when no path is given
pub fn write_output(path: Option<&Path>, json: &str) -> Result<()> {
    match path {
        Some(path) => fs::write(path, json)
            .with_context(|| format!("Failed to write output to {}", path.display())),
        None => {
            println!("{}", json);
            Ok(())
        }
    }
}
