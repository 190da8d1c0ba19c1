//! Integration tests running full passes over rule directories on disk

use roast_domain::{Coordinates, InteractionStatus, RawRecord};
use roast_geocode::{CachingGeocoder, MockGeocoder, TableGeocoder};
use roast_rules::RuleError;
use roast_transform::{FixedStatus, Materializer, MaterializerConfig, RandomStatus, TransformError};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const COMPANY_RULES: &str = "\
; Company rewrite rules
[DEFAULT]
industry = Unknown
role = Customer
description = Unknown
url = Unknown
logo = Unknown
streetAddress = Unknown
zipPostal = Unknown
phone = Unknown
cik = Unknown
stockSymbol = Unknown
recent10kURL = Unknown
recent10qURL = Unknown
latitude = Unknown
longitude = Unknown

[industries]
Globex = Energy

[DEFAULT_PRFAQ]
Introduction = $COMPANY$ is a
    company we talk to.
Purpose = Learn from $COMPANY$.
Action_Text = Send $COMPANY$ a summary.
";

const STUDY_RULES: &str = "\
[DEFAULT]
description = Unknown
groups = users:all
";

const INTERACTION_RULES: &str = "\
[DEFAULT]
groups = users:all
abstract = Unknown
status = Unknown
type = Interview
contact_address = Unknown
contact_zipPostal = Unknown
contact_phone = Unknown
contact_linkedin = Unknown
contact_email = Unknown
contact_twitter = Unknown
contact_name = Unknown
security_scope = False
description = Learn from COMPANY about STUDYNAME
substudy = 1
latitude = Unknown
longitude = Unknown
";

const RECORDS: &str = r#"[
    ["202301151030", "AMER", "US", "CA", "San Francisco", "", "Pricing", "Acme Corp", "", "http://a", "a.png"],
    ["202301161030", "AMER", "US", "TX", "Houston", "", "Pricing", "Globex", "", "http://b", "b.png"],
    ["202301171030", "AMER", "US", "CA", "San Francisco", "", "Churn", "Acme Corp", "", "http://c", "c.png"],
    ["202301181030", "AMER"]
]"#;

fn write_rules(dir: &Path, files: [(&str, &str); 3]) {
    for (name, body) in files {
        fs::write(dir.join(name), body).unwrap();
    }
}

fn rule_dir() -> TempDir {
    let dir = TempDir::new().unwrap();
    write_rules(
        dir.path(),
        [
            ("company.ini", COMPANY_RULES),
            ("study.ini", STUDY_RULES),
            ("interaction.ini", INTERACTION_RULES),
        ],
    );
    dir
}

fn records() -> Vec<RawRecord> {
    serde_json::from_str(RECORDS).unwrap()
}

#[test]
fn test_full_pass_from_disk() {
    let dir = rule_dir();
    let mut mock = MockGeocoder::new();
    mock.add_location("San Francisco,CA,US", Coordinates::new(-122.42, 37.77));
    mock.add_location("Houston,TX,US", Coordinates::new(-95.37, 29.76));

    let geocoder = CachingGeocoder::new(mock.clone());
    let materializer = Materializer::new(
        dir.path(),
        MaterializerConfig::default(),
        geocoder,
        FixedStatus(InteractionStatus::Completed),
    )
    .unwrap();

    let output = materializer.materialize(&records()).unwrap();

    assert_eq!(output.companies.len(), 2);
    assert_eq!(output.studies.len(), 2);
    assert_eq!(output.interactions.len(), 3);
    assert_eq!(output.total_interactions, 3);
    assert_eq!(output.report.skipped_count(), 1);
    assert_eq!(output.report.skipped[0].index, 3);

    let acme = &output.companies[0];
    assert_eq!(acme.name, "Acme Corp");
    assert_eq!(acme.industry, "Unknown");
    assert_eq!(acme.document.introduction, "Acme Corp is a company we talk to.");
    assert_eq!(acme.links.studies.len(), 2);

    let globex = &output.companies[1];
    assert_eq!(globex.industry, "Energy");
    assert_eq!(globex.location.coordinates(), Some(Coordinates::new(-95.37, 29.76)));

    assert_eq!(
        output.interactions[1].description,
        "Learn from Globex about Pricing"
    );

    // Two distinct locations, however many entities sit there.
    assert_eq!(mock.call_count(), 2);
    assert_eq!(materializer.geocoder().cached(), 2);
    assert_eq!(output.report.geocode_lookups, 5);
}

#[test]
fn test_table_geocoder_pass() {
    let dir = rule_dir();
    let table = TableGeocoder::from_json(
        r#"{"Houston,TX,US": {"longitude": -95.37, "latitude": 29.76}}"#,
    )
    .unwrap();

    let materializer = Materializer::new(
        dir.path(),
        MaterializerConfig::default(),
        table,
        RandomStatus::seeded(1),
    )
    .unwrap();
    let output = materializer.materialize(&records()).unwrap();

    assert_eq!(output.companies[0].location.coordinates(), None);
    assert!(output.companies[1].location.is_known());
    assert_eq!(output.report.geocode_failures, 0);
}

#[test]
fn test_missing_rule_file() {
    let dir = rule_dir();
    fs::remove_file(dir.path().join("study.ini")).unwrap();

    let result = Materializer::new(
        dir.path(),
        MaterializerConfig::default(),
        MockGeocoder::new(),
        FixedStatus(InteractionStatus::Unknown),
    );
    match result {
        Err(TransformError::Configuration(RuleError::FileRead { path, .. })) => {
            assert!(path.ends_with("study.ini"));
        }
        other => panic!("unexpected result: {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_custom_rule_file_names_and_sections() {
    let dir = TempDir::new().unwrap();
    let company = COMPANY_RULES.replace("[DEFAULT_PRFAQ]", "[FALLBACK_DOC]");
    write_rules(
        dir.path(),
        [
            ("companies.rules", company.as_str()),
            ("studies.rules", STUDY_RULES),
            ("interactions.rules", INTERACTION_RULES),
        ],
    );

    let config = MaterializerConfig::from_toml(
        r#"
default_document_section = "FALLBACK_DOC"

[rule_files]
company = "companies.rules"
study = "studies.rules"
interaction = "interactions.rules"
"#,
    )
    .unwrap();

    let materializer = Materializer::new(
        dir.path(),
        config,
        MockGeocoder::new(),
        FixedStatus(InteractionStatus::Planned),
    )
    .unwrap();
    let output = materializer.materialize(&records()).unwrap();
    assert_eq!(
        output.companies[1].document.purpose,
        "Learn from Globex."
    );
}

#[test]
fn test_invalid_config_rejected() {
    let dir = rule_dir();
    let mut config = MaterializerConfig::default();
    config.geocode_timeout_secs = 0;

    let result = Materializer::new(
        dir.path(),
        config,
        MockGeocoder::new(),
        FixedStatus(InteractionStatus::Unknown),
    );
    assert!(matches!(result, Err(TransformError::Config(_))));
}

#[test]
fn test_config_from_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("roast.toml");
    fs::write(&path, "unknown_sentinel = \"?\"\ngeocode_timeout_secs = 4\n").unwrap();

    let config = MaterializerConfig::from_file(&path).unwrap();
    assert_eq!(config.unknown_sentinel, "?");
    assert_eq!(config.geocode_timeout_secs, 4);
}
