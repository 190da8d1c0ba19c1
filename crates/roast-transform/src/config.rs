//! Configuration for a transformation pass

use roast_rules::{RuleFiles, DEFAULT_SECTION};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Configuration for the [`Materializer`](crate::Materializer)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaterializerConfig {
    /// Fallback section consulted when no name-specific rule exists
    pub default_section: String,

    /// Rule value meaning "geocode this location"
    pub unknown_sentinel: String,

    /// Token replaced by the company name in document text
    pub document_placeholder: String,

    /// Document section used when a company has no `<Name>_PRFAQ` section
    pub default_document_section: String,

    /// Maximum time for a single geocode lookup (seconds)
    pub geocode_timeout_secs: u64,

    /// Rule file names within the rule directory
    pub rule_files: RuleFiles,
}

impl MaterializerConfig {
    /// Get the geocode timeout as a Duration
    pub fn geocode_timeout(&self) -> Duration {
        Duration::from_secs(self.geocode_timeout_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.default_section.trim().is_empty() {
            return Err("default_section must not be empty".to_string());
        }
        if self.unknown_sentinel.is_empty() {
            return Err("unknown_sentinel must not be empty".to_string());
        }
        if self.document_placeholder.is_empty() {
            return Err("document_placeholder must not be empty".to_string());
        }
        if self.default_document_section.trim().is_empty() {
            return Err("default_document_section must not be empty".to_string());
        }
        if self.geocode_timeout_secs == 0 {
            return Err("geocode_timeout_secs must be greater than 0".to_string());
        }

        let files = [
            &self.rule_files.company,
            &self.rule_files.study,
            &self.rule_files.interaction,
        ];
        if files.iter().any(|name| name.trim().is_empty()) {
            return Err("rule file names must not be empty".to_string());
        }
        if files[0] == files[1] || files[0] == files[2] || files[1] == files[2] {
            return Err("rule file names must be distinct".to_string());
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }

    /// Load and validate configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
        let config = Self::from_toml(&contents)?;
        config.validate()?;
        Ok(config)
    }
}

impl Default for MaterializerConfig {
    fn default() -> Self {
        Self {
            default_section: DEFAULT_SECTION.to_string(),
            unknown_sentinel: "Unknown".to_string(),
            document_placeholder: "$COMPANY$".to_string(),
            default_document_section: "DEFAULT_PRFAQ".to_string(),
            geocode_timeout_secs: 10,
            rule_files: RuleFiles::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = MaterializerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.geocode_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_invalid_timeout() {
        let mut config = MaterializerConfig::default();
        config.geocode_timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_duplicate_rule_files() {
        let mut config = MaterializerConfig::default();
        config.rule_files.study = config.rule_files.company.clone();
        assert_eq!(
            config.validate().unwrap_err(),
            "rule file names must be distinct"
        );
    }

    #[test]
    fn test_empty_sentinel() {
        let mut config = MaterializerConfig::default();
        config.unknown_sentinel.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let mut config = MaterializerConfig::default();
        config.geocode_timeout_secs = 3;
        config.rule_files.company = "companies.ini".to_string();

        let toml_str = config.to_toml().unwrap();
        let parsed = MaterializerConfig::from_toml(&toml_str).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = MaterializerConfig::from_toml("unknown_sentinel = \"N/A\"\n").unwrap();
        assert_eq!(config.unknown_sentinel, "N/A");
        assert_eq!(config.default_document_section, "DEFAULT_PRFAQ");
        assert_eq!(config.rule_files, RuleFiles::default());
    }
}
