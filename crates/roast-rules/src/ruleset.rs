//! Immutable rule sets with override/default resolution

use crate::error::RuleError;
use crate::ini::{parse_ini, RawSection};
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

/// Name of the reserved fallback section
pub const DEFAULT_SECTION: &str = "DEFAULT";

/// One `key = value` entry, with the key as written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Key as written in the file
    pub key: String,
    /// Value, continuation lines joined with `\n`
    pub value: String,
}

/// A named section of a rule file
///
/// Key lookups are case-insensitive; entries keep file order and written case.
#[derive(Debug, Clone)]
pub struct Section {
    name: String,
    entries: Vec<Entry>,
    index: HashMap<String, usize>,
}

impl Section {
    fn from_raw(raw: RawSection) -> Self {
        let mut entries = Vec::with_capacity(raw.entries.len());
        let mut index = HashMap::with_capacity(raw.entries.len());
        for (key, value) in raw.entries {
            index.insert(key.to_lowercase(), entries.len());
            entries.push(Entry { key, value });
        }
        Self {
            name: raw.name,
            entries,
            index,
        }
    }

    /// Section name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Look up a value by key
    pub fn get(&self, key: &str) -> Option<&str> {
        self.index
            .get(&key.to_lowercase())
            .map(|&idx| self.entries[idx].value.as_str())
    }

    /// Whether the section holds `key`
    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(&key.to_lowercase())
    }

    /// Entries in file order
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the section is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Where a resolved value came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// A name-specific entry in the override section
    Override,
    /// The fallback entry in the default section
    Default,
}

/// A resolved value and its origin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolved<'a> {
    /// The value
    pub value: &'a str,
    /// Where it came from
    pub origin: Origin,
}

/// The rules for one entity type
///
/// Loaded once and read-only thereafter; share it behind an `Arc`.
#[derive(Debug, Clone)]
pub struct RuleSet {
    origin: String,
    sections: Vec<Section>,
    by_name: HashMap<String, usize>,
}

impl RuleSet {
    /// Parse rule text; `origin` names the source in diagnostics
    pub fn parse(origin: impl Into<String>, text: &str) -> Result<Self, RuleError> {
        let origin = origin.into();
        let sections: Vec<Section> = parse_ini(text, &origin)?
            .into_iter()
            .map(Section::from_raw)
            .collect();
        let by_name = sections
            .iter()
            .enumerate()
            .map(|(idx, section)| (section.name.clone(), idx))
            .collect();

        debug!("Parsed {} sections from {}", sections.len(), origin);

        Ok(Self {
            origin,
            sections,
            by_name,
        })
    }

    /// Load and parse a rule file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, RuleError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| RuleError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        let origin = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self::parse(origin, &contents)
    }

    /// Name of the file these rules came from
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Get a section by name
    pub fn section(&self, name: &str) -> Option<&Section> {
        self.by_name.get(name).map(|&idx| &self.sections[idx])
    }

    /// Whether a section exists
    pub fn has_section(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// All sections in file order
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// The name-specific entry for `entity_name` in `section`, if any
    pub fn override_for(&self, entity_name: &str, section: &str) -> Option<&str> {
        self.section(section).and_then(|s| s.get(entity_name))
    }

    /// Whether `section` holds an entry for `entity_name`
    pub fn has_override(&self, entity_name: &str, section: &str) -> bool {
        self.override_for(entity_name, section).is_some()
    }

    /// Resolve `section[entity_name]`, falling back to `DEFAULT[default_key]`
    pub fn resolve(
        &self,
        entity_name: &str,
        section: &str,
        default_key: &str,
    ) -> Result<&str, RuleError> {
        self.lookup(entity_name, section, default_key)
            .map(|resolved| resolved.value)
    }

    /// Resolve with an explicit fallback section
    pub fn resolve_in(
        &self,
        entity_name: &str,
        section: &str,
        default_key: &str,
        default_section: &str,
    ) -> Result<&str, RuleError> {
        self.lookup_in(entity_name, section, default_key, default_section)
            .map(|resolved| resolved.value)
    }

    /// Like [`resolve`](Self::resolve), also reporting where the value came from
    pub fn lookup(
        &self,
        entity_name: &str,
        section: &str,
        default_key: &str,
    ) -> Result<Resolved<'_>, RuleError> {
        self.lookup_in(entity_name, section, default_key, DEFAULT_SECTION)
    }

    /// Like [`resolve_in`](Self::resolve_in), also reporting where the value came from
    pub fn lookup_in(
        &self,
        entity_name: &str,
        section: &str,
        default_key: &str,
        default_section: &str,
    ) -> Result<Resolved<'_>, RuleError> {
        if let Some(value) = self.override_for(entity_name, section) {
            return Ok(Resolved {
                value,
                origin: Origin::Override,
            });
        }

        self.section(default_section)
            .and_then(|s| s.get(default_key))
            .map(|value| Resolved {
                value,
                origin: Origin::Default,
            })
            .ok_or_else(|| RuleError::MissingKey {
                origin: self.origin.clone(),
                entity: entity_name.to_string(),
                section: section.to_string(),
                default_key: default_key.to_string(),
                default_section: default_section.to_string(),
            })
    }

    /// Fail unless every key in `keys` exists in the `DEFAULT` section
    ///
    /// Transformers call this at construction so that later lookups can only
    /// fail on values, never on missing defaults.
    pub fn require_defaults<'k, I>(&self, keys: I) -> Result<(), RuleError>
    where
        I: IntoIterator<Item = &'k str>,
    {
        self.require_defaults_in(DEFAULT_SECTION, keys)
    }

    /// Like [`require_defaults`](Self::require_defaults) with an explicit fallback section
    pub fn require_defaults_in<'k, I>(&self, default_section: &str, keys: I) -> Result<(), RuleError>
    where
        I: IntoIterator<Item = &'k str>,
    {
        let defaults = self.require_section(default_section)?;
        for key in keys {
            if !defaults.contains_key(key) {
                return Err(RuleError::MissingDefault {
                    origin: self.origin.clone(),
                    section: default_section.to_string(),
                    key: key.to_string(),
                });
            }
        }
        Ok(())
    }

    /// Get a section that must exist
    pub fn require_section(&self, name: &str) -> Result<&Section, RuleError> {
        self.section(name).ok_or_else(|| RuleError::MissingSection {
            origin: self.origin.clone(),
            section: name.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RULES: &str = "\
[DEFAULT]
industry = Unknown
role = Customer

[names]
acme = Acme Corp

[industries]
Acme Corp = Manufacturing
Initech = Software
";

    fn rules() -> RuleSet {
        RuleSet::parse("company.ini", RULES).unwrap()
    }

    #[test]
    fn test_override_wins() {
        let rules = rules();
        assert_eq!(
            rules.resolve("Acme Corp", "industries", "industry").unwrap(),
            "Manufacturing"
        );
    }

    #[test]
    fn test_fallback_to_default() {
        let rules = rules();
        assert_eq!(
            rules.resolve("Globex", "industries", "industry").unwrap(),
            "Unknown"
        );
        assert_eq!(rules.resolve("Acme Corp", "roles", "role").unwrap(), "Customer");
    }

    #[test]
    fn test_lookup_reports_origin() {
        let rules = rules();
        let resolved = rules.lookup("Initech", "industries", "industry").unwrap();
        assert_eq!(resolved.origin, Origin::Override);

        let resolved = rules.lookup("Globex", "industries", "industry").unwrap();
        assert_eq!(resolved.origin, Origin::Default);
    }

    #[test]
    fn test_missing_default_is_error() {
        let rules = rules();
        let err = rules.resolve("Globex", "phones", "phone").unwrap_err();
        match err {
            RuleError::MissingKey {
                section, default_key, ..
            } => {
                assert_eq!(section, "phones");
                assert_eq!(default_key, "phone");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_resolve_in_custom_default_section() {
        let rules = RuleSet::parse("t", "[fallback]\nk = v\n").unwrap();
        assert_eq!(rules.resolve_in("x", "missing", "k", "fallback").unwrap(), "v");
        assert!(rules.resolve("x", "missing", "k").is_err());
    }

    #[test]
    fn test_entity_lookup_is_case_insensitive() {
        let rules = rules();
        assert!(rules.has_override("ACME", "names"));
        assert_eq!(rules.override_for("initech", "industries"), Some("Software"));
    }

    #[test]
    fn test_section_names_are_case_sensitive() {
        let rules = rules();
        assert!(rules.has_section("industries"));
        assert!(!rules.has_section("Industries"));
    }

    #[test]
    fn test_require_defaults() {
        let rules = rules();
        assert!(rules.require_defaults(["industry", "role"]).is_ok());
        assert!(matches!(
            rules.require_defaults(["industry", "phone"]),
            Err(RuleError::MissingDefault { ref key, .. }) if key == "phone"
        ));
    }

    #[test]
    fn test_require_defaults_without_default_section() {
        let rules = RuleSet::parse("t", "[names]\na = b\n").unwrap();
        assert!(matches!(
            rules.require_defaults(["x"]),
            Err(RuleError::MissingSection { .. })
        ));
    }

    #[test]
    fn test_entries_keep_order_and_case() {
        let rules = RuleSet::parse("t", "[doc]\nIntroduction = i\nAction_Owner = o\nPurpose = p\n").unwrap();
        let keys: Vec<_> = rules
            .section("doc")
            .unwrap()
            .entries()
            .iter()
            .map(|e| e.key.as_str())
            .collect();
        assert_eq!(keys, vec!["Introduction", "Action_Owner", "Purpose"]);
    }
}
