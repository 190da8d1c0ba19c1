//! Company documents assembled from rule sections
//!
//! A document section is a flat list of keys classified by prefix:
//!
//! ```text
//! [Acme_Corp_PRFAQ]
//! Introduction = $COMPANY$ builds widgets.
//! Purpose = Understand how $COMPANY$ buys.
//! Action_Text = Follow up with $COMPANY$.
//! Action_Owner_1 = Sales
//! ```
//!
//! `Action_<Name>_...` keys become actions named `<Name>`; `Action_Text`
//! becomes the reserved `text` action.

use roast_domain::{Document, TEXT_ACTION};
use roast_rules::{RuleError, RuleSet, Section};
use std::sync::Arc;
use tracing::debug;

const INTRODUCTION_PREFIX: &str = "introduction";
const PURPOSE_PREFIX: &str = "purpose";
const ACTION_PREFIX: &str = "action_";

/// Suffix of entity-specific document sections
pub const DOCUMENT_SECTION_SUFFIX: &str = "_PRFAQ";

/// Name of the document section for an entity named `name`
pub fn section_name(name: &str) -> String {
    format!("{}{}", name.replace(' ', "_"), DOCUMENT_SECTION_SUFFIX)
}

fn starts_with_ignore_case(key: &str, prefix: &str) -> bool {
    key.len() >= prefix.len()
        && key.is_char_boundary(prefix.len())
        && key[..prefix.len()].eq_ignore_ascii_case(prefix)
}

/// Name of the action an `Action_` key defines, or `None` if it names none
fn action_name(key: &str) -> Option<&str> {
    let segment = key.split('_').nth(1)?;
    if segment.is_empty() {
        None
    } else if segment.eq_ignore_ascii_case(TEXT_ACTION) {
        Some(TEXT_ACTION)
    } else {
        Some(segment)
    }
}

/// Classify the keys of `section` into an unnormalized document
///
/// Keys are visited in file order; a later key of the same kind replaces
/// the earlier value. Unmatched keys are ignored.
pub fn parse_section(section: &Section) -> Document {
    let mut document = Document::new();
    for entry in section.entries() {
        let key = entry.key.as_str();
        if starts_with_ignore_case(key, INTRODUCTION_PREFIX) {
            document.introduction = entry.value.clone();
        } else if starts_with_ignore_case(key, PURPOSE_PREFIX) {
            document.purpose = entry.value.clone();
        } else if starts_with_ignore_case(key, ACTION_PREFIX) {
            match action_name(key) {
                Some(name) => document.set_action(name, entry.value.as_str()),
                None => debug!("Ignoring action key without a name: {}", key),
            }
        }
    }
    document
}

/// Builds the templated document for each company
#[derive(Debug, Clone)]
pub struct DocumentAssembler {
    rules: Arc<RuleSet>,
    placeholder: String,
    default_section: String,
}

impl DocumentAssembler {
    /// Create an assembler; fails if `default_section` is absent from `rules`
    pub fn new(
        rules: Arc<RuleSet>,
        placeholder: impl Into<String>,
        default_section: impl Into<String>,
    ) -> Result<Self, RuleError> {
        let default_section = default_section.into();
        rules.require_section(&default_section)?;
        Ok(Self {
            rules,
            placeholder: placeholder.into(),
            default_section,
        })
    }

    /// Trim, join continuation lines with spaces, and fill in `name`
    pub fn normalize(&self, text: &str, name: &str) -> String {
        text.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
            .replace(&self.placeholder, name)
    }

    /// The section a document for `name` is built from
    pub fn select_section(&self, name: &str) -> Result<&Section, RuleError> {
        match self.rules.section(&section_name(name)) {
            Some(section) => Ok(section),
            None => self.rules.require_section(&self.default_section),
        }
    }

    /// Assemble the document for the company named `name`
    pub fn assemble(&self, name: &str) -> Result<Document, RuleError> {
        let section = self.select_section(name)?;
        debug!("Assembling document for '{}' from [{}]", name, section.name());
        Ok(parse_section(section).map_text(|text| self.normalize(text, name)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RULES: &str = "\
[DEFAULT_PRFAQ]
Introduction = $COMPANY$ is a company.
Purpose = Learn about $COMPANY$.
Action_Text = Talk to $COMPANY$.

[Acme_Corp_PRFAQ]
Introduction = Welcome to
    $COMPANY$,
    maker of things.
Purpose = Sell more.
Action_Text = Call $COMPANY$ and $COMPANY$ again.
Action_Owner = Sales team
Notes = ignored
";

    fn assembler() -> DocumentAssembler {
        let rules = Arc::new(RuleSet::parse("company.ini", RULES).unwrap());
        DocumentAssembler::new(rules, "$COMPANY$", "DEFAULT_PRFAQ").unwrap()
    }

    #[test]
    fn test_section_name() {
        assert_eq!(section_name("Acme Corp"), "Acme_Corp_PRFAQ");
        assert_eq!(section_name("Initech"), "Initech_PRFAQ");
    }

    #[test]
    fn test_action_name() {
        assert_eq!(action_name("Action_Owner"), Some("Owner"));
        assert_eq!(action_name("Action_Owner_2"), Some("Owner"));
        assert_eq!(action_name("action_TEXT"), Some("text"));
        assert_eq!(action_name("Action_"), None);
        assert_eq!(action_name("Action__x"), None);
    }

    #[test]
    fn test_entity_specific_document() {
        let doc = assembler().assemble("Acme Corp").unwrap();

        assert_eq!(doc.introduction, "Welcome to Acme Corp, maker of things.");
        assert_eq!(doc.purpose, "Sell more.");
        assert_eq!(doc.action("text"), Some("Call Acme Corp and Acme Corp again."));
        assert_eq!(doc.action("Owner"), Some("Sales team"));

        let names: Vec<_> = doc.actions().iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["text", "Owner"]);
    }

    #[test]
    fn test_falls_back_to_default_section() {
        let doc = assembler().assemble("Initech").unwrap();

        assert_eq!(doc.introduction, "Initech is a company.");
        assert_eq!(doc.purpose, "Learn about Initech.");
        assert_eq!(doc.action("text"), Some("Talk to Initech."));
        assert_eq!(doc.actions().len(), 1);
    }

    #[test]
    fn test_missing_default_section_fails_at_construction() {
        let rules = Arc::new(RuleSet::parse("company.ini", "[DEFAULT]\n").unwrap());
        let result = DocumentAssembler::new(rules, "$COMPANY$", "DEFAULT_PRFAQ");
        assert!(matches!(result, Err(RuleError::MissingSection { .. })));
    }

    #[test]
    fn test_prefix_classification_is_case_insensitive() {
        let rules = RuleSet::parse(
            "t",
            "[doc]\nINTRODUCTION_long = a\npurpose2 = b\nACTION_Review = c\n",
        )
        .unwrap();
        let doc = parse_section(rules.section("doc").unwrap());

        assert_eq!(doc.introduction, "a");
        assert_eq!(doc.purpose, "b");
        assert_eq!(doc.action("Review"), Some("c"));
    }

    #[test]
    fn test_later_key_overwrites() {
        let rules = RuleSet::parse(
            "t",
            "[doc]\nAction_Owner_1 = first\nAction_Text = t\nAction_Owner_2 = second\n",
        )
        .unwrap();
        let doc = parse_section(rules.section("doc").unwrap());

        assert_eq!(doc.action("Owner"), Some("second"));
        assert_eq!(doc.actions()[0].name, "Owner");
    }
}
