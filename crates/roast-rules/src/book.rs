//! The three rule sets of a rule directory

use crate::error::RuleError;
use crate::ruleset::RuleSet;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// Entity type a rule file applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleKind {
    /// Company rules
    Company,
    /// Study rules
    Study,
    /// Interaction rules
    Interaction,
}

impl RuleKind {
    /// Get the kind name
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleKind::Company => "company",
            RuleKind::Study => "study",
            RuleKind::Interaction => "interaction",
        }
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// File names of the rule files within a rule directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleFiles {
    /// Company rule file
    pub company: String,

    /// Study rule file
    pub study: String,

    /// Interaction rule file
    pub interaction: String,
}

impl Default for RuleFiles {
    fn default() -> Self {
        Self {
            company: "company.ini".to_string(),
            study: "study.ini".to_string(),
            interaction: "interaction.ini".to_string(),
        }
    }
}

impl RuleFiles {
    /// File name for `kind`
    pub fn file_name(&self, kind: RuleKind) -> &str {
        match kind {
            RuleKind::Company => &self.company,
            RuleKind::Study => &self.study,
            RuleKind::Interaction => &self.interaction,
        }
    }
}

/// Company, study and interaction rules loaded together
///
/// Cloning is cheap; the rule sets are shared.
#[derive(Debug, Clone)]
pub struct RuleBook {
    company: Arc<RuleSet>,
    study: Arc<RuleSet>,
    interaction: Arc<RuleSet>,
}

impl RuleBook {
    /// Load the default-named rule files from `dir`
    pub fn load<P: AsRef<Path>>(dir: P) -> Result<Self, RuleError> {
        Self::load_with(dir, &RuleFiles::default())
    }

    /// Load rule files named by `files` from `dir`
    pub fn load_with<P: AsRef<Path>>(dir: P, files: &RuleFiles) -> Result<Self, RuleError> {
        let dir = dir.as_ref();
        let load = |kind: RuleKind| -> Result<Arc<RuleSet>, RuleError> {
            let rules = RuleSet::from_file(dir.join(files.file_name(kind)))?;
            info!(
                "Loaded {} rules from {} ({} sections)",
                kind,
                rules.origin(),
                rules.sections().len()
            );
            Ok(Arc::new(rules))
        };

        Ok(Self {
            company: load(RuleKind::Company)?,
            study: load(RuleKind::Study)?,
            interaction: load(RuleKind::Interaction)?,
        })
    }

    /// Assemble a book from already parsed rule sets
    pub fn from_sets(company: RuleSet, study: RuleSet, interaction: RuleSet) -> Self {
        Self {
            company: Arc::new(company),
            study: Arc::new(study),
            interaction: Arc::new(interaction),
        }
    }

    /// Rules for `kind`
    pub fn get(&self, kind: RuleKind) -> &Arc<RuleSet> {
        match kind {
            RuleKind::Company => &self.company,
            RuleKind::Study => &self.study,
            RuleKind::Interaction => &self.interaction,
        }
    }

    /// Company rules
    pub fn company(&self) -> &Arc<RuleSet> {
        &self.company
    }

    /// Study rules
    pub fn study(&self) -> &Arc<RuleSet> {
        &self.study
    }

    /// Interaction rules
    pub fn interaction(&self) -> &Arc<RuleSet> {
        &self.interaction
    }
}
