//! Canonical entities produced by a transformation pass

use crate::{Document, Linked, Location, ObjectId};
use serde::Serialize;
use indexmap::IndexMap;
use std::fmt;
use std::str::FromStr;

/// Name → identifier map of linked objects, in first-referenced order
pub type LinkMap = IndexMap<String, ObjectId>;

/// Cross-links from one entity to the others
///
/// Empty maps are omitted from serialized output, so a company only shows
/// `linked_studies` and `linked_interactions`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Links {
    /// Linked companies
    #[serde(rename = "linked_companies", skip_serializing_if = "IndexMap::is_empty")]
    pub companies: LinkMap,

    /// Linked studies
    #[serde(rename = "linked_studies", skip_serializing_if = "IndexMap::is_empty")]
    pub studies: LinkMap,

    /// Linked interactions
    #[serde(rename = "linked_interactions", skip_serializing_if = "IndexMap::is_empty")]
    pub interactions: LinkMap,
}

impl Links {
    /// Create empty links
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style: add a linked company
    pub fn with_company(mut self, name: impl Into<String>, id: ObjectId) -> Self {
        self.companies.insert(name.into(), id);
        self
    }

    /// Builder-style: add a linked study
    pub fn with_study(mut self, name: impl Into<String>, id: ObjectId) -> Self {
        self.studies.insert(name.into(), id);
        self
    }

    /// Builder-style: add a linked interaction
    pub fn with_interaction(mut self, name: impl Into<String>, id: ObjectId) -> Self {
        self.interactions.insert(name.into(), id);
        self
    }

    /// Append every link from `incoming` that is not already present
    pub fn absorb(&mut self, incoming: Links) {
        for (name, id) in incoming.companies {
            self.companies.entry(name).or_insert(id);
        }
        for (name, id) in incoming.studies {
            self.studies.entry(name).or_insert(id);
        }
        for (name, id) in incoming.interactions {
            self.interactions.entry(name).or_insert(id);
        }
    }

    /// Total number of links across all maps
    pub fn len(&self) -> usize {
        self.companies.len() + self.studies.len() + self.interactions.len()
    }

    /// Whether there are no links at all
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A company referenced by one or more raw records
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Company {
    /// Content-derived identifier
    pub id: ObjectId,
    /// Canonical (possibly rewritten) name
    pub name: String,
    /// Industry classification
    pub industry: String,
    /// Role of the company relative to the studies (e.g. Customer)
    pub role: String,
    /// Website URL
    pub url: String,
    /// Logo URL
    pub logo_url: String,
    /// Icon URL
    pub icon: String,
    /// Street address
    pub street_address: String,
    /// City
    pub city: String,
    /// State or province
    pub state_province: String,
    /// Country
    pub country: String,
    /// Region
    pub region: String,
    /// Postal code
    pub zip_postal: String,
    /// Phone number
    pub phone: String,
    /// Description
    pub description: String,
    /// SEC central index key
    pub cik: String,
    /// Stock ticker symbol
    pub stock_symbol: String,
    /// Most recent 10-K filing URL
    pub recent10k_url: String,
    /// Most recent 10-Q filing URL
    pub recent10q_url: String,
    /// Coordinates, or the unknown sentinel
    #[serde(flatten)]
    pub location: Location,
    /// Templated company document
    pub document: Document,
    /// Links to studies and interactions
    #[serde(flatten)]
    pub links: Links,
}

/// A study referenced by one or more raw records
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Study {
    /// Content-derived identifier
    pub id: ObjectId,
    /// Canonical (possibly rewritten) name
    pub name: String,
    /// Description
    pub description: String,
    /// Access groups
    pub groups: String,
    /// Links to companies and interactions
    #[serde(flatten)]
    pub links: Links,
}

/// Status of an interaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum InteractionStatus {
    /// Completed
    Completed,
    /// Scheduled
    Scheduled,
    /// Canceled
    Canceled,
    /// Planned
    Planned,
    /// Unknown
    Unknown,
}

impl InteractionStatus {
    /// Every status, in enumeration order
    pub const ALL: [InteractionStatus; 5] = [
        InteractionStatus::Completed,
        InteractionStatus::Scheduled,
        InteractionStatus::Canceled,
        InteractionStatus::Planned,
        InteractionStatus::Unknown,
    ];

    /// Get the status name
    pub fn as_str(&self) -> &'static str {
        match self {
            InteractionStatus::Completed => "Completed",
            InteractionStatus::Scheduled => "Scheduled",
            InteractionStatus::Canceled => "Canceled",
            InteractionStatus::Planned => "Planned",
            InteractionStatus::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for InteractionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InteractionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|status| status.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("Invalid interaction status: {}", s))
    }
}

/// One interaction, synthesized per raw record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Interaction {
    /// Content-derived identifier
    pub id: ObjectId,
    /// Synthesized name: `date-study-company`
    pub name: String,
    /// Description
    pub description: String,
    /// When the interaction took place, ISO-8601
    pub date_time: String,
    /// Whether the interaction is public
    pub public: bool,
    /// Access groups
    pub groups: String,
    /// Status, as assigned by the status strategy
    pub status: InteractionStatus,
    /// Interaction type
    pub interaction_type: String,
    /// Abstract text
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    /// Substudy identifier
    pub substudy: String,
    /// Contact name
    pub contact_name: String,
    /// Contact email
    pub contact_email: String,
    /// Contact LinkedIn handle
    pub contact_linkedin: String,
    /// Contact Twitter handle
    pub contact_twitter: String,
    /// Source URL
    pub url: String,
    /// Thumbnail reference
    pub thumbnail: String,
    /// Contact street address
    pub street_address: String,
    /// City
    pub city: String,
    /// Contact postal code
    pub zip_postal: String,
    /// State or province
    pub state_province: String,
    /// Country
    pub country: String,
    /// Region
    pub region: String,
    /// Contact phone
    pub phone: String,
    /// Coordinates, or the unknown sentinel
    #[serde(flatten)]
    pub location: Location,
    /// Links to the study and company
    #[serde(flatten)]
    pub links: Links,
}

macro_rules! impl_linked {
    ($($entity:ty),*) => {
        $(
            impl Linked for $entity {
                fn links(&self) -> &Links {
                    &self.links
                }

                fn links_mut(&mut self) -> &mut Links {
                    &mut self.links
                }
            }
        )*
    };
}

impl_linked!(Company, Study, Interaction);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absorb_keeps_existing_entries() {
        let first = ObjectId::digest("first", None);
        let second = ObjectId::digest("second", None);

        let mut links = Links::new().with_study("S", first.clone());
        links.absorb(
            Links::new()
                .with_study("S", second)
                .with_interaction("I", first.clone()),
        );

        assert_eq!(links.studies.len(), 1);
        assert_eq!(links.studies["S"], first);
        assert_eq!(links.interactions.len(), 1);
        assert_eq!(links.len(), 2);
    }

    #[test]
    fn test_links_keep_first_referenced_order() {
        let id = |name: &str| ObjectId::digest(name, None);
        let mut links = Links::new().with_study("Zeta", id("Zeta"));
        links.absorb(Links::new().with_study("Alpha", id("Alpha")));
        links.absorb(Links::new().with_study("Mid", id("Mid")).with_study("Zeta", id("x")));

        let names: Vec<&str> = links.studies.keys().map(String::as_str).collect();
        assert_eq!(names, ["Zeta", "Alpha", "Mid"]);

        let json = serde_json::to_string(&links).unwrap();
        let zeta = json.find("Zeta").unwrap();
        let alpha = json.find("Alpha").unwrap();
        assert!(zeta < alpha);
    }

    #[test]
    fn test_empty_link_maps_are_not_serialized() {
        let study = Study {
            id: ObjectId::digest("S", None),
            name: "S".to_string(),
            description: "d".to_string(),
            groups: "g".to_string(),
            links: Links::new().with_company("C", ObjectId::digest("C", None)),
        };

        let json = serde_json::to_value(&study).unwrap();
        assert!(json.get("linked_companies").is_some());
        assert!(json.get("linked_studies").is_none());
        assert!(json.get("linked_interactions").is_none());
    }

    #[test]
    fn test_status_parse() {
        assert_eq!(
            "completed".parse::<InteractionStatus>().unwrap(),
            InteractionStatus::Completed
        );
        assert_eq!(
            "Planned".parse::<InteractionStatus>().unwrap(),
            InteractionStatus::Planned
        );
        assert!("done".parse::<InteractionStatus>().is_err());
    }
}
