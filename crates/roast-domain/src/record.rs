//! Raw records produced by extractors

use serde::{Deserialize, Serialize};

/// Number of positional fields every raw record must carry
pub const RECORD_ARITY: usize = 11;

/// Named positions within a raw record
///
/// Positions 5 and 8 are carried by extractors but not consumed here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RawField {
    /// Date/time token, `YYYYMMDDHHMM`
    Date,
    /// Geographic region (e.g. `AMER`)
    Region,
    /// Country
    Country,
    /// State or province
    StateProvince,
    /// City
    City,
    /// Raw study name token
    Study,
    /// Raw company name token
    Company,
    /// Source URL of the interaction artifact
    Url,
    /// Thumbnail reference
    Thumbnail,
}

impl RawField {
    /// Position of this field within a raw record
    pub const fn index(self) -> usize {
        match self {
            RawField::Date => 0,
            RawField::Region => 1,
            RawField::Country => 2,
            RawField::StateProvince => 3,
            RawField::City => 4,
            RawField::Study => 6,
            RawField::Company => 7,
            RawField::Url => 9,
            RawField::Thumbnail => 10,
        }
    }

    /// Human-readable field name for diagnostics
    pub const fn name(self) -> &'static str {
        match self {
            RawField::Date => "date",
            RawField::Region => "region",
            RawField::Country => "country",
            RawField::StateProvince => "state_province",
            RawField::City => "city",
            RawField::Study => "study",
            RawField::Company => "company",
            RawField::Url => "url",
            RawField::Thumbnail => "thumbnail",
        }
    }
}

/// An ordered sequence of positional fields from an extractor
///
/// Records are immutable once built. Field positions are a fixed contract,
/// see [`RawField`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawRecord(Vec<String>);

impl RawRecord {
    /// Create a record from its fields
    pub fn new(fields: Vec<String>) -> Self {
        Self(fields)
    }

    /// Number of fields present
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the record has no fields at all
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether the record carries every position the contract requires
    pub fn is_complete(&self) -> bool {
        self.0.len() >= RECORD_ARITY
    }

    /// Get a named field, if the record is long enough to carry it
    pub fn get(&self, field: RawField) -> Option<&str> {
        self.0.get(field.index()).map(String::as_str)
    }

    /// All fields in order
    pub fn fields(&self) -> &[String] {
        &self.0
    }
}

impl From<Vec<String>> for RawRecord {
    fn from(fields: Vec<String>) -> Self {
        Self(fields)
    }
}

impl<S: Into<String>> FromIterator<S> for RawRecord {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}
