//! Per-record validation and name synthesis

use crate::error::{MalformedRecord, RecordDefect};
use crate::naming::{interaction_name, make_id, Names};
use chrono::NaiveDateTime;
use roast_domain::{location_text, ObjectId, RawField, RawRecord, RECORD_ARITY};

/// Format of the raw date token
pub const DATE_TOKEN_FORMAT: &str = "%Y%m%d%H%M";

/// Parse a `YYYYMMDDHHMM` token into `YYYY-MM-DDTHH:MM:SS`
pub fn parse_date_time(token: &str) -> Result<String, RecordDefect> {
    if token.len() != 12 || !token.bytes().all(|b| b.is_ascii_digit()) {
        return Err(RecordDefect::BadDate(token.to_string()));
    }
    NaiveDateTime::parse_from_str(token, DATE_TOKEN_FORMAT)
        .map(|dt| dt.format("%Y-%m-%dT%H:%M:%S").to_string())
        .map_err(|_| RecordDefect::BadDate(token.to_string()))
}

/// Everything the transformers need from one validated raw record
///
/// Built once per record and shared by the three transformers, so names and
/// identifiers are computed exactly once.
#[derive(Debug, Clone)]
pub struct RecordContext<'r> {
    /// Position of the record in the input
    pub index: usize,
    /// Raw `YYYYMMDDHHMM` date token
    pub date: &'r str,
    /// Region
    pub region: &'r str,
    /// Country
    pub country: &'r str,
    /// State or province
    pub state_province: &'r str,
    /// City
    pub city: &'r str,
    /// URL
    pub url: &'r str,
    /// Thumbnail reference
    pub thumbnail: &'r str,
    /// Company natural key
    pub raw_company: &'r str,
    /// Study natural key
    pub raw_study: &'r str,
    /// Canonical company name
    pub company_name: String,
    /// Company identifier
    pub company_id: ObjectId,
    /// Canonical study name
    pub study_name: String,
    /// Study identifier
    pub study_id: ObjectId,
    /// Synthesized interaction name
    pub interaction_name: String,
    /// Interaction identifier
    pub interaction_id: ObjectId,
    /// ISO-8601 interaction timestamp
    pub date_time: String,
}

impl<'r> RecordContext<'r> {
    /// Validate `record` and derive its names and identifiers
    pub fn resolve(
        index: usize,
        record: &'r RawRecord,
        names: &Names,
    ) -> Result<Self, MalformedRecord> {
        Self::build(index, record, names).map_err(|defect| MalformedRecord { index, defect })
    }

    fn build(index: usize, record: &'r RawRecord, names: &Names) -> Result<Self, RecordDefect> {
        if !record.is_complete() {
            return Err(RecordDefect::TooShort {
                expected: RECORD_ARITY,
                found: record.len(),
            });
        }
        let field = |f: RawField| record.get(f).unwrap_or("");

        let date = field(RawField::Date);
        let raw_company = field(RawField::Company);
        let raw_study = field(RawField::Study);
        if raw_company.trim().is_empty() {
            return Err(RecordDefect::EmptyField(RawField::Company.name()));
        }
        if raw_study.trim().is_empty() {
            return Err(RecordDefect::EmptyField(RawField::Study.name()));
        }

        let company_name = names.company.resolve_name(raw_company);
        let study_name = names.study.resolve_name(raw_study);
        let interaction_name = interaction_name(date, &study_name, &company_name)?;
        let date_time = parse_date_time(date)?;

        Ok(Self {
            index,
            date,
            region: field(RawField::Region),
            country: field(RawField::Country),
            state_province: field(RawField::StateProvince),
            city: field(RawField::City),
            url: field(RawField::Url),
            thumbnail: field(RawField::Thumbnail),
            raw_company,
            raw_study,
            company_id: make_id(&company_name, None),
            company_name,
            study_id: make_id(&study_name, None),
            study_name,
            interaction_id: make_id(&interaction_name, None),
            interaction_name,
            date_time,
        })
    }

    /// Geocoder query text from the record's own address fields
    pub fn location(&self) -> String {
        location_text(self.city, self.state_province, self.country)
    }
}
