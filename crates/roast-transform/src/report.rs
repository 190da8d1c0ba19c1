//! Per-pass reporting

use crate::error::MalformedRecord;
use serde::Serialize;

/// What happened during one transformation pass
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PassReport {
    /// Raw records received
    pub total_records: usize,

    /// Records rejected, in input order
    pub skipped: Vec<MalformedRecord>,

    /// Geocode gateway calls made
    pub geocode_lookups: usize,

    /// Geocode gateway calls that failed
    pub geocode_failures: usize,

    /// Companies materialized
    pub companies: usize,

    /// Studies materialized
    pub studies: usize,

    /// Interactions materialized
    pub interactions: usize,
}

impl PassReport {
    /// Create a report for a pass over `total_records` records
    pub fn new(total_records: usize) -> Self {
        Self {
            total_records,
            ..Self::default()
        }
    }

    /// Record a skipped record
    pub fn record_skip(&mut self, record: MalformedRecord) {
        self.skipped.push(record);
    }

    /// Number of skipped records
    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }

    /// Number of records that passed validation
    pub fn accepted(&self) -> usize {
        self.total_records.saturating_sub(self.skipped.len())
    }

    /// Generate a summary report of the pass
    pub fn summary(&self) -> String {
        let mut lines = vec![
            "Transformation Summary".to_string(),
            "======================".to_string(),
            format!("Records: {}", self.total_records),
            format!("Accepted: {}", self.accepted()),
            format!("Skipped: {}", self.skipped_count()),
            format!("Companies: {}", self.companies),
            format!("Studies: {}", self.studies),
            format!("Interactions: {}", self.interactions),
            format!(
                "Geocode lookups: {} ({} failed)",
                self.geocode_lookups, self.geocode_failures
            ),
        ];

        if !self.skipped.is_empty() {
            lines.push(String::new());
            lines.push("Skipped records:".to_string());
            for skipped in &self.skipped {
                lines.push(format!("  #{}: {}", skipped.index, skipped.defect));
            }
        }

        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RecordDefect;

    #[test]
    fn test_report_counts() {
        let mut report = PassReport::new(5);
        assert_eq!(report.accepted(), 5);

        report.record_skip(MalformedRecord {
            index: 2,
            defect: RecordDefect::EmptyField("company"),
        });
        assert_eq!(report.skipped_count(), 1);
        assert_eq!(report.accepted(), 4);
    }

    #[test]
    fn test_summary_lists_skips() {
        let mut report = PassReport::new(2);
        report.interactions = 1;
        report.record_skip(MalformedRecord {
            index: 1,
            defect: RecordDefect::BadDate("x".to_string()),
        });

        let summary = report.summary();
        assert!(summary.contains("Skipped: 1"));
        assert!(summary.contains("Interactions: 1"));
        assert!(summary.contains("#1: unparsable date token 'x'"));
    }
}
