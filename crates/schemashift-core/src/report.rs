//! Report schema (stable v1)
//!
//! This schema is STABLE and VERSIONED.
//! Breaking changes require a new version.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use crate::config::Dialect;
use crate::diagnostic::Severity;
use crate::result::{CompareResult, ResultType};

/// Report schema version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportVersion {
    /// Major version (breaking changes)
    pub major: u32,

    /// Minor version (backward-compatible additions)
    pub minor: u32,
}

impl ReportVersion {
    /// Current report schema version
    pub const CURRENT: ReportVersion = ReportVersion { major: 1, minor: 0 };
}

impl std::fmt::Display for ReportVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// Summary statistics for a report
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSummary {
    /// Total number of results
    pub total: usize,

    /// Objects added
    pub added: usize,

    /// Objects dropped
    pub deleted: usize,

    /// Objects changed or renamed
    pub changed: usize,

    /// Error diagnostics across all results
    pub errors: usize,

    /// Warning diagnostics across all results
    pub warnings: usize,

    /// Info diagnostics across all results
    pub info: usize,
}

impl ReportSummary {
    /// Tally results and their diagnostics
    pub fn from_results(results: &[CompareResult]) -> Self {
        let diagnostics = || results.iter().flat_map(|r| r.diagnostics.iter());
        let with_type = |t: ResultType| results.iter().filter(|r| r.result_type == t).count();

        Self {
            total: results.len(),
            added: with_type(ResultType::Add),
            deleted: with_type(ResultType::Delete),
            changed: with_type(ResultType::Change),
            errors: diagnostics().filter(|d| d.severity == Severity::Error).count(),
            warnings: diagnostics().filter(|d| d.severity == Severity::Warn).count(),
            info: diagnostics().filter(|d| d.severity == Severity::Info).count(),
        }
    }
}

/// Comparison report (report.json v1)
///
/// This is the stable output format.
/// All fields are versioned and backward-compatible.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// Schema version
    pub version: ReportVersion,

    /// Timestamp (ISO 8601)
    pub timestamp: String,

    /// Dialect the script targets
    pub dialect: Dialect,

    /// Summary statistics
    pub summary: ReportSummary,

    /// Ordered results
    pub results: Vec<CompareResult>,

    /// SHA-256 of the rendered script (hex)
    pub checksum: String,
}

impl Report {
    /// Create a report from ordered results and the script rendered from them
    pub fn new(dialect: Dialect, results: Vec<CompareResult>, script: &str) -> Self {
        Self {
            version: ReportVersion::CURRENT,
            timestamp: chrono::Utc::now().to_rfc3339(),
            dialect,
            summary: ReportSummary::from_results(&results),
            results,
            checksum: checksum(script),
        }
    }

    /// Check if the report has any errors
    pub fn has_errors(&self) -> bool {
        self.summary.errors > 0
    }

    /// Check if the comparison found any differences
    pub fn has_changes(&self) -> bool {
        self.summary.total > 0
    }

    /// Serialize to JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Save to file
    pub fn save_to_file(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let json = self.to_json()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
        std::fs::write(path, json)
    }
}

/// Hex-encoded SHA-256 of a script
pub fn checksum(script: &str) -> String {
    hex::encode(Sha256::digest(script.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostic::{Diagnostic, DiagnosticCode};
    use crate::result::SchemaObjectType;

    fn results() -> Vec<CompareResult> {
        vec![
            CompareResult::new(SchemaObjectType::Table, ResultType::Add, "Orders", "CREATE TABLE Orders (Id INT);"),
            CompareResult::new(SchemaObjectType::Sequence, ResultType::Delete, "SEQ_ORDER_ID", "DROP SEQUENCE SEQ_ORDER_ID;")
                .with_diagnostics(vec![Diagnostic::from_code(DiagnosticCode::UnsupportedFeature, "no sequences")]),
            CompareResult::new(SchemaObjectType::Column, ResultType::Change, "Name", "ALTER TABLE Customers ALTER COLUMN Name TEXT;")
                .with_table("Customers"),
        ]
    }

    #[test]
    fn empty_report() {
        let report = Report::new(Dialect::Sqlite, Vec::new(), "");
        assert_eq!(report.version, ReportVersion::CURRENT);
        assert_eq!(report.summary.total, 0);
        assert!(!report.has_errors());
        assert!(!report.has_changes());
    }

    #[test]
    fn summary_counts() {
        let report = Report::new(Dialect::PostgreSql, results(), "script");
        assert_eq!(report.summary.total, 3);
        assert_eq!(report.summary.added, 1);
        assert_eq!(report.summary.deleted, 1);
        assert_eq!(report.summary.changed, 1);
        assert_eq!(report.summary.warnings, 1);
        assert!(!report.has_errors());
    }

    #[test]
    fn checksum_is_sha256_hex() {
        assert_eq!(
            checksum(""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn report_serialization() {
        let report = Report::new(Dialect::SqlServer, results(), "script");
        let json = report.to_json().unwrap();
        assert!(json.contains("\"version\""));
        assert!(json.contains("\"sqlserver\""));
        assert!(json.contains("SEQ_ORDER_ID"));
    }
}
