//! Diagnostic codes attached to compare results
//!
//! IMPORTANT: Diagnostic codes are versioned and stable.
//! NEVER rename or remove codes - they are part of the public API.
//! Add new codes with new names only.

use serde::{Deserialize, Serialize};

/// Diagnostic code registry (v1)
///
/// These codes are STABLE and VERSIONED.
/// Do NOT rename or remove codes - only add new ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiagnosticCode {
    // Reference resolution (1xxx)
    /// A foreign key names a table (or key) that is not in the snapshot
    UnresolvedReference,

    /// A default value has no named constraint to drop or recreate
    MissingDefaultConstraint,

    // Dialect support (2xxx)
    /// The target dialect has no syntax for the requested change
    UnsupportedFeature,

    /// A default expression has no equivalent in the target dialect
    UntranslatableDefault,

    // Object content (3xxx)
    /// A trigger was added without a body
    EmptyTriggerBody,

    /// An identity change is expressed as dropping and re-adding the column
    IdentityRecreate,

    // General (9xxx)
    /// General informational message
    Info,

    /// General warning message
    Warning,
}

impl DiagnosticCode {
    /// Get the diagnostic code as a stable string identifier
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UnresolvedReference => "UNRESOLVED_REFERENCE",
            Self::MissingDefaultConstraint => "MISSING_DEFAULT_CONSTRAINT",
            Self::UnsupportedFeature => "UNSUPPORTED_FEATURE",
            Self::UntranslatableDefault => "UNTRANSLATABLE_DEFAULT",
            Self::EmptyTriggerBody => "EMPTY_TRIGGER_BODY",
            Self::IdentityRecreate => "IDENTITY_RECREATE",
            Self::Info => "INFO",
            Self::Warning => "WARNING",
        }
    }

    /// Severity used when no override is configured
    pub fn default_severity(&self) -> Severity {
        match self {
            Self::UnresolvedReference | Self::MissingDefaultConstraint => Severity::Error,
            Self::UnsupportedFeature
            | Self::UntranslatableDefault
            | Self::EmptyTriggerBody
            | Self::IdentityRecreate
            | Self::Warning => Severity::Warn,
            Self::Info => Severity::Info,
        }
    }
}

impl std::fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Diagnostic severity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational message
    Info,

    /// Warning - the script runs but should be reviewed
    Warn,

    /// Error - the script is incomplete and should fail CI
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Warn => write!(f, "warn"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// A diagnostic message with structured metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Stable diagnostic code
    pub code: DiagnosticCode,

    /// Severity level
    pub severity: Severity,

    /// Human-readable message
    pub message: String,

    /// Object the message is about, e.g. `Orders.FK_Orders_Customers`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object: Option<String>,
}

impl Diagnostic {
    /// Create a new diagnostic with minimal fields
    pub fn new(code: DiagnosticCode, severity: Severity, message: impl Into<String>) -> Self {
        Self {
            code,
            severity,
            message: message.into(),
            object: None,
        }
    }

    /// Create a diagnostic using the code's default severity
    pub fn from_code(code: DiagnosticCode, message: impl Into<String>) -> Self {
        Self::new(code, code.default_severity(), message)
    }

    /// Set the object the diagnostic refers to
    pub fn with_object(mut self, object: impl Into<String>) -> Self {
        self.object = Some(object.into());
        self
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}: {}", self.severity, self.code, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diagnostic_code_stability() {
        // Ensure codes are stable strings
        assert_eq!(DiagnosticCode::UnresolvedReference.as_str(), "UNRESOLVED_REFERENCE");
        assert_eq!(DiagnosticCode::MissingDefaultConstraint.as_str(), "MISSING_DEFAULT_CONSTRAINT");
        assert_eq!(DiagnosticCode::UnsupportedFeature.as_str(), "UNSUPPORTED_FEATURE");
    }

    #[test]
    fn unresolved_references_are_errors_by_default() {
        let diag = Diagnostic::from_code(DiagnosticCode::UnresolvedReference, "Table 'Ghost' not found");
        assert_eq!(diag.severity, Severity::Error);

        let diag = Diagnostic::from_code(DiagnosticCode::UnsupportedFeature, "no sequences");
        assert_eq!(diag.severity, Severity::Warn);
    }

    #[test]
    fn diagnostic_serialization() {
        let diag = Diagnostic::from_code(
            DiagnosticCode::MissingDefaultConstraint,
            "No default constraint found for column 'LegacyCode'",
        )
        .with_object("Customers.LegacyCode");

        let json = serde_json::to_string(&diag).unwrap();
        assert!(json.contains("MISSING_DEFAULT_CONSTRAINT"));
        assert!(json.contains("\"error\""));
        assert!(json.contains("Customers.LegacyCode"));
    }

    #[test]
    fn diagnostic_display() {
        let diag = Diagnostic::new(DiagnosticCode::Info, Severity::Info, "nothing to do");
        assert_eq!(diag.to_string(), "[info] INFO: nothing to do");
    }
}
