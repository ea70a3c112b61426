//! Compare results
//!
//! A comparison yields an ordered list of [`CompareResult`]s. The order is
//! the execution order of the scripts.

use serde::{Deserialize, Serialize};
use crate::diagnostic::{Diagnostic, Severity};

/// The kind of schema object a result is about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaObjectType {
    Table,
    Column,
    Constraint,
    Index,
    Trigger,
    View,
    StoredProcedure,
    Function,
    Sequence,
    DataType,
}

impl std::fmt::Display for SchemaObjectType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Table => write!(f, "TABLE"),
            Self::Column => write!(f, "COLUMN"),
            Self::Constraint => write!(f, "CONSTRAINT"),
            Self::Index => write!(f, "INDEX"),
            Self::Trigger => write!(f, "TRIGGER"),
            Self::View => write!(f, "VIEW"),
            Self::StoredProcedure => write!(f, "STORED PROCEDURE"),
            Self::Function => write!(f, "FUNCTION"),
            Self::Sequence => write!(f, "SEQUENCE"),
            Self::DataType => write!(f, "DATA TYPE"),
        }
    }
}

/// What happened to the object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultType {
    /// Present only in the target schema
    Add,

    /// Present only in the base schema
    Delete,

    /// Present in both with a different definition, or renamed
    Change,
}

impl ResultType {
    /// Verb used in script headers
    pub fn header_verb(&self) -> &'static str {
        match self {
            Self::Add => "NEW",
            Self::Delete => "DROP",
            Self::Change => "CHANGE",
        }
    }
}

impl std::fmt::Display for ResultType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Add => write!(f, "add"),
            Self::Delete => write!(f, "delete"),
            Self::Change => write!(f, "change"),
        }
    }
}

/// One step of a migration script
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompareResult {
    /// Object kind
    pub object_type: SchemaObjectType,

    /// Add, delete or change
    pub result_type: ResultType,

    /// Object name
    pub name: String,

    /// Owning table for table-scoped objects
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_name: Option<String>,

    /// Rendered SQL (may be a comment when the dialect cannot express the change)
    pub script: String,

    /// Problems found while rendering the script
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub diagnostics: Vec<Diagnostic>,
}

impl CompareResult {
    /// Create a result with no owning table and no diagnostics
    pub fn new(
        object_type: SchemaObjectType,
        result_type: ResultType,
        name: impl Into<String>,
        script: impl Into<String>,
    ) -> Self {
        Self {
            object_type,
            result_type,
            name: name.into(),
            table_name: None,
            script: script.into(),
            diagnostics: Vec::new(),
        }
    }

    /// Set the owning table
    pub fn with_table(mut self, table_name: impl Into<String>) -> Self {
        self.table_name = Some(table_name.into());
        self
    }

    /// Attach diagnostics
    pub fn with_diagnostics(mut self, diagnostics: Vec<Diagnostic>) -> Self {
        self.diagnostics.extend(diagnostics);
        self
    }

    /// `table.name` for table-scoped objects, else the name
    pub fn display_name(&self) -> String {
        match &self.table_name {
            Some(table) => format!("{}.{}", table, self.name),
            None => self.name.clone(),
        }
    }

    /// Check if any diagnostic is an error
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity == Severity::Error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostic::DiagnosticCode;

    #[test]
    fn display_name_includes_table() {
        let result = CompareResult::new(
            SchemaObjectType::Column,
            ResultType::Delete,
            "LegacyCode",
            "ALTER TABLE [Customers] DROP COLUMN [LegacyCode];",
        )
        .with_table("Customers");

        assert_eq!(result.display_name(), "Customers.LegacyCode");
    }

    #[test]
    fn header_verbs() {
        assert_eq!(ResultType::Add.header_verb(), "NEW");
        assert_eq!(ResultType::Delete.header_verb(), "DROP");
        assert_eq!(ResultType::Change.header_verb(), "CHANGE");
        assert_eq!(SchemaObjectType::StoredProcedure.to_string(), "STORED PROCEDURE");
    }

    #[test]
    fn errors_come_from_diagnostics() {
        let result = CompareResult::new(SchemaObjectType::Table, ResultType::Add, "Orders", "CREATE TABLE Orders ();");
        assert!(!result.has_errors());

        let result = result.with_diagnostics(vec![Diagnostic::from_code(
            DiagnosticCode::UnresolvedReference,
            "Table 'Ghost' not found",
        )]);
        assert!(result.has_errors());
    }
}
