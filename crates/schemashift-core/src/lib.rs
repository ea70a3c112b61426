//! SchemaShift Core
//!
//! Core domain model with stable, versioned types: the schema snapshot
//! model, compare results, diagnostics, configuration and the JSON report.
//! Never rename diagnostic codes - they are part of the public API.

pub mod diagnostic;
pub mod schema;
pub mod result;
pub mod report;
pub mod config;
pub mod error;
pub mod snapshot;

pub use diagnostic::{Diagnostic, DiagnosticCode, Severity};
pub use schema::{
    names_match, owners_match, Column, Constraint, ConstraintKind, DataType, DatabaseSchema,
    Function, Identity, Index, Sequence, SqlDefined, StoredProcedure, Table, Trigger, TypeKind,
    UserDataType, View,
};
pub use result::{CompareResult, ResultType, SchemaObjectType};
pub use report::{Report, ReportSummary, ReportVersion};
pub use config::{CompareOptions, Config, ConfigError, Dialect, OutputConfig, SeverityThreshold};
pub use error::ModelError;
pub use snapshot::SnapshotError;
