//! Model invariant violations
//!
//! These are fatal: a comparison that hits one produces no script at all.

/// A snapshot breaks one of the model's invariants
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    #[error("foreign key '{name}' on '{table}' has {columns} column(s) but references {referenced} column(s)")]
    ForeignKeyColumnMismatch {
        name: String,
        table: String,
        columns: usize,
        referenced: usize,
    },

    #[error("duplicate column '{column}' in table '{table}'")]
    DuplicateColumn { table: String, column: String },

    #[error("primary key '{constraint}' on '{table}' names missing column '{column}'")]
    PrimaryKeyColumnMissing {
        table: String,
        constraint: String,
        column: String,
    },

    #[error("column '{column}' on '{table}' is flagged as primary key but is not part of '{constraint}'")]
    PrimaryKeyFlagMismatch {
        table: String,
        constraint: String,
        column: String,
    },

    #[error("column ordinals in '{table}' are not strictly increasing at '{column}'")]
    OrdinalOutOfOrder { table: String, column: String },
}
