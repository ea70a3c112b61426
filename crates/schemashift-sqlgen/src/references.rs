//! Foreign key target resolution

use schemashift_core::{Constraint, DatabaseSchema, ModelError, Table};

/// Where a foreign key points
#[derive(Debug, Clone, PartialEq)]
pub enum ForeignKeyTarget {
    /// Referenced table and columns, paired positionally with the key columns
    Resolved {
        schema: Option<String>,
        table: String,
        columns: Vec<String>,
    },

    /// The reference cannot be written; carries the reason
    Unresolved(String),
}

/// Resolve a foreign key against the snapshot it will be created in
///
/// Empty referenced columns mean the referenced table's primary key. A
/// column count mismatch is a broken model and fails hard; a missing table
/// or key is only reported.
pub fn resolve_foreign_key(
    table: &Table,
    fk: &Constraint,
    schema: Option<&DatabaseSchema>,
) -> Result<ForeignKeyTarget, ModelError> {
    let mismatch = |referenced: usize| ModelError::ForeignKeyColumnMismatch {
        name: fk.name.clone(),
        table: table.qualified_name(),
        columns: fk.columns.len(),
        referenced,
    };

    if !fk.refers_to_columns.is_empty() && fk.refers_to_columns.len() != fk.columns.len() {
        return Err(mismatch(fk.refers_to_columns.len()));
    }

    let Some(referenced) = fk.refers_to_table.as_deref() else {
        return Ok(ForeignKeyTarget::Unresolved(format!(
            "foreign key '{}' has no referenced table",
            fk.name
        )));
    };

    let target = match schema {
        Some(schema) => match schema.find_table(referenced, fk.refers_to_schema.as_deref()) {
            Some(target) => Some(target),
            None => {
                return Ok(ForeignKeyTarget::Unresolved(format!(
                    "referenced table '{}' not found",
                    referenced
                )))
            }
        },
        None => None,
    };

    let columns: Vec<String> = if !fk.refers_to_columns.is_empty() {
        fk.refers_to_columns.clone()
    } else {
        target
            .map(|t| t.primary_key_columns().into_iter().map(str::to_string).collect())
            .unwrap_or_default()
    };

    if columns.is_empty() {
        return Ok(ForeignKeyTarget::Unresolved(format!(
            "referenced table '{}' has no primary key",
            referenced
        )));
    }

    if columns.len() != fk.columns.len() {
        return Err(mismatch(columns.len()));
    }

    Ok(match target {
        Some(target) => ForeignKeyTarget::Resolved {
            schema: target.schema_owner.clone(),
            table: target.name.clone(),
            columns,
        },
        None => ForeignKeyTarget::Resolved {
            schema: fk.refers_to_schema.clone(),
            table: referenced.to_string(),
            columns,
        },
    })
}
