//! Incremental migration statements
//!
//! [`MigrationGenerator`] is the dialect strategy the comparers talk to.
//! Its provided methods write ANSI-style statements driven by the dialect's
//! [`DialectProfile`]; each dialect overrides only what its syntax changes.

use schemashift_core::{
    Column, Constraint, ConstraintKind, DatabaseSchema, Diagnostic, DiagnosticCode, Dialect,
    Function, Index, ModelError, Sequence, StoredProcedure, Table, Trigger, UserDataType, View,
};
use crate::profile::DialectProfile;
use crate::references::{resolve_foreign_key, ForeignKeyTarget};
use crate::rendered::Rendered;
use crate::table::{column_definition, constraint_body, named_constraint, TableGenerator};
use crate::translator::SqlTranslator;

/// Terminate a definition with `;` unless it already is
pub(crate) fn terminated(sql: &str) -> String {
    let sql = sql.trim_end();
    if sql.ends_with(';') {
        sql.to_string()
    } else {
        format!("{};", sql)
    }
}

/// Per-aspect `ALTER COLUMN` statements for type, nullability and default
pub fn alter_column_clauses(profile: &DialectProfile, table: &Table, column: &Column, original: &Column) -> Rendered {
    let table_name = profile.table_name(table);
    let column_name = profile.escape(&column.name);
    let prefix = format!("ALTER TABLE {} ALTER COLUMN {}", table_name, column_name);
    let mut out = Rendered::default();

    if !column.data_type.same_as(&original.data_type) {
        out.push_line(format!("{} TYPE {};", prefix, profile.type_name(&column.data_type)));
    }

    if column.is_nullable() != original.is_nullable() {
        let action = if column.is_nullable() { "DROP NOT NULL" } else { "SET NOT NULL" };
        out.push_line(format!("{} {};", prefix, action));
    }

    if !SqlTranslator::defaults_equal(column.default_value.as_deref(), original.default_value.as_deref()) {
        match column.default_value.as_deref() {
            None => out.push_line(format!("{} DROP DEFAULT;", prefix)),
            Some(default) => match profile.translator.translate(default) {
                Some(value) => out.push_line(format!("{} SET DEFAULT {};", prefix, value)),
                None => out.append(Rendered::comment(
                    format!("default for {}.{} omitted", table.name, column.name),
                    Diagnostic::from_code(
                        DiagnosticCode::UntranslatableDefault,
                        format!("default '{}' cannot be expressed in {}", default, profile.dialect),
                    )
                    .with_object(format!("{}.{}", table.name, column.name)),
                )),
            },
        }
    }

    out
}

/// Dialect strategy for incremental schema changes
pub trait MigrationGenerator: Send + Sync {
    /// Syntax choices for this dialect
    fn profile(&self) -> &DialectProfile;

    fn dialect(&self) -> Dialect {
        self.profile().dialect
    }

    /// Full CREATE TABLE; foreign keys resolve against `schema`
    fn add_table(&self, table: &Table, schema: &DatabaseSchema) -> Result<Rendered, ModelError> {
        TableGenerator::new(self.profile(), table).with_schema(schema).write()
    }

    fn drop_table(&self, table: &Table) -> Rendered {
        Rendered::new(format!("DROP TABLE {};", self.profile().table_name(table)))
    }

    fn add_column(&self, table: &Table, column: &Column) -> Rendered {
        let profile = self.profile();
        let keyword = if profile.add_column_keyword { "ADD COLUMN" } else { "ADD" };

        column_definition(profile, table, column, false).map_sql(|definition| {
            format!("ALTER TABLE {} {} {};", profile.table_name(table), keyword, definition)
        })
    }

    /// Change `original` (from `original_table`) into `column` (on `table`)
    fn alter_column(&self, table: &Table, column: &Column, _original_table: &Table, original: &Column) -> Rendered {
        let profile = self.profile();
        let mut out = alter_column_clauses(profile, table, column, original);

        if column.identity != original.identity {
            out.append(profile.unsupported("changing identity columns", &format!("{}.{}", table.name, column.name)));
        }

        out
    }

    /// Drop `column` from `table`; `original_table` is the snapshot the column came from
    fn drop_column(&self, table: &Table, column: &Column, _original_table: &Table) -> Rendered {
        let profile = self.profile();
        Rendered::new(format!(
            "ALTER TABLE {} DROP COLUMN {};",
            profile.table_name(table),
            profile.escape(&column.name)
        ))
    }

    fn drop_default(&self, table: &Table, column: &Column) -> Rendered {
        let profile = self.profile();
        Rendered::new(format!(
            "ALTER TABLE {} ALTER COLUMN {} DROP DEFAULT;",
            profile.table_name(table),
            profile.escape(&column.name)
        ))
    }

    /// Rename `original_name` to `table.name`
    fn rename_table(&self, table: &Table, original_name: &str) -> Rendered {
        let profile = self.profile();
        Rendered::new(format!(
            "ALTER TABLE {} RENAME TO {};",
            profile.qualify(table.schema_owner.as_deref(), original_name),
            profile.escape(&table.name)
        ))
    }

    /// Rename `original_name` to `column.name`
    fn rename_column(&self, table: &Table, column: &Column, original_name: &str) -> Rendered {
        let profile = self.profile();
        Rendered::new(format!(
            "ALTER TABLE {} RENAME COLUMN {} TO {};",
            profile.table_name(table),
            profile.escape(original_name),
            profile.escape(&column.name)
        ))
    }

    /// Add a constraint to an existing table; foreign keys resolve against `schema`
    fn add_constraint(&self, table: &Table, constraint: &Constraint, schema: &DatabaseSchema) -> Result<Rendered, ModelError> {
        let profile = self.profile();
        let object = format!("{}.{}", table.name, constraint.name);

        if !profile.supports_alter_constraints {
            return Ok(profile.unsupported(&format!("adding a {} to an existing table", constraint.kind), &object));
        }

        let target = match constraint.kind {
            ConstraintKind::ForeignKey => match resolve_foreign_key(table, constraint, Some(schema))? {
                ForeignKeyTarget::Unresolved(reason) => {
                    tracing::warn!(table = %table.qualified_name(), foreign_key = %constraint.name, "{}", reason);
                    return Ok(Rendered::comment(
                        format!("foreign key {} omitted: {}", constraint.name, reason),
                        Diagnostic::from_code(DiagnosticCode::UnresolvedReference, reason).with_object(object),
                    ));
                }
                resolved => Some(resolved),
            },
            _ => None,
        };

        let body = constraint_body(profile, constraint, target.as_ref());
        Ok(Rendered::new(format!(
            "ALTER TABLE {} ADD {};",
            profile.table_name(table),
            named_constraint(profile, &constraint.name, body)
        )))
    }

    fn drop_constraint(&self, table: &Table, constraint: &Constraint) -> Rendered {
        let profile = self.profile();
        if !profile.supports_alter_constraints {
            return profile.unsupported(
                &format!("dropping a {} from an existing table", constraint.kind),
                &format!("{}.{}", table.name, constraint.name),
            );
        }

        Rendered::new(format!(
            "ALTER TABLE {} DROP CONSTRAINT {};",
            profile.table_name(table),
            profile.escape(&constraint.name)
        ))
    }

    fn add_index(&self, table: &Table, index: &Index) -> Rendered {
        let profile = self.profile();
        Rendered::new(format!(
            "CREATE {}INDEX {} ON {} ({});",
            if index.is_unique { "UNIQUE " } else { "" },
            profile.escape(&index.name),
            profile.table_name(table),
            profile.column_list(&index.columns)
        ))
    }

    fn drop_index(&self, table: &Table, index: &Index) -> Rendered {
        let profile = self.profile();
        Rendered::new(format!(
            "DROP INDEX {};",
            profile.qualify(table.schema_owner.as_deref(), &index.name)
        ))
    }

    /// The trigger body is written verbatim
    fn add_trigger(&self, table: &Table, trigger: &Trigger) -> Rendered {
        if trigger.body.trim().is_empty() {
            return Rendered::comment(
                format!("add trigger {}", trigger.name),
                Diagnostic::from_code(
                    DiagnosticCode::EmptyTriggerBody,
                    format!("trigger '{}' has no body", trigger.name),
                )
                .with_object(format!("{}.{}", table.name, trigger.name)),
            );
        }

        Rendered::new(terminated(&trigger.body))
    }

    fn drop_trigger(&self, table: &Table, trigger: &Trigger) -> Rendered {
        let profile = self.profile();
        Rendered::new(format!(
            "DROP TRIGGER {};",
            profile.qualify(table.schema_owner.as_deref(), &trigger.name)
        ))
    }

    fn add_sequence(&self, sequence: &Sequence) -> Rendered {
        let profile = self.profile();
        if !profile.supports_sequences {
            return profile.unsupported("sequences", &sequence.name);
        }

        let mut sql = format!(
            "CREATE SEQUENCE {} START WITH {} INCREMENT BY {}",
            profile.qualify(sequence.schema_owner.as_deref(), &sequence.name),
            sequence.start,
            sequence.increment
        );
        if let Some(min) = sequence.min_value {
            sql.push_str(&format!(" MINVALUE {}", min));
        }
        if let Some(max) = sequence.max_value {
            sql.push_str(&format!(" MAXVALUE {}", max));
        }
        sql.push(';');

        Rendered::new(sql)
    }

    fn drop_sequence(&self, sequence: &Sequence) -> Rendered {
        let profile = self.profile();
        if !profile.supports_sequences {
            return profile.unsupported("sequences", &sequence.name);
        }

        Rendered::new(format!(
            "DROP SEQUENCE {};",
            profile.qualify(sequence.schema_owner.as_deref(), &sequence.name)
        ))
    }

    fn add_view(&self, view: &View) -> Rendered {
        Rendered::new(terminated(&view.sql))
    }

    fn drop_view(&self, view: &View) -> Rendered {
        Rendered::new(format!(
            "DROP VIEW {};",
            self.profile().qualify(view.schema_owner.as_deref(), &view.name)
        ))
    }

    fn add_procedure(&self, procedure: &StoredProcedure) -> Rendered {
        let profile = self.profile();
        if !profile.supports_routines {
            return profile.unsupported("stored procedures", &procedure.name);
        }
        Rendered::new(terminated(&procedure.sql))
    }

    fn drop_procedure(&self, procedure: &StoredProcedure) -> Rendered {
        let profile = self.profile();
        if !profile.supports_routines {
            return profile.unsupported("stored procedures", &procedure.name);
        }
        Rendered::new(format!(
            "DROP PROCEDURE {};",
            profile.qualify(procedure.schema_owner.as_deref(), &procedure.name)
        ))
    }

    fn add_function(&self, function: &Function) -> Rendered {
        let profile = self.profile();
        if !profile.supports_routines {
            return profile.unsupported("user-defined functions", &function.name);
        }
        Rendered::new(terminated(&function.sql))
    }

    fn drop_function(&self, function: &Function) -> Rendered {
        let profile = self.profile();
        if !profile.supports_routines {
            return profile.unsupported("user-defined functions", &function.name);
        }
        Rendered::new(format!(
            "DROP FUNCTION {};",
            profile.qualify(function.schema_owner.as_deref(), &function.name)
        ))
    }

    fn add_data_type(&self, data_type: &UserDataType) -> Rendered {
        self.profile().unsupported("user-defined data types", &data_type.name)
    }

    fn drop_data_type(&self, data_type: &UserDataType) -> Rendered {
        self.profile().unsupported("user-defined data types", &data_type.name)
    }
}
