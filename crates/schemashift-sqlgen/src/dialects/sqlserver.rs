//! SQL Server migrations
//!
//! Defaults are named constraints here: a column cannot be altered or
//! dropped while one is bound to it, so those operations drop the
//! constraint first and recreate it afterwards. Renames go through
//! `sp_rename`.

use schemashift_core::{Column, Constraint, Diagnostic, DiagnosticCode, Dialect, Index, Table, UserDataType};
use crate::migration::MigrationGenerator;
use crate::profile::DialectProfile;
use crate::rendered::Rendered;
use crate::table::default_constraint_name;
use crate::translator::SqlTranslator;

/// Escape a name for use inside a T-SQL string literal
fn literal(name: &str) -> String {
    name.replace('\'', "''")
}

#[derive(Debug)]
pub struct SqlServerGenerator {
    profile: DialectProfile,
}

impl SqlServerGenerator {
    pub fn new() -> Self {
        Self {
            profile: DialectProfile::for_dialect(Dialect::SqlServer),
        }
    }

    /// Default constraint bound to a column: the original table first, then the new one
    fn find_default_constraint<'t>(
        original_table: &'t Table,
        original: &Column,
        table: &'t Table,
        column: &Column,
    ) -> Option<&'t Constraint> {
        original_table
            .find_default_constraint(&original.name)
            .or_else(|| table.find_default_constraint(&column.name))
    }

    fn drop_default_constraint(&self, table: &Table, column: &Column, constraint: Option<&Constraint>) -> Rendered {
        let object = format!("{}.{}", table.name, column.name);

        match constraint {
            Some(constraint) => Rendered::new(format!(
                "ALTER TABLE {} DROP CONSTRAINT {};",
                self.profile.table_name(table),
                self.profile.escape(&constraint.name)
            )),
            None => {
                tracing::warn!(column = %object, "no default constraint found");
                Rendered::comment(
                    format!("no default constraint found for {}; drop it manually", object),
                    Diagnostic::from_code(
                        DiagnosticCode::MissingDefaultConstraint,
                        format!("column '{}' has a default but no named default constraint", object),
                    )
                    .with_object(object),
                )
            }
        }
    }

    fn add_default_constraint(&self, table: &Table, column: &Column, name: &str, default: &str) -> Rendered {
        match self.profile.translator.translate(default) {
            Some(value) => Rendered::new(format!(
                "ALTER TABLE {} ADD CONSTRAINT {} DEFAULT {} FOR {};",
                self.profile.table_name(table),
                self.profile.escape(name),
                value,
                self.profile.escape(&column.name)
            )),
            None => Rendered::comment(
                format!("default for {}.{} omitted", table.name, column.name),
                Diagnostic::from_code(
                    DiagnosticCode::UntranslatableDefault,
                    format!("default '{}' cannot be expressed in {}", default, self.profile.dialect),
                )
                .with_object(format!("{}.{}", table.name, column.name)),
            ),
        }
    }
}

impl Default for SqlServerGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl MigrationGenerator for SqlServerGenerator {
    fn profile(&self) -> &DialectProfile {
        &self.profile
    }

    fn alter_column(&self, table: &Table, column: &Column, original_table: &Table, original: &Column) -> Rendered {
        let profile = &self.profile;

        // ALTER COLUMN cannot add or remove IDENTITY
        if column.identity != original.identity {
            let mut out = self.drop_column(table, original, original_table);
            out.append(self.add_column(table, column));
            return out.with_diagnostic(
                Diagnostic::from_code(
                    DiagnosticCode::IdentityRecreate,
                    format!(
                        "identity change on '{}.{}' drops and re-adds the column; existing values are lost",
                        table.name, column.name
                    ),
                )
                .with_object(format!("{}.{}", table.name, column.name)),
            );
        }

        let shape_changed = !column.data_type.same_as(&original.data_type)
            || column.is_nullable() != original.is_nullable();
        let default_changed =
            !SqlTranslator::defaults_equal(column.default_value.as_deref(), original.default_value.as_deref());
        let existing = Self::find_default_constraint(original_table, original, table, column);

        let mut out = Rendered::default();

        if original.default_value.is_some() && (default_changed || shape_changed) {
            out.append(self.drop_default_constraint(table, original, existing));
        }

        if shape_changed {
            out.push_line(format!(
                "ALTER TABLE {} ALTER COLUMN {} {} {};",
                profile.table_name(table),
                profile.escape(&column.name),
                profile.type_name(&column.data_type),
                if column.is_nullable() { "NULL" } else { "NOT NULL" }
            ));
        }

        if let Some(default) = column.default_value.as_deref() {
            if default_changed || (shape_changed && original.default_value.is_some()) {
                let name = table
                    .find_default_constraint(&column.name)
                    .or(existing)
                    .map(|c| c.name.clone())
                    .unwrap_or_else(|| default_constraint_name(table, column));
                out.append(self.add_default_constraint(table, column, &name, default));
            }
        }

        out
    }

    fn drop_column(&self, table: &Table, column: &Column, original_table: &Table) -> Rendered {
        let mut out = Rendered::default();

        if column.default_value.is_some() {
            let existing = Self::find_default_constraint(original_table, column, table, column);
            out.append(self.drop_default_constraint(table, column, existing));
        }

        out.push_line(format!(
            "ALTER TABLE {} DROP COLUMN {};",
            self.profile.table_name(table),
            self.profile.escape(&column.name)
        ));
        out
    }

    fn drop_default(&self, table: &Table, column: &Column) -> Rendered {
        let mut out = Rendered::new(format!("-- drop default for {}", column.name));
        out.append(self.drop_default_constraint(table, column, table.find_default_constraint(&column.name)));
        out
    }

    fn rename_table(&self, table: &Table, original_name: &str) -> Rendered {
        let old = match &table.schema_owner {
            Some(schema) => format!("{}.{}", schema, original_name),
            None => original_name.to_string(),
        };

        Rendered::new(format!("EXEC sp_rename '{}', '{}';", literal(&old), literal(&table.name)))
    }

    fn rename_column(&self, table: &Table, column: &Column, original_name: &str) -> Rendered {
        Rendered::new(format!(
            "EXEC sp_rename '{}.{}', '{}', 'COLUMN';",
            literal(&table.qualified_name()),
            literal(original_name),
            literal(&column.name)
        ))
    }

    fn drop_index(&self, table: &Table, index: &Index) -> Rendered {
        Rendered::new(format!(
            "DROP INDEX {} ON {};",
            self.profile.escape(&index.name),
            self.profile.table_name(table)
        ))
    }

    fn add_data_type(&self, data_type: &UserDataType) -> Rendered {
        Rendered::new(format!(
            "CREATE TYPE {} FROM {}{};",
            self.profile.qualify(data_type.schema_owner.as_deref(), &data_type.name),
            self.profile.type_name(&data_type.base_type),
            if data_type.nullable { "" } else { " NOT NULL" }
        ))
    }

    fn drop_data_type(&self, data_type: &UserDataType) -> Rendered {
        Rendered::new(format!(
            "DROP TYPE {};",
            self.profile.qualify(data_type.schema_owner.as_deref(), &data_type.name)
        ))
    }
}
