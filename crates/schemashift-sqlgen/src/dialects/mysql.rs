//! MySQL migrations
//!
//! MySQL restates the whole column on change (`MODIFY COLUMN`) and drops
//! each constraint kind with its own statement.

use schemashift_core::{Column, Constraint, ConstraintKind, Dialect, Index, Table};
use crate::migration::MigrationGenerator;
use crate::profile::DialectProfile;
use crate::rendered::Rendered;
use crate::table::column_definition;

#[derive(Debug)]
pub struct MySqlGenerator {
    profile: DialectProfile,
}

impl MySqlGenerator {
    pub fn new() -> Self {
        Self {
            profile: DialectProfile::for_dialect(Dialect::MySql),
        }
    }
}

impl Default for MySqlGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl MigrationGenerator for MySqlGenerator {
    fn profile(&self) -> &DialectProfile {
        &self.profile
    }

    fn alter_column(&self, table: &Table, column: &Column, _original_table: &Table, _original: &Column) -> Rendered {
        let profile = &self.profile;
        column_definition(profile, table, column, false).map_sql(|definition| {
            format!("ALTER TABLE {} MODIFY COLUMN {};", profile.table_name(table), definition)
        })
    }

    fn rename_table(&self, table: &Table, original_name: &str) -> Rendered {
        Rendered::new(format!(
            "RENAME TABLE {} TO {};",
            self.profile.qualify(table.schema_owner.as_deref(), original_name),
            self.profile.table_name(table)
        ))
    }

    fn drop_constraint(&self, table: &Table, constraint: &Constraint) -> Rendered {
        let profile = &self.profile;
        let action = match constraint.kind {
            ConstraintKind::PrimaryKey => "DROP PRIMARY KEY".to_string(),
            ConstraintKind::ForeignKey => format!("DROP FOREIGN KEY {}", profile.escape(&constraint.name)),
            ConstraintKind::Unique => format!("DROP INDEX {}", profile.escape(&constraint.name)),
            ConstraintKind::Check => format!("DROP CHECK {}", profile.escape(&constraint.name)),
            ConstraintKind::Default => {
                let column = constraint.columns.first().map(String::as_str).unwrap_or_default();
                format!("ALTER COLUMN {} DROP DEFAULT", profile.escape(column))
            }
        };

        Rendered::new(format!("ALTER TABLE {} {};", profile.table_name(table), action))
    }

    fn drop_index(&self, table: &Table, index: &Index) -> Rendered {
        Rendered::new(format!(
            "DROP INDEX {} ON {};",
            self.profile.escape(&index.name),
            self.profile.table_name(table)
        ))
    }
}
