//! PostgreSQL migrations

use schemashift_core::{Column, Dialect, Table, Trigger, UserDataType};
use crate::migration::{alter_column_clauses, MigrationGenerator};
use crate::profile::DialectProfile;
use crate::rendered::Rendered;

#[derive(Debug)]
pub struct PostgresGenerator {
    profile: DialectProfile,
}

impl PostgresGenerator {
    pub fn new() -> Self {
        Self {
            profile: DialectProfile::for_dialect(Dialect::PostgreSql),
        }
    }
}

impl Default for PostgresGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl MigrationGenerator for PostgresGenerator {
    fn profile(&self) -> &DialectProfile {
        &self.profile
    }

    fn alter_column(&self, table: &Table, column: &Column, _original_table: &Table, original: &Column) -> Rendered {
        let profile = &self.profile;
        let prefix = format!(
            "ALTER TABLE {} ALTER COLUMN {}",
            profile.table_name(table),
            profile.escape(&column.name)
        );
        let mut out = Rendered::default();

        // an identity column cannot DROP NOT NULL
        if original.identity.is_some() && column.identity.is_none() {
            out.push_line(format!("{} DROP IDENTITY IF EXISTS;", prefix));
        }
        out.append(alter_column_clauses(profile, table, column, original));

        // identity goes last: it needs NOT NULL in place
        match (original.identity, column.identity) {
            (None, Some(identity)) if identity.seed == 1 && identity.increment == 1 => {
                out.push_line(format!("{} ADD GENERATED BY DEFAULT AS IDENTITY;", prefix));
            }
            (None, Some(identity)) => out.push_line(format!(
                "{} ADD GENERATED BY DEFAULT AS IDENTITY (START WITH {} INCREMENT BY {});",
                prefix, identity.seed, identity.increment
            )),
            (Some(before), Some(after)) if before != after => out.push_line(format!(
                "{} SET INCREMENT BY {} RESTART WITH {};",
                prefix, after.increment, after.seed
            )),
            _ => {}
        }

        out
    }

    fn drop_trigger(&self, table: &Table, trigger: &Trigger) -> Rendered {
        Rendered::new(format!(
            "DROP TRIGGER {} ON {};",
            self.profile.escape(&trigger.name),
            self.profile.table_name(table)
        ))
    }

    fn add_data_type(&self, data_type: &UserDataType) -> Rendered {
        Rendered::new(format!(
            "CREATE DOMAIN {} AS {}{};",
            self.profile.qualify(data_type.schema_owner.as_deref(), &data_type.name),
            self.profile.type_name(&data_type.base_type),
            if data_type.nullable { "" } else { " NOT NULL" }
        ))
    }

    fn drop_data_type(&self, data_type: &UserDataType) -> Rendered {
        Rendered::new(format!(
            "DROP DOMAIN {};",
            self.profile.qualify(data_type.schema_owner.as_deref(), &data_type.name)
        ))
    }
}
