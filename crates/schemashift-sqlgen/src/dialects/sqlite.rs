//! SQLite migrations
//!
//! SQLite's ALTER TABLE only renames tables and columns and adds or drops
//! columns. Everything else needs a table rebuild, which is left to the
//! operator: those changes become comments with a diagnostic.

use schemashift_core::{Column, Dialect, Table};
use crate::migration::MigrationGenerator;
use crate::profile::DialectProfile;
use crate::rendered::Rendered;

#[derive(Debug)]
pub struct SqliteGenerator {
    profile: DialectProfile,
}

impl SqliteGenerator {
    pub fn new() -> Self {
        Self {
            profile: DialectProfile::for_dialect(Dialect::Sqlite),
        }
    }
}

impl Default for SqliteGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl MigrationGenerator for SqliteGenerator {
    fn profile(&self) -> &DialectProfile {
        &self.profile
    }

    fn alter_column(&self, table: &Table, column: &Column, _original_table: &Table, _original: &Column) -> Rendered {
        self.profile
            .unsupported("altering columns", &format!("{}.{}", table.name, column.name))
    }

    fn drop_default(&self, table: &Table, column: &Column) -> Rendered {
        self.profile
            .unsupported("dropping column defaults", &format!("{}.{}", table.name, column.name))
    }
}
