//! Table-driven description of a dialect
//!
//! Generators read syntax choices from a [`DialectProfile`] instead of
//! overriding every operation; only truly divergent statements get their
//! own implementation.

use schemashift_core::{DataType, Dialect, Table};
use crate::format::{BracketQuoter, IdentifierQuoter, SqlFormatProvider};
use crate::rendered::Rendered;
use crate::translator::SqlTranslator;
use crate::typemap::TypeMap;

/// How identity columns are declared
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentityStyle {
    /// `IDENTITY(seed,increment)`
    Identity,

    /// `GENERATED BY DEFAULT AS IDENTITY`
    GeneratedByDefault,

    /// `AUTO_INCREMENT`
    AutoIncrement,

    /// Only as `INTEGER PRIMARY KEY AUTOINCREMENT`
    InlinePrimaryKey,
}

/// Syntax and feature support of one dialect
#[derive(Debug)]
pub struct DialectProfile {
    pub dialect: Dialect,

    pub format: Box<dyn SqlFormatProvider>,

    pub types: TypeMap,

    pub translator: SqlTranslator,

    pub identity: IdentityStyle,

    /// A single-column primary key is declared on the column itself
    pub inline_primary_key: bool,

    /// Foreign keys can only be declared inside CREATE TABLE
    pub foreign_keys_inline: bool,

    /// Defaults are named constraints that must be dropped explicitly
    pub named_default_constraints: bool,

    /// `ADD COLUMN` rather than `ADD`
    pub add_column_keyword: bool,

    /// `ALTER TABLE ... ADD/DROP CONSTRAINT` is available
    pub supports_alter_constraints: bool,

    pub supports_sequences: bool,

    /// Stored procedures and functions
    pub supports_routines: bool,
}

impl DialectProfile {
    pub fn for_dialect(dialect: Dialect) -> Self {
        match dialect {
            Dialect::SqlServer => Self {
                dialect,
                format: Box::new(BracketQuoter),
                types: TypeMap::for_dialect(dialect),
                translator: SqlTranslator::new(dialect),
                identity: IdentityStyle::Identity,
                inline_primary_key: false,
                foreign_keys_inline: false,
                named_default_constraints: true,
                add_column_keyword: false,
                supports_alter_constraints: true,
                supports_sequences: true,
                supports_routines: true,
            },
            Dialect::Sqlite => Self {
                dialect,
                format: Box::new(IdentifierQuoter::sqlite()),
                types: TypeMap::for_dialect(dialect),
                translator: SqlTranslator::new(dialect),
                identity: IdentityStyle::InlinePrimaryKey,
                inline_primary_key: true,
                foreign_keys_inline: true,
                named_default_constraints: false,
                add_column_keyword: true,
                supports_alter_constraints: false,
                supports_sequences: false,
                supports_routines: false,
            },
            Dialect::PostgreSql => Self {
                dialect,
                format: Box::new(IdentifierQuoter::postgres()),
                types: TypeMap::for_dialect(dialect),
                translator: SqlTranslator::new(dialect),
                identity: IdentityStyle::GeneratedByDefault,
                inline_primary_key: false,
                foreign_keys_inline: false,
                named_default_constraints: false,
                add_column_keyword: true,
                supports_alter_constraints: true,
                supports_sequences: true,
                supports_routines: true,
            },
            Dialect::MySql => Self {
                dialect,
                format: Box::new(IdentifierQuoter::mysql()),
                types: TypeMap::for_dialect(dialect),
                translator: SqlTranslator::new(dialect),
                identity: IdentityStyle::AutoIncrement,
                inline_primary_key: false,
                foreign_keys_inline: false,
                named_default_constraints: false,
                add_column_keyword: true,
                supports_alter_constraints: true,
                supports_sequences: false,
                supports_routines: true,
            },
        }
    }

    pub fn escape(&self, name: &str) -> String {
        self.format.escape(name)
    }

    pub fn qualify(&self, schema: Option<&str>, name: &str) -> String {
        self.format.qualify(schema, name)
    }

    /// Escaped, schema-qualified table name
    pub fn table_name(&self, table: &Table) -> String {
        self.format.qualify(table.schema_owner.as_deref(), &table.name)
    }

    pub fn column_list(&self, columns: &[String]) -> String {
        self.format.escape_list(columns)
    }

    pub fn type_name(&self, data_type: &DataType) -> String {
        self.types.render(data_type)
    }

    /// Comment and diagnostic for a change this dialect cannot express
    pub fn unsupported(&self, what: &str, object: &str) -> Rendered {
        Rendered::unsupported(self.dialect, what, object)
    }
}
