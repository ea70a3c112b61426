//! SchemaShift SQL generation
//!
//! This crate turns schema objects into dialect-specific SQL:
//! - Identifier quoting and type mapping per dialect
//! - Default value translation
//! - CREATE TABLE generation with foreign key resolution
//! - Incremental ALTER/DROP statements via [`MigrationGenerator`]

pub mod dialects;
pub mod format;
pub mod migration;
pub mod profile;
pub mod references;
pub mod rendered;
pub mod table;
pub mod translator;
pub mod typemap;

pub use dialects::{generator_for, MySqlGenerator, PostgresGenerator, SqlServerGenerator, SqliteGenerator};
pub use format::{BracketQuoter, IdentifierQuoter, SqlFormatProvider};
pub use migration::MigrationGenerator;
pub use profile::{DialectProfile, IdentityStyle};
pub use references::{resolve_foreign_key, ForeignKeyTarget};
pub use rendered::Rendered;
pub use table::{default_constraint_name, TableGenerator};
pub use translator::SqlTranslator;
pub use typemap::TypeMap;
