//! Per-dialect migration generators

mod mysql;
mod postgres;
mod sqlite;
mod sqlserver;

pub use mysql::MySqlGenerator;
pub use postgres::PostgresGenerator;
pub use sqlite::SqliteGenerator;
pub use sqlserver::SqlServerGenerator;

use schemashift_core::Dialect;
use crate::migration::MigrationGenerator;

/// Generator for a dialect
pub fn generator_for(dialect: Dialect) -> Box<dyn MigrationGenerator> {
    match dialect {
        Dialect::SqlServer => Box::new(SqlServerGenerator::new()),
        Dialect::Sqlite => Box::new(SqliteGenerator::new()),
        Dialect::PostgreSql => Box::new(PostgresGenerator::new()),
        Dialect::MySql => Box::new(MySqlGenerator::new()),
    }
}
