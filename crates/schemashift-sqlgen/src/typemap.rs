//! Logical type to dialect type name mapping

use schemashift_core::{DataType, Dialect, TypeKind};

const SQLSERVER_TYPES: &[(TypeKind, &str)] = &[
    (TypeKind::Bool, "BIT"),
    (TypeKind::TinyInt, "TINYINT"),
    (TypeKind::SmallInt, "SMALLINT"),
    (TypeKind::Int, "INT"),
    (TypeKind::BigInt, "BIGINT"),
    (TypeKind::Decimal, "DECIMAL"),
    (TypeKind::Float, "REAL"),
    (TypeKind::Double, "FLOAT"),
    (TypeKind::Char, "CHAR"),
    (TypeKind::VarChar, "VARCHAR"),
    (TypeKind::NChar, "NCHAR"),
    (TypeKind::NVarChar, "NVARCHAR"),
    (TypeKind::Text, "NVARCHAR(MAX)"),
    (TypeKind::Date, "DATE"),
    (TypeKind::Time, "TIME"),
    (TypeKind::DateTime, "DATETIME"),
    (TypeKind::Timestamp, "DATETIME2"),
    (TypeKind::Binary, "BINARY"),
    (TypeKind::VarBinary, "VARBINARY"),
    (TypeKind::Blob, "VARBINARY(MAX)"),
    (TypeKind::Guid, "UNIQUEIDENTIFIER"),
    (TypeKind::Json, "NVARCHAR(MAX)"),
];

const SQLITE_TYPES: &[(TypeKind, &str)] = &[
    (TypeKind::Bool, "INTEGER"),
    (TypeKind::TinyInt, "INTEGER"),
    (TypeKind::SmallInt, "INTEGER"),
    (TypeKind::Int, "INTEGER"),
    (TypeKind::BigInt, "INTEGER"),
    (TypeKind::Decimal, "NUMERIC"),
    (TypeKind::Float, "REAL"),
    (TypeKind::Double, "REAL"),
    (TypeKind::Char, "TEXT"),
    (TypeKind::VarChar, "TEXT"),
    (TypeKind::NChar, "TEXT"),
    (TypeKind::NVarChar, "TEXT"),
    (TypeKind::Text, "TEXT"),
    (TypeKind::Date, "DATE"),
    (TypeKind::Time, "TIME"),
    (TypeKind::DateTime, "DATETIME"),
    (TypeKind::Timestamp, "DATETIME"),
    (TypeKind::Binary, "BLOB"),
    (TypeKind::VarBinary, "BLOB"),
    (TypeKind::Blob, "BLOB"),
    (TypeKind::Guid, "TEXT"),
    (TypeKind::Json, "TEXT"),
];

const POSTGRES_TYPES: &[(TypeKind, &str)] = &[
    (TypeKind::Bool, "BOOLEAN"),
    (TypeKind::TinyInt, "SMALLINT"),
    (TypeKind::SmallInt, "SMALLINT"),
    (TypeKind::Int, "INTEGER"),
    (TypeKind::BigInt, "BIGINT"),
    (TypeKind::Decimal, "NUMERIC"),
    (TypeKind::Float, "REAL"),
    (TypeKind::Double, "DOUBLE PRECISION"),
    (TypeKind::Char, "CHAR"),
    (TypeKind::VarChar, "VARCHAR"),
    (TypeKind::NChar, "CHAR"),
    (TypeKind::NVarChar, "VARCHAR"),
    (TypeKind::Text, "TEXT"),
    (TypeKind::Date, "DATE"),
    (TypeKind::Time, "TIME"),
    (TypeKind::DateTime, "TIMESTAMP"),
    (TypeKind::Timestamp, "TIMESTAMPTZ"),
    (TypeKind::Binary, "BYTEA"),
    (TypeKind::VarBinary, "BYTEA"),
    (TypeKind::Blob, "BYTEA"),
    (TypeKind::Guid, "UUID"),
    (TypeKind::Json, "JSONB"),
];

const MYSQL_TYPES: &[(TypeKind, &str)] = &[
    (TypeKind::Bool, "TINYINT(1)"),
    (TypeKind::TinyInt, "TINYINT"),
    (TypeKind::SmallInt, "SMALLINT"),
    (TypeKind::Int, "INT"),
    (TypeKind::BigInt, "BIGINT"),
    (TypeKind::Decimal, "DECIMAL"),
    (TypeKind::Float, "FLOAT"),
    (TypeKind::Double, "DOUBLE"),
    (TypeKind::Char, "CHAR"),
    (TypeKind::VarChar, "VARCHAR"),
    (TypeKind::NChar, "CHAR"),
    (TypeKind::NVarChar, "VARCHAR"),
    (TypeKind::Text, "LONGTEXT"),
    (TypeKind::Date, "DATE"),
    (TypeKind::Time, "TIME"),
    (TypeKind::DateTime, "DATETIME"),
    (TypeKind::Timestamp, "TIMESTAMP"),
    (TypeKind::Binary, "BINARY"),
    (TypeKind::VarBinary, "VARBINARY"),
    (TypeKind::Blob, "LONGBLOB"),
    (TypeKind::Guid, "CHAR(36)"),
    (TypeKind::Json, "JSON"),
];

/// How an unbounded length is written for variable-length types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum UnboundedLength {
    /// `NVARCHAR(MAX)`
    Max,
    /// `VARCHAR(255)`
    Fixed(u32),
    /// `VARCHAR`
    Omit,
}

/// Renders [`DataType`]s for one dialect
#[derive(Debug, Clone, Copy)]
pub struct TypeMap {
    names: &'static [(TypeKind, &'static str)],
    parameters: bool,
    unbounded: UnboundedLength,
}

impl TypeMap {
    pub fn for_dialect(dialect: Dialect) -> Self {
        match dialect {
            Dialect::SqlServer => Self { names: SQLSERVER_TYPES, parameters: true, unbounded: UnboundedLength::Max },
            // SQLite only has type affinities; parameters carry no meaning
            Dialect::Sqlite => Self { names: SQLITE_TYPES, parameters: false, unbounded: UnboundedLength::Omit },
            Dialect::PostgreSql => Self { names: POSTGRES_TYPES, parameters: true, unbounded: UnboundedLength::Omit },
            Dialect::MySql => Self { names: MYSQL_TYPES, parameters: true, unbounded: UnboundedLength::Fixed(255) },
        }
    }

    fn base_name(&self, kind: TypeKind) -> &'static str {
        self.names
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, name)| *name)
            .unwrap_or("TEXT")
    }

    /// Full type name including length or precision
    pub fn render(&self, data_type: &DataType) -> String {
        if data_type.kind == TypeKind::Native {
            return data_type.native.clone().unwrap_or_else(|| "TEXT".to_string());
        }

        let name = self.base_name(data_type.kind);
        if !self.parameters || name.contains('(') {
            return name.to_string();
        }

        if data_type.kind.takes_length() {
            let is_variable = matches!(
                data_type.kind,
                TypeKind::VarChar | TypeKind::NVarChar | TypeKind::VarBinary
            );
            return match (data_type.length, is_variable, self.unbounded) {
                (Some(length), _, _) => format!("{}({})", name, length),
                (None, true, UnboundedLength::Max) => format!("{}(MAX)", name),
                (None, true, UnboundedLength::Fixed(length)) => format!("{}({})", name, length),
                _ => name.to_string(),
            };
        }

        if data_type.kind.takes_precision() {
            return match (data_type.precision, data_type.scale) {
                (Some(p), Some(s)) => format!("{}({}, {})", name, p, s),
                (Some(p), None) => format!("{}({})", name, p),
                _ => name.to_string(),
            };
        }

        name.to_string()
    }
}
