//! Configuration schema (schemashift.toml)

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use crate::diagnostic::{DiagnosticCode, Severity};

/// SQL dialect the migration script is written for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    /// Microsoft SQL Server
    SqlServer,

    /// SQLite 3
    Sqlite,

    /// PostgreSQL
    PostgreSql,

    /// MySQL / MariaDB
    MySql,
}

impl Dialect {
    /// Every supported dialect
    pub const ALL: [Dialect; 4] = [Self::SqlServer, Self::Sqlite, Self::PostgreSql, Self::MySql];

    /// Stable identifier used in config files and on the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SqlServer => "sqlserver",
            Self::Sqlite => "sqlite",
            Self::PostgreSql => "postgresql",
            Self::MySql => "mysql",
        }
    }
}

impl Default for Dialect {
    fn default() -> Self {
        Self::SqlServer
    }
}

impl std::fmt::Display for Dialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SqlServer => write!(f, "SQL Server"),
            Self::Sqlite => write!(f, "SQLite"),
            Self::PostgreSql => write!(f, "PostgreSQL"),
            Self::MySql => write!(f, "MySQL"),
        }
    }
}

impl std::str::FromStr for Dialect {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sqlserver" | "mssql" | "tsql" => Ok(Self::SqlServer),
            "sqlite" | "sqlite3" => Ok(Self::Sqlite),
            "postgresql" | "postgres" | "pg" => Ok(Self::PostgreSql),
            "mysql" | "mariadb" => Ok(Self::MySql),
            other => Err(ConfigError::UnknownDialect(other.to_string())),
        }
    }
}

/// Severity threshold overrides for specific diagnostic codes
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeverityThreshold {
    /// Map of diagnostic code to severity override
    pub overrides: HashMap<String, Severity>,
}

impl SeverityThreshold {
    /// Get severity for a diagnostic code, or default
    pub fn get_severity(&self, code: DiagnosticCode, default: Severity) -> Severity {
        self.overrides
            .get(code.as_str())
            .copied()
            .unwrap_or(default)
    }

    /// Set severity override for a code
    pub fn set_override(&mut self, code: DiagnosticCode, severity: Severity) {
        self.overrides.insert(code.as_str().to_string(), severity);
    }
}

/// Which objects take part in a comparison
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompareOptions {
    pub include_sequences: bool,

    pub include_triggers: bool,

    pub include_views: bool,

    pub include_procedures: bool,

    pub include_functions: bool,

    pub include_data_types: bool,

    /// Honor `original_name` hints and emit renames instead of drop + add
    pub use_rename_hints: bool,

    /// Tables left out of the comparison (glob patterns, matched
    /// against both `name` and `schema.name`)
    pub exclude_tables: Vec<String>,
}

impl Default for CompareOptions {
    fn default() -> Self {
        Self {
            include_sequences: true,
            include_triggers: true,
            include_views: true,
            include_procedures: true,
            include_functions: true,
            include_data_types: true,
            use_rename_hints: true,
            exclude_tables: Vec::new(),
        }
    }
}

impl CompareOptions {
    /// Check if a table is excluded from the comparison
    pub fn is_table_excluded(&self, name: &str, schema: Option<&str>) -> bool {
        let qualified = schema.map(|s| format!("{}.{}", s, name));

        self.exclude_tables.iter().any(|pattern| {
            glob_match(pattern, name)
                || qualified.as_deref().map_or(false, |q| glob_match(pattern, q))
        })
    }
}

/// Script output settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Write a `-- NEW TABLE x` style comment before each result
    pub include_headers: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { include_headers: true }
    }
}

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// SQL dialect
    #[serde(default)]
    pub dialect: Dialect,

    /// Comparison options
    #[serde(default)]
    pub compare: CompareOptions,

    /// Severity thresholds
    #[serde(default)]
    pub severity: SeverityThreshold,

    /// Script output settings
    #[serde(default)]
    pub output: OutputConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dialect: Dialect::default(),
            compare: CompareOptions::default(),
            severity: SeverityThreshold::default(),
            output: OutputConfig::default(),
        }
    }
}

impl Config {
    /// Load config from TOML file
    pub fn from_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::IoError(e.to_string()))?;

        Self::from_toml(&contents)
    }

    /// Load config from TOML string
    pub fn from_toml(toml: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml)
            .map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Save config to TOML file
    pub fn save_to_file(&self, path: &std::path::Path) -> Result<(), ConfigError> {
        let toml = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::SerializeError(e.to_string()))?;

        std::fs::write(path, toml)
            .map_err(|e| ConfigError::IoError(e.to_string()))?;

        Ok(())
    }
}

/// Case-insensitive glob matching where `*` matches any run of characters
fn glob_match(pattern: &str, text: &str) -> bool {
    let pattern = pattern.to_ascii_lowercase();
    let text = text.to_ascii_lowercase();

    let mut parts = pattern.split('*');
    let first = parts.next().unwrap_or_default();
    let Some(mut rest) = text.strip_prefix(first) else {
        return false;
    };

    let mut parts: Vec<&str> = parts.collect();
    let Some(last) = parts.pop() else {
        // no wildcard
        return rest.is_empty();
    };

    for part in parts {
        match rest.find(part) {
            Some(at) => rest = &rest[at + part.len()..],
            None => return false,
        }
    }

    rest.len() >= last.len() && rest.ends_with(last)
}

/// Config error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Serialize error: {0}")]
    SerializeError(String),

    #[error("Unknown dialect '{0}' (expected sqlserver, sqlite, postgresql or mysql)")]
    UnknownDialect(String),
}
