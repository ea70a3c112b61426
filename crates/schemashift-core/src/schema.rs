//! Schema snapshot model
//!
//! A [`DatabaseSchema`] is an immutable snapshot captured by an external
//! schema provider. Every name comparison in the model is case-insensitive,
//! matching how the supported databases resolve unquoted identifiers.

use serde::{Deserialize, Serialize};

/// Case-insensitive identifier comparison
pub fn names_match(a: &str, b: &str) -> bool {
    a.eq_ignore_ascii_case(b)
}

/// Compare two optional schema owners
///
/// A missing owner only matches another missing owner.
pub fn owners_match(a: Option<&str>, b: Option<&str>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => names_match(a, b),
        (None, None) => true,
        _ => false,
    }
}

fn columns_match(a: &[String], b: &[String]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(a, b)| names_match(a, b))
}

fn normalize_whitespace(sql: &str) -> String {
    sql.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn default_true() -> bool {
    true
}

/// Logical data type kinds shared by every dialect
///
/// `Native` passes a dialect-specific type name through verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeKind {
    Bool,
    TinyInt,
    SmallInt,
    Int,
    BigInt,
    Decimal,
    Float,
    Double,
    Char,
    VarChar,
    NChar,
    NVarChar,
    Text,
    Date,
    Time,
    DateTime,
    Timestamp,
    Binary,
    VarBinary,
    Blob,
    Guid,
    Json,
    Native,
}

impl TypeKind {
    /// Whether the type is parameterised by a length
    pub fn takes_length(&self) -> bool {
        matches!(
            self,
            Self::Char | Self::VarChar | Self::NChar | Self::NVarChar | Self::Binary | Self::VarBinary
        )
    }

    /// Whether the type is parameterised by precision and scale
    pub fn takes_precision(&self) -> bool {
        matches!(self, Self::Decimal)
    }

    /// Whether the type is an integer type
    pub fn is_integer(&self) -> bool {
        matches!(self, Self::TinyInt | Self::SmallInt | Self::Int | Self::BigInt)
    }
}

/// A declared column type
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DataType {
    /// Logical kind
    pub kind: TypeKind,

    /// Native type name, used verbatim when `kind` is `Native`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub native: Option<String>,

    /// Length for character and binary types (`None` means unbounded)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<u32>,

    /// Precision for decimal types
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub precision: Option<u16>,

    /// Scale for decimal types
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<u16>,
}

impl DataType {
    /// Create a data type with no parameters
    pub fn new(kind: TypeKind) -> Self {
        Self {
            kind,
            native: None,
            length: None,
            precision: None,
            scale: None,
        }
    }

    /// A `VARCHAR(length)`
    pub fn varchar(length: u32) -> Self {
        Self::new(TypeKind::VarChar).with_length(length)
    }

    /// An `NVARCHAR(length)`
    pub fn nvarchar(length: u32) -> Self {
        Self::new(TypeKind::NVarChar).with_length(length)
    }

    /// A `DECIMAL(precision, scale)`
    pub fn decimal(precision: u16, scale: u16) -> Self {
        Self {
            precision: Some(precision),
            scale: Some(scale),
            ..Self::new(TypeKind::Decimal)
        }
    }

    /// A dialect-native type passed through verbatim
    pub fn native(name: impl Into<String>) -> Self {
        Self {
            native: Some(name.into()),
            ..Self::new(TypeKind::Native)
        }
    }

    /// Set the length
    pub fn with_length(mut self, length: u32) -> Self {
        self.length = Some(length);
        self
    }

    /// Compare two types, ignoring native name case
    pub fn same_as(&self, other: &DataType) -> bool {
        let native_match = match (&self.native, &other.native) {
            (Some(a), Some(b)) => names_match(a, b),
            (None, None) => true,
            _ => false,
        };

        self.kind == other.kind
            && native_match
            && self.length == other.length
            && self.precision == other.precision
            && self.scale == other.scale
    }
}

impl std::fmt::Display for DataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let (TypeKind::Native, Some(native)) = (self.kind, &self.native) {
            return write!(f, "{}", native);
        }

        write!(f, "{:?}", self.kind)?;
        match (self.length, self.precision, self.scale) {
            (Some(length), _, _) => write!(f, "({})", length),
            (None, Some(p), Some(s)) => write!(f, "({}, {})", p, s),
            (None, Some(p), None) => write!(f, "({})", p),
            _ => Ok(()),
        }
    }
}

/// Identity (auto-increment) definition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Identity {
    /// First generated value
    pub seed: i64,

    /// Step between generated values
    pub increment: i64,
}

impl Default for Identity {
    fn default() -> Self {
        Self { seed: 1, increment: 1 }
    }
}

/// A table column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    /// Column name
    pub name: String,

    /// Declared type
    pub data_type: DataType,

    /// Declared nullability (identity columns are never nullable)
    #[serde(default = "default_true")]
    pub nullable: bool,

    /// Default value expression, dialect-native
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,

    /// Identity definition
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identity: Option<Identity>,

    /// Part of the primary key
    #[serde(default)]
    pub is_primary_key: bool,

    /// 1-based position within the table (0 = unassigned)
    #[serde(default)]
    pub ordinal: u32,

    /// Previous name when the column has been renamed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_name: Option<String>,
}

impl Column {
    /// Create a new nullable column
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
            nullable: true,
            default_value: None,
            identity: None,
            is_primary_key: false,
            ordinal: 0,
            original_name: None,
        }
    }

    /// Mark the column NOT NULL
    pub fn not_null(mut self) -> Self {
        self.nullable = false;
        self
    }

    /// Set the default value expression
    pub fn with_default(mut self, value: impl Into<String>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    /// Make the column an identity column
    pub fn with_identity(mut self, seed: i64, increment: i64) -> Self {
        self.identity = Some(Identity { seed, increment });
        self.nullable = false;
        self
    }

    /// Flag the column as part of the primary key
    pub fn primary_key(mut self) -> Self {
        self.is_primary_key = true;
        self.nullable = false;
        self
    }

    /// Record the column's previous name
    pub fn renamed_from(mut self, original_name: impl Into<String>) -> Self {
        self.original_name = Some(original_name.into());
        self
    }

    /// Effective nullability
    pub fn is_nullable(&self) -> bool {
        self.nullable && self.identity.is_none()
    }
}

/// Constraint kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConstraintKind {
    PrimaryKey,
    ForeignKey,
    Unique,
    Check,
    Default,
}

impl std::fmt::Display for ConstraintKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PrimaryKey => write!(f, "primary key"),
            Self::ForeignKey => write!(f, "foreign key"),
            Self::Unique => write!(f, "unique key"),
            Self::Check => write!(f, "check constraint"),
            Self::Default => write!(f, "default constraint"),
        }
    }
}

/// A table constraint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Constraint {
    /// Constraint name (may be empty for unnamed constraints)
    #[serde(default)]
    pub name: String,

    /// Constraint kind
    pub kind: ConstraintKind,

    /// Owning table
    pub table_name: String,

    /// Constrained columns, in key order
    #[serde(default)]
    pub columns: Vec<String>,

    /// Referenced table (foreign keys)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refers_to_table: Option<String>,

    /// Referenced table's schema (foreign keys)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refers_to_schema: Option<String>,

    /// Referenced columns; empty means the referenced table's primary key
    #[serde(default)]
    pub refers_to_columns: Vec<String>,

    /// Check expression or default value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expression: Option<String>,

    /// ON DELETE rule (foreign keys)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delete_rule: Option<String>,

    /// ON UPDATE rule (foreign keys)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_rule: Option<String>,
}

impl Constraint {
    fn new(name: impl Into<String>, kind: ConstraintKind, table_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind,
            table_name: table_name.into(),
            columns: Vec::new(),
            refers_to_table: None,
            refers_to_schema: None,
            refers_to_columns: Vec::new(),
            expression: None,
            delete_rule: None,
            update_rule: None,
        }
    }

    /// Create a primary key constraint
    pub fn primary_key(name: impl Into<String>, table_name: impl Into<String>, columns: &[&str]) -> Self {
        Self {
            columns: columns.iter().map(|c| c.to_string()).collect(),
            ..Self::new(name, ConstraintKind::PrimaryKey, table_name)
        }
    }

    /// Create a foreign key referencing another table's primary key
    pub fn foreign_key(
        name: impl Into<String>,
        table_name: impl Into<String>,
        columns: &[&str],
        refers_to_table: impl Into<String>,
    ) -> Self {
        Self {
            columns: columns.iter().map(|c| c.to_string()).collect(),
            refers_to_table: Some(refers_to_table.into()),
            ..Self::new(name, ConstraintKind::ForeignKey, table_name)
        }
    }

    /// Create a unique key constraint
    pub fn unique(name: impl Into<String>, table_name: impl Into<String>, columns: &[&str]) -> Self {
        Self {
            columns: columns.iter().map(|c| c.to_string()).collect(),
            ..Self::new(name, ConstraintKind::Unique, table_name)
        }
    }

    /// Create a check constraint
    pub fn check(name: impl Into<String>, table_name: impl Into<String>, expression: impl Into<String>) -> Self {
        Self {
            expression: Some(expression.into()),
            ..Self::new(name, ConstraintKind::Check, table_name)
        }
    }

    /// Create a named default constraint bound to one column
    pub fn default_value(
        name: impl Into<String>,
        table_name: impl Into<String>,
        column: impl Into<String>,
        expression: impl Into<String>,
    ) -> Self {
        Self {
            columns: vec![column.into()],
            expression: Some(expression.into()),
            ..Self::new(name, ConstraintKind::Default, table_name)
        }
    }

    /// Set explicit referenced columns
    pub fn with_referenced_columns(mut self, columns: &[&str]) -> Self {
        self.refers_to_columns = columns.iter().map(|c| c.to_string()).collect();
        self
    }

    /// Set the referenced table's schema
    pub fn with_referenced_schema(mut self, schema: impl Into<String>) -> Self {
        self.refers_to_schema = Some(schema.into());
        self
    }

    /// Set the ON DELETE rule
    pub fn on_delete(mut self, rule: impl Into<String>) -> Self {
        self.delete_rule = Some(rule.into());
        self
    }

    /// Set the ON UPDATE rule
    pub fn on_update(mut self, rule: impl Into<String>) -> Self {
        self.update_rule = Some(rule.into());
        self
    }

    /// Whether the constraint covers the given column
    pub fn covers_column(&self, column: &str) -> bool {
        self.columns.iter().any(|c| names_match(c, column))
    }

    /// Compare definitions, ignoring the constraint name and owning table
    pub fn same_definition(&self, other: &Constraint) -> bool {
        let optional_match = |a: &Option<String>, b: &Option<String>| match (a, b) {
            (Some(a), Some(b)) => names_match(a, b),
            (None, None) => true,
            _ => false,
        };
        let expression_match = match (&self.expression, &other.expression) {
            (Some(a), Some(b)) => normalize_whitespace(a).eq_ignore_ascii_case(&normalize_whitespace(b)),
            (None, None) => true,
            _ => false,
        };

        self.kind == other.kind
            && columns_match(&self.columns, &other.columns)
            && optional_match(&self.refers_to_table, &other.refers_to_table)
            && optional_match(&self.refers_to_schema, &other.refers_to_schema)
            && columns_match(&self.refers_to_columns, &other.refers_to_columns)
            && expression_match
            && optional_match(&self.delete_rule, &other.delete_rule)
            && optional_match(&self.update_rule, &other.update_rule)
    }
}

/// A table index
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Index {
    /// Index name
    pub name: String,

    /// Owning table
    pub table_name: String,

    /// Indexed columns, in key order
    pub columns: Vec<String>,

    /// Unique index
    #[serde(default)]
    pub is_unique: bool,
}

impl Index {
    /// Create a non-unique index
    pub fn new(name: impl Into<String>, table_name: impl Into<String>, columns: &[&str]) -> Self {
        Self {
            name: name.into(),
            table_name: table_name.into(),
            columns: columns.iter().map(|c| c.to_string()).collect(),
            is_unique: false,
        }
    }

    /// Make the index unique
    pub fn unique(mut self) -> Self {
        self.is_unique = true;
        self
    }

    /// Compare definitions, ignoring the name and owning table
    pub fn same_definition(&self, other: &Index) -> bool {
        self.is_unique == other.is_unique && columns_match(&self.columns, &other.columns)
    }
}

/// A table trigger; the body is dialect-native and opaque
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trigger {
    pub name: String,

    pub table_name: String,

    /// Full trigger definition (`CREATE TRIGGER ...`)
    #[serde(default)]
    pub body: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timing: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event: Option<String>,
}

impl Trigger {
    pub fn new(name: impl Into<String>, table_name: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            table_name: table_name.into(),
            body: body.into(),
            timing: None,
            event: None,
        }
    }

    /// Compare bodies with whitespace normalized
    pub fn same_body(&self, other: &Trigger) -> bool {
        normalize_whitespace(&self.body) == normalize_whitespace(&other.body)
    }
}

/// A sequence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sequence {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_owner: Option<String>,

    #[serde(default = "Sequence::default_start")]
    pub start: i64,

    #[serde(default = "Sequence::default_increment")]
    pub increment: i64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_value: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_value: Option<i64>,
}

impl Sequence {
    fn default_start() -> i64 {
        1
    }

    fn default_increment() -> i64 {
        1
    }

    /// Create a sequence starting at 1 with increment 1
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            schema_owner: None,
            start: 1,
            increment: 1,
            min_value: None,
            max_value: None,
        }
    }

    pub fn with_schema(mut self, schema: impl Into<String>) -> Self {
        self.schema_owner = Some(schema.into());
        self
    }

    pub fn with_start(mut self, start: i64) -> Self {
        self.start = start;
        self
    }

    pub fn with_increment(mut self, increment: i64) -> Self {
        self.increment = increment;
        self
    }
}

/// Objects defined entirely by dialect-native SQL text
pub trait SqlDefined {
    fn name(&self) -> &str;

    fn schema_owner(&self) -> Option<&str>;

    fn sql(&self) -> &str;

    /// Compare definitions with whitespace normalized
    fn same_sql(&self, other: &Self) -> bool
    where
        Self: Sized,
    {
        normalize_whitespace(self.sql()) == normalize_whitespace(other.sql())
    }
}

macro_rules! sql_defined_object {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
        pub struct $name {
            pub name: String,

            #[serde(default, skip_serializing_if = "Option::is_none")]
            pub schema_owner: Option<String>,

            /// Full definition, dialect-native
            pub sql: String,
        }

        impl $name {
            pub fn new(name: impl Into<String>, sql: impl Into<String>) -> Self {
                Self {
                    name: name.into(),
                    schema_owner: None,
                    sql: sql.into(),
                }
            }

            pub fn with_schema(mut self, schema: impl Into<String>) -> Self {
                self.schema_owner = Some(schema.into());
                self
            }
        }

        impl SqlDefined for $name {
            fn name(&self) -> &str {
                &self.name
            }

            fn schema_owner(&self) -> Option<&str> {
                self.schema_owner.as_deref()
            }

            fn sql(&self) -> &str {
                &self.sql
            }
        }
    };
}

sql_defined_object!(
    /// A view
    View
);
sql_defined_object!(
    /// A stored procedure
    StoredProcedure
);
sql_defined_object!(
    /// A user-defined function
    Function
);

/// A user-defined data type (SQL Server alias type, PostgreSQL domain)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserDataType {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_owner: Option<String>,

    /// Underlying type
    pub base_type: DataType,

    #[serde(default = "default_true")]
    pub nullable: bool,
}

impl UserDataType {
    pub fn new(name: impl Into<String>, base_type: DataType) -> Self {
        Self {
            name: name.into(),
            schema_owner: None,
            base_type,
            nullable: true,
        }
    }

    pub fn not_null(mut self) -> Self {
        self.nullable = false;
        self
    }

    pub fn same_definition(&self, other: &UserDataType) -> bool {
        self.base_type.same_as(&other.base_type) && self.nullable == other.nullable
    }
}

/// A table with its columns, keys, indexes and triggers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    /// Table name
    pub name: String,

    /// Schema owner (`dbo`, `public`, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_owner: Option<String>,

    /// Ordered columns
    #[serde(default)]
    pub columns: Vec<Column>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_key: Option<Constraint>,

    #[serde(default)]
    pub foreign_keys: Vec<Constraint>,

    #[serde(default)]
    pub unique_keys: Vec<Constraint>,

    #[serde(default)]
    pub check_constraints: Vec<Constraint>,

    /// Named default constraints (SQL Server)
    #[serde(default)]
    pub default_constraints: Vec<Constraint>,

    #[serde(default)]
    pub indexes: Vec<Index>,

    #[serde(default)]
    pub triggers: Vec<Trigger>,

    /// Previous name when the table has been renamed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_name: Option<String>,
}

impl Table {
    /// Create an empty table
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            schema_owner: None,
            columns: Vec::new(),
            primary_key: None,
            foreign_keys: Vec::new(),
            unique_keys: Vec::new(),
            check_constraints: Vec::new(),
            default_constraints: Vec::new(),
            indexes: Vec::new(),
            triggers: Vec::new(),
            original_name: None,
        }
    }

    /// Set the schema owner
    pub fn with_schema(mut self, schema: impl Into<String>) -> Self {
        self.schema_owner = Some(schema.into());
        self
    }

    /// Append a column, assigning the next ordinal when unset
    pub fn with_column(mut self, mut column: Column) -> Self {
        if column.ordinal == 0 {
            column.ordinal = self.columns.iter().map(|c| c.ordinal).max().unwrap_or(0) + 1;
        }
        self.columns.push(column);
        self
    }

    /// Set the primary key and flag its columns
    pub fn with_primary_key(mut self, constraint: Constraint) -> Self {
        for column in &mut self.columns {
            if constraint.covers_column(&column.name) {
                column.is_primary_key = true;
                column.nullable = false;
            }
        }
        self.primary_key = Some(constraint);
        self
    }

    pub fn with_foreign_key(mut self, constraint: Constraint) -> Self {
        self.foreign_keys.push(constraint);
        self
    }

    pub fn with_unique_key(mut self, constraint: Constraint) -> Self {
        self.unique_keys.push(constraint);
        self
    }

    pub fn with_check(mut self, constraint: Constraint) -> Self {
        self.check_constraints.push(constraint);
        self
    }

    pub fn with_default_constraint(mut self, constraint: Constraint) -> Self {
        self.default_constraints.push(constraint);
        self
    }

    pub fn with_index(mut self, index: Index) -> Self {
        self.indexes.push(index);
        self
    }

    pub fn with_trigger(mut self, trigger: Trigger) -> Self {
        self.triggers.push(trigger);
        self
    }

    /// Record the table's previous name
    pub fn renamed_from(mut self, original_name: impl Into<String>) -> Self {
        self.original_name = Some(original_name.into());
        self
    }

    /// `schema.name`, or just the name without an owner
    pub fn qualified_name(&self) -> String {
        match &self.schema_owner {
            Some(schema) => format!("{}.{}", schema, self.name),
            None => self.name.clone(),
        }
    }

    /// Find a column by name
    pub fn find_column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| names_match(&c.name, name))
    }

    /// Primary key columns, from the constraint or else the column flags
    pub fn primary_key_columns(&self) -> Vec<&str> {
        match &self.primary_key {
            Some(pk) => pk.columns.iter().map(String::as_str).collect(),
            None => self
                .columns
                .iter()
                .filter(|c| c.is_primary_key)
                .map(|c| c.name.as_str())
                .collect(),
        }
    }

    /// Named default constraint bound to a column
    pub fn find_default_constraint(&self, column: &str) -> Option<&Constraint> {
        self.default_constraints.iter().find(|c| c.covers_column(column))
    }

    /// Check model invariants
    pub fn validate(&self) -> Result<(), crate::ModelError> {
        use crate::ModelError;

        let mut last_ordinal = 0;
        for (i, column) in self.columns.iter().enumerate() {
            if self.columns[..i].iter().any(|c| names_match(&c.name, &column.name)) {
                return Err(ModelError::DuplicateColumn {
                    table: self.qualified_name(),
                    column: column.name.clone(),
                });
            }

            if column.ordinal != 0 {
                if column.ordinal <= last_ordinal {
                    return Err(ModelError::OrdinalOutOfOrder {
                        table: self.qualified_name(),
                        column: column.name.clone(),
                    });
                }
                last_ordinal = column.ordinal;
            }
        }

        if let Some(pk) = &self.primary_key {
            for name in &pk.columns {
                if self.find_column(name).is_none() {
                    return Err(ModelError::PrimaryKeyColumnMissing {
                        table: self.qualified_name(),
                        constraint: pk.name.clone(),
                        column: name.clone(),
                    });
                }
            }

            for column in self.columns.iter().filter(|c| c.is_primary_key) {
                if !pk.covers_column(&column.name) {
                    return Err(ModelError::PrimaryKeyFlagMismatch {
                        table: self.qualified_name(),
                        constraint: pk.name.clone(),
                        column: column.name.clone(),
                    });
                }
            }
        }

        Ok(())
    }
}

/// A complete schema snapshot
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DatabaseSchema {
    /// Database name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Default owner
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,

    #[serde(default)]
    pub tables: Vec<Table>,

    #[serde(default)]
    pub views: Vec<View>,

    #[serde(default)]
    pub sequences: Vec<Sequence>,

    #[serde(default)]
    pub stored_procedures: Vec<StoredProcedure>,

    #[serde(default)]
    pub functions: Vec<Function>,

    #[serde(default)]
    pub data_types: Vec<UserDataType>,
}

impl DatabaseSchema {
    /// Create an empty schema
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_table(mut self, table: Table) -> Self {
        self.tables.push(table);
        self
    }

    pub fn with_view(mut self, view: View) -> Self {
        self.views.push(view);
        self
    }

    pub fn with_sequence(mut self, sequence: Sequence) -> Self {
        self.sequences.push(sequence);
        self
    }

    pub fn with_procedure(mut self, procedure: StoredProcedure) -> Self {
        self.stored_procedures.push(procedure);
        self
    }

    pub fn with_function(mut self, function: Function) -> Self {
        self.functions.push(function);
        self
    }

    pub fn with_data_type(mut self, data_type: UserDataType) -> Self {
        self.data_types.push(data_type);
        self
    }

    /// Find a table by name; a `None` schema matches any owner
    pub fn find_table(&self, name: &str, schema: Option<&str>) -> Option<&Table> {
        self.tables.iter().find(|t| {
            names_match(&t.name, name)
                && match schema {
                    Some(schema) => owners_match(t.schema_owner.as_deref(), Some(schema)),
                    None => true,
                }
        })
    }

    /// Whether the snapshot holds no objects at all
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
            && self.views.is_empty()
            && self.sequences.is_empty()
            && self.stored_procedures.is_empty()
            && self.functions.is_empty()
            && self.data_types.is_empty()
    }

    /// Check model invariants for every table
    pub fn validate(&self) -> Result<(), crate::ModelError> {
        self.tables.iter().try_for_each(Table::validate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ModelError;

    fn customers() -> Table {
        Table::new("Customers")
            .with_schema("dbo")
            .with_column(Column::new("Id", DataType::new(TypeKind::Int)).with_identity(1, 1))
            .with_column(Column::new("Name", DataType::nvarchar(100)).not_null())
            .with_primary_key(Constraint::primary_key("PK_Customers", "Customers", &["Id"]))
    }

    #[test]
    fn columns_get_sequential_ordinals() {
        let table = customers();
        let ordinals: Vec<u32> = table.columns.iter().map(|c| c.ordinal).collect();
        assert_eq!(ordinals, vec![1, 2]);
    }

    #[test]
    fn primary_key_flags_columns() {
        let table = customers();
        let id = table.find_column("id").unwrap();
        assert!(id.is_primary_key);
        assert!(!id.is_nullable());
        assert_eq!(table.primary_key_columns(), vec!["Id"]);
    }

    #[test]
    fn identity_columns_are_not_nullable() {
        let mut column = Column::new("Seq", DataType::new(TypeKind::BigInt)).with_identity(100, 10);
        column.nullable = true;
        assert!(!column.is_nullable());
    }

    #[test]
    fn find_table_is_case_insensitive() {
        let schema = DatabaseSchema::new().with_table(customers());
        assert!(schema.find_table("CUSTOMERS", None).is_some());
        assert!(schema.find_table("customers", Some("DBO")).is_some());
        assert!(schema.find_table("customers", Some("sales")).is_none());
    }

    #[test]
    fn duplicate_columns_fail_validation() {
        let table = customers().with_column(Column::new("name", DataType::varchar(10)));
        let err = table.validate().unwrap_err();
        assert!(matches!(err, ModelError::DuplicateColumn { ref column, .. } if column == "name"));
    }

    #[test]
    fn pk_flag_outside_constraint_fails_validation() {
        let mut table = customers();
        table.columns[1].is_primary_key = true;
        assert!(matches!(
            table.validate(),
            Err(ModelError::PrimaryKeyFlagMismatch { .. })
        ));
    }

    #[test]
    fn ordinals_must_increase() {
        let mut table = customers();
        table.columns[1].ordinal = 1;
        assert!(matches!(table.validate(), Err(ModelError::OrdinalOutOfOrder { .. })));
    }

    #[test]
    fn constraint_definitions_ignore_name_and_case() {
        let a = Constraint::foreign_key("FK_A", "Orders", &["CustomerId"], "Customers");
        let b = Constraint::foreign_key("FK_B", "Orders", &["customerid"], "CUSTOMERS");
        assert!(a.same_definition(&b));

        let c = b.clone().on_delete("CASCADE");
        assert!(!a.same_definition(&c));
    }

    #[test]
    fn trigger_bodies_compare_whitespace_insensitive() {
        let a = Trigger::new("trg", "Orders", "CREATE TRIGGER trg\nAFTER INSERT ON Orders BEGIN END");
        let b = Trigger::new("trg", "Orders", "CREATE TRIGGER trg AFTER INSERT   ON Orders BEGIN END");
        assert!(a.same_body(&b));
    }

    #[test]
    fn data_type_display() {
        assert_eq!(DataType::nvarchar(50).to_string(), "NVarChar(50)");
        assert_eq!(DataType::decimal(10, 2).to_string(), "Decimal(10, 2)");
        assert_eq!(DataType::native("geography").to_string(), "geography");
    }
}
