//! CREATE TABLE generation

use schemashift_core::{
    names_match, Column, Constraint, ConstraintKind, DatabaseSchema, Diagnostic, DiagnosticCode,
    ModelError, Table,
};
use crate::profile::{DialectProfile, IdentityStyle};
use crate::references::{resolve_foreign_key, ForeignKeyTarget};
use crate::rendered::Rendered;
use crate::translator::closing_paren;

/// Conventional name for a newly created default constraint
pub fn default_constraint_name(table: &Table, column: &Column) -> String {
    format!("DF_{}_{}", table.name, column.name)
}

/// `name TYPE [identity] [NOT NULL] [DEFAULT value]`
///
/// `inline_primary_key` writes the SQLite form `INTEGER PRIMARY KEY
/// [AUTOINCREMENT]` for a single-column key.
pub fn column_definition(
    profile: &DialectProfile,
    table: &Table,
    column: &Column,
    inline_primary_key: bool,
) -> Rendered {
    let mut parts = vec![profile.escape(&column.name), profile.type_name(&column.data_type)];
    let mut diagnostics = Vec::new();
    let object = format!("{}.{}", table.name, column.name);

    if inline_primary_key {
        parts.push("PRIMARY KEY".to_string());
        if column.identity.is_some() {
            parts.push("AUTOINCREMENT".to_string());
        }
    } else if let Some(identity) = column.identity {
        match profile.identity {
            IdentityStyle::Identity => {
                parts.push(format!("IDENTITY({},{})", identity.seed, identity.increment));
            }
            IdentityStyle::GeneratedByDefault => {
                if identity.seed == 1 && identity.increment == 1 {
                    parts.push("GENERATED BY DEFAULT AS IDENTITY".to_string());
                } else {
                    parts.push(format!(
                        "GENERATED BY DEFAULT AS IDENTITY (START WITH {} INCREMENT BY {})",
                        identity.seed, identity.increment
                    ));
                }
            }
            IdentityStyle::AutoIncrement => parts.push("AUTO_INCREMENT".to_string()),
            IdentityStyle::InlinePrimaryKey => {
                diagnostics.push(
                    Diagnostic::from_code(
                        DiagnosticCode::UnsupportedFeature,
                        format!(
                            "{} only supports auto-increment on a single-column INTEGER PRIMARY KEY",
                            profile.dialect
                        ),
                    )
                    .with_object(object.clone()),
                );
            }
        }
    }

    if !column.is_nullable() {
        parts.push("NOT NULL".to_string());
    }

    if let (Some(default), None) = (&column.default_value, column.identity) {
        match profile.translator.translate(default) {
            Some(value) if profile.named_default_constraints => {
                let name = table
                    .find_default_constraint(&column.name)
                    .map(|c| c.name.clone())
                    .unwrap_or_else(|| default_constraint_name(table, column));
                parts.push(format!("CONSTRAINT {} DEFAULT {}", profile.escape(&name), value));
            }
            Some(value) => parts.push(format!("DEFAULT {}", value)),
            None => {
                tracing::warn!(column = %object, default = %default, "default value has no equivalent in {}", profile.dialect);
                diagnostics.push(
                    Diagnostic::from_code(
                        DiagnosticCode::UntranslatableDefault,
                        format!("default '{}' cannot be expressed in {}; omitted", default, profile.dialect),
                    )
                    .with_object(object),
                );
            }
        }
    }

    Rendered {
        sql: parts.join(" "),
        diagnostics,
    }
}

/// Constraint body without the `CONSTRAINT name` prefix
///
/// Foreign keys need their resolved target; other kinds ignore it.
pub fn constraint_body(
    profile: &DialectProfile,
    constraint: &Constraint,
    target: Option<&ForeignKeyTarget>,
) -> String {
    match constraint.kind {
        ConstraintKind::PrimaryKey => format!("PRIMARY KEY ({})", profile.column_list(&constraint.columns)),
        ConstraintKind::Unique => format!("UNIQUE ({})", profile.column_list(&constraint.columns)),
        ConstraintKind::Check => {
            let expression = constraint.expression.as_deref().unwrap_or("1=1").trim();
            if closing_paren(expression).map(|i| i + 1) == Some(expression.len()) {
                format!("CHECK {}", expression)
            } else {
                format!("CHECK ({})", expression)
            }
        }
        ConstraintKind::Default => format!(
            "DEFAULT {} FOR {}",
            constraint.expression.as_deref().unwrap_or("NULL"),
            profile.column_list(&constraint.columns)
        ),
        ConstraintKind::ForeignKey => {
            let (schema, table, columns) = match target {
                Some(ForeignKeyTarget::Resolved { schema, table, columns }) => {
                    (schema.as_deref(), table.as_str(), columns.as_slice())
                }
                _ => (
                    constraint.refers_to_schema.as_deref(),
                    constraint.refers_to_table.as_deref().unwrap_or_default(),
                    constraint.refers_to_columns.as_slice(),
                ),
            };

            let mut body = format!(
                "FOREIGN KEY ({}) REFERENCES {} ({})",
                profile.column_list(&constraint.columns),
                profile.qualify(schema, table),
                profile.column_list(columns)
            );
            if let Some(rule) = &constraint.delete_rule {
                body.push_str(&format!(" ON DELETE {}", rule.to_uppercase()));
            }
            if let Some(rule) = &constraint.update_rule {
                body.push_str(&format!(" ON UPDATE {}", rule.to_uppercase()));
            }
            body
        }
    }
}

/// `CONSTRAINT name body`, or just the body for unnamed constraints
pub fn named_constraint(profile: &DialectProfile, name: &str, body: String) -> String {
    if name.is_empty() {
        body
    } else {
        format!("CONSTRAINT {} {}", profile.escape(name), body)
    }
}

/// Writes a full CREATE TABLE statement
pub struct TableGenerator<'a> {
    profile: &'a DialectProfile,
    table: &'a Table,
    schema: Option<&'a DatabaseSchema>,
}

impl<'a> TableGenerator<'a> {
    pub fn new(profile: &'a DialectProfile, table: &'a Table) -> Self {
        Self {
            profile,
            table,
            schema: None,
        }
    }

    /// Snapshot used to resolve foreign key targets
    pub fn with_schema(mut self, schema: &'a DatabaseSchema) -> Self {
        self.schema = Some(schema);
        self
    }

    fn inline_key_column(&self) -> Option<&'a str> {
        if !self.profile.inline_primary_key {
            return None;
        }

        match self.table.primary_key_columns().as_slice() {
            [single] => Some(*single),
            _ => None,
        }
    }

    pub fn write(&self) -> Result<Rendered, ModelError> {
        let profile = self.profile;
        let table = self.table;
        let inline_key = self.inline_key_column();

        let mut lines = Vec::new();
        let mut out = Rendered::default();

        for column in &table.columns {
            let is_inline_key = inline_key.map_or(false, |key| names_match(key, &column.name));
            let definition = column_definition(profile, table, column, is_inline_key);
            lines.push(definition.sql);
            out.diagnostics.extend(definition.diagnostics);
        }

        let pk_columns = table.primary_key_columns();
        if inline_key.is_none() && !pk_columns.is_empty() {
            let (name, columns) = match &table.primary_key {
                Some(pk) => (pk.name.clone(), pk.columns.clone()),
                None => (String::new(), pk_columns.iter().map(|c| c.to_string()).collect()),
            };
            lines.push(named_constraint(
                profile,
                &name,
                format!("PRIMARY KEY ({})", profile.column_list(&columns)),
            ));
        }

        for constraint in table.unique_keys.iter().chain(&table.check_constraints) {
            lines.push(named_constraint(
                profile,
                &constraint.name,
                constraint_body(profile, constraint, None),
            ));
        }

        if profile.foreign_keys_inline {
            for fk in &table.foreign_keys {
                match resolve_foreign_key(table, fk, self.schema)? {
                    target @ ForeignKeyTarget::Resolved { .. } => {
                        lines.push(named_constraint(profile, &fk.name, constraint_body(profile, fk, Some(&target))));
                    }
                    ForeignKeyTarget::Unresolved(reason) => {
                        tracing::warn!(table = %table.qualified_name(), foreign_key = %fk.name, "{}", reason);
                        out.append(Rendered::comment(
                            format!("foreign key {} omitted: {}", fk.name, reason),
                            Diagnostic::from_code(DiagnosticCode::UnresolvedReference, reason)
                                .with_object(format!("{}.{}", table.name, fk.name)),
                        ));
                    }
                }
            }
        }

        out.push_line(format!(
            "CREATE TABLE {} (\n  {}\n);",
            profile.table_name(table),
            lines.join(",\n  ")
        ));

        Ok(out)
    }
}
