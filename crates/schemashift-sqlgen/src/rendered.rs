//! Rendered SQL plus the diagnostics raised while rendering it

use schemashift_core::{Diagnostic, DiagnosticCode, Dialect};

/// Output of a generator operation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Rendered {
    /// SQL text; one statement or comment per line group
    pub sql: String,

    /// Problems found while rendering
    pub diagnostics: Vec<Diagnostic>,
}

impl Rendered {
    /// Wrap SQL text with no diagnostics
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            diagnostics: Vec::new(),
        }
    }

    /// A `-- text` comment standing in for a statement that cannot be written
    pub fn comment(text: impl AsRef<str>, diagnostic: Diagnostic) -> Self {
        Self {
            sql: format!("-- {}", text.as_ref()),
            diagnostics: vec![diagnostic],
        }
    }

    /// The dialect has no syntax for this change
    pub fn unsupported(dialect: Dialect, what: &str, object: &str) -> Self {
        let message = format!("{} does not support {}", dialect, what);
        Self::comment(
            format!("{}: {}", message, object),
            Diagnostic::from_code(DiagnosticCode::UnsupportedFeature, message).with_object(object),
        )
    }

    /// Attach a diagnostic
    pub fn with_diagnostic(mut self, diagnostic: Diagnostic) -> Self {
        self.diagnostics.push(diagnostic);
        self
    }

    /// Append a line of SQL
    pub fn push_line(&mut self, line: impl AsRef<str>) {
        if !self.sql.is_empty() {
            self.sql.push('\n');
        }
        self.sql.push_str(line.as_ref());
    }

    /// Append another rendering, keeping its diagnostics
    pub fn append(&mut self, other: Rendered) {
        if !other.sql.is_empty() {
            self.push_line(&other.sql);
        }
        self.diagnostics.extend(other.diagnostics);
    }

    /// Rewrite the SQL text, keeping the diagnostics
    pub fn map_sql(mut self, f: impl FnOnce(&str) -> String) -> Self {
        self.sql = f(&self.sql);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.sql.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_joins_lines_and_diagnostics() {
        let mut out = Rendered::new("ALTER TABLE t DROP CONSTRAINT df;");
        out.append(Rendered::unsupported(Dialect::Sqlite, "sequences", "SEQ_ORDER_ID"));

        assert_eq!(
            out.sql,
            "ALTER TABLE t DROP CONSTRAINT df;\n-- SQLite does not support sequences: SEQ_ORDER_ID"
        );
        assert_eq!(out.diagnostics.len(), 1);
        assert_eq!(out.diagnostics[0].code, DiagnosticCode::UnsupportedFeature);
    }

    #[test]
    fn push_line_skips_leading_newline() {
        let mut out = Rendered::default();
        out.push_line("a;");
        out.push_line("b;");
        assert_eq!(out.sql, "a;\nb;");
    }
}
