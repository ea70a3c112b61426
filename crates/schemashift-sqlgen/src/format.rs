//! Identifier quoting per dialect

use std::fmt::Debug;

/// Words quoted by every quote-when-needed dialect
const RESERVED_WORDS: &[&str] = &[
    "add", "all", "alter", "and", "as", "asc", "between", "by", "case", "check", "column",
    "constraint", "create", "cross", "default", "delete", "desc", "distinct", "drop", "else",
    "end", "exists", "foreign", "from", "full", "group", "having", "in", "index", "inner",
    "insert", "into", "is", "join", "key", "left", "like", "limit", "not", "null", "offset",
    "on", "or", "order", "outer", "primary", "references", "right", "select", "set", "table",
    "then", "to", "trigger", "union", "unique", "update", "user", "using", "values", "view",
    "when", "where", "with",
];

/// Turns raw names into identifiers the dialect will parse
pub trait SqlFormatProvider: Debug + Send + Sync {
    /// Quote a single identifier if needed
    fn escape(&self, name: &str) -> String;

    /// `schema.name`, with each part escaped
    fn qualify(&self, schema: Option<&str>, name: &str) -> String {
        match schema {
            Some(schema) if !schema.is_empty() => format!("{}.{}", self.escape(schema), self.escape(name)),
            _ => self.escape(name),
        }
    }

    /// Comma-separated escaped column list
    fn escape_list(&self, names: &[String]) -> String {
        names.iter().map(|n| self.escape(n)).collect::<Vec<_>>().join(", ")
    }
}

/// SQL Server style: every identifier in brackets
#[derive(Debug, Default, Clone, Copy)]
pub struct BracketQuoter;

impl SqlFormatProvider for BracketQuoter {
    fn escape(&self, name: &str) -> String {
        format!("[{}]", name.replace(']', "]]"))
    }
}

/// Quotes an identifier only when the dialect would otherwise misread it
///
/// A name is left bare when it is a plain word (letter or underscore, then
/// letters, digits or underscores) and not a reserved word. Dialects that
/// fold unquoted names to lower case additionally require the name to be
/// lower case already.
#[derive(Debug, Clone, Copy)]
pub struct IdentifierQuoter {
    open: char,
    close: char,
    folds_case: bool,
}

impl IdentifierQuoter {
    /// SQLite: double quotes, case-insensitive names
    pub fn sqlite() -> Self {
        Self { open: '"', close: '"', folds_case: false }
    }

    /// PostgreSQL: double quotes, unquoted names fold to lower case
    pub fn postgres() -> Self {
        Self { open: '"', close: '"', folds_case: true }
    }

    /// MySQL: backticks
    pub fn mysql() -> Self {
        Self { open: '`', close: '`', folds_case: false }
    }

    fn is_safe(&self, name: &str) -> bool {
        let mut chars = name.chars();
        let plain = match chars.next() {
            Some(c) if c.is_ascii_alphabetic() || c == '_' => {
                chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
            }
            _ => false,
        };

        plain
            && !(self.folds_case && name.chars().any(|c| c.is_ascii_uppercase()))
            && !RESERVED_WORDS.iter().any(|w| w.eq_ignore_ascii_case(name))
    }
}

impl SqlFormatProvider for IdentifierQuoter {
    fn escape(&self, name: &str) -> String {
        if self.is_safe(name) {
            return name.to_string();
        }

        let doubled: String = [self.close, self.close].iter().collect();
        let escaped = name.replace(self.close, &doubled);
        format!("{}{}{}", self.open, escaped, self.close)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    macro_rules! test_quote {
        ($name:ident, $quoter:expr, $input:expr, $expected:expr) => {
            #[test]
            fn $name() {
                assert_eq!($quoter.escape($input), $expected);
            }
        };
    }

    test_quote!(brackets_always, BracketQuoter, "Id", "[Id]");
    test_quote!(brackets_escape_close, BracketQuoter, "odd]name", "[odd]]name]");
    test_quote!(sqlite_mixed_case_is_bare, IdentifierQuoter::sqlite(), "Id", "Id");
    test_quote!(sqlite_keyword_is_quoted, IdentifierQuoter::sqlite(), "Order", "\"Order\"");
    test_quote!(sqlite_space_is_quoted, IdentifierQuoter::sqlite(), "Order Lines", "\"Order Lines\"");
    test_quote!(postgres_lower_is_bare, IdentifierQuoter::postgres(), "customer_id", "customer_id");
    test_quote!(postgres_upper_is_quoted, IdentifierQuoter::postgres(), "CustomerId", "\"CustomerId\"");
    test_quote!(postgres_escape_quote, IdentifierQuoter::postgres(), "a\"b", "\"a\"\"b\"");
    test_quote!(postgres_leading_digit, IdentifierQuoter::postgres(), "1st", "\"1st\"");
    test_quote!(mysql_backticks, IdentifierQuoter::mysql(), "select", "`select`");
    test_quote!(mysql_escape_backtick, IdentifierQuoter::mysql(), "a`b", "`a``b`");

    #[test]
    fn qualify_with_schema() {
        assert_eq!(BracketQuoter.qualify(Some("dbo"), "Orders"), "[dbo].[Orders]");
        assert_eq!(BracketQuoter.qualify(None, "Orders"), "[Orders]");
        assert_eq!(IdentifierQuoter::postgres().qualify(Some("public"), "orders"), "public.orders");
    }

    #[test]
    fn escape_column_list() {
        let columns = vec!["OrderId".to_string(), "LineNo".to_string()];
        assert_eq!(BracketQuoter.escape_list(&columns), "[OrderId], [LineNo]");
    }
}
