//! Default value translation between dialects
//!
//! Defaults are stored the way the source database reports them, e.g. SQL
//! Server's `((0))` or `(getdate())`. Before they are compared or written
//! they are normalized, and well-known generator functions are rewritten to
//! the target dialect's spelling.

use regex::Regex;
use schemashift_core::Dialect;
use std::sync::LazyLock;

static GUID_GENERATOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(newid|newsequentialid|gen_random_uuid|uuid_generate_v4|sys_guid|uuid)\s*\(\s*\)$")
        .expect("GUID generator pattern should be valid")
});

static CURRENT_TIMESTAMP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^((getdate|getutcdate|sysdatetime|sysutcdatetime|now)\s*\(\s*\)|current_timestamp(\s*\(\s*\))?|datetime\s*\(\s*'now'\s*\))$",
    )
    .expect("timestamp pattern should be valid")
});

static UNICODE_LITERAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)^[nN]('.*')$").expect("unicode literal pattern should be valid")
});

/// Rewrites default expressions for one dialect
#[derive(Debug, Clone, Copy)]
pub struct SqlTranslator {
    dialect: Dialect,
}

impl SqlTranslator {
    pub fn new(dialect: Dialect) -> Self {
        Self { dialect }
    }

    /// Trim and strip redundant wrapping parentheses: `((0))` becomes `0`
    pub fn normalize(value: &str) -> String {
        let mut value = value.trim();
        while value.starts_with('(') && closing_paren(value) == Some(value.len() - 1) {
            value = value[1..value.len() - 1].trim();
        }
        value.to_string()
    }

    /// NEWID(), gen_random_uuid() and friends
    pub fn is_guid_generator(value: &str) -> bool {
        GUID_GENERATOR.is_match(&Self::normalize(value))
    }

    /// GETDATE(), CURRENT_TIMESTAMP, now() and friends
    pub fn is_current_timestamp(value: &str) -> bool {
        CURRENT_TIMESTAMP.is_match(&Self::normalize(value))
    }

    /// Compare two optional defaults after normalization
    pub fn defaults_equal(a: Option<&str>, b: Option<&str>) -> bool {
        match (a, b) {
            (Some(a), Some(b)) => {
                let (a, b) = (Self::normalize(a), Self::normalize(b));
                a == b
                    || (Self::is_guid_generator(&a) && Self::is_guid_generator(&b))
                    || (Self::is_current_timestamp(&a) && Self::is_current_timestamp(&b))
            }
            (None, None) => true,
            _ => false,
        }
    }

    /// Translate a default into this dialect
    ///
    /// Returns `None` when the dialect has no way to express the value.
    pub fn translate(&self, value: &str) -> Option<String> {
        let value = Self::normalize(value);
        if value.is_empty() {
            return None;
        }

        if Self::is_guid_generator(&value) {
            return match self.dialect {
                Dialect::SqlServer => Some("NEWID()".to_string()),
                Dialect::PostgreSql => Some("gen_random_uuid()".to_string()),
                Dialect::MySql => Some("(UUID())".to_string()),
                Dialect::Sqlite => None,
            };
        }

        if Self::is_current_timestamp(&value) {
            return Some(match self.dialect {
                Dialect::SqlServer => "GETDATE()".to_string(),
                _ => "CURRENT_TIMESTAMP".to_string(),
            });
        }

        if self.dialect != Dialect::SqlServer {
            if let Some(captures) = UNICODE_LITERAL.captures(&value) {
                return Some(captures[1].to_string());
            }
        }

        Some(value)
    }
}

/// Byte index of the parenthesis closing the one at index 0
pub(crate) fn closing_paren(value: &str) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;

    for (i, c) in value.char_indices() {
        match c {
            '\'' => in_string = !in_string,
            '(' if !in_string => depth += 1,
            ')' if !in_string => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_strips_wrapping_parens() {
        assert_eq!(SqlTranslator::normalize("((0))"), "0");
        assert_eq!(SqlTranslator::normalize(" (getdate()) "), "getdate()");
        assert_eq!(SqlTranslator::normalize("('(x)')"), "'(x)'");
    }

    #[test]
    fn normalize_keeps_non_wrapping_parens() {
        assert_eq!(SqlTranslator::normalize("(1)+(2)"), "(1)+(2)");
        assert_eq!(SqlTranslator::normalize("getdate()"), "getdate()");
    }

    #[test]
    fn recognizes_generators() {
        assert!(SqlTranslator::is_guid_generator("(newid())"));
        assert!(SqlTranslator::is_guid_generator("gen_random_uuid()"));
        assert!(!SqlTranslator::is_guid_generator("'newid()'"));

        assert!(SqlTranslator::is_current_timestamp("(getdate())"));
        assert!(SqlTranslator::is_current_timestamp("CURRENT_TIMESTAMP"));
        assert!(SqlTranslator::is_current_timestamp("datetime('now')"));
        assert!(!SqlTranslator::is_current_timestamp("'2024-01-01'"));
    }

    #[test]
    fn defaults_compare_after_normalization() {
        assert!(SqlTranslator::defaults_equal(Some("((0))"), Some("0")));
        assert!(SqlTranslator::defaults_equal(Some("(getdate())"), Some("CURRENT_TIMESTAMP")));
        assert!(!SqlTranslator::defaults_equal(Some("0"), Some("1")));
        assert!(!SqlTranslator::defaults_equal(Some("0"), None));
        assert!(SqlTranslator::defaults_equal(None, None));
    }

    #[test]
    fn translate_guid_generators() {
        assert_eq!(SqlTranslator::new(Dialect::SqlServer).translate("(newsequentialid())").as_deref(), Some("NEWID()"));
        assert_eq!(SqlTranslator::new(Dialect::PostgreSql).translate("(newid())").as_deref(), Some("gen_random_uuid()"));
        assert_eq!(SqlTranslator::new(Dialect::Sqlite).translate("(newid())"), None);
    }

    #[test]
    fn translate_timestamps_and_literals() {
        let sqlite = SqlTranslator::new(Dialect::Sqlite);
        assert_eq!(sqlite.translate("(getdate())").as_deref(), Some("CURRENT_TIMESTAMP"));
        assert_eq!(sqlite.translate("(N'n/a')").as_deref(), Some("'n/a'"));
        assert_eq!(sqlite.translate("((0))").as_deref(), Some("0"));

        let sqlserver = SqlTranslator::new(Dialect::SqlServer);
        assert_eq!(sqlserver.translate("now()").as_deref(), Some("GETDATE()"));
        assert_eq!(sqlserver.translate("(N'n/a')").as_deref(), Some("N'n/a'"));
    }
}
