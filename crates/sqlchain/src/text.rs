//! Text helpers shared by fragment units and the chain compiler.

use std::sync::OnceLock;

/// Returns `true` for plain integer or decimal literals (`42`, `-1.5`, `+3`).
///
/// Only ASCII digits count; other Unicode digits are treated as text.
pub fn is_numeric_literal(s: &str) -> bool {
    static NUMERIC_RE: OnceLock<regex::Regex> = OnceLock::new();
    NUMERIC_RE
        .get_or_init(|| {
            regex::Regex::new(r"^[+-]?[0-9]+(\.[0-9]+)?$").expect("invalid built-in numeric regex")
        })
        .is_match(s)
}

/// Collapse every run of two or more whitespace characters into a single space.
pub fn collapse_whitespace(s: &str) -> String {
    static WS_RE: OnceLock<regex::Regex> = OnceLock::new();
    WS_RE
        .get_or_init(|| regex::Regex::new(r"\s{2,}").expect("invalid built-in whitespace regex"))
        .replace_all(s, " ")
        .into_owned()
}

/// Quote a string literal, doubling embedded single quotes.
pub fn quote_literal(s: &str) -> String {
    format!("'{}'", s.replace('\'', "''"))
}

/// Wrap a fragment in single spaces so adjacent fragments never fuse.
pub(crate) fn padded(fragment: &str) -> String {
    format!(" {fragment} ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_literals() {
        assert!(is_numeric_literal("5"));
        assert!(is_numeric_literal("-12"));
        assert!(is_numeric_literal("+3.25"));
        assert!(!is_numeric_literal("3."));
        assert!(!is_numeric_literal(".5"));
        assert!(!is_numeric_literal("1e5"));
        assert!(!is_numeric_literal(""));
        assert!(!is_numeric_literal("abc"));
        assert!(!is_numeric_literal("١٢٣"));
        assert!(!is_numeric_literal("１２"));
    }

    #[test]
    fn collapse_keeps_single_spaces() {
        assert_eq!(collapse_whitespace(" ABC  =  5 "), " ABC = 5 ");
        assert_eq!(collapse_whitespace("a\t\n b"), "a b");
        assert_eq!(collapse_whitespace("a b"), "a b");
    }

    #[test]
    fn quote_escapes() {
        assert_eq!(quote_literal("abc"), "'abc'");
        assert_eq!(quote_literal("O'Hara"), "'O''Hara'");
        assert_eq!(quote_literal(""), "''");
    }
}
