//! Statement boundary detection.
//!
//! Splitting is purely lexical on the literal ASCII semicolon: no awareness
//! of semicolons inside string literals, comments, or quoted identifiers.
//! A query carrying a semicolon inside a literal will be mis-split. This is
//! a documented limitation of the contract, not something to special-case;
//! the security gate's own semicolon check (see `gate`) is the matching
//! defense-in-depth half of the same trade-off.

/// Split a raw query into trimmed, non-empty statements in input order.
pub fn split_statements(query: &str) -> Vec<String> {
    query
        .split(';')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_statement() {
        assert_eq!(split_statements("SELECT 1"), vec!["SELECT 1"]);
    }

    #[test]
    fn test_trailing_semicolon_dropped() {
        assert_eq!(split_statements("SELECT 1;"), vec!["SELECT 1"]);
    }

    #[test]
    fn test_multiple_statements_preserve_order() {
        let stmts = split_statements("SELECT 1; UPDATE t SET a = 2 ; SHOW TABLES");
        assert_eq!(stmts, vec!["SELECT 1", "UPDATE t SET a = 2", "SHOW TABLES"]);
    }

    #[test]
    fn test_empty_segments_dropped() {
        assert_eq!(split_statements(";;  ;SELECT 1;;"), vec!["SELECT 1"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(split_statements("").is_empty());
        assert!(split_statements("   \n\t ").is_empty());
        assert!(split_statements(";;;").is_empty());
    }

    #[test]
    fn test_semicolon_in_literal_is_still_split() {
        // Known limitation: splitting is lexical, literals are not parsed.
        let stmts = split_statements("SELECT 'a;b'");
        assert_eq!(stmts, vec!["SELECT 'a", "b'"]);
    }

    #[test]
    fn test_whitespace_trimmed() {
        assert_eq!(
            split_statements("  SELECT 1  ;\n  SELECT 2\t"),
            vec!["SELECT 1", "SELECT 2"]
        );
    }
}
