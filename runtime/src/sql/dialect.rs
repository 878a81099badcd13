//! SQL dialect trait
//!
//! Covers the syntax differences the select builder runs into:
//! parameter placeholders and identifier quoting.

/// SQL dialect trait for generating database-specific SQL
pub trait SqlDialect: Send + Sync {
    /// Get the dialect name
    fn name(&self) -> &'static str;

    /// Generate a parameter placeholder for the given index (1-based)
    ///
    /// - SQLite: Always returns "?"
    /// - PostgreSQL: Returns "$1", "$2", etc.
    fn placeholder(&self, index: usize) -> String;

    /// Quote a single identifier part
    fn quote_identifier(&self, ident: &str) -> String {
        format!("\"{}\"", ident)
    }

    /// Generate `col IN (...)` for `count` parameters starting at `first_index`
    fn in_list(&self, col: &str, first_index: usize, count: usize) -> String {
        let placeholders: Vec<String> = (first_index..first_index + count)
            .map(|i| self.placeholder(i))
            .collect();
        format!("{} IN ({})", col, placeholders.join(", "))
    }

    /// Generate LIMIT/OFFSET clause with bound parameters
    fn limit_offset(&self, limit_index: usize, offset_index: usize) -> String {
        format!(
            "LIMIT {} OFFSET {}",
            self.placeholder(limit_index),
            self.placeholder(offset_index)
        )
    }
}

/// Check that `ident` is a plain identifier, optionally qualified once
/// (`table.column`)
pub fn is_valid_identifier(ident: &str) -> bool {
    let parts: Vec<&str> = ident.split('.').collect();
    parts.len() <= 2
        && parts.iter().all(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) if first.is_ascii_alphabetic() || first == '_' => {
                    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
                }
                _ => false,
            }
        })
}

/// Quote a possibly qualified identifier
pub fn quote_qualified(dialect: &dyn SqlDialect, ident: &str) -> String {
    ident
        .split('.')
        .map(|part| dialect.quote_identifier(part))
        .collect::<Vec<_>>()
        .join(".")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sql::{PostgresDialect, SqliteDialect};

    #[test]
    fn test_valid_identifiers() {
        assert!(is_valid_identifier("filter_name"));
        assert!(is_valid_identifier("_private"));
        assert!(is_valid_identifier("articles.author_name"));
        assert!(is_valid_identifier("col2"));
    }

    #[test]
    fn test_invalid_identifiers() {
        assert!(!is_valid_identifier(""));
        assert!(!is_valid_identifier("2col"));
        assert!(!is_valid_identifier("name; DROP TABLE x"));
        assert!(!is_valid_identifier("a.b.c"));
        assert!(!is_valid_identifier("a."));
        assert!(!is_valid_identifier("\"quoted\""));
    }

    #[test]
    fn test_quote_qualified() {
        assert_eq!(
            quote_qualified(&SqliteDialect, "articles.title"),
            "\"articles\".\"title\""
        );
    }

    #[test]
    fn test_in_list() {
        assert_eq!(SqliteDialect.in_list("\"a\"", 1, 3), "\"a\" IN (?, ?, ?)");
        assert_eq!(PostgresDialect.in_list("\"a\"", 2, 2), "\"a\" IN ($2, $3)");
    }

    #[test]
    fn test_limit_offset() {
        assert_eq!(SqliteDialect.limit_offset(1, 2), "LIMIT ? OFFSET ?");
        assert_eq!(PostgresDialect.limit_offset(4, 5), "LIMIT $4 OFFSET $5");
    }
}
