//! JSON:API field name to column mapping

use std::collections::HashMap;

/// Maps the field names clients use in `filter[...]` and `sort` to the
/// persisted column names. Supplied per endpoint, read-only per request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldMapping {
    columns: HashMap<String, String>,
}

impl FieldMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `(field, column)` pairs
    pub fn from_pairs(pairs: &[(&str, &str)]) -> Self {
        pairs.iter().copied().collect()
    }

    pub fn with(mut self, field: impl Into<String>, column: impl Into<String>) -> Self {
        self.columns.insert(field.into(), column.into());
        self
    }

    /// Persisted column for a JSON:API field name
    pub fn column(&self, field: &str) -> Option<&str> {
        self.columns.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.columns.contains_key(field)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

impl<'a> FromIterator<(&'a str, &'a str)> for FieldMapping {
    fn from_iter<I: IntoIterator<Item = (&'a str, &'a str)>>(iter: I) -> Self {
        Self {
            columns: iter
                .into_iter()
                .map(|(field, column)| (field.to_string(), column.to_string()))
                .collect(),
        }
    }
}

impl From<HashMap<String, String>> for FieldMapping {
    fn from(columns: HashMap<String, String>) -> Self {
        Self { columns }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup() {
        let mapping = FieldMapping::from_pairs(&[("test", "filter_name")]);
        assert_eq!(mapping.column("test"), Some("filter_name"));
        assert_eq!(mapping.column("filter_name"), None);
        assert!(mapping.contains("test"));
        assert_eq!(mapping.len(), 1);
    }

    #[test]
    fn test_builder_and_from_map() {
        let built = FieldMapping::new().with("author", "author_name");
        let mut map = HashMap::new();
        map.insert("author".to_string(), "author_name".to_string());
        assert_eq!(built, FieldMapping::from(map));
        assert!(FieldMapping::new().is_empty());
    }
}
