//! Filter value sanitizers
//!
//! A sanitizer turns the raw string of one `filter[...]` component into a
//! typed value the query target can compare against.

use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::validation::iso8601::parse_iso8601;

/// Typed filter value
#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Timestamp(DateTime<Utc>),
}

impl fmt::Display for FilterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterValue::Text(v) => write!(f, "{}", v),
            FilterValue::Integer(v) => write!(f, "{}", v),
            FilterValue::Float(v) => write!(f, "{}", v),
            FilterValue::Boolean(v) => write!(f, "{}", v),
            FilterValue::Timestamp(v) => write!(f, "{}", v.to_rfc3339()),
        }
    }
}

impl From<&str> for FilterValue {
    fn from(v: &str) -> Self {
        FilterValue::Text(v.to_string())
    }
}

impl From<i64> for FilterValue {
    fn from(v: i64) -> Self {
        FilterValue::Integer(v)
    }
}

impl From<bool> for FilterValue {
    fn from(v: bool) -> Self {
        FilterValue::Boolean(v)
    }
}

/// Reason a raw value was rejected
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct SanitizeError(pub String);

impl SanitizeError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self(reason.into())
    }
}

/// Converts raw filter values into typed values.
///
/// `field` is the JSON:API field name as it appeared in `filter[...]`.
pub trait ValueSanitizer {
    fn sanitize_value(&self, field: &str, raw: &str) -> Result<FilterValue, SanitizeError>;
}

impl<F> ValueSanitizer for F
where
    F: Fn(&str, &str) -> Result<FilterValue, SanitizeError>,
{
    fn sanitize_value(&self, field: &str, raw: &str) -> Result<FilterValue, SanitizeError> {
        self(field, raw)
    }
}

/// Passes every value through as text
#[derive(Debug, Clone, Copy, Default)]
pub struct TextSanitizer;

impl ValueSanitizer for TextSanitizer {
    fn sanitize_value(&self, _field: &str, raw: &str) -> Result<FilterValue, SanitizeError> {
        Ok(FilterValue::Text(raw.to_string()))
    }
}

/// Declared type of a filterable field
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FieldType {
    #[default]
    Text,
    Integer,
    Float,
    Boolean,
    Timestamp,
}

impl FieldType {
    pub fn parse(&self, raw: &str) -> Result<FilterValue, SanitizeError> {
        match self {
            FieldType::Text => Ok(FilterValue::Text(raw.to_string())),
            FieldType::Integer => raw
                .parse::<i64>()
                .map(FilterValue::Integer)
                .map_err(|_| SanitizeError::new("expected an integer")),
            FieldType::Float => match raw.parse::<f64>() {
                Ok(v) if v.is_finite() => Ok(FilterValue::Float(v)),
                _ => Err(SanitizeError::new("expected a finite number")),
            },
            FieldType::Boolean => match raw {
                "true" | "1" => Ok(FilterValue::Boolean(true)),
                "false" | "0" => Ok(FilterValue::Boolean(false)),
                _ => Err(SanitizeError::new("expected true or false")),
            },
            FieldType::Timestamp => parse_iso8601(raw)
                .map(FilterValue::Timestamp)
                .ok_or_else(|| SanitizeError::new("expected an ISO 8601 timestamp")),
        }
    }
}

/// Parses each field according to its declared type.
///
/// Fields without a declaration use the fallback type (text by default).
#[derive(Debug, Clone, Default)]
pub struct TypedSanitizer {
    types: HashMap<String, FieldType>,
    fallback: FieldType,
}

impl TypedSanitizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, name: impl Into<String>, field_type: FieldType) -> Self {
        self.types.insert(name.into(), field_type);
        self
    }

    pub fn fallback(mut self, field_type: FieldType) -> Self {
        self.fallback = field_type;
        self
    }
}

impl ValueSanitizer for TypedSanitizer {
    fn sanitize_value(&self, field: &str, raw: &str) -> Result<FilterValue, SanitizeError> {
        self.types
            .get(field)
            .copied()
            .unwrap_or(self.fallback)
            .parse(raw)
    }
}
