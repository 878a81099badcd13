//! `filter[<field>]=v1,v2,...` parsing

use super::error::ParamError;
use super::mapping::FieldMapping;
use super::modifier::QueryModifier;
use super::params::QueryParams;
use super::sanitize::{FilterValue, ValueSanitizer};

/// Separator between filter values
const VALUE_SEPARATOR: char = ',';

/// Parsed IN-condition for one requested field
#[derive(Debug, Clone, PartialEq)]
pub struct FilterCondition {
    /// JSON:API field name
    pub field: String,
    /// Mapped column, possibly shared with other fields
    pub column: String,
    pub values: Vec<FilterValue>,
}

/// Parse all `filter[...]` parameters into one modifier.
///
/// Every field must be present in `mapping` and every comma-separated value
/// must pass `sanitizer`, otherwise nothing is produced. A field repeated in
/// the query accumulates its values into a single condition; distinct fields
/// stay separate conditions even when they map to the same column. No filter
/// parameters yields a no-op modifier.
pub fn parse_filter<S>(
    params: &QueryParams,
    mapping: &FieldMapping,
    sanitizer: &S,
) -> Result<QueryModifier, ParamError>
where
    S: ValueSanitizer + ?Sized,
{
    let conditions = parse_filter_conditions(params, mapping, sanitizer)?;
    if conditions.is_empty() {
        return Ok(QueryModifier::noop());
    }

    Ok(QueryModifier::new("filter", move |query| {
        tracing::debug!(conditions = conditions.len(), "Applying filter");
        for condition in &conditions {
            query.where_in(&condition.column, &condition.values)?;
        }
        Ok(())
    }))
}

/// Parse `filter[...]` parameters without wrapping them in a modifier
pub fn parse_filter_conditions<S>(
    params: &QueryParams,
    mapping: &FieldMapping,
    sanitizer: &S,
) -> Result<Vec<FilterCondition>, ParamError>
where
    S: ValueSanitizer + ?Sized,
{
    let mut conditions: Vec<FilterCondition> = Vec::new();

    for (key, field, raw) in params.filters() {
        let column = mapping
            .column(field)
            .ok_or_else(|| ParamError::unknown_field(key, field))?;

        let values = sanitize_values(field, raw, sanitizer)?;

        match conditions.iter_mut().find(|c| c.field == field) {
            Some(existing) => existing.values.extend(values),
            None => conditions.push(FilterCondition {
                field: field.to_string(),
                column: column.to_string(),
                values,
            }),
        }
    }

    Ok(conditions)
}

fn sanitize_values<S>(field: &str, raw: &str, sanitizer: &S) -> Result<Vec<FilterValue>, ParamError>
where
    S: ValueSanitizer + ?Sized,
{
    raw.split(VALUE_SEPARATOR)
        .map(|value| {
            if value.is_empty() {
                return Err(ParamError::sanitization(field, value, "empty value"));
            }
            sanitizer
                .sanitize_value(field, value)
                .map_err(|e| ParamError::sanitization(field, value, e.to_string()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use axum::http::Uri;

    use super::*;
    use crate::query::modifier::tests::RecordingQuery;
    use crate::query::sanitize::{FieldType, SanitizeError, TextSanitizer, TypedSanitizer};

    fn params(uri: &str) -> QueryParams {
        QueryParams::from_uri(&uri.parse::<Uri>().unwrap()).unwrap()
    }

    fn mapping() -> FieldMapping {
        FieldMapping::from_pairs(&[("test", "filter_name"), ("rating", "rating")])
    }

    fn text(v: &str) -> FilterValue {
        FilterValue::Text(v.to_string())
    }

    #[test]
    fn test_single_value() {
        let modifier = parse_filter(&params("/x?filter[test]=b"), &mapping(), &TextSanitizer).unwrap();
        let query = modifier.apply(RecordingQuery::default()).unwrap();
        assert_eq!(
            query.conditions,
            vec![("filter_name".to_string(), vec![text("b")])]
        );
    }

    #[test]
    fn test_multiple_values_split_on_comma() {
        let modifier =
            parse_filter(&params("/x?filter[test]=a,b"), &mapping(), &TextSanitizer).unwrap();
        let query = modifier.apply(RecordingQuery::default()).unwrap();
        assert_eq!(
            query.conditions,
            vec![("filter_name".to_string(), vec![text("a"), text("b")])]
        );
    }

    #[test]
    fn test_multiple_fields_in_request_order() {
        let sanitizer = TypedSanitizer::new().field("rating", FieldType::Integer);
        let conditions = parse_filter_conditions(
            &params("/x?filter[rating]=3,4&filter[test]=a"),
            &mapping(),
            &sanitizer,
        )
        .unwrap();
        assert_eq!(
            conditions,
            vec![
                FilterCondition {
                    field: "rating".to_string(),
                    column: "rating".to_string(),
                    values: vec![FilterValue::Integer(3), FilterValue::Integer(4)],
                },
                FilterCondition {
                    field: "test".to_string(),
                    column: "filter_name".to_string(),
                    values: vec![text("a")],
                },
            ]
        );
    }

    #[test]
    fn test_repeated_field_accumulates() {
        let conditions = parse_filter_conditions(
            &params("/x?filter[test]=a&filter[test]=b"),
            &mapping(),
            &TextSanitizer,
        )
        .unwrap();
        assert_eq!(conditions.len(), 1);
        assert_eq!(conditions[0].values, vec![text("a"), text("b")]);
    }

    #[test]
    fn test_fields_sharing_a_column_stay_separate() {
        let mapping = FieldMapping::from_pairs(&[("name", "title"), ("title", "title")]);
        let modifier = parse_filter(
            &params("/x?filter[name]=a&filter[title]=b"),
            &mapping,
            &TextSanitizer,
        )
        .unwrap();
        let query = modifier.apply(RecordingQuery::default()).unwrap();
        assert_eq!(
            query.conditions,
            vec![
                ("title".to_string(), vec![text("a")]),
                ("title".to_string(), vec![text("b")]),
            ]
        );
    }

    #[test]
    fn test_no_filter_is_noop() {
        let modifier = parse_filter(&params("/x?sort=test"), &mapping(), &TextSanitizer).unwrap();
        assert!(modifier.is_noop());
    }

    #[test]
    fn test_unknown_field() {
        let err = parse_filter(&params("/x?filter[colour]=red"), &mapping(), &TextSanitizer)
            .unwrap_err();
        assert_eq!(err, ParamError::unknown_field("filter[colour]", "colour"));
    }

    #[test]
    fn test_sanitizer_failure_fails_whole_step() {
        let sanitizer = TypedSanitizer::new().field("rating", FieldType::Integer);
        let err = parse_filter(&params("/x?filter[rating]=1,x,3"), &mapping(), &sanitizer)
            .unwrap_err();
        assert_eq!(
            err,
            ParamError::sanitization("rating", "x", "expected an integer")
        );
    }

    #[test]
    fn test_empty_value_rejected() {
        let err =
            parse_filter(&params("/x?filter[test]="), &mapping(), &TextSanitizer).unwrap_err();
        assert!(matches!(err, ParamError::Sanitization { ref reason, .. } if reason == "empty value"));

        let err =
            parse_filter(&params("/x?filter[test]=a,,b"), &mapping(), &TextSanitizer).unwrap_err();
        assert!(matches!(err, ParamError::Sanitization { .. }));
    }

    #[test]
    fn test_sanitizer_receives_field_name() {
        let sanitizer = |field: &str, raw: &str| -> Result<FilterValue, SanitizeError> {
            if field == "test" {
                Ok(FilterValue::Text(format!("{}:{}", field, raw)))
            } else {
                Err(SanitizeError::new("unexpected field"))
            }
        };
        let conditions =
            parse_filter_conditions(&params("/x?filter[test]=a"), &mapping(), &sanitizer).unwrap();
        assert_eq!(conditions[0].values, vec![text("test:a")]);
    }
}
