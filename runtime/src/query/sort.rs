//! `sort=[-]field,...` parsing

use super::error::ParamError;
use super::mapping::FieldMapping;
use super::modifier::{QueryModifier, SortDirection};
use super::params::QueryParams;

/// Query parameter holding the sort fields
pub const SORT_PARAM: &str = "sort";

/// Prefix marking a descending sort field
const DESC_PREFIX: char = '-';

/// Ordering on one column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortField {
    pub column: String,
    pub direction: SortDirection,
}

/// Parse the `sort` parameter into an ordering modifier.
///
/// Fields apply left to right, later ones break ties of earlier ones.
/// Absent or empty `sort` yields a no-op modifier.
pub fn parse_sort(params: &QueryParams, mapping: &FieldMapping) -> Result<QueryModifier, ParamError> {
    let fields = parse_sort_fields(params, mapping)?;
    if fields.is_empty() {
        return Ok(QueryModifier::noop());
    }

    Ok(QueryModifier::new("sort", move |query| {
        tracing::debug!(orderings = fields.len(), "Applying sort");
        for field in &fields {
            query.order_by(&field.column, field.direction)?;
        }
        Ok(())
    }))
}

/// Parse the `sort` parameter without wrapping it in a modifier
pub fn parse_sort_fields(
    params: &QueryParams,
    mapping: &FieldMapping,
) -> Result<Vec<SortField>, ParamError> {
    let Some(raw) = params.get(SORT_PARAM).filter(|s| !s.is_empty()) else {
        return Ok(Vec::new());
    };

    raw.split(',')
        .map(|token| {
            let (name, direction) = match token.strip_prefix(DESC_PREFIX) {
                Some(name) => (name, SortDirection::Desc),
                None => (token, SortDirection::Asc),
            };
            let column = mapping
                .column(name)
                .ok_or_else(|| ParamError::unknown_field(SORT_PARAM, name))?;
            Ok(SortField {
                column: column.to_string(),
                direction,
            })
        })
        .collect()
}
