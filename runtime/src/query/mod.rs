//! JSON:API collection query parameters
//!
//! Turns `filter[...]`, `sort` and `page[...]` parameters into
//! [`QueryModifier`]s that can be applied to any [`QueryTarget`].
//!
//! ## Usage
//!
//! ```no_run
//! use jsonapi_runtime::query::{FieldMapping, PagingConfig, QueryParams, TextSanitizer};
//! use jsonapi_runtime::query::{parse_filter, parse_paging, parse_sort};
//! use jsonapi_runtime::sql::{Backend, SelectQuery};
//!
//! let uri = "/articles?filter[author]=ann,bob&sort=-created&page[size]=10"
//!     .parse()
//!     .unwrap();
//! let params = QueryParams::from_uri(&uri).unwrap();
//! let mapping = FieldMapping::from_pairs(&[("author", "author_name"), ("created", "created_at")]);
//!
//! let filter = parse_filter(&params, &mapping, &TextSanitizer).unwrap();
//! let sort = parse_sort(&params, &mapping).unwrap();
//! let paging = parse_paging(&params, &PagingConfig::default()).unwrap();
//!
//! let query = SelectQuery::new("articles").unwrap();
//! let query = paging.apply(sort.apply(filter.apply(query).unwrap()).unwrap()).unwrap();
//! let sql = query.to_sql(Backend::Sqlite);
//! ```

mod error;
mod filter;
mod mapping;
mod modifier;
mod paging;
mod params;
mod sanitize;
mod sort;

pub use error::{ParamError, QueryError};
pub use filter::{FilterCondition, parse_filter, parse_filter_conditions};
pub use mapping::FieldMapping;
pub use modifier::{QueryModifier, QueryTarget, SortDirection};
pub use paging::{
    DEFAULT_PAGE_NUMBER, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, PAGE_NUMBER_PARAM, PAGE_SIZE_PARAM,
    Page, PagingConfig, page_modifier, parse_page, parse_paging,
};
pub use params::QueryParams;
pub use sanitize::{FieldType, FilterValue, SanitizeError, TextSanitizer, TypedSanitizer, ValueSanitizer};
pub use sort::{SORT_PARAM, SortField, parse_sort, parse_sort_fields};

/// Parsed collection parameters
#[derive(Debug)]
pub struct CollectionQuery {
    /// Filter, sort and paging chained in that order
    pub modifier: QueryModifier,
    /// Requested page, `None` when no paging parameter was given
    pub page: Option<Page>,
}

/// Parse filter, sort and paging, keeping the parsed page for response meta.
///
/// All three parse steps run before anything is returned, so a failure in
/// any of them leaves the caller without a partially built modifier.
pub fn parse_collection<S>(
    params: &QueryParams,
    mapping: &FieldMapping,
    sanitizer: &S,
    paging: &PagingConfig,
) -> Result<CollectionQuery, ParamError>
where
    S: ValueSanitizer + ?Sized,
{
    let filter = parse_filter(params, mapping, sanitizer)?;
    let sort = parse_sort(params, mapping)?;
    let page = parse_page(params, paging)?;
    let paging = page_modifier(page)?;
    Ok(CollectionQuery {
        modifier: filter.then(sort).then(paging),
        page,
    })
}

/// Parse filter, sort and paging into one modifier applied in that order
pub fn parse_collection_query<S>(
    params: &QueryParams,
    mapping: &FieldMapping,
    sanitizer: &S,
    paging: &PagingConfig,
) -> Result<QueryModifier, ParamError>
where
    S: ValueSanitizer + ?Sized,
{
    parse_collection(params, mapping, sanitizer, paging).map(|collection| collection.modifier)
}

#[cfg(test)]
mod tests {
    use axum::http::Uri;

    use super::modifier::tests::RecordingQuery;
    use super::*;

    fn params(uri: &str) -> QueryParams {
        QueryParams::from_uri(&uri.parse::<Uri>().unwrap()).unwrap()
    }

    #[test]
    fn test_collection_query_applies_all_steps() {
        let mapping = FieldMapping::from_pairs(&[("test", "filter_name")]);
        let modifier = parse_collection_query(
            &params("/x?filter[test]=a,b&sort=-test&page[number]=1&page[size]=2"),
            &mapping,
            &TextSanitizer,
            &PagingConfig::default(),
        )
        .unwrap();

        let query = modifier.apply(RecordingQuery::default()).unwrap();
        assert_eq!(query.conditions.len(), 1);
        assert_eq!(
            query.orderings,
            vec![("filter_name".to_string(), SortDirection::Desc)]
        );
        assert_eq!(query.window, Some((2, 2)));
    }

    #[test]
    fn test_collection_query_fails_before_building() {
        let mapping = FieldMapping::from_pairs(&[("test", "filter_name")]);
        let err = parse_collection_query(
            &params("/x?filter[test]=a&page[size]=abc"),
            &mapping,
            &TextSanitizer,
            &PagingConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, ParamError::InvalidPage { .. }));
    }

    #[test]
    fn test_collection_keeps_parsed_page() {
        let mapping = FieldMapping::from_pairs(&[("test", "filter_name")]);
        let collection = parse_collection(
            &params("/x?page[number]=3"),
            &mapping,
            &TextSanitizer,
            &PagingConfig::default(),
        )
        .unwrap();
        assert_eq!(collection.page, Some(Page { number: 3, size: 20 }));

        let query = collection.modifier.apply(RecordingQuery::default()).unwrap();
        assert_eq!(query.window, Some((20, 60)));
    }

    #[test]
    fn test_collection_query_without_parameters_is_noop() {
        let modifier = parse_collection_query(
            &params("/x"),
            &FieldMapping::new(),
            &TextSanitizer,
            &PagingConfig::default(),
        )
        .unwrap();
        assert!(modifier.is_noop());
    }
}
