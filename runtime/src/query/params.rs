//! Raw query parameter access
//!
//! Decodes the request query string once and keeps the pairs in request
//! order, so repeated keys and bracketed names like `filter[name]` survive.

use axum::extract::{FromRequestParts, Query};
use axum::http::Uri;
use axum::http::request::Parts;

use super::error::ParamError;

const FILTER_PREFIX: &str = "filter[";

/// Decoded query string pairs in request order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    pub fn new(pairs: Vec<(String, String)>) -> Self {
        Self { pairs }
    }

    /// Decode the query component of a request URI
    pub fn from_uri(uri: &Uri) -> Result<Self, ParamError> {
        let Query(pairs) = Query::<Vec<(String, String)>>::try_from_uri(uri)
            .map_err(|rejection| ParamError::MalformedQuery(rejection.body_text()))?;
        Ok(Self { pairs })
    }

    /// First value for `key`, like a form lookup
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// All values for `key` in request order
    pub fn get_all<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.pairs
            .iter()
            .filter(move |(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// `filter[<name>]` parameters as `(key, name, raw value)` in request order
    pub fn filters(&self) -> impl Iterator<Item = (&str, &str, &str)> {
        self.pairs.iter().filter_map(|(key, value)| {
            filter_field_name(key).map(|name| (key.as_str(), name, value.as_str()))
        })
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

/// Extract `<name>` from `filter[<name>]`
fn filter_field_name(key: &str) -> Option<&str> {
    key.strip_prefix(FILTER_PREFIX)?.strip_suffix(']')
}

impl<S> FromRequestParts<S> for QueryParams
where
    S: Send + Sync,
{
    type Rejection = ParamError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Self::from_uri(&parts.uri)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(uri: &str) -> QueryParams {
        QueryParams::from_uri(&uri.parse::<Uri>().unwrap()).unwrap()
    }

    #[test]
    fn test_from_uri_without_query() {
        assert!(params("/articles").is_empty());
    }

    #[test]
    fn test_get_returns_first_value() {
        let p = params("/articles?sort=a&sort=b");
        assert_eq!(p.get("sort"), Some("a"));
        assert_eq!(p.get_all("sort").collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(p.get("missing"), None);
    }

    #[test]
    fn test_percent_encoded_brackets_are_decoded() {
        let p = params("/articles?filter%5Btest%5D=a%2Cb");
        let filters: Vec<_> = p.filters().collect();
        assert_eq!(filters, vec![("filter[test]", "test", "a,b")]);
    }

    #[test]
    fn test_filters_keep_request_order() {
        let p = params("/articles?filter[b]=1&sort=x&filter[a]=2");
        let names: Vec<_> = p.filters().map(|(_, name, _)| name).collect();
        assert_eq!(names, vec!["b", "a"]);
    }

    #[test]
    fn test_filter_field_name() {
        assert_eq!(filter_field_name("filter[name]"), Some("name"));
        assert_eq!(filter_field_name("filter[]"), Some(""));
        assert_eq!(filter_field_name("filter[name"), None);
        assert_eq!(filter_field_name("page[size]"), None);
    }

    #[tokio::test]
    async fn test_extractor_reads_request_uri() {
        let request = axum::http::Request::builder()
            .uri("/articles?page[size]=5")
            .body(())
            .unwrap();
        let (mut parts, _) = request.into_parts();
        let p = QueryParams::from_request_parts(&mut parts, &()).await.unwrap();
        assert_eq!(p.get("page[size]"), Some("5"));
    }
}
