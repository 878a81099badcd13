//! `page[number]` / `page[size]` parsing

use serde::{Deserialize, Serialize};

use super::error::ParamError;
use super::modifier::QueryModifier;
use super::params::QueryParams;

pub const PAGE_NUMBER_PARAM: &str = "page[number]";
pub const PAGE_SIZE_PARAM: &str = "page[size]";

/// Default page number (zero-based)
pub const DEFAULT_PAGE_NUMBER: u64 = 0;
/// Default items per page
pub const DEFAULT_PAGE_SIZE: u64 = 20;
/// Largest accepted page size
pub const MAX_PAGE_SIZE: u64 = 100;

/// Paging limits for an endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PagingConfig {
    pub default_size: u64,
    pub max_size: u64,
}

impl Default for PagingConfig {
    fn default() -> Self {
        Self {
            default_size: DEFAULT_PAGE_SIZE,
            max_size: MAX_PAGE_SIZE,
        }
    }
}

/// Parsed page window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Page {
    pub number: u64,
    pub size: u64,
}

impl Page {
    pub fn limit(&self) -> u64 {
        self.size
    }

    /// Row offset, `None` on overflow
    pub fn offset(&self) -> Option<u64> {
        self.number.checked_mul(self.size)
    }
}

/// Parse paging parameters into a limit/offset modifier.
///
/// Without either parameter the modifier is a no-op. When only one is given
/// the other takes its default.
pub fn parse_paging(params: &QueryParams, config: &PagingConfig) -> Result<QueryModifier, ParamError> {
    page_modifier(parse_page(params, config)?)
}

/// Limit/offset modifier for an already parsed page, no-op for `None`
pub fn page_modifier(page: Option<Page>) -> Result<QueryModifier, ParamError> {
    let Some(page) = page else {
        return Ok(QueryModifier::noop());
    };

    let limit = page.limit();
    let offset = page.offset().ok_or_else(|| {
        ParamError::invalid_page(
            PAGE_NUMBER_PARAM,
            page.number.to_string(),
            "page offset is out of range",
        )
    })?;

    Ok(QueryModifier::new("paging", move |query| {
        tracing::debug!(limit, offset, "Applying paging");
        query.limit_offset(limit, offset)
    }))
}

/// Parse paging parameters, `None` when neither is present
pub fn parse_page(params: &QueryParams, config: &PagingConfig) -> Result<Option<Page>, ParamError> {
    let number = params.get(PAGE_NUMBER_PARAM);
    let size = params.get(PAGE_SIZE_PARAM);
    if number.is_none() && size.is_none() {
        return Ok(None);
    }

    let number = match number {
        Some(raw) => parse_non_negative(PAGE_NUMBER_PARAM, raw)?,
        None => DEFAULT_PAGE_NUMBER,
    };
    let size = match size {
        Some(raw) => parse_non_negative(PAGE_SIZE_PARAM, raw)?,
        None => config.default_size,
    };
    if size > config.max_size {
        return Err(ParamError::invalid_page(
            PAGE_SIZE_PARAM,
            size.to_string(),
            format!("page size must be <= {}", config.max_size),
        ));
    }

    Ok(Some(Page { number, size }))
}

fn parse_non_negative(parameter: &str, raw: &str) -> Result<u64, ParamError> {
    if raw.starts_with('-') {
        return Err(ParamError::invalid_page(parameter, raw, "must not be negative"));
    }
    raw.parse::<u64>()
        .map_err(|_| ParamError::invalid_page(parameter, raw, "must be a non-negative integer"))
}

#[cfg(test)]
mod tests {
    use axum::http::Uri;

    use super::*;
    use crate::query::modifier::tests::RecordingQuery;

    fn params(uri: &str) -> QueryParams {
        QueryParams::from_uri(&uri.parse::<Uri>().unwrap()).unwrap()
    }

    fn window(uri: &str) -> Option<(u64, u64)> {
        parse_paging(&params(uri), &PagingConfig::default())
            .unwrap()
            .apply(RecordingQuery::default())
            .unwrap()
            .window
    }

    #[test]
    fn test_first_page() {
        assert_eq!(window("/x?page[number]=0&page[size]=1"), Some((1, 0)));
    }

    #[test]
    fn test_offset_is_number_times_size() {
        assert_eq!(window("/x?page[number]=3&page[size]=10"), Some((10, 30)));
    }

    #[test]
    fn test_defaults_fill_missing_parameter() {
        assert_eq!(window("/x?page[number]=2"), Some((20, 40)));
        assert_eq!(window("/x?page[size]=5"), Some((5, 0)));
    }

    #[test]
    fn test_absent_is_noop() {
        let modifier = parse_paging(&params("/x?sort=a"), &PagingConfig::default()).unwrap();
        assert!(modifier.is_noop());
    }

    #[test]
    fn test_negative_rejected() {
        let err = parse_paging(&params("/x?page[number]=-1"), &PagingConfig::default())
            .unwrap_err();
        assert_eq!(
            err,
            ParamError::invalid_page("page[number]", "-1", "must not be negative")
        );
    }

    #[test]
    fn test_non_numeric_rejected() {
        let err =
            parse_paging(&params("/x?page[size]=ten"), &PagingConfig::default()).unwrap_err();
        assert!(matches!(err, ParamError::InvalidPage { ref parameter, .. } if parameter == "page[size]"));

        let err = parse_paging(&params("/x?page[size]="), &PagingConfig::default()).unwrap_err();
        assert!(matches!(err, ParamError::InvalidPage { .. }));
    }

    #[test]
    fn test_size_above_max_rejected() {
        let config = PagingConfig {
            default_size: 10,
            max_size: 50,
        };
        let err = parse_paging(&params("/x?page[size]=51"), &config).unwrap_err();
        assert_eq!(
            err,
            ParamError::invalid_page("page[size]", "51", "page size must be <= 50")
        );
        assert!(parse_paging(&params("/x?page[size]=50"), &config).is_ok());
    }

    #[test]
    fn test_offset_overflow_rejected() {
        let uri = format!("/x?page[number]={}&page[size]=100", u64::MAX);
        let err = parse_paging(&params(&uri), &PagingConfig::default()).unwrap_err();
        assert!(matches!(err, ParamError::InvalidPage { ref reason, .. } if reason == "page offset is out of range"));
    }

    #[test]
    fn test_zero_size_allowed() {
        assert_eq!(window("/x?page[size]=0"), Some((0, 0)));
    }
}
