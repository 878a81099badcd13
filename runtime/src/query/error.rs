//! Query parameter error types

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::validation::{ErrorDocument, ErrorObject, ErrorSource};

/// Failure while turning request parameters into query modifiers.
///
/// Returned to the caller, never logged here. Converts into a 400 JSON:API
/// error document whose source names the offending query parameter.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParamError {
    /// Field is not part of the endpoint's field mapping
    #[error("Unknown field '{field}' in parameter '{parameter}'")]
    UnknownField { parameter: String, field: String },

    /// A filter value could not be converted by the sanitizer
    #[error("Invalid value '{value}' for filter field '{field}': {reason}")]
    Sanitization {
        field: String,
        value: String,
        reason: String,
    },

    /// Non-numeric, negative or out of range paging parameter
    #[error("Invalid value '{value}' for '{parameter}': {reason}")]
    InvalidPage {
        parameter: String,
        value: String,
        reason: String,
    },

    /// The query string could not be decoded
    #[error("Malformed query string: {0}")]
    MalformedQuery(String),
}

impl ParamError {
    pub fn unknown_field(parameter: impl Into<String>, field: impl Into<String>) -> Self {
        Self::UnknownField {
            parameter: parameter.into(),
            field: field.into(),
        }
    }

    pub fn sanitization(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::Sanitization {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    pub fn invalid_page(
        parameter: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidPage {
            parameter: parameter.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            Self::UnknownField { .. } => "UNKNOWN_FIELD",
            Self::Sanitization { .. } => "INVALID_FILTER_VALUE",
            Self::InvalidPage { .. } => "INVALID_PAGE",
            Self::MalformedQuery(_) => "MALFORMED_QUERY",
        }
    }

    /// Query parameter the error refers to, if any
    pub fn parameter(&self) -> Option<String> {
        match self {
            Self::UnknownField { parameter, .. } | Self::InvalidPage { parameter, .. } => {
                Some(parameter.clone())
            }
            Self::Sanitization { field, .. } => Some(format!("filter[{}]", field)),
            Self::MalformedQuery(_) => None,
        }
    }

    fn title(&self) -> &'static str {
        match self {
            Self::UnknownField { .. } => "Unknown field",
            Self::Sanitization { .. } => "Invalid filter value",
            Self::InvalidPage { .. } => "Invalid page parameter",
            Self::MalformedQuery(_) => "Malformed query string",
        }
    }

    pub fn to_error_object(&self) -> ErrorObject {
        let obj = ErrorObject::new(self.title(), self.to_string())
            .with_status(StatusCode::BAD_REQUEST)
            .with_code(self.code());
        match self.parameter() {
            Some(parameter) => obj.with_source(ErrorSource::Parameter(parameter)),
            None => obj,
        }
    }
}

impl IntoResponse for ParamError {
    fn into_response(self) -> Response {
        (
            StatusCode::BAD_REQUEST,
            ErrorDocument::single(self.to_error_object()),
        )
            .into_response()
    }
}

/// Failure while applying a modifier to a query target
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// Mapped column is not a plain SQL identifier
    #[error("Invalid column name: {0}")]
    InvalidColumn(String),

    /// IN condition without any values
    #[error("Empty value list for column: {column}")]
    EmptyInList { column: String },

    /// Limit or offset does not fit a signed 64-bit SQL integer
    #[error("Row window out of range: limit {limit}, offset {offset}")]
    WindowOutOfRange { limit: u64, offset: u64 },
}
