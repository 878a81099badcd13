//! API error responses

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::query::{ParamError, QueryError};
use crate::validation::{ErrorDocument, ErrorObject, ErrorSource};

/// Handler error for the demo API
#[derive(Debug)]
pub enum ApiError {
    /// Client sent unusable query parameters
    Params(ParamError),
    /// Resource document names a different `type` than the endpoint serves
    TypeMismatch { expected: String, found: String },
    Internal { message: String },
}

impl ApiError {
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    pub fn type_mismatch(expected: impl Into<String>, found: impl Into<String>) -> Self {
        Self::TypeMismatch {
            expected: expected.into(),
            found: found.into(),
        }
    }

    pub fn from_query(e: QueryError) -> Self {
        tracing::error!(error = %e, "Query construction failed");
        Self::Internal {
            message: "Query construction failed".to_string(),
        }
    }

    pub fn from_sqlite(e: sqlx::Error) -> Self {
        tracing::error!(error = %e, "SQLite error");
        Self::Internal {
            message: "Database operation failed".to_string(),
        }
    }
}

impl From<ParamError> for ApiError {
    fn from(e: ParamError) -> Self {
        Self::Params(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::Params(e) => e.into_response(),
            Self::TypeMismatch { expected, found } => (
                StatusCode::CONFLICT,
                ErrorDocument::single(
                    ErrorObject::new(
                        "Resource type mismatch",
                        format!("Expected type '{}', got '{}'", expected, found),
                    )
                    .with_status(StatusCode::CONFLICT)
                    .with_code("TYPE_MISMATCH")
                    .with_source(ErrorSource::Pointer("/data/type".to_string())),
                ),
            )
                .into_response(),
            Self::Internal { message } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDocument::single(
                    ErrorObject::new("Internal error", message)
                        .with_status(StatusCode::INTERNAL_SERVER_ERROR)
                        .with_code("INTERNAL"),
                ),
            )
                .into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_params_error_is_bad_request() {
        let response = ApiError::from(ParamError::unknown_field("sort", "x")).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_type_mismatch_is_conflict() {
        let response = ApiError::type_mismatch("articles", "people").into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_internal_error_status() {
        let response = ApiError::internal("boom").into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let response =
            ApiError::from_query(QueryError::InvalidColumn("a b".to_string())).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
