//! JSON:API error documents
//!
//! Error objects follow the JSON:API error shape. Only the members this
//! runtime produces are modelled: `status`, `code`, `title`, `detail` and
//! a single-entry `source`.

use axum::Json;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// Media type for JSON:API documents
pub const JSONAPI_MEDIA_TYPE: &str = "application/vnd.api+json";

/// Where an error originated in the request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// Query or path parameter
    Parameter,
    /// Member of the JSON request document
    Pointer,
}

impl SourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::Parameter => "parameter",
            SourceKind::Pointer => "pointer",
        }
    }
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Single-entry `source` member, serialized as `{"<kind>": "<location>"}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorSource {
    Parameter(String),
    Pointer(String),
}

impl ErrorSource {
    pub fn new(kind: SourceKind, location: impl Into<String>) -> Self {
        match kind {
            SourceKind::Parameter => Self::Parameter(location.into()),
            SourceKind::Pointer => Self::Pointer(location.into()),
        }
    }

    pub fn kind(&self) -> SourceKind {
        match self {
            Self::Parameter(_) => SourceKind::Parameter,
            Self::Pointer(_) => SourceKind::Pointer,
        }
    }

    pub fn location(&self) -> &str {
        match self {
            Self::Parameter(location) | Self::Pointer(location) => location,
        }
    }
}

/// One JSON:API error object
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorObject {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    pub title: String,
    pub detail: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<ErrorSource>,
}

impl ErrorObject {
    pub fn new(title: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            status: None,
            code: None,
            title: title.into(),
            detail: detail.into(),
            source: None,
        }
    }

    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = Some(status.as_u16().to_string());
        self
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn with_source(mut self, source: ErrorSource) -> Self {
        self.source = Some(source);
        self
    }
}

/// Ordered list of error objects, serialized as `{"errors": [...]}`.
///
/// Responds with 422 Unprocessable Entity; wrap in `(StatusCode, doc)` to
/// answer with another status.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ErrorDocument {
    pub errors: Vec<ErrorObject>,
}

impl ErrorDocument {
    pub fn new(errors: Vec<ErrorObject>) -> Self {
        Self { errors }
    }

    pub fn single(error: ErrorObject) -> Self {
        Self {
            errors: vec![error],
        }
    }

    pub fn push(&mut self, error: ErrorObject) {
        self.errors.push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ErrorObject> {
        self.errors.iter()
    }
}

impl IntoResponse for ErrorDocument {
    fn into_response(self) -> Response {
        (
            StatusCode::UNPROCESSABLE_ENTITY,
            [(header::CONTENT_TYPE, JSONAPI_MEDIA_TYPE)],
            Json(self),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_serializes_as_single_entry_map() {
        let source = ErrorSource::new(SourceKind::Parameter, "/name");
        assert_eq!(
            serde_json::to_value(&source).unwrap(),
            serde_json::json!({"parameter": "/name"})
        );

        let source = ErrorSource::new(SourceKind::Pointer, "/data/attributes/title");
        assert_eq!(
            serde_json::to_value(&source).unwrap(),
            serde_json::json!({"pointer": "/data/attributes/title"})
        );
    }

    #[test]
    fn test_error_object_skips_absent_members() {
        let obj = ErrorObject::new("Name is invalid", "too short")
            .with_source(ErrorSource::Pointer("/name".to_string()));
        assert_eq!(
            serde_json::to_value(&obj).unwrap(),
            serde_json::json!({
                "title": "Name is invalid",
                "detail": "too short",
                "source": {"pointer": "/name"}
            })
        );
    }

    #[test]
    fn test_error_object_with_status_and_code() {
        let obj = ErrorObject::new("Unknown field", "cannot filter by colour")
            .with_status(StatusCode::BAD_REQUEST)
            .with_code("UNKNOWN_FIELD");
        let value = serde_json::to_value(&obj).unwrap();
        assert_eq!(value["status"], "400");
        assert_eq!(value["code"], "UNKNOWN_FIELD");
        assert!(value.get("source").is_none());
    }

    #[test]
    fn test_document_wraps_errors_member() {
        let doc = ErrorDocument::single(ErrorObject::new("a", "b"));
        let value = serde_json::to_value(&doc).unwrap();
        assert_eq!(value["errors"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_document_response_status_and_media_type() {
        let response = ErrorDocument::default().into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            JSONAPI_MEDIA_TYPE
        );
    }

    #[test]
    fn test_source_kind_strings() {
        assert_eq!(SourceKind::Parameter.as_str(), "parameter");
        assert_eq!(SourceKind::Pointer.to_string(), "pointer");
    }
}
