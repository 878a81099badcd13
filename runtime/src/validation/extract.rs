//! Struct validation entry points and axum extractors
//!
//! Parameters are validated with source kind `parameter`, request bodies
//! with `pointer`. Failures answer with a JSON:API error document.

use std::ops::Deref;

use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{FromRequest, FromRequestParts, Query, Request};
use axum::http::StatusCode;
use axum::http::request::Parts;
use axum::response::{IntoResponse, Response};
use serde::de::DeserializeOwned;
use validator::Validate;

use super::document::{ErrorDocument, ErrorObject, SourceKind};
use super::translate::{TranslateError, translate};

/// Outcome of a failed struct validation
#[derive(Debug)]
pub enum ValidationFailure {
    /// Client input is invalid; respond 422 with the document
    Invalid(ErrorDocument),
    /// The validator result could not be translated; abort the request
    Internal(TranslateError),
}

impl IntoResponse for ValidationFailure {
    fn into_response(self) -> Response {
        match self {
            Self::Invalid(document) => document.into_response(),
            Self::Internal(e) => {
                tracing::error!(error = %e, "Validation error translation failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorDocument::single(
                        ErrorObject::new("Internal error", "Request validation failed")
                            .with_status(StatusCode::INTERNAL_SERVER_ERROR)
                            .with_code("INTERNAL"),
                    ),
                )
                    .into_response()
            }
        }
    }
}

/// Validate `value`, translating failures for `source`
pub fn validate_struct<T>(value: &T, source: SourceKind) -> Result<(), ValidationFailure>
where
    T: Validate,
{
    match value.validate() {
        Ok(()) => Ok(()),
        Err(errors) => match translate(&errors, source) {
            Ok(document) => Err(ValidationFailure::Invalid(document)),
            Err(e) => Err(ValidationFailure::Internal(e)),
        },
    }
}

/// Validate a parameter struct (source kind `parameter`)
pub fn validate_parameters<T: Validate>(value: &T) -> Result<(), ValidationFailure> {
    validate_struct(value, SourceKind::Parameter)
}

/// Validate a request document (source kind `pointer`)
pub fn validate_request<T: Validate>(value: &T) -> Result<(), ValidationFailure> {
    validate_struct(value, SourceKind::Pointer)
}

/// Rejection for the validating extractors
#[derive(Debug)]
pub enum JsonApiRejection {
    /// Failed to parse query string
    Query(QueryRejection),
    /// Failed to parse JSON body
    Json(JsonRejection),
    /// Validation constraints not satisfied
    Validation(ValidationFailure),
}

impl IntoResponse for JsonApiRejection {
    fn into_response(self) -> Response {
        let (code, title, detail) = match self {
            Self::Validation(failure) => return failure.into_response(),
            Self::Query(rejection) => (
                "QUERY_PARSE_ERROR",
                "Invalid query parameters",
                rejection.body_text(),
            ),
            Self::Json(rejection) => (
                "JSON_PARSE_ERROR",
                "Invalid request document",
                rejection.body_text(),
            ),
        };
        (
            StatusCode::BAD_REQUEST,
            ErrorDocument::single(
                ErrorObject::new(title, detail)
                    .with_status(StatusCode::BAD_REQUEST)
                    .with_code(code),
            ),
        )
            .into_response()
    }
}

/// Query extractor with automatic validation.
///
/// Deserializes query parameters and validates them using the `validator`
/// crate; failures point at the offending parameter.
#[derive(Debug)]
pub struct ValidatedParams<T>(pub T);

impl<T> Deref for ValidatedParams<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<S, T> FromRequestParts<S> for ValidatedParams<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = JsonApiRejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(JsonApiRejection::Query)?;
        validate_parameters(&value).map_err(JsonApiRejection::Validation)?;
        Ok(Self(value))
    }
}

/// JSON body extractor with automatic validation.
///
/// Deserializes the JSON body and validates it using the `validator` crate;
/// failures carry a JSON pointer into the document.
#[derive(Debug)]
pub struct ValidatedBody<T>(pub T);

impl<T> Deref for ValidatedBody<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<S, T> FromRequest<S> for ValidatedBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = JsonApiRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(JsonApiRejection::Json)?;
        validate_request(&value).map_err(JsonApiRejection::Validation)?;
        Ok(Self(value))
    }
}
