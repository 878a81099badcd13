//! Validation failures as JSON:API error documents
//!
//! Struct validation is delegated to the `validator` crate. Its
//! hierarchical result is walked depth-first and every failed field becomes
//! one error object whose `source` points at the field, either as a query
//! `parameter` or as a `pointer` into the request document.

mod document;
mod extract;
pub mod iso8601;
mod translate;
mod tree;

pub use document::{ErrorDocument, ErrorObject, ErrorSource, JSONAPI_MEDIA_TYPE, SourceKind};
pub use extract::{
    JsonApiRejection, ValidatedBody, ValidatedParams, ValidationFailure, validate_parameters,
    validate_request, validate_struct,
};
pub use iso8601::{parse_iso8601, validate_iso8601};
pub use translate::{TranslateError, source_path, translate};
pub use tree::{FieldFailure, HierarchicalErrors, ValidationNode};
