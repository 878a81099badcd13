//! Validation failures to JSON:API error objects

use thiserror::Error;

use super::document::{ErrorDocument, ErrorObject, ErrorSource, SourceKind};
use super::tree::{FieldFailure, HierarchicalErrors, ValidationNode};

/// Path segment the parameter structs are nested under; not part of the
/// parameter name the client sent
const PARAM_SEGMENT: &str = "param";

/// The validator handed back something the translator cannot represent.
///
/// Not a client error. Callers must abort the request.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TranslateError {
    #[error("Unexpected validation result shape: {0}")]
    UnexpectedShape(String),
}

/// Flatten a validation result into an error document.
///
/// Errors keep depth-first discovery order. Either every failure is
/// translated or an error is returned.
pub fn translate<E>(errors: &E, source: SourceKind) -> Result<ErrorDocument, TranslateError>
where
    E: HierarchicalErrors + ?Sized,
{
    let mut document = ErrorDocument::default();
    flatten(&errors.nodes(), source, &mut document)?;
    Ok(document)
}

fn flatten(
    nodes: &[ValidationNode],
    source: SourceKind,
    document: &mut ErrorDocument,
) -> Result<(), TranslateError> {
    for node in nodes {
        match node {
            ValidationNode::Leaf(failure) => document.push(error_object(failure, source)),
            ValidationNode::Group(children) => flatten(children, source, document)?,
            ValidationNode::Unsupported(shape) => {
                return Err(TranslateError::UnexpectedShape(shape.clone()));
            }
        }
    }
    Ok(())
}

fn error_object(failure: &FieldFailure, source: SourceKind) -> ErrorObject {
    ErrorObject::new(format!("{} is invalid", failure.name), failure.reason.clone())
        .with_source(ErrorSource::new(source, source_path(failure, source)))
}

/// Slash-delimited, lower-cased location of a failed field.
///
/// For parameters the first `param` segment is dropped.
pub fn source_path(failure: &FieldFailure, source: SourceKind) -> String {
    let mut segments: Vec<String> = failure
        .path
        .iter()
        .chain(std::iter::once(&failure.name))
        .map(|s| s.to_lowercase())
        .collect();

    if source == SourceKind::Parameter {
        if let Some(pos) = segments.iter().position(|s| s == PARAM_SEGMENT) {
            segments.remove(pos);
        }
    }

    segments.iter().map(|s| format!("/{}", s)).collect()
}
