//! Query modifiers
//!
//! Parsers never touch a query directly. They return a [`QueryModifier`]
//! holding the parsed parameters, and the handler applies the modifiers to
//! its query object once every parse step has succeeded.

use serde::Serialize;

use super::error::QueryError;
use super::sanitize::FilterValue;

/// Sort direction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

/// Operations the underlying query object must support.
///
/// Conditions added with [`QueryTarget::where_in`] are combined with AND;
/// orderings apply in the order they are added.
pub trait QueryTarget {
    /// Restrict rows to those where `column` equals one of `values`
    fn where_in(&mut self, column: &str, values: &[FilterValue]) -> Result<(), QueryError>;

    /// Append an ordering on `column`
    fn order_by(&mut self, column: &str, direction: SortDirection) -> Result<(), QueryError>;

    /// Set the row window
    fn limit_offset(&mut self, limit: u64, offset: u64) -> Result<(), QueryError>;
}

type ApplyFn = Box<dyn FnOnce(&mut dyn QueryTarget) -> Result<(), QueryError> + Send>;

/// Deferred mutation of a query object
pub struct QueryModifier {
    kind: &'static str,
    apply: Option<ApplyFn>,
}

impl QueryModifier {
    /// Modifier that leaves the query untouched
    pub fn noop() -> Self {
        Self {
            kind: "noop",
            apply: None,
        }
    }

    pub fn new<F>(kind: &'static str, apply: F) -> Self
    where
        F: FnOnce(&mut dyn QueryTarget) -> Result<(), QueryError> + Send + 'static,
    {
        Self {
            kind,
            apply: Some(Box::new(apply)),
        }
    }

    pub fn kind(&self) -> &'static str {
        self.kind
    }

    pub fn is_noop(&self) -> bool {
        self.apply.is_none()
    }

    /// Apply to `query` and hand it back
    pub fn apply<Q: QueryTarget>(self, mut query: Q) -> Result<Q, QueryError> {
        self.apply_to(&mut query)?;
        Ok(query)
    }

    /// Apply in place
    pub fn apply_to(self, query: &mut dyn QueryTarget) -> Result<(), QueryError> {
        match self.apply {
            Some(apply) => {
                tracing::trace!(kind = self.kind, "Applying query modifier");
                apply(query)
            }
            None => Ok(()),
        }
    }

    /// Run `self` then `next` on the same query
    pub fn then(self, next: QueryModifier) -> QueryModifier {
        match (self.apply, next.apply) {
            (None, None) => QueryModifier::noop(),
            (Some(apply), None) => QueryModifier {
                kind: self.kind,
                apply: Some(apply),
            },
            (None, Some(apply)) => QueryModifier {
                kind: next.kind,
                apply: Some(apply),
            },
            (Some(first), Some(second)) => QueryModifier::new("chain", move |query| {
                first(&mut *query)?;
                second(query)
            }),
        }
    }
}

impl Default for QueryModifier {
    fn default() -> Self {
        Self::noop()
    }
}

impl std::fmt::Debug for QueryModifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryModifier")
            .field("kind", &self.kind)
            .field("noop", &self.is_noop())
            .finish()
    }
}
