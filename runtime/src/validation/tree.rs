//! Hierarchical validation failures
//!
//! The translator only sees [`ValidationNode`]s, so any validation library
//! can be plugged in by implementing [`HierarchicalErrors`]. The adapter for
//! the `validator` crate lives here.

use validator::{ValidationError, ValidationErrors, ValidationErrorsKind};

/// One failed field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldFailure {
    /// Field name as reported by the validator
    pub name: String,
    /// Ancestor field names, outermost first
    pub path: Vec<String>,
    /// Underlying reason
    pub reason: String,
}

impl FieldFailure {
    pub fn new(name: impl Into<String>, path: &[&str], reason: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.iter().map(|s| s.to_string()).collect(),
            reason: reason.into(),
        }
    }
}

/// Node of a validation result tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationNode {
    Leaf(FieldFailure),
    Group(Vec<ValidationNode>),
    /// A shape the adapter does not understand; translating it is a
    /// programming error
    Unsupported(String),
}

/// Validation result that can be walked depth-first
pub trait HierarchicalErrors {
    /// Top-level nodes in discovery order
    fn nodes(&self) -> Vec<ValidationNode>;
}

impl HierarchicalErrors for Vec<ValidationNode> {
    fn nodes(&self) -> Vec<ValidationNode> {
        self.clone()
    }
}

/// Struct fields come out sorted by field name, not in declaration order,
/// since `validator` does not record the latter. List items keep index order.
impl HierarchicalErrors for ValidationErrors {
    fn nodes(&self) -> Vec<ValidationNode> {
        nodes_at(self, &[])
    }
}

/// Walk `validator` errors. Struct fields are visited in name order since
/// the validator keeps them in a hash map; list items in index order.
fn nodes_at(errors: &ValidationErrors, path: &[String]) -> Vec<ValidationNode> {
    let mut fields: Vec<_> = errors.errors().iter().collect();
    fields.sort_by(|a, b| a.0.cmp(b.0));

    fields
        .into_iter()
        .map(|(field, kind)| match kind {
            ValidationErrorsKind::Field(errs) => ValidationNode::Group(
                errs.iter()
                    .map(|e| {
                        ValidationNode::Leaf(FieldFailure {
                            name: field.to_string(),
                            path: path.to_vec(),
                            reason: failure_reason(e),
                        })
                    })
                    .collect(),
            ),
            ValidationErrorsKind::Struct(inner) => {
                ValidationNode::Group(nodes_at(inner, &child_path(path, field)))
            }
            ValidationErrorsKind::List(items) => {
                let list_path = child_path(path, field);
                ValidationNode::Group(
                    items
                        .iter()
                        .map(|(index, inner)| {
                            ValidationNode::Group(nodes_at(
                                inner,
                                &child_path(&list_path, &index.to_string()),
                            ))
                        })
                        .collect(),
                )
            }
        })
        .collect()
}

fn child_path(path: &[String], segment: &str) -> Vec<String> {
    let mut child = path.to_vec();
    child.push(segment.to_string());
    child
}

/// Message when the rule set one, otherwise the rule code
fn failure_reason(error: &ValidationError) -> String {
    error
        .message
        .as_ref()
        .map(|m| m.to_string())
        .unwrap_or_else(|| error.code.to_string())
}

#[cfg(test)]
mod tests {
    use validator::Validate;

    use super::*;

    #[derive(Debug, Validate)]
    struct Inner {
        #[validate(length(min = 1, message = "must not be empty"))]
        name: String,
    }

    #[derive(Debug, Validate)]
    struct Outer {
        #[validate(range(min = 1))]
        count: u32,
        #[validate(nested)]
        inner: Inner,
        #[validate(nested)]
        items: Vec<Inner>,
    }

    fn leaves(nodes: &[ValidationNode], out: &mut Vec<FieldFailure>) {
        for node in nodes {
            match node {
                ValidationNode::Leaf(f) => out.push(f.clone()),
                ValidationNode::Group(children) => leaves(children, out),
                ValidationNode::Unsupported(_) => panic!("unexpected node"),
            }
        }
    }

    #[test]
    fn test_validator_errors_become_leaves_with_paths() {
        let value = Outer {
            count: 0,
            inner: Inner {
                name: String::new(),
            },
            items: vec![
                Inner {
                    name: "ok".to_string(),
                },
                Inner {
                    name: String::new(),
                },
            ],
        };
        let errors = value.validate().unwrap_err();

        let mut out = Vec::new();
        leaves(&errors.nodes(), &mut out);

        assert_eq!(
            out,
            vec![
                FieldFailure::new("count", &[], "range"),
                FieldFailure::new("name", &["inner"], "must not be empty"),
                FieldFailure::new("name", &["items", "1"], "must not be empty"),
            ]
        );
    }

    #[derive(Debug, Validate)]
    struct Declared {
        #[validate(length(min = 1))]
        zeta: String,
        #[validate(length(min = 1))]
        alpha: String,
        #[validate(length(min = 1))]
        mid: String,
    }

    #[test]
    fn test_struct_fields_come_out_in_name_order() {
        let value = Declared {
            zeta: String::new(),
            alpha: String::new(),
            mid: String::new(),
        };
        let errors = value.validate().unwrap_err();

        let mut out = Vec::new();
        leaves(&errors.nodes(), &mut out);

        let names: Vec<&str> = out.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["alpha", "mid", "zeta"]);
    }

    #[test]
    fn test_vec_of_nodes_is_its_own_tree() {
        let nodes = vec![ValidationNode::Leaf(FieldFailure::new("a", &[], "bad"))];
        assert_eq!(nodes.nodes(), nodes);
    }
}
