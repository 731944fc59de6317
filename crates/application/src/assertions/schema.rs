//! Schema conformance checks.
//!
//! Descriptors are compiled to Draft 2020-12 documents and validated with
//! `jsonschema`. Validator errors are mapped back onto `$`-rooted paths and
//! ordered by where the offending node is declared in the descriptor.

use jsonschema::Draft;
use jsonschema::Validator;
use jsonschema::error::ValidationErrorKind;
use probe_domain::testing::{Failure, JsonType, SchemaDescriptor};
use serde_json::Value;
use tracing::warn;

use super::json_path::{ROOT, child_index, child_key};

/// Validates `value` against `schema`, appending one `SchemaViolation` per
/// mismatch.
///
/// A node whose type is wrong is reported once and not descended into.
/// Missing required properties are reported by path; present declared
/// properties and array items are checked recursively.
pub fn check_schema(schema: &SchemaDescriptor, value: &Value, failures: &mut Vec<Failure>) {
    let validator = match compile(schema) {
        Ok(validator) => validator,
        Err(message) => {
            warn!(error = %message, "schema did not compile");
            failures.push(Failure::Build {
                message: format!("invalid schema: {message}"),
            });
            return;
        }
    };

    let mut violations: Vec<(Vec<usize>, Failure)> = validator
        .iter_errors(value)
        .filter_map(|error| {
            let pointer = error.instance_path.to_string();
            match &error.kind {
                ValidationErrorKind::Type { .. } => Some(type_violation(schema, value, &pointer)),
                ValidationErrorKind::Required { property } => property
                    .as_str()
                    .map(|name| missing_property(schema, value, &pointer, name)),
                _ => None,
            }
        })
        .collect();

    violations.sort_by(|(a, _), (b, _)| a.cmp(b));
    failures.extend(violations.into_iter().map(|(_, failure)| failure));
}

fn compile(schema: &SchemaDescriptor) -> Result<Validator, String> {
    let document = serde_json::to_value(schema).map_err(|e| e.to_string())?;
    jsonschema::options()
        .with_draft(Draft::Draft202012)
        .build(&document)
        .map_err(|e| e.to_string())
}

/// A body node paired with the descriptor node that governs it.
struct Node<'s, 'v> {
    schema: &'s SchemaDescriptor,
    value: &'v Value,
    path: String,
    /// Declaration position of every step from the root.
    rank: Vec<usize>,
}

impl<'s, 'v> Node<'s, 'v> {
    fn root(schema: &'s SchemaDescriptor, value: &'v Value) -> Self {
        Self {
            schema,
            value,
            path: ROOT.to_string(),
            rank: Vec::new(),
        }
    }

    /// Follows a JSON pointer; `None` if it leaves the descriptor.
    fn locate(schema: &'s SchemaDescriptor, value: &'v Value, pointer: &str) -> Option<Self> {
        pointer
            .split('/')
            .skip(1)
            .try_fold(Self::root(schema, value), |node, token| {
                node.child(&token.replace("~1", "/").replace("~0", "~"))
            })
    }

    fn child(self, token: &str) -> Option<Self> {
        let mut rank = self.rank;
        match self.value {
            Value::Array(elements) => {
                let index: usize = token.parse().ok()?;
                rank.push(index);
                Some(Self {
                    schema: self.schema.items.as_deref()?,
                    value: elements.get(index)?,
                    path: child_index(&self.path, index),
                    rank,
                })
            }
            Value::Object(members) => {
                rank.push(declaration_rank(self.schema, token));
                Some(Self {
                    schema: self.schema.properties.get(token)?,
                    value: members.get(token)?,
                    path: child_key(&self.path, token),
                    rank,
                })
            }
            _ => None,
        }
    }
}

/// Declared properties come first in declaration order, then names that are
/// only listed as required.
fn declaration_rank(schema: &SchemaDescriptor, name: &str) -> usize {
    schema
        .properties
        .get_index_of(name)
        .or_else(|| {
            schema
                .required
                .iter()
                .position(|required| required == name)
                .map(|position| schema.properties.len() + position)
        })
        .unwrap_or(usize::MAX)
}

fn pointer_path(pointer: &str) -> String {
    format!("{ROOT}{}", pointer.replace('/', "."))
}

fn type_violation(
    schema: &SchemaDescriptor,
    value: &Value,
    pointer: &str,
) -> (Vec<usize>, Failure) {
    match Node::locate(schema, value, pointer) {
        Some(node) => (
            node.rank,
            Failure::SchemaViolation {
                path: node.path,
                expected_type: node.schema.schema_type,
                actual_type: Some(JsonType::of(node.value)),
            },
        ),
        None => (
            Vec::new(),
            Failure::SchemaViolation {
                path: pointer_path(pointer),
                expected_type: None,
                actual_type: value.pointer(pointer).map(JsonType::of),
            },
        ),
    }
}

fn missing_property(
    schema: &SchemaDescriptor,
    value: &Value,
    pointer: &str,
    name: &str,
) -> (Vec<usize>, Failure) {
    match Node::locate(schema, value, pointer) {
        Some(node) => {
            let mut rank = node.rank;
            rank.push(declaration_rank(node.schema, name));
            (
                rank,
                Failure::SchemaViolation {
                    path: child_key(&node.path, name),
                    expected_type: node.schema.properties.get(name).and_then(|p| p.schema_type),
                    actual_type: None,
                },
            )
        }
        None => (
            Vec::new(),
            Failure::SchemaViolation {
                path: child_key(&pointer_path(pointer), name),
                expected_type: None,
                actual_type: None,
            },
        ),
    }
}
