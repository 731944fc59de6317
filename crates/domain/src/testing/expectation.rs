//! Declarative expectations evaluated against a response.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::schema::SchemaDescriptor;

/// One independently evaluated assertion against a response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Expectation {
    /// Response status equals the given code.
    StatusEquals {
        /// Expected status code.
        expected: u16,
    },
    /// Response body conforms to a schema descriptor.
    SchemaConforms {
        /// Lower-bound shape of the body.
        schema: SchemaDescriptor,
    },
    /// Every key path of `subset` exists in the body with an identical value.
    JsonMatch {
        /// Expected subset of the body.
        subset: serde_json::Value,
    },
    /// Like `JsonMatch`, but tolerant of reformatting by the backend.
    JsonLike {
        /// Expected subset of the body.
        subset: serde_json::Value,
    },
}

impl Expectation {
    /// Returns the kind of this expectation.
    #[must_use]
    pub const fn kind(&self) -> ExpectationKind {
        match self {
            Self::StatusEquals { .. } => ExpectationKind::StatusEquals,
            Self::SchemaConforms { .. } => ExpectationKind::SchemaConforms,
            Self::JsonMatch { .. } => ExpectationKind::JsonMatch,
            Self::JsonLike { .. } => ExpectationKind::JsonLike,
        }
    }
}

/// Discriminant of [`Expectation`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ExpectationKind {
    /// Status-code equality.
    StatusEquals,
    /// Schema conformance.
    SchemaConforms,
    /// Exact subset match.
    JsonMatch,
    /// Loose subset match.
    JsonLike,
}

impl fmt::Display for ExpectationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::StatusEquals => "StatusEquals",
            Self::SchemaConforms => "SchemaConforms",
            Self::JsonMatch => "JsonMatch",
            Self::JsonLike => "JsonLike",
        };
        f.write_str(name)
    }
}

/// Ordered sequence of expectations for one case.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct ExpectationSet {
    items: Vec<Expectation>,
}

impl ExpectationSet {
    /// Creates an empty set.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Adds an expectation (builder pattern).
    #[must_use]
    pub fn with(mut self, expectation: Expectation) -> Self {
        self.items.push(expectation);
        self
    }

    /// Expects the given status code.
    #[must_use]
    pub fn status(self, expected: u16) -> Self {
        self.with(Expectation::StatusEquals { expected })
    }

    /// Expects the body to conform to `schema`.
    #[must_use]
    pub fn schema(self, schema: SchemaDescriptor) -> Self {
        self.with(Expectation::SchemaConforms { schema })
    }

    /// Expects an exact subset match.
    #[must_use]
    pub fn json_match(self, subset: serde_json::Value) -> Self {
        self.with(Expectation::JsonMatch { subset })
    }

    /// Expects a loose subset match.
    #[must_use]
    pub fn json_like(self, subset: serde_json::Value) -> Self {
        self.with(Expectation::JsonLike { subset })
    }

    /// Returns an iterator over expectations in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &Expectation> {
        self.items.iter()
    }

    /// Returns the number of expectations.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the set is empty.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<'a> IntoIterator for &'a ExpectationSet {
    type Item = &'a Expectation;
    type IntoIter = std::slice::Iter<'a, Expectation>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
