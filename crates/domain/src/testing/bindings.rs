//! Immutable values carried from one case to the next.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Named JSON values captured from earlier responses.
///
/// `Bindings` is never mutated in place: [`Bindings::with`] returns a new
/// map, so a value visible to a case is exactly the value that existed when
/// the case was planned.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Bindings {
    values: BTreeMap<String, Value>,
}

impl Bindings {
    /// Creates an empty set of bindings.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            values: BTreeMap::new(),
        }
    }

    /// Returns a copy of these bindings with `name` bound to `value`.
    #[must_use]
    pub fn with(&self, name: impl Into<String>, value: Value) -> Self {
        let mut values = self.values.clone();
        values.insert(name.into(), value);
        Self { values }
    }

    /// Returns a copy of these bindings extended with `other`; `other` wins.
    #[must_use]
    pub fn extended<I>(&self, other: I) -> Self
    where
        I: IntoIterator<Item = (String, Value)>,
    {
        let mut values = self.values.clone();
        values.extend(other);
        Self { values }
    }

    /// Looks up a binding.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Returns the number of bindings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if nothing is bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
