//! Contract cases.

use serde::{Deserialize, Serialize};

use super::expectation::ExpectationSet;
use crate::request::RequestTemplate;

/// Binds the value found at `path` in a response body to `name`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capture {
    /// Binding name made available to later cases.
    pub name: String,
    /// Body path in `$.field[0].nested` syntax.
    pub path: String,
}

impl Capture {
    /// Creates a capture.
    #[must_use]
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }
}

/// One request plus the expectations its response must meet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Case {
    /// Case name, shown in reports.
    pub name: String,
    /// Request to send.
    pub request: RequestTemplate,
    /// Expectations evaluated against the response.
    #[serde(default)]
    pub expectations: ExpectationSet,
    /// Values to capture for later cases.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub captures: Vec<Capture>,
}

impl Case {
    /// Creates a case with no expectations.
    #[must_use]
    pub fn new(name: impl Into<String>, request: RequestTemplate) -> Self {
        Self {
            name: name.into(),
            request,
            expectations: ExpectationSet::new(),
            captures: Vec::new(),
        }
    }

    /// Sets the expectations (builder pattern).
    #[must_use]
    pub fn expect(mut self, expectations: ExpectationSet) -> Self {
        self.expectations = expectations;
        self
    }

    /// Adds a capture (builder pattern).
    #[must_use]
    pub fn capture(mut self, name: impl Into<String>, path: impl Into<String>) -> Self {
        self.captures.push(Capture::new(name, path));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::HttpMethod;
    use serde_json::json;

    #[test]
    fn test_case_builder() {
        let case = Case::new("GET product", RequestTemplate::get("/products/1"))
            .expect(ExpectationSet::new().status(200).json_match(json!({"id": 1})))
            .capture("product_id", "$.id");

        assert_eq!(case.request.method, HttpMethod::Get);
        assert_eq!(case.expectations.len(), 2);
        assert_eq!(case.captures, vec![Capture::new("product_id", "$.id")]);
    }
}
