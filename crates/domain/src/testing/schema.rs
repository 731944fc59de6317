//! JSON-Schema-like shape descriptors.
//!
//! Only the `type`, `properties`, `items` and `required` keywords are
//! understood. Other keywords are ignored on deserialization, so schema
//! literals written for full JSON-Schema validators load unchanged.
//! A descriptor serializes back to a valid JSON Schema document.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Primitive JSON types a schema node can require.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JsonType {
    /// Any JSON number
    Number,
    /// A number without a fractional part
    Integer,
    /// A JSON string
    String,
    /// `true` or `false`
    Boolean,
    /// A JSON array
    Array,
    /// A JSON object
    Object,
    /// `null`
    Null,
}

impl JsonType {
    /// Returns the type of a JSON value. Numbers always report `Number`.
    #[must_use]
    pub const fn of(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(_) => Self::Boolean,
            Value::Number(_) => Self::Number,
            Value::String(_) => Self::String,
            Value::Array(_) => Self::Array,
            Value::Object(_) => Self::Object,
        }
    }

    /// Returns the lowercase type name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Number => "number",
            Self::Integer => "integer",
            Self::String => "string",
            Self::Boolean => "boolean",
            Self::Array => "array",
            Self::Object => "object",
            Self::Null => "null",
        }
    }
}

impl fmt::Display for JsonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A node of a schema descriptor.
///
/// A schema is a lower bound: properties present in the body but absent from
/// the schema are permitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchemaDescriptor {
    /// Required type of this node, if any
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<JsonType>,
    /// Declared object properties, in declaration order
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub properties: IndexMap<String, SchemaDescriptor>,
    /// Schema applied to every array element
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<SchemaDescriptor>>,
    /// Property names that must be present
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,
}

impl SchemaDescriptor {
    /// Creates a node that only constrains the type.
    #[must_use]
    pub fn of_type(schema_type: JsonType) -> Self {
        Self {
            schema_type: Some(schema_type),
            ..Self::default()
        }
    }

    /// Creates an object node.
    #[must_use]
    pub fn object() -> Self {
        Self::of_type(JsonType::Object)
    }

    /// Creates an array node whose elements follow `items`.
    #[must_use]
    pub fn array_of(items: Self) -> Self {
        Self {
            schema_type: Some(JsonType::Array),
            items: Some(Box::new(items)),
            ..Self::default()
        }
    }

    /// Declares a property (builder pattern).
    #[must_use]
    pub fn property(mut self, name: impl Into<String>, schema: Self) -> Self {
        self.properties.insert(name.into(), schema);
        self
    }

    /// Marks properties as required (builder pattern).
    #[must_use]
    pub fn require<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.required.extend(names.into_iter().map(Into::into));
        self
    }

    /// Parses a JSON-Schema literal.
    ///
    /// Property order follows the map order of `value`; use the builder
    /// methods when violations should be reported in a specific order.
    ///
    /// # Errors
    ///
    /// Returns an error if the literal does not describe a schema node,
    /// for example when `type` names an unknown type.
    pub fn from_json(value: Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_json_type_of() {
        assert_eq!(JsonType::of(&json!(1.5)), JsonType::Number);
        assert_eq!(JsonType::of(&json!("a")), JsonType::String);
        assert_eq!(JsonType::of(&json!([])), JsonType::Array);
        assert_eq!(JsonType::of(&json!(null)), JsonType::Null);
    }

    #[test]
    fn test_properties_keep_declaration_order() {
        let schema: SchemaDescriptor = serde_json::from_str(
            r#"{
                "type": "object",
                "properties": {
                    "title": { "type": "string" },
                    "id": { "type": "number" },
                    "brand": { "type": "string" }
                }
            }"#,
        )
        .expect("schema text parses");

        let names: Vec<_> = schema.properties.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["title", "id", "brand"]);

        let document = serde_json::to_string(&schema).expect("schema serializes");
        let title = document.find("\"title\"").expect("title present");
        let id = document.find("\"id\"").expect("id present");
        assert!(title < id);
    }

    #[test]
    fn test_from_json_literal() {
        let schema = SchemaDescriptor::from_json(json!({
            "type": "object",
            "properties": {
                "products": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "properties": { "id": { "type": "number" } },
                        "required": ["id"]
                    }
                },
                "total": { "type": "number" }
            },
            "required": ["products", "total"],
            "additionalProperties": true
        }))
        .expect("schema literal parses");

        let expected = SchemaDescriptor::object()
            .property(
                "products",
                SchemaDescriptor::array_of(
                    SchemaDescriptor::object()
                        .property("id", SchemaDescriptor::of_type(JsonType::Number))
                        .require(["id"]),
                ),
            )
            .property("total", SchemaDescriptor::of_type(JsonType::Number))
            .require(["products", "total"]);

        assert_eq!(schema, expected);
    }

    #[test]
    fn test_unknown_type_rejected() {
        let result = SchemaDescriptor::from_json(json!({"type": "decimal"}));
        assert!(result.is_err());
    }
}
