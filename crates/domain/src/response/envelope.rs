//! Response envelope type

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::request::Headers;

/// Normalized HTTP response.
///
/// Produced exactly once per executed request and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    /// HTTP status code
    pub status: u16,
    /// Response headers
    pub headers: Headers,
    /// Response body. Empty bodies are `null`; non-JSON bodies are kept as a string.
    pub body: serde_json::Value,
    /// Response time
    #[serde(with = "duration_millis")]
    pub duration: Duration,
}

impl ResponseEnvelope {
    /// Creates a new envelope.
    #[must_use]
    pub const fn new(
        status: u16,
        headers: Headers,
        body: serde_json::Value,
        duration: Duration,
    ) -> Self {
        Self {
            status,
            headers,
            body,
            duration,
        }
    }

    /// Creates an envelope from raw body bytes.
    ///
    /// The body is parsed as JSON when possible; otherwise the lossy UTF-8
    /// text is stored as a JSON string.
    #[must_use]
    pub fn from_raw(status: u16, headers: Headers, raw: &[u8], duration: Duration) -> Self {
        let body = if raw.iter().all(u8::is_ascii_whitespace) {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(raw).unwrap_or_else(|_| {
                serde_json::Value::String(String::from_utf8_lossy(raw).into_owned())
            })
        };
        Self::new(status, headers, body, duration)
    }

    /// Returns the value of a response header.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)
    }
}

mod duration_millis {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    #[allow(clippy::cast_possible_truncation)]
    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(duration.as_millis() as u64)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = u64::deserialize(deserializer)?;
        Ok(Duration::from_millis(millis))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_raw_json() {
        let response = ResponseEnvelope::from_raw(
            200,
            Headers::new(),
            br#"{"id": 1, "title": "x"}"#,
            Duration::from_millis(5),
        );
        assert_eq!(response.body, json!({"id": 1, "title": "x"}));
        assert_eq!(response.status, 200);
    }

    #[test]
    fn test_from_raw_empty_body_is_null() {
        let response =
            ResponseEnvelope::from_raw(204, Headers::new(), b"  \n", Duration::ZERO);
        assert_eq!(response.body, serde_json::Value::Null);
    }

    #[test]
    fn test_from_raw_text_body_kept_as_string() {
        let response =
            ResponseEnvelope::from_raw(502, Headers::new(), b"Bad Gateway", Duration::ZERO);
        assert_eq!(response.body, json!("Bad Gateway"));
    }

    #[test]
    fn test_header_lookup() {
        let headers = Headers::new().with("Content-Type", "application/json");
        let response = ResponseEnvelope::new(200, headers, json!({}), Duration::ZERO);
        assert_eq!(response.header("content-type"), Some("application/json"));
    }
}
