//! Resolves request templates into executable request specs.

use probe_domain::DomainError;
use probe_domain::config::DEFAULT_TIMEOUT_MS;
use probe_domain::request::{Headers, RequestSpec, RequestTemplate};
use probe_domain::testing::Bindings;
use serde_json::Value;
use url::Url;

use super::parser::parse_placeholders;
use crate::error::BuildError;

/// Builds [`RequestSpec`]s from templates against a base URL.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    base_url: Url,
    default_timeout_ms: u64,
    default_headers: Headers,
}

impl RequestBuilder {
    /// Creates a builder with a 90 second default timeout and an
    /// `Accept: application/json` default header.
    #[must_use]
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            default_timeout_ms: DEFAULT_TIMEOUT_MS,
            default_headers: Headers::new().with("Accept", "application/json"),
        }
    }

    /// Creates a builder from a base URL string.
    ///
    /// # Errors
    ///
    /// Returns `BuildError::InvalidRequest` if the URL does not parse or
    /// cannot carry a path.
    pub fn parse(base_url: &str) -> Result<Self, BuildError> {
        let url = Url::parse(base_url)
            .map_err(|e| DomainError::InvalidUrl(format!("{e}: {base_url}")))?;
        if url.cannot_be_a_base() {
            return Err(DomainError::InvalidUrl(base_url.to_string()).into());
        }
        Ok(Self::new(url))
    }

    /// Sets the timeout used when a template does not override it.
    #[must_use]
    pub const fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.default_timeout_ms = timeout_ms;
        self
    }

    /// Adds a header sent with every request.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.insert(name, value);
        self
    }

    /// Returns the base URL.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolves a template into a request.
    ///
    /// # Errors
    ///
    /// Returns a `BuildError` if a placeholder is unbound or malformed, or if
    /// the resulting URL or timeout is invalid.
    pub fn build(
        &self,
        template: &RequestTemplate,
        bindings: &Bindings,
    ) -> Result<RequestSpec, BuildError> {
        let path = resolve_path(&template.path, bindings)?;
        let mut url = self.join(&path)?;

        if !template.query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for param in template.query.iter() {
                pairs.append_pair(&param.key, &param.value);
            }
        }

        let mut headers = self.default_headers.clone();
        headers.merge(&template.headers);
        if template.body.is_some() && !headers.contains("Content-Type") {
            headers.insert("Content-Type", "application/json");
        }

        let timeout_ms = template.timeout_ms.unwrap_or(self.default_timeout_ms);
        let mut spec = RequestSpec::new(template.method, url, timeout_ms)?.with_headers(headers);
        if let Some(body) = &template.body {
            spec = spec.with_body(body.clone());
        }
        Ok(spec)
    }

    /// Appends `path` to the base path. A query on the base URL is kept ahead
    /// of any query written inline in `path`.
    fn join(&self, path: &str) -> Result<Url, BuildError> {
        if path.starts_with("http://") || path.starts_with("https://") {
            return Url::parse(path)
                .map_err(|e| DomainError::InvalidUrl(format!("{e}: {path}")).into());
        }

        let (path, inline_query) = match path.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (path, None),
        };

        let mut url = self.base_url.clone();
        let joined = format!(
            "{}/{}",
            url.path().trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        url.set_path(&joined);
        url.set_fragment(None);

        if let Some(inline) = inline_query.filter(|q| !q.is_empty()) {
            let query = match url.query().filter(|q| !q.is_empty()) {
                Some(base) => format!("{base}&{inline}"),
                None => inline.to_string(),
            };
            url.set_query(Some(&query));
        }
        Ok(url)
    }
}

/// Substitutes `{name}` placeholders in `template` with percent-encoded
/// values from `bindings`.
///
/// # Errors
///
/// Returns `BuildError::UndefinedVariable` for unbound names,
/// `BuildError::NonScalarVariable` for object, array or null values, and
/// `BuildError::MalformedTemplate` for syntax errors.
pub fn resolve_path(template: &str, bindings: &Bindings) -> Result<String, BuildError> {
    let placeholders = parse_placeholders(template)?;
    if placeholders.is_empty() {
        return Ok(template.to_string());
    }

    let mut resolved = String::with_capacity(template.len());
    let mut last_end = 0;
    for placeholder in &placeholders {
        resolved.push_str(&template[last_end..placeholder.span.start]);
        let value = bindings
            .get(&placeholder.name)
            .ok_or_else(|| BuildError::UndefinedVariable(placeholder.name.clone()))?;
        let raw = match value {
            Value::String(s) => s.clone(),
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Null | Value::Array(_) | Value::Object(_) => {
                return Err(BuildError::NonScalarVariable(placeholder.name.clone()));
            }
        };
        resolved.push_str(&urlencoding::encode(&raw));
        last_end = placeholder.span.end;
    }
    resolved.push_str(&template[last_end..]);

    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use probe_domain::request::HttpMethod;
    use serde_json::json;

    fn builder() -> RequestBuilder {
        RequestBuilder::parse("https://dummyjson.com").expect("valid base url")
    }

    #[test]
    fn test_query_params_in_stable_order() {
        let template = RequestTemplate::get("/products").query("limit", 10).query("skip", 0);
        let spec = builder()
            .build(&template, &Bindings::new())
            .expect("request builds");

        assert_eq!(
            spec.url.as_str(),
            "https://dummyjson.com/products?limit=10&skip=0"
        );
        assert_eq!(spec.method, HttpMethod::Get);
        assert_eq!(spec.timeout_ms, 90_000);
    }

    #[test]
    fn test_inline_query_is_kept() {
        let template = RequestTemplate::get("/products/search?q=phone").query("limit", 5);
        let spec = builder()
            .build(&template, &Bindings::new())
            .expect("request builds");
        assert_eq!(
            spec.url.as_str(),
            "https://dummyjson.com/products/search?q=phone&limit=5"
        );
    }

    #[test]
    fn test_placeholders_resolved_from_bindings() {
        let bindings = Bindings::new()
            .with("id", json!(1))
            .with("cat", json!("home decoration"));
        let template = RequestTemplate::get("/products/{id}/category/{cat}");
        let spec = builder().build(&template, &bindings).expect("request builds");
        assert_eq!(
            spec.url.as_str(),
            "https://dummyjson.com/products/1/category/home%20decoration"
        );
    }

    #[test]
    fn test_undefined_variable() {
        let template = RequestTemplate::delete("/products/{product_id}");
        let result = builder().build(&template, &Bindings::new());
        assert!(
            matches!(result, Err(BuildError::UndefinedVariable(ref name)) if name == "product_id")
        );
    }

    #[test]
    fn test_non_scalar_variable() {
        let bindings = Bindings::new().with("id", json!({"nested": true}));
        let result = resolve_path("/products/{id}", &bindings);
        assert!(matches!(result, Err(BuildError::NonScalarVariable(_))));
    }

    #[test]
    fn test_base_url_with_path_prefix() {
        let builder = RequestBuilder::parse("http://localhost:8080/api/").expect("valid base");
        let spec = builder
            .build(&RequestTemplate::get("users/1"), &Bindings::new())
            .expect("request builds");
        assert_eq!(spec.url.as_str(), "http://localhost:8080/api/users/1");
    }

    #[test]
    fn test_base_url_query_stays_in_query() {
        let builder =
            RequestBuilder::parse("https://api.example.com/v1?key=abc#top").expect("valid base");

        let spec = builder
            .build(&RequestTemplate::get("/products").query("limit", 10), &Bindings::new())
            .expect("request builds");
        assert_eq!(spec.url.as_str(), "https://api.example.com/v1/products?key=abc&limit=10");

        let spec = builder
            .build(&RequestTemplate::get("/products/search?q=phone"), &Bindings::new())
            .expect("request builds");
        assert_eq!(spec.url.as_str(), "https://api.example.com/v1/products/search?key=abc&q=phone");
    }

    #[test]
    fn test_base_without_path_rejected() {
        let result = RequestBuilder::parse("mailto:team@example.com");
        assert!(matches!(result, Err(BuildError::InvalidRequest(DomainError::InvalidUrl(_)))));
    }

    #[test]
    fn test_absolute_path_overrides_base() {
        let spec = builder()
            .build(
                &RequestTemplate::get("https://other.example.com/health"),
                &Bindings::new(),
            )
            .expect("request builds");
        assert_eq!(spec.url.as_str(), "https://other.example.com/health");
    }

    #[test]
    fn test_body_sets_content_type() {
        let template = RequestTemplate::post("/products/add").body(json!({"title": "Widget"}));
        let spec = builder()
            .build(&template, &Bindings::new())
            .expect("request builds");
        assert_eq!(spec.headers.get("content-type"), Some("application/json"));
        assert_eq!(spec.headers.get("accept"), Some("application/json"));
        assert_eq!(spec.body, Some(json!({"title": "Widget"})));
    }

    #[test]
    fn test_template_timeout_override() {
        let template = RequestTemplate::get("/products").timeout_ms(250);
        let spec = builder()
            .with_timeout_ms(1000)
            .build(&template, &Bindings::new())
            .expect("request builds");
        assert_eq!(spec.timeout_ms, 250);
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let template = RequestTemplate::get("/products").timeout_ms(0);
        let result = builder().build(&template, &Bindings::new());
        assert!(matches!(
            result,
            Err(BuildError::InvalidRequest(DomainError::InvalidTimeout(0)))
        ));
    }
}
