//! Request Builder
//!
//! Turns declarative [`RequestTemplate`](probe_domain::request::RequestTemplate)s
//! into fully resolved requests.
//!
//! # Usage
//!
//! ```
//! use probe_application::request_builder::RequestBuilder;
//! use probe_domain::request::RequestTemplate;
//! use probe_domain::testing::Bindings;
//! use serde_json::json;
//!
//! let builder = RequestBuilder::parse("https://dummyjson.com").unwrap();
//! let bindings = Bindings::new().with("id", json!(1));
//!
//! let spec = builder.build(&RequestTemplate::get("/products/{id}"), &bindings).unwrap();
//! assert_eq!(spec.url.as_str(), "https://dummyjson.com/products/1");
//! ```

mod builder;
mod parser;

pub use builder::{RequestBuilder, resolve_path};
pub use parser::{Placeholder, is_valid_variable_name, parse_placeholders};
