//! Request types: methods, headers, query parameters, resolved specs and templates.

mod header;
mod method;
mod query;
mod spec;
mod template;

pub use header::{Header, Headers};
pub use method::HttpMethod;
pub use query::{QueryParam, QueryParams};
pub use spec::RequestSpec;
pub use template::RequestTemplate;
