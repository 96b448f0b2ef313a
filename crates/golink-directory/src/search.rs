use golink_core::Link;
use serde::Serialize;

/// Autocomplete answer, serialized as `[query, [names...]]` so a client can
/// match a response to the request that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Suggestions(String, Vec<String>);

impl Suggestions {
    pub fn new(query: impl Into<String>, names: Vec<String>) -> Self {
        Self(query.into(), names)
    }

    pub fn query(&self) -> &str {
        &self.0
    }

    pub fn names(&self) -> &[String] {
        &self.1
    }
}

/// Result of a search-with-redirect query.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    /// A link is named exactly like the query; go to its page.
    Redirect { path: String },
    /// Links whose name starts with the query, in insertion order.
    Listing(Vec<Link>),
}
