use crate::Result;
use async_trait::async_trait;
use std::fmt::Display;

/// The absolute URL a resolved link redirects to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectTarget(String);

impl RedirectTarget {
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl Display for RedirectTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[async_trait]
pub trait Redirector: Send + Sync + 'static {
    /// Resolves `name` and fills its URL template from `segments`.
    /// Returns `None` if no link has that name.
    async fn resolve(&self, name: &str, segments: &[String]) -> Result<Option<RedirectTarget>>;
}
