use crate::error::LinkError;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// System-assigned identity of a stored link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LinkId(i64);

impl LinkId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn get(self) -> i64 {
        self.0
    }
}

impl Display for LinkId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for LinkId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

/// A stored link.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    pub id: LinkId,
    /// The short key typed after the service host, e.g. `docs` in `go/docs`.
    pub name: String,
    /// Destination URL, optionally a template containing `%s` placeholders.
    pub url: String,
    /// Number of successful resolutions.
    pub hits: u64,
    pub created_at: Timestamp,
}

impl Link {
    /// The path under which this link resolves, e.g. `/docs`.
    ///
    /// The name is percent-encoded as a single path segment.
    pub fn page_path(&self) -> String {
        format!("/{}", urlencoding::encode(&self.name))
    }

    /// The full address of this link on the given service base URL.
    pub fn page_url(&self, base_url: &str) -> String {
        format!("{}{}", base_url.trim_end_matches('/'), self.page_path())
    }
}

/// A validated link that has not been persisted yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewLink {
    name: String,
    url: String,
    created_at: Timestamp,
}

impl NewLink {
    /// Validates `name` and `url` and stamps the creation time.
    ///
    /// Both fields must be non-empty. No normalization is applied, so
    /// whitespace-only names are accepted verbatim.
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Result<Self, LinkError> {
        let name = name.into();
        let url = url.into();
        validate_fields(Some(&name), Some(&url))?;

        Ok(Self {
            name,
            url,
            created_at: Timestamp::now(),
        })
    }

    /// Overrides the creation time, e.g. when importing existing links.
    pub fn with_created_at(mut self, created_at: Timestamp) -> Self {
        self.created_at = created_at;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    /// Builds the stored form once the backend has assigned an id.
    pub fn into_link(self, id: LinkId) -> Link {
        Link {
            id,
            name: self.name,
            url: self.url,
            hits: 0,
            created_at: self.created_at,
        }
    }
}

/// A partial update of a link's `name` and/or `url`.
///
/// Fields left as `None` are not touched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkPatch {
    name: Option<String>,
    url: Option<String>,
}

impl LinkPatch {
    /// Validates a patch. At least one field must be supplied, and every
    /// supplied field must be non-empty.
    pub fn new(name: Option<String>, url: Option<String>) -> Result<Self, LinkError> {
        if name.is_none() && url.is_none() {
            return Err(LinkError::Validation(
                "name or url must be specified".to_string(),
            ));
        }
        validate_fields(name.as_deref(), url.as_deref())?;

        Ok(Self { name, url })
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    /// Applies the patch to a link, leaving `id`, `hits` and `created_at` alone.
    pub fn apply(&self, link: &mut Link) {
        if let Some(name) = &self.name {
            link.name.clone_from(name);
        }
        if let Some(url) = &self.url {
            link.url.clone_from(url);
        }
    }
}

/// Checks the supplied fields, reporting every failure in one message.
fn validate_fields(name: Option<&str>, url: Option<&str>) -> Result<(), LinkError> {
    let mut errors = Vec::new();

    if name.is_some_and(str::is_empty) {
        errors.push("name cannot be empty");
    }
    if url.is_some_and(str::is_empty) {
        errors.push("url cannot be empty");
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(LinkError::Validation(errors.join(", ")))
    }
}
