use crate::error::StorageError;
use crate::link::{Link, LinkId, LinkPatch, NewLink};
use async_trait::async_trait;

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// A read-only view of a link repository.
///
/// Matching is exact and case-sensitive on every backend. Queries are plain
/// strings, never patterns.
#[async_trait]
pub trait ReadRepository: Send + Sync + 'static {
    /// Retrieves a link by id. Returns `None` if it does not exist.
    async fn find_by_id(&self, id: LinkId) -> Result<Option<Link>>;

    /// Retrieves a link by exact name. Returns `None` if it does not exist.
    async fn find_by_name(&self, name: &str) -> Result<Option<Link>>;

    /// All links, most-used first. Ties keep insertion order.
    async fn list_by_hits(&self) -> Result<Vec<Link>>;

    /// Links whose name starts with `prefix`, in insertion order.
    async fn filter_by_name_prefix(&self, prefix: &str) -> Result<Vec<Link>>;

    /// Links whose name starts with `prefix` or whose url contains
    /// `substring`, in insertion order.
    async fn filter_by_name_prefix_or_url_substring(
        &self,
        prefix: &str,
        substring: &str,
    ) -> Result<Vec<Link>>;
}

#[async_trait]
pub trait Repository: ReadRepository {
    /// Persists a new link with zero hits.
    /// Returns `Err(Conflict)` if the name is already taken.
    async fn insert(&self, link: NewLink) -> Result<Link>;

    /// Applies a partial update.
    /// Returns `Ok(None)` if the id does not exist and `Err(Conflict)` if a
    /// rename collides with another link.
    async fn update(&self, id: LinkId, patch: &LinkPatch) -> Result<Option<Link>>;

    /// Atomically increments the hit counter by one.
    ///
    /// Only `hits` is written, so this succeeds even for records that would
    /// fail field validation. Returns `Ok(None)` if the id does not exist.
    async fn record_hit(&self, id: LinkId) -> Result<Option<Link>>;

    /// Deletes a link permanently.
    /// Returns `true` if the record existed and was removed.
    async fn delete(&self, id: LinkId) -> Result<bool>;
}
