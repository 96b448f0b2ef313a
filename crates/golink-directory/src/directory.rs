use crate::search::{SearchOutcome, Suggestions};
use crate::Result;
use async_trait::async_trait;
use golink_core::{Link, LinkId, LinkPatch, NewLink};

#[async_trait]
pub trait Directory: Send + Sync + 'static {
    /// Persists a new link. Fails with `Conflict` if the name is taken.
    async fn create(&self, link: NewLink) -> Result<Link>;

    /// Fetches a link by id, failing with `NotFound` if it does not exist.
    async fn get(&self, id: LinkId) -> Result<Link>;

    /// Fetches a link by exact name, failing with `NotFound` if it does not exist.
    async fn find_by_name(&self, name: &str) -> Result<Link>;

    /// Applies a partial update and returns the updated link.
    async fn edit(&self, id: LinkId, patch: LinkPatch) -> Result<Link>;

    /// Deletes a link permanently.
    async fn delete(&self, id: LinkId) -> Result<()>;

    /// All links, most-used first.
    async fn list(&self) -> Result<Vec<Link>>;

    /// Names of links whose name starts with, or whose url contains, `query`.
    async fn suggest(&self, query: &str) -> Result<Suggestions>;

    /// Jumps straight to a link named exactly `query`, or lists the links
    /// whose name starts with it.
    async fn search_or_list(&self, query: &str) -> Result<SearchOutcome>;
}
