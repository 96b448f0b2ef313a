use std::sync::Arc;

use crate::directory::Directory;
use crate::search::{SearchOutcome, Suggestions};
use crate::Result;
use async_trait::async_trait;
use golink_core::{Link, LinkError, LinkId, LinkPatch, LinkRef, NewLink, Repository};
use tracing::{debug, info, trace};

/// A concrete implementation of the [`Directory`] trait.
///
/// Field validation happens when [`NewLink`] and [`LinkPatch`] are built;
/// name uniqueness is left to the repository, so two racing creates of the
/// same name are settled by the store and the loser gets `Conflict`.
#[derive(Debug)]
pub struct DirectoryService<R> {
    repository: Arc<R>,
}

impl<R> Clone for DirectoryService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<R: Repository> DirectoryService<R> {
    /// Creates a new DirectoryService with the given repository.
    pub fn new(repository: R) -> Self {
        Self::from_shared(Arc::new(repository))
    }

    /// Creates a DirectoryService over a repository shared with other services.
    pub fn from_shared(repository: Arc<R>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<R: Repository> Directory for DirectoryService<R> {
    async fn create(&self, link: NewLink) -> Result<Link> {
        let link = self.repository.insert(link).await?;
        info!(id = %link.id, name = %link.name, url = %link.url, "created link");
        Ok(link)
    }

    async fn get(&self, id: LinkId) -> Result<Link> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(LinkError::NotFound(LinkRef::Id(id)))
    }

    async fn find_by_name(&self, name: &str) -> Result<Link> {
        self.repository
            .find_by_name(name)
            .await?
            .ok_or_else(|| LinkError::NotFound(LinkRef::Name(name.to_string())))
    }

    async fn edit(&self, id: LinkId, patch: LinkPatch) -> Result<Link> {
        let link = self
            .repository
            .update(id, &patch)
            .await?
            .ok_or(LinkError::NotFound(LinkRef::Id(id)))?;
        info!(id = %id, name = %link.name, url = %link.url, "edited link");
        Ok(link)
    }

    async fn delete(&self, id: LinkId) -> Result<()> {
        if !self.repository.delete(id).await? {
            return Err(LinkError::NotFound(LinkRef::Id(id)));
        }
        info!(id = %id, "deleted link");
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Link>> {
        Ok(self.repository.list_by_hits().await?)
    }

    async fn suggest(&self, query: &str) -> Result<Suggestions> {
        trace!(query, "suggesting links");

        let names = self
            .repository
            .filter_by_name_prefix_or_url_substring(query, query)
            .await?
            .into_iter()
            .map(|link| link.name)
            .collect();

        Ok(Suggestions::new(query, names))
    }

    async fn search_or_list(&self, query: &str) -> Result<SearchOutcome> {
        trace!(query, "searching links");

        if let Some(link) = self.repository.find_by_name(query).await? {
            debug!(query, id = %link.id, "exact match");
            return Ok(SearchOutcome::Redirect {
                path: link.page_path(),
            });
        }

        let links = self.repository.filter_by_name_prefix(query).await?;
        Ok(SearchOutcome::Listing(links))
    }
}
