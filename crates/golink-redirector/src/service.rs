use std::sync::Arc;

use crate::redirector::{RedirectTarget, Redirector};
use async_trait::async_trait;
use golink_core::{substitute, Repository, SubstitutionPolicy};
use tracing::{debug, trace, warn};

/// Service for handling go-link redirects.
///
/// Every resolution re-reads the repository; nothing is cached.
#[derive(Debug)]
pub struct RedirectorService<R> {
    repository: Arc<R>,
    policy: SubstitutionPolicy,
}

impl<R> Clone for RedirectorService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            policy: self.policy,
        }
    }
}

impl<R: Repository> RedirectorService<R> {
    /// Creates a new RedirectorService with the given repository.
    pub fn new(repository: R, policy: SubstitutionPolicy) -> Self {
        Self::from_shared(Arc::new(repository), policy)
    }

    /// Creates a RedirectorService over a repository shared with other services.
    pub fn from_shared(repository: Arc<R>, policy: SubstitutionPolicy) -> Self {
        Self { repository, policy }
    }

    /// Resolves a link name to its redirect target.
    ///
    /// The hit is recorded as soon as the name matches, before the URL
    /// template is expanded, so a template error still counts as a visit.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(target))` - The expanded URL
    /// * `Ok(None)` - If no link has that name; nothing is written
    /// * `Err(e)` - If the template could not be filled or the repository failed
    pub async fn resolve<S>(&self, name: &str, segments: &[S]) -> crate::Result<Option<RedirectTarget>>
    where
        S: AsRef<str> + Sync,
    {
        trace!(name, "resolving link");

        let Some(link) = self.repository.find_by_name(name).await? else {
            trace!(name, "link not found");
            return Ok(None);
        };

        // The row may have been deleted between the two statements; the
        // lookup above already matched, so the redirect still goes out.
        match self.repository.record_hit(link.id).await? {
            Some(hit) => debug!(name, hits = hit.hits, "recorded hit"),
            None => warn!(name, id = %link.id, "link vanished before its hit was recorded"),
        }

        let url = substitute(&link.url, segments, self.policy)?;

        debug!(name, url = %url, "resolved link");
        Ok(Some(RedirectTarget::new(url)))
    }
}

#[async_trait]
impl<R: Repository> Redirector for RedirectorService<R> {
    async fn resolve(&self, name: &str, segments: &[String]) -> crate::Result<Option<RedirectTarget>> {
        RedirectorService::resolve(self, name, segments).await
    }
}
