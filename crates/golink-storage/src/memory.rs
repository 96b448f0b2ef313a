use async_trait::async_trait;
use golink_core::repository::{ReadRepository, Repository, Result};
use golink_core::{Link, LinkId, LinkPatch, NewLink, StorageError};
use parking_lot::RwLock;
use std::collections::{BTreeMap, HashMap};

#[derive(Debug, Default)]
struct Tables {
    /// Links keyed by id; iteration order is insertion order.
    links: BTreeMap<LinkId, Link>,
    /// Unique name index.
    names: HashMap<String, LinkId>,
    last_id: i64,
}

impl Tables {
    fn filter(&self, predicate: impl Fn(&Link) -> bool) -> Vec<Link> {
        self.links
            .values()
            .filter(|link| predicate(link))
            .cloned()
            .collect()
    }
}

/// In-memory implementation of the Repository trait.
///
/// A single lock guards both the rows and the name index, so a
/// check-and-insert on a name is atomic and concurrent creates of the same
/// name admit exactly one winner.
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    tables: RwLock<Tables>,
}

impl InMemoryRepository {
    /// Creates a new in-memory repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored links.
    pub fn len(&self) -> usize {
        self.tables.read().links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl ReadRepository for InMemoryRepository {
    async fn find_by_id(&self, id: LinkId) -> Result<Option<Link>> {
        Ok(self.tables.read().links.get(&id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Link>> {
        let tables = self.tables.read();
        Ok(tables
            .names
            .get(name)
            .and_then(|id| tables.links.get(id))
            .cloned())
    }

    async fn list_by_hits(&self) -> Result<Vec<Link>> {
        let mut links = self.tables.read().filter(|_| true);
        // stable sort keeps id order among equal hit counts
        links.sort_by(|a, b| b.hits.cmp(&a.hits));
        Ok(links)
    }

    async fn filter_by_name_prefix(&self, prefix: &str) -> Result<Vec<Link>> {
        Ok(self
            .tables
            .read()
            .filter(|link| link.name.starts_with(prefix)))
    }

    async fn filter_by_name_prefix_or_url_substring(
        &self,
        prefix: &str,
        substring: &str,
    ) -> Result<Vec<Link>> {
        Ok(self
            .tables
            .read()
            .filter(|link| link.name.starts_with(prefix) || link.url.contains(substring)))
    }
}

#[async_trait]
impl Repository for InMemoryRepository {
    async fn insert(&self, link: NewLink) -> Result<Link> {
        let mut tables = self.tables.write();

        if tables.names.contains_key(link.name()) {
            return Err(StorageError::Conflict(link.name().to_string()));
        }

        tables.last_id += 1;
        let id = LinkId::new(tables.last_id);
        let link = link.into_link(id);

        tables.names.insert(link.name.clone(), id);
        tables.links.insert(id, link.clone());
        Ok(link)
    }

    async fn update(&self, id: LinkId, patch: &LinkPatch) -> Result<Option<Link>> {
        let mut tables = self.tables.write();

        let Some(current) = tables.links.get(&id) else {
            return Ok(None);
        };
        let old_name = current.name.clone();

        if let Some(name) = patch.name() {
            if tables.names.get(name).is_some_and(|owner| *owner != id) {
                return Err(StorageError::Conflict(name.to_string()));
            }
        }

        let mut updated = current.clone();
        patch.apply(&mut updated);

        if updated.name != old_name {
            tables.names.remove(&old_name);
            tables.names.insert(updated.name.clone(), id);
        }
        tables.links.insert(id, updated.clone());
        Ok(Some(updated))
    }

    async fn record_hit(&self, id: LinkId) -> Result<Option<Link>> {
        let mut tables = self.tables.write();

        Ok(tables.links.get_mut(&id).map(|link| {
            link.hits += 1;
            link.clone()
        }))
    }

    async fn delete(&self, id: LinkId) -> Result<bool> {
        let mut tables = self.tables.write();

        let Some(link) = tables.links.remove(&id) else {
            return Ok(false);
        };
        tables.names.remove(&link.name);
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn new_link(name: &str, url: &str) -> NewLink {
        NewLink::new(name, url).unwrap()
    }

    #[tokio::test]
    async fn insert_and_find_by_name() {
        let repo = InMemoryRepository::new();

        repo.insert(new_link("docs", "https://docs.example.com"))
            .await
            .unwrap();

        let link = repo.find_by_name("docs").await.unwrap().unwrap();
        assert_eq!(link.url, "https://docs.example.com");
        assert_eq!(link.hits, 0);
    }

    #[tokio::test]
    async fn find_by_name_is_exact() {
        let repo = InMemoryRepository::new();
        repo.insert(new_link("Docs", "https://example.com"))
            .await
            .unwrap();

        assert!(repo.find_by_name("docs").await.unwrap().is_none());
        assert!(repo.find_by_name("Docs ").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn insert_conflict() {
        let repo = InMemoryRepository::new();

        repo.insert(new_link("docs", "https://one.example"))
            .await
            .unwrap();
        let err = repo
            .insert(new_link("docs", "https://two.example"))
            .await
            .unwrap_err();

        assert!(matches!(err, StorageError::Conflict(name) if name == "docs"));
        assert_eq!(repo.len(), 1);
    }

    #[tokio::test]
    async fn ids_are_sequential() {
        let repo = InMemoryRepository::new();

        let a = repo.insert(new_link("a", "https://a")).await.unwrap();
        let b = repo.insert(new_link("b", "https://b")).await.unwrap();

        assert!(a.id < b.id);
    }

    #[tokio::test]
    async fn update_renames_and_frees_old_name() {
        let repo = InMemoryRepository::new();
        let link = repo.insert(new_link("old", "https://example.com")).await.unwrap();

        let patch = LinkPatch::new(Some("new".to_string()), None).unwrap();
        let updated = repo.update(link.id, &patch).await.unwrap().unwrap();

        assert_eq!(updated.name, "new");
        assert_eq!(updated.url, "https://example.com");
        assert!(repo.find_by_name("old").await.unwrap().is_none());
        repo.insert(new_link("old", "https://other.com")).await.unwrap();
    }

    #[tokio::test]
    async fn update_to_taken_name_conflicts() {
        let repo = InMemoryRepository::new();
        repo.insert(new_link("a", "https://a")).await.unwrap();
        let b = repo.insert(new_link("b", "https://b")).await.unwrap();

        let patch = LinkPatch::new(Some("a".to_string()), None).unwrap();
        let err = repo.update(b.id, &patch).await.unwrap_err();

        assert!(matches!(err, StorageError::Conflict(_)));
        assert_eq!(repo.find_by_id(b.id).await.unwrap().unwrap().name, "b");
    }

    #[tokio::test]
    async fn update_to_own_name_is_allowed() {
        let repo = InMemoryRepository::new();
        let link = repo.insert(new_link("a", "https://a")).await.unwrap();

        let patch = LinkPatch::new(Some("a".to_string()), Some("https://b".to_string())).unwrap();
        let updated = repo.update(link.id, &patch).await.unwrap().unwrap();

        assert_eq!(updated.url, "https://b");
    }

    #[tokio::test]
    async fn update_missing_returns_none() {
        let repo = InMemoryRepository::new();
        let patch = LinkPatch::new(None, Some("https://b".to_string())).unwrap();

        assert!(repo.update(LinkId::new(9), &patch).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn record_hit_increments() {
        let repo = InMemoryRepository::new();
        let link = repo.insert(new_link("a", "https://a")).await.unwrap();

        repo.record_hit(link.id).await.unwrap();
        let hit = repo.record_hit(link.id).await.unwrap().unwrap();

        assert_eq!(hit.hits, 2);
        assert!(repo.record_hit(LinkId::new(99)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn concurrent_hits_are_not_lost() {
        let repo = Arc::new(InMemoryRepository::new());
        let link = repo.insert(new_link("a", "https://a")).await.unwrap();

        let handles: Vec<_> = (0..50)
            .map(|_| {
                let repo = Arc::clone(&repo);
                tokio::spawn(async move { repo.record_hit(link.id).await.unwrap() })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(repo.find_by_id(link.id).await.unwrap().unwrap().hits, 50);
    }

    #[tokio::test]
    async fn concurrent_creates_of_one_name_admit_one() {
        let repo = Arc::new(InMemoryRepository::new());

        let handles: Vec<_> = (0..10)
            .map(|i| {
                let repo = Arc::clone(&repo);
                tokio::spawn(async move {
                    repo.insert(new_link("race", &format!("https://example{i}.com")))
                        .await
                })
            })
            .collect();

        let mut created = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => created += 1,
                Err(err) => assert!(matches!(err, StorageError::Conflict(_))),
            }
        }

        assert_eq!(created, 1);
        assert_eq!(repo.len(), 1);
    }

    #[tokio::test]
    async fn list_by_hits_orders_most_used_first() {
        let repo = InMemoryRepository::new();
        repo.insert(new_link("a", "https://a")).await.unwrap();
        let b = repo.insert(new_link("b", "https://b")).await.unwrap();
        repo.insert(new_link("c", "https://c")).await.unwrap();
        repo.record_hit(b.id).await.unwrap();

        let names: Vec<_> = repo
            .list_by_hits()
            .await
            .unwrap()
            .into_iter()
            .map(|link| link.name)
            .collect();

        assert_eq!(names, vec!["b", "a", "c"]);
    }

    #[tokio::test]
    async fn prefix_filter_is_case_sensitive() {
        let repo = InMemoryRepository::new();
        repo.insert(new_link("abacus", "https://x")).await.unwrap();
        repo.insert(new_link("Abalone", "https://y")).await.unwrap();

        let found = repo.filter_by_name_prefix("aba").await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "abacus");
    }

    #[tokio::test]
    async fn prefix_or_substring_filter() {
        let repo = InMemoryRepository::new();
        repo.insert(new_link("abacus", "https://one.example")).await.unwrap();
        repo.insert(new_link("cab", "https://cab.example/aba")).await.unwrap();
        repo.insert(new_link("zzz", "https://zzz.example")).await.unwrap();

        let names: Vec<_> = repo
            .filter_by_name_prefix_or_url_substring("aba", "aba")
            .await
            .unwrap()
            .into_iter()
            .map(|link| link.name)
            .collect();

        assert_eq!(names, vec!["abacus", "cab"]);
    }

    #[tokio::test]
    async fn delete_existing() {
        let repo = InMemoryRepository::new();
        let link = repo.insert(new_link("a", "https://a")).await.unwrap();

        assert!(repo.delete(link.id).await.unwrap());
        assert!(repo.find_by_id(link.id).await.unwrap().is_none());
        assert!(repo.find_by_name("a").await.unwrap().is_none());
        assert!(!repo.delete(link.id).await.unwrap());
    }
}
