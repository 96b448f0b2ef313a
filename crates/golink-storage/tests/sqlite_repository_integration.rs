use std::path::PathBuf;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use golink_core::{LinkId, LinkPatch, NewLink};
use golink_storage::{ReadRepository, Repository, SqliteRepository, StorageError};

async fn repo() -> SqliteRepository {
    SqliteRepository::in_memory().await.expect("open sqlite")
}

fn new_link(name: &str, url: &str) -> NewLink {
    NewLink::new(name, url).unwrap()
}

fn names(links: Vec<golink_core::Link>) -> Vec<String> {
    links.into_iter().map(|link| link.name).collect()
}

#[tokio::test]
async fn insert_and_find_by_name() {
    let repo = repo().await;

    let created = repo
        .insert(new_link("docs", "https://docs.example.com"))
        .await
        .unwrap();

    let found = repo.find_by_name("docs").await.unwrap().unwrap();
    assert_eq!(found, created);
    assert_eq!(found.hits, 0);
    assert_eq!(found.url, "https://docs.example.com");
}

#[tokio::test]
async fn insert_conflicts_when_name_already_exists() {
    let repo = repo().await;

    repo.insert(new_link("docs", "https://one.example"))
        .await
        .unwrap();
    let err = repo
        .insert(new_link("docs", "https://two.example"))
        .await
        .unwrap_err();

    assert!(matches!(err, StorageError::Conflict(name) if name == "docs"));
    assert_eq!(repo.list_by_hits().await.unwrap().len(), 1);
}

#[tokio::test]
async fn names_are_case_sensitive() {
    let repo = repo().await;

    repo.insert(new_link("docs", "https://one.example"))
        .await
        .unwrap();
    repo.insert(new_link("Docs", "https://two.example"))
        .await
        .unwrap();

    let found = repo.find_by_name("Docs").await.unwrap().unwrap();
    assert_eq!(found.url, "https://two.example");
}

#[tokio::test]
async fn update_changes_only_supplied_fields() {
    let repo = repo().await;
    let link = repo
        .insert(new_link("docs", "https://example.com"))
        .await
        .unwrap();
    repo.record_hit(link.id).await.unwrap();

    let patch = LinkPatch::new(Some("newname".to_string()), None).unwrap();
    let updated = repo.update(link.id, &patch).await.unwrap().unwrap();

    assert_eq!(updated.name, "newname");
    assert_eq!(updated.url, link.url);
    assert_eq!(updated.hits, 1);
    assert_eq!(updated.created_at, link.created_at);
}

#[tokio::test]
async fn update_rename_collision_conflicts() {
    let repo = repo().await;
    repo.insert(new_link("a", "https://a.example")).await.unwrap();
    let b = repo.insert(new_link("b", "https://b.example")).await.unwrap();

    let patch = LinkPatch::new(Some("a".to_string()), None).unwrap();
    let err = repo.update(b.id, &patch).await.unwrap_err();

    assert!(matches!(err, StorageError::Conflict(_)));
    assert_eq!(repo.find_by_id(b.id).await.unwrap().unwrap().name, "b");
}

#[tokio::test]
async fn update_missing_id_returns_none() {
    let repo = repo().await;
    let patch = LinkPatch::new(None, Some("https://x.example".to_string())).unwrap();

    assert!(repo.update(LinkId::new(404), &patch).await.unwrap().is_none());
}

#[tokio::test]
async fn record_hit_bypasses_field_checks() {
    let repo = repo().await;
    // rows written out-of-band may violate what NewLink enforces
    sqlx::query("PRAGMA ignore_check_constraints = ON")
        .execute(repo.pool())
        .await
        .unwrap();
    sqlx::query("INSERT INTO links (name, url, hits, created_at) VALUES ('legacy', '', 3, 0)")
        .execute(repo.pool())
        .await
        .unwrap();
    let legacy = repo.find_by_name("legacy").await.unwrap().unwrap();

    let hit = repo.record_hit(legacy.id).await.unwrap().unwrap();

    assert_eq!(hit.hits, 4);
    assert_eq!(hit.url, "");
}

#[tokio::test]
async fn concurrent_hits_are_not_lost() {
    let repo = Arc::new(repo().await);
    let link = repo
        .insert(new_link("busy", "https://example.com"))
        .await
        .unwrap();

    let handles: Vec<_> = (0..25)
        .map(|_| {
            let repo = Arc::clone(&repo);
            tokio::spawn(async move { repo.record_hit(link.id).await.unwrap() })
        })
        .collect();
    for handle in handles {
        handle.await.unwrap();
    }

    assert_eq!(repo.find_by_id(link.id).await.unwrap().unwrap().hits, 25);
}

/// A file database shared by a multi-connection pool, removed on drop.
struct FileDatabase {
    path: PathBuf,
    repo: SqliteRepository,
}

impl FileDatabase {
    async fn open(label: &str) -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let path = std::env::temp_dir().join(format!(
            "golink-{label}-{}-{nanos}.db",
            std::process::id()
        ));
        let repo = SqliteRepository::connect(&format!("sqlite://{}", path.display()))
            .await
            .expect("open sqlite file");
        repo.migrate().await.expect("create schema");
        Self { path, repo }
    }
}

impl Drop for FileDatabase {
    fn drop(&mut self) {
        for suffix in ["", "-wal", "-shm"] {
            let mut file = self.path.clone().into_os_string();
            file.push(suffix);
            let _ = std::fs::remove_file(file);
        }
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_creates_of_one_name_admit_one() {
    let db = FileDatabase::open("race").await;
    let repo = Arc::new(db.repo.clone());

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
            Err(err) => assert!(matches!(err, StorageError::Conflict(name) if name == "race")),
        }
    }

    assert_eq!(created, 1);
    assert_eq!(repo.list_by_hits().await.unwrap().len(), 1);
}

#[tokio::test]
async fn list_by_hits_orders_most_used_first_then_by_insertion() {
    let repo = repo().await;
    repo.insert(new_link("a", "https://a.example")).await.unwrap();
    let b = repo.insert(new_link("b", "https://b.example")).await.unwrap();
    repo.insert(new_link("c", "https://c.example")).await.unwrap();
    repo.record_hit(b.id).await.unwrap();

    let listed = names(repo.list_by_hits().await.unwrap());
    assert_eq!(listed, vec!["b", "a", "c"]);
}

#[tokio::test]
async fn prefix_filter_ignores_pattern_metacharacters() {
    let repo = repo().await;
    repo.insert(new_link("a_b", "https://x.example")).await.unwrap();
    repo.insert(new_link("axb", "https://y.example")).await.unwrap();
    repo.insert(new_link("ABC", "https://z.example")).await.unwrap();

    assert_eq!(names(repo.filter_by_name_prefix("a_").await.unwrap()), vec!["a_b"]);
    assert!(repo.filter_by_name_prefix("%").await.unwrap().is_empty());
    assert!(repo.filter_by_name_prefix("ab").await.unwrap().is_empty());
}

#[tokio::test]
async fn prefix_or_substring_filter_matches_either_column() {
    let repo = repo().await;
    repo.insert(new_link("abacus", "https://counting.example"))
        .await
        .unwrap();
    repo.insert(new_link("abalone", "https://shells.example"))
        .await
        .unwrap();
    repo.insert(new_link("cab", "https://taxi.example"))
        .await
        .unwrap();
    repo.insert(new_link("wiki", "https://wiki.example/aba"))
        .await
        .unwrap();

    let found = repo
        .filter_by_name_prefix_or_url_substring("aba", "aba")
        .await
        .unwrap();
    assert_eq!(names(found), vec!["abacus", "abalone", "wiki"]);
}

#[tokio::test]
async fn delete_removes_record() {
    let repo = repo().await;
    let link = repo.insert(new_link("gone", "https://example.com")).await.unwrap();

    assert!(repo.delete(link.id).await.unwrap());
    assert!(repo.find_by_id(link.id).await.unwrap().is_none());
    assert!(!repo.delete(link.id).await.unwrap());

    // a hard delete frees the name
    repo.insert(new_link("gone", "https://again.example")).await.unwrap();
}
