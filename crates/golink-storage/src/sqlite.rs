use crate::sql::{inserted_link, into_link, into_links, map_migrate_error, map_sqlx_error, map_write_error, LinkRow};
use async_trait::async_trait;
use golink_core::repository::{ReadRepository, Repository, Result};
use golink_core::{Link, LinkId, LinkPatch, NewLink};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use tracing::debug;

/// SQLite implementation of the repository contract.
///
/// Name matching uses `substr`/`instr` rather than `LIKE`, which keeps it
/// case-sensitive and free of pattern metacharacters.
#[derive(Debug, Clone)]
pub struct SqliteRepository {
    pool: SqlitePool,
}

impl SqliteRepository {
    /// Creates a repository from an existing SQLite connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Opens a pool for `database_url`, creating the database file if needed.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(database_url)
            .map_err(map_sqlx_error)?
            .create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .connect_with(options)
            .await
            .map_err(map_sqlx_error)?;
        Ok(Self::new(pool))
    }

    /// Opens a private in-memory database with the schema applied.
    ///
    /// The pool holds a single connection that is never recycled, since each
    /// SQLite memory connection is its own database.
    pub async fn in_memory() -> Result<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:").map_err(map_sqlx_error)?;
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .map_err(map_sqlx_error)?;
        let repository = Self::new(pool);
        repository.migrate().await?;
        Ok(repository)
    }

    /// Applies the embedded schema migrations.
    pub async fn migrate(&self) -> Result<()> {
        debug!("running sqlite migrations");
        sqlx::migrate!("./migrations/sqlite")
            .run(&self.pool)
            .await
            .map_err(map_migrate_error)
    }

    /// Returns a reference to the underlying pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl ReadRepository for SqliteRepository {
    async fn find_by_id(&self, id: LinkId) -> Result<Option<Link>> {
        let row = sqlx::query_as::<_, LinkRow>(
            r#"
            SELECT id, name, url, hits, created_at
            FROM links
            WHERE id = ?
            "#,
        )
        .bind(id.get())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        into_link(row)
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Link>> {
        let row = sqlx::query_as::<_, LinkRow>(
            r#"
            SELECT id, name, url, hits, created_at
            FROM links
            WHERE name = ?
            "#,
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        into_link(row)
    }

    async fn list_by_hits(&self) -> Result<Vec<Link>> {
        let rows = sqlx::query_as::<_, LinkRow>(
            r#"
            SELECT id, name, url, hits, created_at
            FROM links
            ORDER BY hits DESC, id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        into_links(rows)
    }

    async fn filter_by_name_prefix(&self, prefix: &str) -> Result<Vec<Link>> {
        let rows = sqlx::query_as::<_, LinkRow>(
            r#"
            SELECT id, name, url, hits, created_at
            FROM links
            WHERE substr(name, 1, length(?)) = ?
            ORDER BY id ASC
            "#,
        )
        .bind(prefix)
        .bind(prefix)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        into_links(rows)
    }

    async fn filter_by_name_prefix_or_url_substring(
        &self,
        prefix: &str,
        substring: &str,
    ) -> Result<Vec<Link>> {
        let rows = sqlx::query_as::<_, LinkRow>(
            r#"
            SELECT id, name, url, hits, created_at
            FROM links
            WHERE substr(name, 1, length(?)) = ?
               OR instr(url, ?) > 0
            ORDER BY id ASC
            "#,
        )
        .bind(prefix)
        .bind(prefix)
        .bind(substring)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        into_links(rows)
    }
}

#[async_trait]
impl Repository for SqliteRepository {
    async fn insert(&self, link: NewLink) -> Result<Link> {
        let result = sqlx::query(
            r#"
            INSERT INTO links (name, url, hits, created_at)
            VALUES (?, ?, 0, ?)
            "#,
        )
        .bind(link.name())
        .bind(link.url())
        .bind(link.created_at().as_second())
        .execute(&self.pool)
        .await
        .map_err(|err| map_write_error(err, Some(link.name())))?;

        inserted_link(link, result.last_insert_rowid())
    }

    async fn update(&self, id: LinkId, patch: &LinkPatch) -> Result<Option<Link>> {
        let mut tx = self.pool.begin().await.map_err(map_sqlx_error)?;

        sqlx::query(
            r#"
            UPDATE links
            SET name = COALESCE(?, name),
                url = COALESCE(?, url)
            WHERE id = ?
            "#,
        )
        .bind(patch.name())
        .bind(patch.url())
        .bind(id.get())
        .execute(&mut *tx)
        .await
        .map_err(|err| map_write_error(err, patch.name()))?;

        let row = sqlx::query_as::<_, LinkRow>(
            r#"
            SELECT id, name, url, hits, created_at
            FROM links
            WHERE id = ?
            "#,
        )
        .bind(id.get())
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_sqlx_error)?;

        tx.commit().await.map_err(map_sqlx_error)?;
        into_link(row)
    }

    async fn record_hit(&self, id: LinkId) -> Result<Option<Link>> {
        let mut tx = self.pool.begin().await.map_err(map_sqlx_error)?;

        let updated = sqlx::query("UPDATE links SET hits = hits + 1 WHERE id = ?")
            .bind(id.get())
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx_error)?
            .rows_affected();

        if updated == 0 {
            tx.rollback().await.map_err(map_sqlx_error)?;
            return Ok(None);
        }

        let row = sqlx::query_as::<_, LinkRow>(
            r#"
            SELECT id, name, url, hits, created_at
            FROM links
            WHERE id = ?
            "#,
        )
        .bind(id.get())
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_sqlx_error)?;

        tx.commit().await.map_err(map_sqlx_error)?;
        into_link(row)
    }

    async fn delete(&self, id: LinkId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM links WHERE id = ?")
            .bind(id.get())
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(result.rows_affected() > 0)
    }
}
