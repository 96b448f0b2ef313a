use crate::sql::{inserted_link, into_link, into_links, map_migrate_error, map_sqlx_error, map_write_error, LinkRow};
use async_trait::async_trait;
use golink_core::repository::{ReadRepository, Repository, Result};
use golink_core::{Link, LinkId, LinkPatch, NewLink, StorageError};
use sqlx::MySqlPool;
use tracing::debug;

/// MySQL implementation of the repository contract.
///
/// `name` and `url` use a binary collation, so uniqueness and the prefix and
/// substring filters are byte exact. Deletes are hard deletes; a freed name
/// can be taken again immediately.
#[derive(Debug, Clone)]
pub struct MySqlRepository {
    pool: MySqlPool,
}

impl MySqlRepository {
    /// Creates a repository from an existing MySQL connection pool.
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Creates a repository by opening a new MySQL connection pool.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = MySqlPool::connect(database_url)
            .await
            .map_err(map_sqlx_error)?;
        Ok(Self::new(pool))
    }

    /// Applies the embedded schema migrations.
    pub async fn migrate(&self) -> Result<()> {
        debug!("running mysql migrations");
        sqlx::migrate!("./migrations/mysql")
            .run(&self.pool)
            .await
            .map_err(map_migrate_error)
    }

    /// Returns a reference to the underlying pool.
    pub fn pool(&self) -> &MySqlPool {
        &self.pool
    }
}

#[async_trait]
impl ReadRepository for MySqlRepository {
    async fn find_by_id(&self, id: LinkId) -> Result<Option<Link>> {
        let row = sqlx::query_as::<_, LinkRow>(
            r#"
            SELECT id, name, url, hits, created_at
            FROM links
            WHERE id = ?
            LIMIT 1
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
            LIMIT 1
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
            WHERE LEFT(name, CHAR_LENGTH(?)) = ?
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
            WHERE LEFT(name, CHAR_LENGTH(?)) = ?
               OR LOCATE(?, url) > 0
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
impl Repository for MySqlRepository {
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

        let id = i64::try_from(result.last_insert_id()).map_err(|_| {
            StorageError::InvalidData(format!("insert id out of range: {}", result.last_insert_id()))
        })?;
        inserted_link(link, id)
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

        // rows_affected is 0 for no-op updates on MySQL, so existence is
        // decided by reading the row back.
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
