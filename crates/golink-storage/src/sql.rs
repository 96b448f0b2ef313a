//! Pieces shared by the SQL backends.

use golink_core::{Link, LinkId, NewLink, StorageError};
use jiff::Timestamp;

/// Raw `links` row as stored by every SQL backend.
#[derive(Debug, sqlx::FromRow)]
pub(crate) struct LinkRow {
    id: i64,
    name: String,
    url: String,
    hits: i64,
    created_at: i64,
}

impl TryFrom<LinkRow> for Link {
    type Error = StorageError;

    fn try_from(row: LinkRow) -> Result<Self, Self::Error> {
        let hits = u64::try_from(row.hits).map_err(|_| {
            StorageError::InvalidData(format!("negative hit count {} for link {}", row.hits, row.id))
        })?;
        let created_at = Timestamp::from_second(row.created_at).map_err(|e| {
            StorageError::InvalidData(format!(
                "invalid created_at timestamp '{}': {e}",
                row.created_at
            ))
        })?;

        Ok(Link {
            id: LinkId::new(row.id),
            name: row.name,
            url: row.url,
            hits,
            created_at,
        })
    }
}

/// The link as it reads back after insertion: timestamps are stored with
/// second precision.
pub(crate) fn inserted_link(link: NewLink, id: i64) -> Result<Link, StorageError> {
    let created_at = Timestamp::from_second(link.created_at().as_second())
        .map_err(|e| StorageError::InvalidData(format!("invalid created_at timestamp: {e}")))?;
    let mut link = link.into_link(LinkId::new(id));
    link.created_at = created_at;
    Ok(link)
}

pub(crate) fn into_links(rows: Vec<LinkRow>) -> Result<Vec<Link>, StorageError> {
    rows.into_iter().map(Link::try_from).collect()
}

pub(crate) fn into_link(row: Option<LinkRow>) -> Result<Option<Link>, StorageError> {
    row.map(Link::try_from).transpose()
}

pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .is_some_and(sqlx::error::DatabaseError::is_unique_violation)
}

pub(crate) fn map_sqlx_error(err: sqlx::Error) -> StorageError {
    let message = err.to_string();

    match err {
        sqlx::Error::PoolTimedOut => StorageError::Timeout(message),
        sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed
        | sqlx::Error::Io(_)
        | sqlx::Error::Tls(_) => StorageError::Unavailable(message),
        sqlx::Error::ColumnIndexOutOfBounds { .. }
        | sqlx::Error::ColumnNotFound(_)
        | sqlx::Error::ColumnDecode { .. }
        | sqlx::Error::TypeNotFound { .. }
        | sqlx::Error::Decode(_)
        | sqlx::Error::RowNotFound => StorageError::InvalidData(message),
        _ => StorageError::Query(message),
    }
}

/// Maps a write error, turning unique violations on `name` into conflicts.
pub(crate) fn map_write_error(err: sqlx::Error, name: Option<&str>) -> StorageError {
    match name {
        Some(name) if is_unique_violation(&err) => StorageError::Conflict(name.to_string()),
        _ => map_sqlx_error(err),
    }
}

pub(crate) fn map_migrate_error(err: sqlx::migrate::MigrateError) -> StorageError {
    StorageError::Migration(err.to_string())
}
