use crate::link::LinkId;
use crate::template::TemplateError;
use thiserror::Error;

/// Errors raised by repository backends.
#[derive(Debug, Clone, Error)]
pub enum StorageError {
    #[error("name already exists: {0}")]
    Conflict(String),
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),
    #[error("storage operation timed out: {0}")]
    Timeout(String),
    #[error("storage query failed: {0}")]
    Query(String),
    #[error("stored data is invalid: {0}")]
    InvalidData(String),
    #[error("storage migration failed: {0}")]
    Migration(String),
}

impl StorageError {
    /// Whether the backend could not be reached at all, as opposed to
    /// rejecting a particular statement.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, StorageError::Unavailable(_) | StorageError::Timeout(_))
    }
}

/// Errors surfaced by the link services.
#[derive(Debug, Clone, Error)]
pub enum LinkError {
    #[error("{0}")]
    Validation(String),
    #[error("name already exists: {0}")]
    Conflict(String),
    #[error("link not found: {0}")]
    NotFound(LinkRef),
    #[error("cannot expand url template: {0}")]
    Template(#[from] TemplateError),
    #[error("storage error: {0}")]
    Storage(StorageError),
}

impl From<StorageError> for LinkError {
    fn from(value: StorageError) -> Self {
        match value {
            StorageError::Conflict(name) => LinkError::Conflict(name),
            other => LinkError::Storage(other),
        }
    }
}

/// The lookup key of a link that was expected but not found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkRef {
    Id(LinkId),
    Name(String),
}

impl std::fmt::Display for LinkRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LinkRef::Id(id) => write!(f, "id {id}"),
            LinkRef::Name(name) => write!(f, "name '{name}'"),
        }
    }
}
