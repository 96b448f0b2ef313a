//! Link management and lookup.
//!
//! This crate provides the [`Directory`] trait and its
//! [`DirectoryService`] implementation: creating, editing, deleting and
//! listing links, plus the read-only suggest and search queries behind
//! browser autocomplete.

pub mod directory;
pub mod search;
pub mod service;

pub use directory::Directory;
pub use golink_core::LinkError;
pub use search::{SearchOutcome, Suggestions};
pub use service::DirectoryService;

/// Type alias for directory results.
pub type Result<T> = std::result::Result<T, LinkError>;
