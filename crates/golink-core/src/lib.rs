//! Core types and traits for the go-link service.
//!
//! This crate provides the link model, field validation, the repository
//! contract and the URL template engine shared by the redirector and the
//! directory services.

pub mod error;
pub mod link;
pub mod repository;
pub mod template;

pub use error::{LinkError, LinkRef, StorageError};
pub use link::{Link, LinkId, LinkPatch, NewLink};
pub use repository::{ReadRepository, Repository};
pub use template::{split_segments, substitute, SubstitutionPolicy, TemplateError};
