//! Go-link resolution.
//!
//! [`RedirectorService`] turns a requested name plus trailing path segments
//! into a redirect target, recording a hit for every name that exists.
//!
//! ```rust
//! use golink_core::{NewLink, Repository, SubstitutionPolicy};
//! use golink_redirector::RedirectorService;
//! use golink_storage::InMemoryRepository;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let repo = InMemoryRepository::new();
//! repo.insert(NewLink::new("gh", "https://github.com/%s/%s")?).await?;
//!
//! let service = RedirectorService::new(repo, SubstitutionPolicy::default());
//! if let Some(target) = service.resolve("gh", &["rust-lang", "rust"]).await? {
//!     assert_eq!(target.as_str(), "https://github.com/rust-lang/rust");
//! }
//! # Ok(())
//! # }
//! ```

pub mod redirector;
pub mod service;

pub use golink_core::LinkError;
pub use redirector::{RedirectTarget, Redirector};
pub use service::RedirectorService;

/// Type alias for redirector results.
pub type Result<T> = std::result::Result<T, LinkError>;
