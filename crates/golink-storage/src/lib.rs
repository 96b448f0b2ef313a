//! Link repository backends.

pub mod memory;
pub mod mysql;
mod sql;
pub mod sqlite;

pub use golink_core::repository::{ReadRepository, Repository, Result};
pub use golink_core::StorageError;
pub use memory::InMemoryRepository;
pub use mysql::MySqlRepository;
pub use sqlite::SqliteRepository;
