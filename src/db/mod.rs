//! Persistence layer: the repository contract and its backends.

pub mod format;
pub mod memory;
pub mod record;
pub mod repository;
pub mod sqlite;

pub use memory::MemoryRepository;
pub use record::{FieldKind, FieldValue, Filter, Record};
pub use repository::Repository;
pub use sqlite::{SqliteRepository, StoredRecord};
