//! Flat-file JSON persistence for Libris.
//!
//! Each entity kind (users, books) is stored as a single JSON array in
//! one file under a data directory. Every mutation rewrites the whole
//! collection; there is no per-record storage, no locking, and no
//! atomic rename. Concurrent read-modify-write cycles from different
//! requests can overwrite each other (last writer wins); that is the
//! documented contract, not a bug.

mod error;
mod file;
mod memory;
mod store;

pub use error::StoreError;
pub use file::FileStore;
pub use memory::MemoryStore;
pub use store::{load, save, EntityKind, RecordStore};

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
