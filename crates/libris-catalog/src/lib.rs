//! Book catalog for Libris.
//!
//! Query, create, update, and delete over the shared book collection,
//! with ownership enforced on every mutation. All operations
//! read-modify-write the entire collection through the record store;
//! there is no partial update at the storage level.

mod book;
mod catalog;
mod error;
mod pagination;

pub use book::{Book, CreateBookRequest, UpdateBookRequest};
pub use catalog::{Catalog, GenreSearch, ListQuery};
pub use error::CatalogError;
pub use pagination::{paginate, BookPage, Pagination, DEFAULT_PAGE_SIZE};

/// Result type for catalog operations.
pub type Result<T> = std::result::Result<T, CatalogError>;
