//! Catalog error types.

use thiserror::Error;

/// Errors that can occur during catalog operations.
///
/// Display strings are the client-facing messages.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// No book with the requested identifier.
    #[error("Book not found")]
    NotFound,

    /// Update attempted by a caller who is not the owner.
    #[error("You can only update books that you added")]
    NotOwnerUpdate,

    /// Delete attempted by a caller who is not the owner.
    #[error("You can only delete books that you added")]
    NotOwnerDelete,

    /// A required creation field is missing or blank.
    #[error("Title, author, genre, and publishedYear are required")]
    MissingFields,

    /// Published year outside `[0, current year]` or not a number.
    #[error("Published year must be a valid year")]
    InvalidYear,

    /// The genre search endpoint was called without its parameter.
    #[error("Genre parameter is required")]
    MissingGenre,

    /// Underlying store failure.
    #[error("store error: {0}")]
    Store(#[from] libris_store::StoreError),
}
