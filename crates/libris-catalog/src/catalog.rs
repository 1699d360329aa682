//! Catalog operations over the shared book collection.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use libris_store::{load, save, EntityKind, RecordStore};

use crate::book::{is_falsy, parse_year, Book, CreateBookRequest, UpdateBookRequest};
use crate::error::CatalogError;
use crate::pagination::{paginate, BookPage, DEFAULT_PAGE_SIZE};
use crate::Result;

/// Query parameters for the list operation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub genre: Option<String>,
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub limit: Option<u32>,
}

/// Result of the genre search endpoint.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenreSearch {
    pub books: Vec<Book>,
    pub count: usize,
    pub search_term: String,
}

/// Book collection manager.
///
/// Every operation loads the full collection, works on it in memory,
/// and (for mutations) persists the full collection back. Two
/// concurrent mutations can interleave between load and save; the last
/// writer wins. That race is part of the documented contract and must
/// not be papered over with locking.
#[derive(Clone)]
pub struct Catalog {
    store: Arc<dyn RecordStore>,
}

/// Case-insensitive substring match.
fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

impl Catalog {
    /// Creates the catalog over the given record store.
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    async fn load_books(&self) -> Result<Vec<Book>> {
        Ok(load(self.store.as_ref(), EntityKind::Books).await?)
    }

    async fn save_books(&self, books: &[Book]) -> Result<()> {
        Ok(save(self.store.as_ref(), EntityKind::Books, books).await?)
    }

    /// Lists books with optional genre filter and free-text search,
    /// paginated. Both filters are case-insensitive substring matches
    /// and compose with AND; pagination metadata is computed from the
    /// filtered set.
    pub async fn list(&self, query: ListQuery) -> Result<BookPage> {
        let mut books = self.load_books().await?;

        if let Some(genre) = query.genre.as_deref().filter(|g| !g.is_empty()) {
            books.retain(|b| contains_ci(&b.genre, genre));
        }

        if let Some(term) = query.search.as_deref().filter(|s| !s.is_empty()) {
            books.retain(|b| {
                contains_ci(&b.title, term)
                    || contains_ci(&b.author, term)
                    || contains_ci(&b.genre, term)
            });
        }

        let page = query.page.unwrap_or(1);
        let limit = query.limit.unwrap_or(DEFAULT_PAGE_SIZE);
        Ok(paginate(books, page, limit))
    }

    /// Filters the collection by a mandatory genre term.
    pub async fn search_by_genre(&self, genre: Option<String>) -> Result<GenreSearch> {
        let genre = genre
            .filter(|g| !g.is_empty())
            .ok_or(CatalogError::MissingGenre)?;

        let mut books = self.load_books().await?;
        books.retain(|b| contains_ci(&b.genre, &genre));

        Ok(GenreSearch {
            count: books.len(),
            books,
            search_term: genre,
        })
    }

    /// Fetches a single book by identifier.
    pub async fn get(&self, id: &str) -> Result<Book> {
        self.load_books()
            .await?
            .into_iter()
            .find(|b| b.id == id)
            .ok_or(CatalogError::NotFound)
    }

    /// Creates a book owned by `user_id` and persists the collection.
    pub async fn create(&self, user_id: &str, req: CreateBookRequest) -> Result<Book> {
        let title = req.title.as_deref().filter(|s| !s.is_empty());
        let author = req.author.as_deref().filter(|s| !s.is_empty());
        let genre = req.genre.as_deref().filter(|s| !s.is_empty());

        let (Some(title), Some(author), Some(genre), Some(year)) =
            (title, author, genre, req.published_year.as_ref())
        else {
            return Err(CatalogError::MissingFields);
        };
        let year = parse_year(year)?;

        let mut books = self.load_books().await?;
        let book = Book::new(title, author, genre, year, user_id.to_string());
        books.push(book.clone());
        self.save_books(&books).await?;

        tracing::info!(book_id = %book.id, user_id, "Book added");
        Ok(book)
    }

    /// Updates a book in place. Requires the record to exist and the
    /// caller to be its owner.
    ///
    /// Absent or falsy fields (empty strings, year 0) keep the prior
    /// value, so a caller cannot explicitly clear a field. That quirk
    /// is load-bearing for existing clients; do not "fix" it.
    pub async fn update(&self, user_id: &str, id: &str, req: UpdateBookRequest) -> Result<Book> {
        let mut books = self.load_books().await?;
        let index = books
            .iter()
            .position(|b| b.id == id)
            .ok_or(CatalogError::NotFound)?;

        if books[index].user_id != user_id {
            return Err(CatalogError::NotOwnerUpdate);
        }

        // Revalidate the year only when a non-falsy one is supplied;
        // falsy values (0, "", false, null) keep the prior value and
        // skip validation entirely.
        let year = match req.published_year.as_ref() {
            Some(v) if !is_falsy(v) => Some(parse_year(v)?),
            _ => None,
        };

        let book = &mut books[index];
        if let Some(title) = req.title.as_deref().filter(|s| !s.is_empty()) {
            book.title = title.trim().to_string();
        }
        if let Some(author) = req.author.as_deref().filter(|s| !s.is_empty()) {
            book.author = author.trim().to_string();
        }
        if let Some(genre) = req.genre.as_deref().filter(|s| !s.is_empty()) {
            book.genre = genre.trim().to_string();
        }
        if let Some(year) = year {
            book.published_year = year;
        }

        let updated = book.clone();
        self.save_books(&books).await?;

        tracing::info!(book_id = %updated.id, user_id, "Book updated");
        Ok(updated)
    }

    /// Removes a book. Requires the record to exist and the caller to
    /// be its owner; returns the deleted record's prior state.
    pub async fn delete(&self, user_id: &str, id: &str) -> Result<Book> {
        let mut books = self.load_books().await?;
        let index = books
            .iter()
            .position(|b| b.id == id)
            .ok_or(CatalogError::NotFound)?;

        if books[index].user_id != user_id {
            return Err(CatalogError::NotOwnerDelete);
        }

        let deleted = books.remove(index);
        self.save_books(&books).await?;

        tracing::info!(book_id = %deleted.id, user_id, "Book deleted");
        Ok(deleted)
    }
}
