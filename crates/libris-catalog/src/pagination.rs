//! 1-based pagination over a filtered book set.

use serde::{Deserialize, Serialize};

use crate::book::Book;

/// Default number of books per page.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Pagination metadata, computed from the filtered set (not the raw
/// collection).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    /// Requested page, 1-based.
    pub current_page: u32,
    /// `ceil(total_books / page_size)`.
    pub total_pages: u32,
    /// Size of the filtered set.
    pub total_books: u32,
    pub has_next_page: bool,
    pub has_prev_page: bool,
}

/// One page of books plus its metadata.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookPage {
    pub books: Vec<Book>,
    pub pagination: Pagination,
}

/// Slices page `page` (1-based) of size `limit` out of `books`.
pub fn paginate(books: Vec<Book>, page: u32, limit: u32) -> BookPage {
    let page = page.max(1);
    let limit = limit.max(1);

    let total_books = books.len() as u32;
    let total_pages = total_books.div_ceil(limit);

    // Widen before multiplying; page and limit come straight from the
    // query string and can each be u32::MAX.
    let start = (page as usize - 1).saturating_mul(limit as usize);
    let end = start.saturating_add(limit as usize).min(books.len());
    let items = if start < books.len() {
        books[start..end].to_vec()
    } else {
        Vec::new()
    };

    BookPage {
        books: items,
        pagination: Pagination {
            current_page: page,
            total_pages,
            total_books,
            has_next_page: page < total_pages,
            has_prev_page: page > 1,
        },
    }
}
