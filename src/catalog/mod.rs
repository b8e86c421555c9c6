//! Retrieval of e-books from an external catalog

mod gutenberg;
mod page;

pub use gutenberg::{GutenbergCatalog, DEFAULT_BASE_URL};

use crate::error::FetchError;

/// Title and full text of a freshly fetched book
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedBook {
    pub title: String,
    pub content: String,
}

/// Anything that can produce a book's title and text from its catalog ID
pub trait BookSource {
    async fn fetch(&self, book_id: &str) -> Result<FetchedBook, FetchError>;
}
