use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A cached book, keyed by its catalog ID in [`Library`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookRecord {
    pub title: String,
    pub content: String,
}

/// All cached books, ordered by catalog ID
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Library {
    books: BTreeMap<String, BookRecord>,
}

impl Library {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, book_id: &str) -> Option<&BookRecord> {
        self.books.get(book_id)
    }

    pub fn contains(&self, book_id: &str) -> bool {
        self.books.contains_key(book_id)
    }

    /// Add a book. Records are immutable once stored, so an existing ID is
    /// left alone and `false` is returned.
    pub fn insert(&mut self, book_id: impl Into<String>, record: BookRecord) -> bool {
        let book_id = book_id.into();
        if self.books.contains_key(&book_id) {
            return false;
        }
        self.books.insert(book_id, record);
        true
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &BookRecord)> {
        self.books.iter().map(|(id, record)| (id.as_str(), record))
    }

    /// Catalog ID of the `n`th book (1-based, listing order)
    pub fn id_at(&self, n: usize) -> Option<&str> {
        n.checked_sub(1)
            .and_then(|index| self.books.keys().nth(index))
            .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }
}
