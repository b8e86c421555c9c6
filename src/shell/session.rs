use tracing::info;

use crate::analysis::{AnalysisKind, Model};
use crate::cache::{BookCache, BookRecord, Library};
use crate::catalog::BookSource;
use crate::error::OpenError;

/// How a book became current
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Opened {
    Cached,
    Fetched,
}

/// State carried between interactions: the cached books, which one is
/// current, and the analysis selectors
#[derive(Debug, Default)]
pub struct Session {
    pub current_book_id: Option<String>,
    pub library: Library,
    pub analysis_kind: AnalysisKind,
    pub model: Model,
}

impl Session {
    pub fn new(library: Library) -> Self {
        Self {
            library,
            ..Self::default()
        }
    }

    /// Make `book_id` current, fetching and caching it on a miss.
    ///
    /// On failure the session and the cache file are left as they were.
    pub async fn open_book<S: BookSource>(
        &mut self,
        book_id: &str,
        source: &S,
        store: &BookCache,
    ) -> Result<Opened, OpenError> {
        let book_id = book_id.trim();

        if self.library.contains(book_id) {
            self.current_book_id = Some(book_id.to_string());
            return Ok(Opened::Cached);
        }

        let fetched = source.fetch(book_id).await?;
        let record = BookRecord {
            title: fetched.title,
            content: fetched.content,
        };

        store
            .update(&mut self.library, |library| library.insert(book_id, record))
            .map_err(OpenError::Persist)?;

        info!("Cached book {} in {}", book_id, store.path().display());
        self.current_book_id = Some(book_id.to_string());
        Ok(Opened::Fetched)
    }

    /// Select a cached book by catalog ID, or else by list position (1-based)
    pub fn select(&mut self, selector: &str) -> Option<&str> {
        let selector = selector.trim();

        let book_id = if self.library.contains(selector) {
            selector.to_string()
        } else {
            let position: usize = selector.parse().ok()?;
            self.library.id_at(position)?.to_string()
        };

        self.current_book_id = Some(book_id);
        self.current_book_id.as_deref()
    }

    /// The current book, if one is selected and cached
    pub fn current_book(&self) -> Option<(&str, &BookRecord)> {
        let book_id = self.current_book_id.as_deref()?;
        self.library.get(book_id).map(|record| (book_id, record))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::FetchedBook;
    use crate::error::FetchError;
    use std::cell::Cell;
    use tempfile::TempDir;

    /// Serves a single known book and counts fetches
    struct OneBook {
        fetches: Cell<usize>,
    }

    impl OneBook {
        fn new() -> Self {
            Self {
                fetches: Cell::new(0),
            }
        }
    }

    impl BookSource for OneBook {
        async fn fetch(&self, book_id: &str) -> Result<FetchedBook, FetchError> {
            self.fetches.set(self.fetches.get() + 1);
            if book_id == "84" {
                Ok(FetchedBook {
                    title: "Frankenstein".to_string(),
                    content: "You will rejoice to hear.".to_string(),
                })
            } else {
                Err(FetchError::MissingPlainText(book_id.to_string()))
            }
        }
    }

    fn record(title: &str) -> BookRecord {
        BookRecord {
            title: title.to_string(),
            content: String::new(),
        }
    }

    #[tokio::test]
    async fn test_open_fetches_and_persists() {
        let temp = TempDir::new().unwrap();
        let store = BookCache::new(temp.path().join("books.json"));
        let source = OneBook::new();
        let mut session = Session::default();

        let opened = session.open_book(" 84 ", &source, &store).await.unwrap();

        assert_eq!(opened, Opened::Fetched);
        assert_eq!(session.current_book_id.as_deref(), Some("84"));
        assert_eq!(session.current_book().unwrap().1.title, "Frankenstein");
        assert!(store.load().unwrap().library.contains("84"));
    }

    #[tokio::test]
    async fn test_open_cached_does_not_fetch() {
        let temp = TempDir::new().unwrap();
        let store = BookCache::new(temp.path().join("books.json"));
        let source = OneBook::new();
        let mut session = Session::default();

        session.open_book("84", &source, &store).await.unwrap();
        let opened = session.open_book("84", &source, &store).await.unwrap();

        assert_eq!(opened, Opened::Cached);
        assert_eq!(source.fetches.get(), 1);
    }

    #[tokio::test]
    async fn test_failed_open_leaves_state() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("books.json");
        let store = BookCache::new(&path);
        let source = OneBook::new();
        let mut session = Session::default();
        session.current_book_id = Some("1342".to_string());

        let err = session.open_book("999", &source, &store).await.unwrap_err();

        assert!(matches!(err, OpenError::Fetch(FetchError::MissingPlainText(_))));
        assert_eq!(session.current_book_id.as_deref(), Some("1342"));
        assert!(session.library.is_empty());
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_content_failure_leaves_cache_file() {
        use crate::catalog::GutenbergCatalog;
        use wiremock::matchers::{method, path};
        use wiremock::{Mock, MockServer, ResponseTemplate};

        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/ebooks/1787"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"<html><title>Hamlet</title><a href="/ebooks/1787.txt.utf-8">Plain Text UTF-8</a></html>"#,
            ))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/ebooks/1787.txt.utf-8"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let temp = TempDir::new().unwrap();
        let path = temp.path().join("books.json");
        let store = BookCache::new(&path);
        let mut library = Library::new();
        library.insert("84", record("Frankenstein"));
        store.save(&library).unwrap();
        let before = std::fs::read_to_string(&path).unwrap();

        let mut session = Session::new(library);
        let catalog = GutenbergCatalog::new(server.uri());
        let err = session.open_book("1787", &catalog, &store).await.unwrap_err();

        assert!(matches!(err, OpenError::Fetch(FetchError::Content(_))));
        assert!(session.current_book_id.is_none());
        assert!(!session.library.contains("1787"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), before);
    }

    #[test]
    fn test_select_by_position_and_id() {
        let mut library = Library::new();
        library.insert("84", record("Frankenstein"));
        library.insert("1342", record("Pride and Prejudice"));
        let mut session = Session::new(library);

        assert_eq!(session.select("2"), Some("84"));
        assert_eq!(session.select("1342"), Some("1342"));
        assert_eq!(session.current_book().unwrap().1.title, "Pride and Prejudice");
        assert_eq!(session.select("7"), None);
        assert_eq!(session.select("abc"), None);
        // A failed selection keeps the previous book
        assert_eq!(session.current_book_id.as_deref(), Some("1342"));
    }

    #[test]
    fn test_select_prefers_id_over_position() {
        let mut library = Library::new();
        library.insert("2", record("The Declaration of Independence"));
        library.insert("84", record("Frankenstein"));
        let mut session = Session::new(library);

        assert_eq!(session.select("2"), Some("2"));
        assert_eq!(session.select("1"), Some("2"));
        assert_eq!(session.select("84"), Some("84"));
    }

    #[test]
    fn test_defaults() {
        let session = Session::default();
        assert!(session.current_book().is_none());
        assert_eq!(session.analysis_kind, AnalysisKind::Summary);
        assert_eq!(session.model, Model::Llama3_70b);
    }
}
