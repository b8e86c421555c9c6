use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, warn};

use super::library::Library;

const CACHE_FILENAME: &str = "books.json";

/// Flat JSON file holding every fetched book
pub struct BookCache {
    path: PathBuf,
}

/// Result of reading the cache file
#[derive(Debug)]
pub struct LoadedLibrary {
    pub library: Library,
    /// Set when the file existed but could not be parsed
    pub warning: Option<String>,
}

impl BookCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Get the default cache file path
    pub fn default_path() -> Result<PathBuf> {
        let data_dir = dirs::data_dir().context("Could not determine data directory")?;
        Ok(data_dir.join("gutenbergctl").join(CACHE_FILENAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load every cached book.
    ///
    /// A missing or blank file is an empty library. Malformed JSON is also an
    /// empty library, with a warning for the user.
    pub fn load(&self) -> Result<LoadedLibrary> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("No cache file at {}", self.path.display());
                return Ok(LoadedLibrary {
                    library: Library::new(),
                    warning: None,
                });
            }
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("Failed to read cache file: {}", self.path.display()))
            }
        };

        if content.trim().is_empty() {
            return Ok(LoadedLibrary {
                library: Library::new(),
                warning: None,
            });
        }

        match serde_json::from_str(&content) {
            Ok(library) => Ok(LoadedLibrary {
                library,
                warning: None,
            }),
            Err(e) => {
                let message = format!(
                    "Invalid JSON in {}: {}. Starting with an empty book list.",
                    self.path.display(),
                    e
                );
                warn!("{}", message);
                Ok(LoadedLibrary {
                    library: Library::new(),
                    warning: Some(message),
                })
            }
        }
    }

    /// Overwrite the cache file with `library`.
    ///
    /// Writes to a temporary file in the same directory, then renames it over
    /// the cache file so a failed write never leaves a truncated cache.
    pub fn save(&self, library: &Library) -> Result<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };

        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create cache directory: {}", dir.display()))?;

        let mut temp = NamedTempFile::new_in(&dir)
            .with_context(|| format!("Failed to create temporary file in {}", dir.display()))?;

        write_pretty(temp.as_file_mut(), library)
            .with_context(|| format!("Failed to write cache file: {}", self.path.display()))?;
        temp.as_file().sync_all()?;

        temp.persist(&self.path)
            .map_err(|e| e.error)
            .with_context(|| format!("Failed to replace cache file: {}", self.path.display()))?;

        debug!("Saved {} book(s) to {}", library.len(), self.path.display());
        Ok(())
    }

    /// Apply `mutate` to a copy of `library` and persist it.
    ///
    /// `library` is only replaced once the save succeeded; on error both the
    /// in-memory library and the file keep their previous contents.
    pub fn update<T>(
        &self,
        library: &mut Library,
        mutate: impl FnOnce(&mut Library) -> T,
    ) -> Result<T> {
        let mut staged = library.clone();
        let output = mutate(&mut staged);
        self.save(&staged)?;
        *library = staged;
        Ok(output)
    }
}

/// JSON with 4-space indentation, matching the cache files written so far
fn write_pretty(writer: impl Write, library: &Library) -> Result<()> {
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(writer, formatter);
    library.serialize(&mut serializer)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::BookRecord;
    use tempfile::TempDir;

    fn sample_library() -> Library {
        let mut library = Library::new();
        library.insert(
            "1787",
            BookRecord {
                title: "Hamlet".to_string(),
                content: "To be, or not to be.\n\"Words, words, words.\"".to_string(),
            },
        );
        library.insert(
            "84",
            BookRecord {
                title: "Frankenstein".to_string(),
                content: "You will rejoice to hear…".to_string(),
            },
        );
        library
    }

    #[test]
    fn test_round_trip() {
        let temp = TempDir::new().unwrap();
        let cache = BookCache::new(temp.path().join("books.json"));
        let library = sample_library();

        cache.save(&library).unwrap();
        let loaded = cache.load().unwrap();

        assert_eq!(loaded.library, library);
        assert!(loaded.warning.is_none());
    }

    #[test]
    fn test_load_missing_file() {
        let temp = TempDir::new().unwrap();
        let cache = BookCache::new(temp.path().join("books.json"));

        let loaded = cache.load().unwrap();
        assert!(loaded.library.is_empty());
        assert!(loaded.warning.is_none());
    }

    #[test]
    fn test_load_blank_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("books.json");
        fs::write(&path, "  \n\n").unwrap();

        let loaded = BookCache::new(&path).load().unwrap();
        assert!(loaded.library.is_empty());
        assert!(loaded.warning.is_none());
    }

    #[test]
    fn test_load_malformed_file_warns() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("books.json");
        fs::write(&path, "{\"84\": {\"title\": ").unwrap();

        let loaded = BookCache::new(&path).load().unwrap();
        assert!(loaded.library.is_empty());
        let warning = loaded.warning.unwrap();
        assert!(warning.starts_with("Invalid JSON in"));
        assert!(warning.ends_with("Starting with an empty book list."));
    }

    #[test]
    fn test_load_wrong_shape_warns() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("books.json");
        fs::write(&path, "[1, 2, 3]").unwrap();

        let loaded = BookCache::new(&path).load().unwrap();
        assert!(loaded.library.is_empty());
        assert!(loaded.warning.is_some());
    }

    #[test]
    fn test_save_uses_four_space_indent() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("books.json");
        let mut library = Library::new();
        library.insert(
            "84",
            BookRecord {
                title: "Frankenstein".to_string(),
                content: "text".to_string(),
            },
        );

        BookCache::new(&path).save(&library).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert_eq!(
            written,
            "{\n    \"84\": {\n        \"title\": \"Frankenstein\",\n        \"content\": \"text\"\n    }\n}"
        );
    }

    #[test]
    fn test_save_creates_parent_directories() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join("dir").join("books.json");

        BookCache::new(&path).save(&sample_library()).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_save_overwrites_whole_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("books.json");
        fs::write(&path, "garbage that is much longer than the new content ".repeat(50)).unwrap();

        let cache = BookCache::new(&path);
        cache.save(&Library::new()).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "{}");
        assert!(cache.load().unwrap().library.is_empty());
    }

    #[test]
    fn test_update_persists_and_replaces() {
        let temp = TempDir::new().unwrap();
        let cache = BookCache::new(temp.path().join("books.json"));
        let mut library = Library::new();

        let inserted = cache
            .update(&mut library, |lib| {
                lib.insert(
                    "84",
                    BookRecord {
                        title: "Frankenstein".to_string(),
                        content: "text".to_string(),
                    },
                )
            })
            .unwrap();

        assert!(inserted);
        assert!(library.contains("84"));
        assert_eq!(cache.load().unwrap().library, library);
    }

    #[test]
    fn test_update_failure_leaves_library_untouched() {
        let temp = TempDir::new().unwrap();
        // A regular file where the parent directory should be
        let blocker = temp.path().join("not-a-dir");
        fs::write(&blocker, "x").unwrap();
        let cache = BookCache::new(blocker.join("books.json"));

        let mut library = sample_library();
        let before = library.clone();

        let result = cache.update(&mut library, |lib| {
            lib.insert(
                "11",
                BookRecord {
                    title: "Alice".to_string(),
                    content: "text".to_string(),
                },
            )
        });

        assert!(result.is_err());
        assert_eq!(library, before);
    }
}
