//! Local cache of fetched books

mod library;
mod store;

pub use library::{BookRecord, Library};
pub use store::BookCache;
