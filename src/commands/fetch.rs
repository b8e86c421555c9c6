use anyhow::{Context, Result};
use colored::Colorize;
use std::path::Path;

use super::open_cache;
use crate::catalog::GutenbergCatalog;
use crate::config::Config;
use crate::shell::{Opened, Session};

/// Run the fetch command - download a book into the cache
pub fn run(config: &Config, cache_override: Option<&Path>, id: &str, quiet: bool) -> Result<()> {
    let (store, library) = open_cache(config, cache_override)?;
    let source = GutenbergCatalog::new(config.catalog.base_url.as_str());
    let mut session = Session::new(library);

    if !quiet && !session.library.contains(id.trim()) {
        println!("Fetching book {}...", id.trim());
    }

    let rt = tokio::runtime::Runtime::new().context("Failed to create tokio runtime")?;
    let opened = rt.block_on(session.open_book(id, &source, &store))?;

    let (book_id, record) = session
        .current_book()
        .context("Book missing from cache after fetch")?;

    match opened {
        Opened::Cached => println!(
            "{} (ID: {}) is already cached",
            record.title.bold(),
            book_id
        ),
        Opened::Fetched => {
            println!(
                "{} Cached {} (ID: {})",
                "✓".green(),
                record.title.bold(),
                book_id
            );
            if !quiet {
                println!(
                    "  {} characters saved to {}",
                    record.content.chars().count(),
                    store.path().display()
                );
            }
        }
    }

    Ok(())
}
