use anyhow::{bail, Result};
use colored::Colorize;
use std::io;
use std::path::Path;

use super::open_cache;
use crate::config::Config;
use crate::shell::render;

/// Run the show command - print a cached book's preview or full text
pub fn run(config: &Config, cache_override: Option<&Path>, id: &str, full: bool) -> Result<()> {
    let (_, library) = open_cache(config, cache_override)?;
    let id = id.trim();

    let Some(record) = library.get(id) else {
        bail!(
            "Book {} is not cached. Fetch it with: gutenbergctl fetch {}",
            id,
            id
        );
    };

    if full {
        println!("{}", record.title.bold());
        println!();
        println!("{}", record.content);
    } else {
        render::book(id, record, &mut io::stdout())?;
    }

    Ok(())
}
