use anyhow::Result;
use std::io;
use std::path::Path;

use super::open_cache;
use crate::config::Config;
use crate::shell::render;

/// Run the list command - show every cached book
pub fn run(config: &Config, cache_override: Option<&Path>) -> Result<()> {
    let (_, library) = open_cache(config, cache_override)?;
    render::sidebar(&library, None, &mut io::stdout())?;
    Ok(())
}
