pub mod analyze;
pub mod condense;
pub mod explore;
pub mod fetch;
pub mod init;
pub mod list;
pub mod show;

use anyhow::Result;
use std::io;
use std::path::Path;

use crate::cache::{BookCache, Library};
use crate::config::Config;
use crate::shell::render;

/// Open the cache named on the command line or in the config and load it.
///
/// A malformed cache file is reported as a warning and treated as empty.
fn open_cache(config: &Config, cli_override: Option<&Path>) -> Result<(BookCache, Library)> {
    let store = BookCache::new(config.cache_path(cli_override)?);
    let loaded = store.load()?;

    if let Some(warning) = loaded.warning {
        render::warning(warning, &mut io::stderr())?;
    }

    Ok((store, loaded.library))
}
