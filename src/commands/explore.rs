use anyhow::Result;
use std::io;
use std::path::Path;

use super::open_cache;
use crate::analysis::{Analyzer, GroqClient};
use crate::catalog::GutenbergCatalog;
use crate::config::Config;
use crate::shell::{Session, Shell};

/// Run the explore command - the interactive shell on stdin/stdout
pub fn run(config: &Config, cache_override: Option<&Path>) -> Result<()> {
    // Without a key nothing can be analyzed, so refuse to start
    let api_key = config.api_key()?;

    let (store, library) = open_cache(config, cache_override)?;
    let source = GutenbergCatalog::new(config.catalog.base_url.as_str());
    let analyzer = Analyzer::new(GroqClient::new(api_key, config.groq.base_url.as_str()));

    let mut shell = Shell::new(Session::new(library), source, analyzer, store)?;

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    shell.run(stdin.lock(), &mut stdout)
}
