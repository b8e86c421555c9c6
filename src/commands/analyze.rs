use anyhow::{bail, Context, Result};
use colored::Colorize;
use std::io;
use std::path::Path;

use super::open_cache;
use crate::analysis::{AnalysisKind, Analyzer, GroqClient, Model};
use crate::catalog::GutenbergCatalog;
use crate::config::Config;
use crate::shell::{report_outcome, Session};

/// Run the analyze command - fetch if needed, then analyze one book
pub fn run(
    config: &Config,
    cache_override: Option<&Path>,
    id: &str,
    kind: AnalysisKind,
    model: Model,
    quiet: bool,
) -> Result<()> {
    let api_key = config.api_key()?;

    let (store, library) = open_cache(config, cache_override)?;
    let source = GutenbergCatalog::new(config.catalog.base_url.as_str());
    let analyzer = Analyzer::new(GroqClient::new(api_key, config.groq.base_url.as_str()));
    let mut session = Session::new(library);

    let rt = tokio::runtime::Runtime::new().context("Failed to create tokio runtime")?;
    rt.block_on(session.open_book(id, &source, &store))?;

    let (book_id, record) = session
        .current_book()
        .context("Book missing from cache after fetch")?;

    if !quiet {
        println!(
            "Analyzing {} (ID: {}): {} with {}...",
            record.title.bold(),
            book_id,
            kind.as_str().cyan(),
            model.as_str().cyan()
        );
    }

    let outcome = rt.block_on(analyzer.run(&record.content, kind, model));
    report_outcome(&outcome, &mut io::stdout())?;

    if outcome.error().is_some() {
        bail!("Analysis of book {} did not complete", book_id);
    }

    Ok(())
}
