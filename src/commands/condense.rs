use anyhow::{Context, Result};
use std::io::{self, Read};
use std::path::Path;
use tracing::info;

use crate::condense::condense;

/// Run the condense command - print the excerpt a book would be reduced to
pub fn run(file: &Path, max_chars: usize) -> Result<()> {
    let text = if file == Path::new("-") {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read stdin")?;
        text
    } else {
        std::fs::read_to_string(file)
            .with_context(|| format!("Failed to read {}", file.display()))?
    };

    let condensed = condense(&text, max_chars);
    info!(
        "Condensed {} chars to {}",
        text.chars().count(),
        condensed.chars().count()
    );

    println!("{}", condensed);
    Ok(())
}
