//! Text rendering for the interactive shell

use colored::Colorize;
use std::io::{self, Write};

use crate::analysis::{AnalysisKind, Model};
use crate::cache::{BookRecord, Library};

/// Number of content characters shown in a preview
pub const PREVIEW_CHARS: usize = 1000;

/// First `PREVIEW_CHARS` characters of the content, followed by "..."
pub fn preview(content: &str) -> String {
    let mut shown: String = content.chars().take(PREVIEW_CHARS).collect();
    shown.push_str("...");
    shown
}

pub fn banner(out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "{}", "Project Gutenberg Explorer".bold())?;
    writeln!(
        out,
        "Enter a Project Gutenberg book ID to explore and analyze free e-books!"
    )?;
    writeln!(
        out,
        "Try 1787 (Hamlet), 1342 (Pride and Prejudice), or 84 (Frankenstein). Type {} for commands.",
        "help".cyan()
    )?;
    writeln!(out)
}

/// List of previously accessed books
pub fn sidebar(library: &Library, current: Option<&str>, out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "{}", "Previously Accessed Books".bold())?;

    if library.is_empty() {
        return writeln!(out, "  No books yet!");
    }

    for (position, (book_id, record)) in library.iter().enumerate() {
        let marker = if current == Some(book_id) { "*" } else { " " };
        writeln!(
            out,
            "{} {:>3}. {} (ID: {})",
            marker,
            position + 1,
            record.title,
            book_id
        )?;
    }
    Ok(())
}

/// Title plus content preview
pub fn book(book_id: &str, record: &BookRecord, out: &mut impl Write) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{} {}", record.title.bold(), format!("(ID: {})", book_id).dimmed())?;
    writeln!(out, "{}", "─".repeat(40))?;
    writeln!(out, "{}", preview(&record.content))?;
    writeln!(out, "{}", "─".repeat(40))
}

/// Available models, marking the selected and recommended ones
pub fn models(selected: Model, out: &mut impl Write) -> io::Result<()> {
    for model in Model::ALL {
        let marker = if model == selected { "*" } else { " " };
        if model.is_recommended() {
            writeln!(
                out,
                "{} {} {}",
                marker,
                model.as_str(),
                "(recommended: best overall for summary, sentiment, and characters)".green()
            )?;
        } else {
            writeln!(out, "{} {}", marker, model.as_str())?;
        }
    }
    Ok(())
}

/// Comma-separated analysis type names
pub fn analysis_kinds() -> String {
    AnalysisKind::ALL
        .iter()
        .map(AnalysisKind::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn help(out: &mut impl Write) -> io::Result<()> {
    let commands = [
        ("<id>, open <id>", "Open a book by catalog ID (fetched on first use)"),
        ("books, list", "List previously accessed books"),
        ("select <n|id>", "Make a listed book current (ID takes precedence over position)"),
        ("show", "Show the current book again"),
        ("type <kind>", "Choose the analysis type"),
        ("model <name>", "Choose the model"),
        ("models", "List available models"),
        ("analyze [kind]", "Analyze the current book"),
        ("help", "Show this help"),
        ("quit, exit", "Leave the shell"),
    ];

    for (usage, description) in commands {
        writeln!(out, "  {:<18} {}", usage.cyan(), description)?;
    }
    writeln!(out)?;
    writeln!(out, "Analysis types: {}", analysis_kinds())
}

pub fn error(message: impl std::fmt::Display, out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "{}: {}", "Error".red().bold(), message)
}

pub fn warning(message: impl std::fmt::Display, out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "{}: {}", "Warning".yellow(), message)
}
