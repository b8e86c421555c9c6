//! Interactive shell: open books, browse the cache, and run analyses

pub mod render;
mod session;

pub use session::{Opened, Session};

use anyhow::{Context, Result};
use colored::Colorize;
use std::io::{BufRead, Write};
use tokio::runtime::Runtime;

use crate::analysis::{AnalysisKind, AnalysisOutcome, Analyzer, CompletionClient, Model};
use crate::cache::BookCache;
use crate::catalog::BookSource;

/// Whether the shell should keep reading input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// A parsed line of shell input
#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Open(String),
    Books,
    Select(String),
    Show,
    Type(String),
    Model(String),
    Models,
    Analyze(Option<String>),
    Help,
    Quit,
    Empty,
    Unknown(String),
}

impl Command {
    fn parse(line: &str) -> Self {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };
        let arg = (!rest.is_empty()).then(|| rest.to_string());

        match (word.to_ascii_lowercase().as_str(), arg) {
            ("", _) => Command::Empty,
            ("open", Some(id)) => Command::Open(id),
            ("books" | "list", None) => Command::Books,
            ("select", Some(selector)) => Command::Select(selector),
            ("show", None) => Command::Show,
            ("type", Some(kind)) => Command::Type(kind),
            ("model", Some(name)) => Command::Model(name),
            ("models", None) => Command::Models,
            ("analyze", kind) => Command::Analyze(kind),
            ("help" | "?", None) => Command::Help,
            ("quit" | "exit", None) => Command::Quit,
            (_, None) if word.chars().all(|c| c.is_ascii_digit()) => Command::Open(word.to_string()),
            _ => Command::Unknown(line.to_string()),
        }
    }
}

/// The interactive session loop and its collaborators
pub struct Shell<S, C> {
    session: Session,
    source: S,
    analyzer: Analyzer<C>,
    store: BookCache,
    runtime: Runtime,
}

impl<S: BookSource, C: CompletionClient> Shell<S, C> {
    pub fn new(session: Session, source: S, analyzer: Analyzer<C>, store: BookCache) -> Result<Self> {
        let runtime = Runtime::new().context("Failed to create tokio runtime")?;
        Ok(Self {
            session,
            source,
            analyzer,
            store,
            runtime,
        })
    }

    /// Read commands from `input` until EOF or `quit`
    pub fn run(&mut self, mut input: impl BufRead, out: &mut impl Write) -> Result<()> {
        render::banner(out)?;
        render::sidebar(&self.session.library, None, out)?;

        let mut line = String::new();
        loop {
            write!(out, "{} ", ">".green().bold())?;
            out.flush()?;

            line.clear();
            if input.read_line(&mut line)? == 0 {
                writeln!(out)?;
                break;
            }

            if self.handle_line(&line, out)? == Flow::Quit {
                break;
            }
        }

        Ok(())
    }

    /// Handle one line of input. Fetch and analysis errors are reported to
    /// `out`; only failures to write output are returned.
    pub fn handle_line(&mut self, line: &str, out: &mut impl Write) -> Result<Flow> {
        match Command::parse(line) {
            Command::Empty => {}
            Command::Open(book_id) => self.open(&book_id, out)?,
            Command::Books => {
                render::sidebar(&self.session.library, self.session.current_book_id.as_deref(), out)?
            }
            Command::Select(selector) => {
                if self.session.select(&selector).is_some() {
                    self.show(out)?;
                } else {
                    render::error(format!("No cached book matches '{}'", selector), out)?;
                }
            }
            Command::Show => self.show(out)?,
            Command::Type(name) => match AnalysisKind::parse(&name) {
                Some(kind) => {
                    self.session.analysis_kind = kind;
                    writeln!(out, "Analysis type: {}", kind.as_str().cyan())?;
                }
                None => render::error(
                    format!(
                        "Unknown analysis type '{}' (expected {})",
                        name,
                        render::analysis_kinds()
                    ),
                    out,
                )?,
            },
            Command::Model(name) => match Model::parse(&name) {
                Some(model) => {
                    self.session.model = model;
                    writeln!(out, "Model: {}", model.as_str().cyan())?;
                }
                None => {
                    render::error(format!("Unknown model '{}'", name), out)?;
                    render::models(self.session.model, out)?;
                }
            },
            Command::Models => render::models(self.session.model, out)?,
            Command::Analyze(kind) => self.analyze(kind.as_deref(), out)?,
            Command::Help => render::help(out)?,
            Command::Quit => return Ok(Flow::Quit),
            Command::Unknown(input) => {
                render::error(format!("Unknown command '{}'", input), out)?;
                writeln!(out, "Type {} for a list of commands.", "help".cyan())?;
            }
        }

        Ok(Flow::Continue)
    }

    fn open(&mut self, book_id: &str, out: &mut impl Write) -> Result<()> {
        let cached = self.session.library.contains(book_id.trim());
        if !cached {
            writeln!(out, "Fetching book {}...", book_id.trim())?;
            out.flush()?;
        }

        let opened = self
            .runtime
            .block_on(self.session.open_book(book_id, &self.source, &self.store));

        match opened {
            Ok(_) => self.show(out),
            Err(e) => {
                render::error(e, out)?;
                Ok(())
            }
        }
    }

    fn show(&self, out: &mut impl Write) -> Result<()> {
        match self.session.current_book() {
            Some((book_id, record)) => {
                render::book(book_id, record, out)?;
                writeln!(
                    out,
                    "Analysis type: {}  Model: {}",
                    self.session.analysis_kind.as_str().cyan(),
                    self.session.model.as_str().cyan()
                )?;
            }
            None => writeln!(out, "No book selected. Enter a book ID to get started.")?,
        }
        Ok(())
    }

    fn analyze(&self, analysis_type: Option<&str>, out: &mut impl Write) -> Result<()> {
        let Some((_, record)) = self.session.current_book() else {
            writeln!(out, "No book selected. Enter a book ID to get started.")?;
            return Ok(());
        };

        let analysis_type = analysis_type.unwrap_or(self.session.analysis_kind.as_str());
        writeln!(out, "Analyzing...")?;
        out.flush()?;

        let outcome = self.runtime.block_on(self.analyzer.analyze(
            &record.content,
            analysis_type,
            self.session.model,
        ));

        report_outcome(&outcome, out)
    }
}

/// Print an analysis result, with the error first if the request failed
pub fn report_outcome(outcome: &AnalysisOutcome, out: &mut impl Write) -> Result<()> {
    if let Some(e) = outcome.error() {
        render::error(format!("Error during analysis: {}", e), out)?;
    }
    writeln!(out, "{}", "Analysis Result:".bold())?;
    writeln!(out, "{}", outcome.text())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::CompletionRequest;
    use crate::cache::Library;
    use crate::catalog::FetchedBook;
    use crate::error::{CompletionError, FetchError};
    use std::cell::Cell;
    use std::rc::Rc;
    use tempfile::TempDir;

    struct StubSource;

    impl BookSource for StubSource {
        async fn fetch(&self, book_id: &str) -> Result<FetchedBook, FetchError> {
            match book_id {
                "1787" => Ok(FetchedBook {
                    title: "Hamlet".to_string(),
                    content: "Who's there? Nay, answer me.".to_string(),
                }),
                _ => Err(FetchError::MissingPlainText(book_id.to_string())),
            }
        }
    }

    /// Echoes the model name, or fails when `fail` is set; counts calls
    struct StubClient {
        fail: bool,
        calls: Rc<Cell<usize>>,
    }

    impl CompletionClient for StubClient {
        async fn complete(&self, request: &CompletionRequest) -> Result<String, CompletionError> {
            self.calls.set(self.calls.get() + 1);
            if self.fail {
                Err(CompletionError::EmptyResponse)
            } else {
                Ok(format!("analyzed by {}", request.model))
            }
        }
    }

    struct Fixture {
        shell: Shell<StubSource, StubClient>,
        calls: Rc<Cell<usize>>,
        _temp: TempDir,
    }

    fn fixture(fail: bool) -> Fixture {
        let temp = TempDir::new().unwrap();
        let calls = Rc::new(Cell::new(0));
        let client = StubClient {
            fail,
            calls: Rc::clone(&calls),
        };
        let shell = Shell::new(
            Session::new(Library::new()),
            StubSource,
            Analyzer::new(client),
            BookCache::new(temp.path().join("books.json")),
        )
        .unwrap();

        Fixture {
            shell,
            calls,
            _temp: temp,
        }
    }

    fn send(shell: &mut Shell<StubSource, StubClient>, line: &str) -> (Flow, String) {
        let mut out = Vec::new();
        let flow = shell.handle_line(line, &mut out).unwrap();
        (flow, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(Command::parse("1787"), Command::Open("1787".to_string()));
        assert_eq!(Command::parse("open pg-11"), Command::Open("pg-11".to_string()));
        assert_eq!(Command::parse("  LIST "), Command::Books);
        assert_eq!(Command::parse("analyze"), Command::Analyze(None));
        assert_eq!(
            Command::parse("analyze foo"),
            Command::Analyze(Some("foo".to_string()))
        );
        assert_eq!(Command::parse(""), Command::Empty);
        assert_eq!(Command::parse("exit"), Command::Quit);
        assert_eq!(Command::parse("hamlet"), Command::Unknown("hamlet".to_string()));
        assert_eq!(Command::parse("open"), Command::Unknown("open".to_string()));
    }

    #[test]
    fn test_open_fetches_and_previews() {
        let mut f = fixture(false);
        let (flow, output) = send(&mut f.shell, "1787");

        assert_eq!(flow, Flow::Continue);
        assert!(output.contains("Fetching book 1787..."));
        assert!(output.contains("Hamlet"));
        assert!(output.contains("Who's there? Nay, answer me...."));
        assert_eq!(f.shell.session.current_book_id.as_deref(), Some("1787"));
    }

    #[test]
    fn test_open_failure_is_reported_inline() {
        let mut f = fixture(false);
        let (flow, output) = send(&mut f.shell, "404");

        assert_eq!(flow, Flow::Continue);
        assert!(output.contains("No Plain Text UTF-8 file found for book ID 404."));
        assert!(f.shell.session.library.is_empty());
        assert!(f.shell.session.current_book_id.is_none());
    }

    #[test]
    fn test_books_lists_cache() {
        let mut f = fixture(false);
        let (_, output) = send(&mut f.shell, "books");
        assert!(output.contains("No books yet!"));

        send(&mut f.shell, "1787");
        let (_, output) = send(&mut f.shell, "books");
        assert!(output.contains("Hamlet (ID: 1787)"));
    }

    #[test]
    fn test_analyze_without_book() {
        let mut f = fixture(false);
        let (_, output) = send(&mut f.shell, "analyze");
        assert!(output.contains("No book selected"));
        assert_eq!(f.calls.get(), 0);
    }

    #[test]
    fn test_analyze_uses_selected_model() {
        let mut f = fixture(false);
        send(&mut f.shell, "1787");
        send(&mut f.shell, "model mixtral-8x7b-32768");
        let (_, output) = send(&mut f.shell, "analyze");

        assert!(output.contains("analyzed by mixtral-8x7b-32768"));
        assert_eq!(f.calls.get(), 1);
    }

    #[test]
    fn test_analyze_unknown_type_skips_api() {
        let mut f = fixture(false);
        send(&mut f.shell, "1787");
        let (_, output) = send(&mut f.shell, "analyze foo");

        assert!(output.contains("Invalid analysis type"));
        assert_eq!(f.calls.get(), 0);
    }

    #[test]
    fn test_analyze_failure_shows_placeholder() {
        let mut f = fixture(true);
        send(&mut f.shell, "1787");
        let (flow, output) = send(&mut f.shell, "analyze sentiment");

        assert_eq!(flow, Flow::Continue);
        assert!(output.contains("Error during analysis"));
        assert!(output.contains("Analysis failed."));
        assert_eq!(f.calls.get(), 1);
    }

    #[test]
    fn test_type_selector() {
        let mut f = fixture(false);
        send(&mut f.shell, "type characters");
        assert_eq!(f.shell.session.analysis_kind, AnalysisKind::Characters);

        let (_, output) = send(&mut f.shell, "type poetry");
        assert!(output.contains("Unknown analysis type 'poetry'"));
        assert_eq!(f.shell.session.analysis_kind, AnalysisKind::Characters);
    }

    #[test]
    fn test_unknown_model_keeps_selection() {
        let mut f = fixture(false);
        let (_, output) = send(&mut f.shell, "model gpt-4o");
        assert!(output.contains("Unknown model 'gpt-4o'"));
        assert_eq!(f.shell.session.model, Model::default());
    }

    #[test]
    fn test_run_until_quit() {
        let mut f = fixture(false);
        let input = "1787\nbooks\nquit\n9999\n";
        let mut out = Vec::new();

        f.shell.run(input.as_bytes(), &mut out).unwrap();

        let output = String::from_utf8(out).unwrap();
        assert!(output.contains("Project Gutenberg Explorer"));
        assert!(output.contains("Hamlet (ID: 1787)"));
        // Input after quit is never read
        assert!(!output.contains("Fetching book 9999"));
    }

    #[test]
    fn test_run_stops_at_eof() {
        let mut f = fixture(false);
        let mut out = Vec::new();
        f.shell.run("help\n".as_bytes(), &mut out).unwrap();

        let output = String::from_utf8(out).unwrap();
        assert!(output.contains("Analysis types: summary, sentiment, characters"));
    }
}
