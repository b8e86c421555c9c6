use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::analysis::{AnalysisKind, Model};
use crate::condense::DEFAULT_MAX_CHARS;

#[derive(Parser)]
#[command(name = "gutenbergctl")]
#[command(about = "CLI tool for fetching Project Gutenberg e-books and analyzing them with an LLM")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to the config file (default: ~/.config/gutenbergctl/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Path to the book cache file (overrides the config file)
    #[arg(long, global = true)]
    pub cache: Option<PathBuf>,

    /// Increase output verbosity
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Browse, fetch, and analyze books interactively
    Explore,

    /// Fetch a book from Project Gutenberg into the cache
    Fetch {
        /// Project Gutenberg book ID (e.g. 1342 for Pride and Prejudice)
        id: String,
    },

    /// List previously accessed books
    List,

    /// Show a cached book
    Show {
        /// Project Gutenberg book ID
        id: String,

        /// Print the full text instead of a preview
        #[arg(long)]
        full: bool,
    },

    /// Analyze a book with an LLM (fetches it first if needed)
    Analyze {
        /// Project Gutenberg book ID
        id: String,

        /// Kind of analysis
        #[arg(long, value_enum, default_value_t = AnalysisKind::Summary)]
        kind: AnalysisKind,

        /// Model to use
        #[arg(long, value_enum, default_value_t = Model::Llama3_70b)]
        model: Model,
    },

    /// Print the condensed excerpt that would be sent for analysis
    Condense {
        /// Text file to condense ("-" reads stdin)
        file: PathBuf,

        /// Maximum number of characters to output
        #[arg(long, default_value_t = DEFAULT_MAX_CHARS)]
        max_chars: usize,
    },

    /// Create a config file interactively
    Init {
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },
}
