//! Error types for catalog fetches, LLM completions, and configuration

use thiserror::Error;

/// Failure to retrieve a book from the catalog
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Error fetching metadata page: {0}")]
    Metadata(#[source] reqwest::Error),

    #[error("No Plain Text UTF-8 file found for book ID {0}.")]
    MissingPlainText(String),

    #[error("Error fetching book content: {0}")]
    Content(#[source] reqwest::Error),
}

/// Failure of a chat completion request
#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("API returned status {status}: {message}")]
    Api { status: u16, message: String },

    #[error("response contained no completion text")]
    EmptyResponse,
}

/// Fatal configuration problems detected at startup
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("GROQ_API_KEY not found in the environment or config file. Please set it.")]
    MissingApiKey,
}

/// Failure to open a book in the interactive session
#[derive(Debug, Error)]
pub enum OpenError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("Failed to save book to cache: {0:#}")]
    Persist(anyhow::Error),
}
