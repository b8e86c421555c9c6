use std::time::Duration;
use tracing::{info, warn};

use super::client::{ChatMessage, CompletionClient, CompletionRequest};
use super::kind::{AnalysisKind, INVALID_ANALYSIS_TYPE};
use super::model::Model;
use crate::condense::{condense, DEFAULT_MAX_CHARS};
use crate::error::CompletionError;

/// Text shown when the completion request fails
pub const ANALYSIS_FAILED: &str = "Analysis failed.";

pub const MAX_TOKENS: u32 = 700;
pub const TEMPERATURE: f32 = 0.5;
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

/// What came back from an analysis
#[derive(Debug)]
pub enum AnalysisOutcome {
    Completed(String),
    /// The analysis type name was not recognized; no request was made
    InvalidType,
    Failed(CompletionError),
}

impl AnalysisOutcome {
    /// Text to show the user
    pub fn text(&self) -> &str {
        match self {
            AnalysisOutcome::Completed(text) => text,
            AnalysisOutcome::InvalidType => INVALID_ANALYSIS_TYPE,
            AnalysisOutcome::Failed(_) => ANALYSIS_FAILED,
        }
    }

    pub fn error(&self) -> Option<&CompletionError> {
        match self {
            AnalysisOutcome::Failed(e) => Some(e),
            _ => None,
        }
    }
}

/// Condenses book text and asks the model about it
pub struct Analyzer<C> {
    client: C,
}

impl<C: CompletionClient> Analyzer<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    /// Analyze `content` with an analysis type given by name
    pub async fn analyze(&self, content: &str, analysis_type: &str, model: Model) -> AnalysisOutcome {
        match AnalysisKind::parse(analysis_type) {
            Some(kind) => self.run(content, kind, model).await,
            None => {
                warn!("Unknown analysis type: {:?}", analysis_type);
                AnalysisOutcome::InvalidType
            }
        }
    }

    pub async fn run(&self, content: &str, kind: AnalysisKind, model: Model) -> AnalysisOutcome {
        let request = build_request(content, kind, model);

        match self.client.complete(&request).await {
            Ok(text) => {
                info!("{} analysis with {} complete", kind, model);
                AnalysisOutcome::Completed(text)
            }
            Err(e) => {
                warn!("{} analysis with {} failed: {}", kind, model, e);
                AnalysisOutcome::Failed(e)
            }
        }
    }
}

/// Condense `content` and wrap it in the prompt for `kind`
pub fn build_request(content: &str, kind: AnalysisKind, model: Model) -> CompletionRequest {
    let condensed = condense(content, DEFAULT_MAX_CHARS);

    CompletionRequest {
        model: model.as_str().to_string(),
        messages: vec![ChatMessage::user(kind.prompt(&condensed))],
        max_tokens: MAX_TOKENS,
        temperature: TEMPERATURE,
        timeout: REQUEST_TIMEOUT,
    }
}
