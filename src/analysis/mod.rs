//! LLM-backed analysis of book text

mod analyzer;
mod client;
mod kind;
mod model;

pub use analyzer::{AnalysisOutcome, Analyzer};
pub use client::{CompletionClient, CompletionRequest, GroqClient, DEFAULT_BASE_URL};
pub use kind::AnalysisKind;
pub use model::Model;
