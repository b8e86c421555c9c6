//! Sentence splitting and the qualifying-sentence heuristic

use regex::Regex;
use std::sync::LazyLock;

/// Sentence-ending punctuation followed by a run of whitespace
static BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?]\s+").expect("boundary pattern is valid"));

/// An uppercase letter followed by lowercase letters (names, sentence starts)
static CAPITALIZED_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Z][a-z]+").expect("capitalized-word pattern is valid"));

/// Split text into sentences at whitespace runs that follow `.`, `!` or `?`.
///
/// The punctuation stays with the sentence it ends and the whitespace run is
/// dropped. Text after the last boundary is always returned as a final piece,
/// even when it is empty.
pub fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;

    for boundary in BOUNDARY.find_iter(text) {
        // Punctuation is a single ASCII byte
        sentences.push(&text[start..boundary.start() + 1]);
        start = boundary.end();
    }

    sentences.push(&text[start..]);
    sentences
}

/// Check whether a sentence looks like dialogue or mentions a proper noun
pub fn is_qualifying(sentence: &str) -> bool {
    sentence.contains('"') || CAPITALIZED_WORD.is_match(sentence)
}
