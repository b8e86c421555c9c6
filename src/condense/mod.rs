//! Condense full book text into a bounded excerpt for an LLM prompt
//!
//! The text is cut into fixed-size chunks and each chunk contributes its
//! longest "qualifying" sentences (dialogue or proper nouns). Chunks without
//! any qualifying sentence contribute their first sentence instead.

mod sentences;

pub use sentences::{is_qualifying, split_sentences};

/// Default cap on condensed output, in characters (~2,500 tokens)
pub const DEFAULT_MAX_CHARS: usize = 10_000;

/// Size of each sampling chunk, in characters
pub const CHUNK_SIZE: usize = 5_000;

/// Boilerplate marker that precedes the body of a Gutenberg e-book
pub const START_MARKER: &str = "*** START OF THE PROJECT GUTENBERG EBOOK";

/// Characters skipped from the start of the marker to clear the header line
const MARKER_SKIP: usize = 100;

/// Condense `text` to at most `max_chars` characters.
///
/// Deterministic for a given input; empty input yields an empty string.
pub fn condense(text: &str, max_chars: usize) -> String {
    let body = strip_front_matter(text);
    let chunks = chunk_text(body, CHUNK_SIZE);
    let total = chunks.len();

    let mut selected: Vec<&str> = Vec::new();

    for (index, chunk) in chunks.iter().enumerate() {
        let sentences = split_sentences(chunk);
        let mut key_sentences: Vec<&str> = sentences
            .iter()
            .copied()
            .filter(|s| is_qualifying(s))
            .collect();

        if key_sentences.is_empty() {
            selected.push(sentences.first().copied().unwrap_or(""));
            continue;
        }

        // Stable sort: equal lengths keep their order in the text
        key_sentences.sort_by_key(|s| std::cmp::Reverse(s.chars().count()));
        selected.extend(key_sentences.into_iter().take(chunk_weight(index, total)));
    }

    truncate_chars(selected.join(" "), max_chars)
}

/// Number of sentences chunk `index` of `total` may contribute
pub fn chunk_weight(index: usize, total: usize) -> usize {
    2.min(total.saturating_sub(index))
}

/// Drop everything before the marker plus the rest of its header line.
///
/// Returns the text unchanged if the marker is absent.
fn strip_front_matter(text: &str) -> &str {
    let Some(marker_at) = text.find(START_MARKER) else {
        return text;
    };

    let after_marker = &text[marker_at..];
    match after_marker.char_indices().nth(MARKER_SKIP) {
        Some((offset, _)) => &after_marker[offset..],
        None => "",
    }
}

/// Split text into contiguous chunks of `size` characters
fn chunk_text(text: &str, size: usize) -> Vec<&str> {
    let mut chunks = Vec::new();
    let mut start = 0;
    let mut count = 0;

    for (offset, _) in text.char_indices() {
        if count == size {
            chunks.push(&text[start..offset]);
            start = offset;
            count = 0;
        }
        count += 1;
    }

    if count > 0 {
        chunks.push(&text[start..]);
    }

    chunks
}

/// Hard cut at `max_chars` characters
fn truncate_chars(text: String, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((offset, _)) => text[..offset].to_string(),
        None => text,
    }
}
