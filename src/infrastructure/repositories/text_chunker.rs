use regex::Regex;
use std::sync::OnceLock;

/// Clause boundaries: ASCII punctuation followed by whitespace, CJK and Indic
/// punctuation (no trailing space needed), or line breaks
fn clause_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"[.!?;:,]+(?:\s+|$)|[。．！？、，；：।॥]+\s*|\n+")
            .expect("clause pattern is a valid regex")
    })
}

/// Split text into chunks of at most `max_chars` characters.
///
/// Clause punctuation is preferred as a cut point, then whitespace, then a
/// hard cut. Chunks are trimmed, and chunks with nothing to pronounce
/// (no letters or digits) are dropped.
pub fn split_into_chunks(text: &str, max_chars: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_chars = 0;

    for segment in clause_segments(text) {
        let segment_chars = segment.chars().count();

        if current_chars + segment_chars > max_chars {
            push_chunk(&mut chunks, &current);
            current.clear();
            current_chars = 0;
        }

        if segment_chars > max_chars {
            for piece in split_long_segment(segment, max_chars) {
                push_chunk(&mut chunks, &piece);
            }
            continue;
        }

        current.push_str(segment);
        current_chars += segment_chars;
    }

    push_chunk(&mut chunks, &current);
    chunks
}

fn clause_segments(text: &str) -> Vec<&str> {
    let mut segments = Vec::new();
    let mut last_end = 0;

    for mat in clause_pattern().find_iter(text) {
        segments.push(&text[last_end..mat.end()]);
        last_end = mat.end();
    }
    if last_end < text.len() {
        segments.push(&text[last_end..]);
    }

    segments
}

fn split_long_segment(segment: &str, max_chars: usize) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut current = String::new();
    let mut current_chars = 0;

    for word in segment.split_inclusive(char::is_whitespace) {
        let word_chars = word.chars().count();

        if !current.is_empty() && current_chars + word_chars > max_chars {
            pieces.push(std::mem::take(&mut current));
            current_chars = 0;
        }

        if word_chars > max_chars {
            let chars: Vec<char> = word.chars().collect();
            for chunk in chars.chunks(max_chars) {
                pieces.push(chunk.iter().collect());
            }
            continue;
        }

        current.push_str(word);
        current_chars += word_chars;
    }

    if !current.is_empty() {
        pieces.push(current);
    }

    pieces
}

fn push_chunk(chunks: &mut Vec<String>, candidate: &str) {
    let trimmed = candidate.trim();
    if trimmed.chars().any(char::is_alphanumeric) {
        chunks.push(trimmed.to_string());
    }
}
