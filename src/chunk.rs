//! Size-bounded text chunking.
//!
//! Splits a formatted document into pieces no longer than a character
//! budget, preferring to break at newlines so no line is split when that
//! can be avoided. Pure and restartable: same input, same chunks.

use memchr::memrchr;

/// Split `text` into ordered chunks of at most `max_chars` characters.
///
/// From each offset the end is proposed `max_chars` characters ahead; if
/// that lands before the end of the text, the split moves back to the
/// nearest newline strictly after the offset. Each chunk is emitted
/// trimmed. Empty input yields a single empty chunk.
///
/// Every step strictly advances, so this terminates for all inputs; a
/// budget of zero is treated as one.
pub fn chunk_text(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    if text.is_empty() {
        return vec![String::new()];
    }

    let bytes = text.as_bytes();
    let mut chunks = Vec::new();
    let mut start = 0usize;
    while start < bytes.len() {
        let mut end = char_end(text, start, max_chars);
        if end < bytes.len() {
            // A newline at `start` itself is not a valid break; it would
            // stall the walk.
            if let Some(offset) = memrchr(b'\n', &bytes[start..end]) {
                if offset > 0 {
                    end = start + offset;
                }
            }
        }
        chunks.push(text[start..end].trim().to_string());
        start = end;
    }
    chunks
}

/// Byte offset `count` characters past `start`, clamped to the text length.
fn char_end(text: &str, start: usize, count: usize) -> usize {
    match text[start..].char_indices().nth(count) {
        Some((offset, _)) => start + offset,
        None => text.len(),
    }
}
